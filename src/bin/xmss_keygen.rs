use std::env;
use std::fs;
use std::process;

use xmss_signatures::params;
use xmss_signatures::xmss::XmssKeypair;

fn main() {
    let args: Vec<String> = env::args().collect();
    if args.len() != 4 {
        eprintln!("usage: xmss_keygen <parameter-set> <public-key-file> <secret-key-file>");
        eprintln!("parameter sets: {}", params::registered_names().join(", "));
        process::exit(2);
    }

    if let Err(message) = run(&args[1], &args[2], &args[3]) {
        eprintln!("xmss_keygen: {}", message);
        process::exit(1);
    }
}

fn run(name: &str, pk_path: &str, sk_path: &str) -> Result<(), String> {
    let oid = params::str_to_oid(name).map_err(|e| e.to_string())?;
    let parameter_set = params::oid_to_params(oid).map_err(|e| e.to_string())?;

    let keypair = XmssKeypair::generate(&parameter_set).map_err(|e| e.to_string())?;

    fs::write(pk_path, keypair.public_key().to_file_bytes(oid))
        .map_err(|e| format!("writing {}: {}", pk_path, e))?;
    fs::write(sk_path, keypair.secret_key().to_file_bytes(oid))
        .map_err(|e| format!("writing {}: {}", sk_path, e))?;
    Ok(())
}
