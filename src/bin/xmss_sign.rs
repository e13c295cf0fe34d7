use std::env;
use std::fs;
use std::process;

use xmss_signatures::xmss::XmssSecretKey;

fn main() {
    let args: Vec<String> = env::args().collect();
    if args.len() != 4 {
        eprintln!("usage: xmss_sign <secret-key-file> <message-file> <signature-file>");
        process::exit(2);
    }

    if let Err(message) = run(&args[1], &args[2], &args[3]) {
        eprintln!("xmss_sign: {}", message);
        process::exit(1);
    }
}

fn run(sk_path: &str, msg_path: &str, sig_path: &str) -> Result<(), String> {
    let sk_bytes = fs::read(sk_path).map_err(|e| format!("reading {}: {}", sk_path, e))?;
    let (oid, mut secret_key) =
        XmssSecretKey::from_file_bytes(&sk_bytes).map_err(|e| e.to_string())?;

    let message = fs::read(msg_path).map_err(|e| format!("reading {}: {}", msg_path, e))?;
    let signature = secret_key.sign(&message).map_err(|e| e.to_string())?;

    // The burned index is persisted before the signature leaves the
    // process; a crash between the two writes costs one signature, never
    // an index reuse.
    fs::write(sk_path, secret_key.to_file_bytes(oid))
        .map_err(|e| format!("writing {}: {}", sk_path, e))?;
    fs::write(sig_path, signature.to_bytes())
        .map_err(|e| format!("writing {}: {}", sig_path, e))?;
    Ok(())
}
