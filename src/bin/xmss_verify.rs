use std::env;
use std::fs;
use std::io::{self, Write};
use std::process;

use xmss_signatures::xmss::XmssPublicKey;

fn main() {
    let args: Vec<String> = env::args().collect();
    if args.len() != 3 {
        eprintln!("usage: xmss_verify <public-key-file> <signature-file>");
        process::exit(2);
    }

    if let Err(message) = run(&args[1], &args[2]) {
        eprintln!("xmss_verify: {}", message);
        process::exit(1);
    }
}

fn run(pk_path: &str, sig_path: &str) -> Result<(), String> {
    let pk_bytes = fs::read(pk_path).map_err(|e| format!("reading {}: {}", pk_path, e))?;
    let (_, public_key) = XmssPublicKey::from_file_bytes(&pk_bytes).map_err(|e| e.to_string())?;

    let sig_bytes = fs::read(sig_path).map_err(|e| format!("reading {}: {}", sig_path, e))?;
    let message = public_key
        .verify_bytes(&sig_bytes)
        .map_err(|e| e.to_string())?;

    io::stdout()
        .write_all(&message)
        .map_err(|e| e.to_string())?;
    Ok(())
}
