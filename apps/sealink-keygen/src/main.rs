use std::path::Path;

use anyhow::{Context, Result};
use clap::Parser;

use sealink_core::crypto::CryptoProvider;
use sealink_crypto_sodium::SodiumCrypto;
use sealink_net_tokio::save_keypair;

#[derive(Parser)]
#[command(
    name = "sealink-keygen",
    version,
    about = "Generate identity keypairs for sealink secure channels"
)]
struct Cli {
    /// Basenames; each produces <name>.key (private, 0600) and
    /// <name>.pub (public, 0644) in raw binary form.
    #[arg(required = true)]
    basenames: Vec<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let crypto = SodiumCrypto::new();

    for name in &cli.basenames {
        let (secret, public) = crypto
            .ed25519_keypair()
            .await
            .context("keypair generation failed")?;

        save_keypair(Path::new(name), &secret, &public)
            .with_context(|| format!("failed to write key files for {name}"))?;

        println!("{name}: wrote {name}.key and {name}.pub");
    }

    Ok(())
}
