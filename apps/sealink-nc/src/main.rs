use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{bail, Context, Result};
use clap::Parser;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};
use tracing::{error, info};

use sealink_core::crypto::{CryptoProvider, IdentityPublic, IdentitySecret};
use sealink_core::envelope::MessageType;
use sealink_core::Session;
use sealink_crypto_sodium::SodiumCrypto;
use sealink_net_tokio::{accept_tcp, dial_tcp, load_public_key, load_secret_key};

#[derive(Parser)]
#[command(
    name = "sealink-nc",
    version,
    about = "netcat-like tool speaking sealink secure channels",
    after_help = "If a signature key is given it signs the key exchange. If a \
verification key is given it is used to verify the peer's signature."
)]
struct Cli {
    /// Listen for an incoming connection
    #[arg(short = 'l', long)]
    listen: bool,

    /// Keep listening after the client disconnects (requires -l)
    #[arg(short = 'k', long = "keep-open", requires = "listen")]
    keep_open: bool,

    /// Path to a signature key (64-byte identity private key)
    #[arg(short = 's', long)]
    signer: Option<PathBuf>,

    /// Path to a verification key (32-byte identity public key)
    #[arg(short = 'v', long)]
    verifier: Option<PathBuf>,

    /// `host port` when dialing, `port` when listening
    #[arg(required = true)]
    target: Vec<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt().with_target(false).init();

    let cli = Cli::parse();

    let signer = cli
        .signer
        .as_deref()
        .map(load_secret_key)
        .transpose()
        .context("failed to load signature key")?;

    let verifier = cli
        .verifier
        .as_deref()
        .map(load_public_key)
        .transpose()
        .context("failed to load verification key")?;

    if let Some(pk) = &verifier {
        info!("verifying peer against {}", hex::encode(pk.0));
    }

    if cli.listen {
        if cli.target.len() != 1 {
            bail!("a port is required (and should be the only argument) when listening");
        }
        return run_listener(&cli.target[0], cli.keep_open, signer.as_ref(), verifier.as_ref())
            .await;
    }

    if cli.target.len() != 2 {
        bail!("an address and port are required (and should be the only arguments)");
    }
    let addr = format!("{}:{}", cli.target[0], cli.target[1]);
    run_dialer(&addr, signer.as_ref(), verifier.as_ref()).await
}

async fn run_listener(
    port: &str,
    keep_open: bool,
    signer: Option<&IdentitySecret>,
    verifier: Option<&IdentityPublic>,
) -> Result<()> {
    let port: u16 = port.parse().context("invalid port")?;
    let listener = TcpListener::bind(("0.0.0.0", port))
        .await
        .with_context(|| format!("failed to bind port {port}"))?;

    let crypto: Arc<dyn CryptoProvider> = Arc::new(SodiumCrypto::new());

    info!("listening on port {port}");
    loop {
        let result = match accept_tcp(&listener, crypto.clone(), signer, verifier).await {
            Ok((session, peer)) => serve(session, peer).await,
            Err(e) => Err(e).context("failed to establish secure channel"),
        };

        match result {
            Ok(()) => {}
            Err(e) if keep_open => error!("connection failed: {e:#}"),
            Err(e) => return Err(e),
        }

        if !keep_open {
            return Ok(());
        }
    }
}

async fn serve(mut session: Session<TcpStream>, peer: SocketAddr) -> Result<()> {
    info!("secure channel established with {peer}");

    let mut stdout = tokio::io::stdout();
    loop {
        let msg = match session.receive().await {
            Ok(msg) => msg,
            Err(e) => {
                session.zero();
                return Err(e).context("receive failed");
            }
        };

        match msg.msg_type {
            MessageType::Shutdown => {
                info!("peer is shutting down");
                break;
            }
            MessageType::Kex => info!("keys rotated"),
            MessageType::Normal => {
                stdout.write_all(&msg.contents).await?;
                stdout.flush().await?;
            }
        }
    }

    // The shutdown envelope itself is not a message the peer sent us.
    let received = session.recv_ctr().saturating_sub(1);
    info!(
        "received {received} messages with {} bytes",
        session.bytes_received()
    );

    session.zero();
    info!("secure channel shut down");
    Ok(())
}

async fn run_dialer(
    addr: &str,
    signer: Option<&IdentitySecret>,
    verifier: Option<&IdentityPublic>,
) -> Result<()> {
    let crypto: Arc<dyn CryptoProvider> = Arc::new(SodiumCrypto::new());

    let mut session = dial_tcp(addr, crypto, signer, verifier)
        .await
        .context("failed to establish secure channel")?;
    info!("secure channel established with {addr}");

    // Retire the handshake keys straight away; everything after this rides
    // on rotated session keys.
    session.rekey().await.context("rekey failed")?;

    let mut stdin = tokio::io::stdin();
    let mut chunk = vec![0u8; 8192];
    loop {
        let n = stdin.read(&mut chunk).await.context("stdin read failed")?;
        if n == 0 {
            break;
        }

        session
            .send(&chunk[..n])
            .await
            .with_context(|| {
                format!(
                    "failed to send message (sent={}, sctr={})",
                    session.bytes_sent(),
                    session.send_ctr()
                )
            })?;
    }

    let sent = session.send_ctr();
    let bytes = session.bytes_sent();

    session
        .close()
        .await
        .context("failed to shut down the channel properly")?;

    info!("secure channel torn down");
    info!("{sent} messages totalling {bytes} bytes sent");
    Ok(())
}
