/*
    sealink-net-tokio
        TCP plumbing for sealink sessions: dial/accept helpers plus
        identity key files.
 */

mod conn;
mod error;
mod identity;

pub use conn::{accept_tcp, dial_tcp};
pub use error::NetError;
pub use identity::{load_public_key, load_secret_key, save_keypair};
