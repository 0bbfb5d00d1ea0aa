use std::fs;
use std::path::Path;

use sealink_core::crypto::{
    IdentityPublic, IdentitySecret, IDENTITY_PUBLIC_SIZE, IDENTITY_SECRET_SIZE,
};

use crate::NetError;

/*
    Identity key files are opaque binary blobs with no framing:
        <name>.key  64-byte Ed25519 private key, mode 0600
        <name>.pub  32-byte Ed25519 public key, mode 0644
*/

fn read_exact_len(path: &Path, expected: usize) -> Result<Vec<u8>, NetError> {
    let bytes = fs::read(path)?;
    if bytes.len() != expected {
        return Err(NetError::KeyFile {
            path: path.display().to_string(),
            got: bytes.len(),
            expected,
        });
    }
    Ok(bytes)
}

/// Load a 64-byte identity private key.
pub fn load_secret_key(path: impl AsRef<Path>) -> Result<IdentitySecret, NetError> {
    let bytes = read_exact_len(path.as_ref(), IDENTITY_SECRET_SIZE)?;

    let mut sk = [0u8; IDENTITY_SECRET_SIZE];
    sk.copy_from_slice(&bytes);
    Ok(IdentitySecret(sk))
}

/// Load a 32-byte identity public key.
pub fn load_public_key(path: impl AsRef<Path>) -> Result<IdentityPublic, NetError> {
    let bytes = read_exact_len(path.as_ref(), IDENTITY_PUBLIC_SIZE)?;

    let mut pk = [0u8; IDENTITY_PUBLIC_SIZE];
    pk.copy_from_slice(&bytes);
    Ok(IdentityPublic(pk))
}

/// Write `<base>.key` / `<base>.pub` for an identity keypair. The private
/// file is readable only by its owner.
pub fn save_keypair(
    base: impl AsRef<Path>,
    secret: &IdentitySecret,
    public: &IdentityPublic,
) -> Result<(), NetError> {
    let key_path = base.as_ref().with_extension("key");
    let pub_path = base.as_ref().with_extension("pub");

    fs::write(&key_path, secret.0)?;
    fs::write(&pub_path, public.0)?;

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        fs::set_permissions(&key_path, fs::Permissions::from_mode(0o600))?;
        fs::set_permissions(&pub_path, fs::Permissions::from_mode(0o644))?;
    }

    Ok(())
}
