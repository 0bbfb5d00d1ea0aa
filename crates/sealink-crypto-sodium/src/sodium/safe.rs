use sealink_core::crypto::{
    CryptoError, IdentityPublic, IdentitySecret, Nonce24, SessionKey, Signature64, X25519Keypair,
    IDENTITY_PUBLIC_SIZE, IDENTITY_SECRET_SIZE, MAC_SIZE, SIGNATURE_SIZE,
};

use super::ffi;

pub(crate) fn sodium_init() -> Result<(), CryptoError> {
    let rc = ffi::sodium_init();
    if rc < 0 {
        return Err(CryptoError::RngFailure);
    }
    Ok(())
}

pub(crate) fn random_bytes(out: &mut [u8]) -> Result<(), CryptoError> {
    if out.is_empty() {
        return Ok(());
    }
    ffi::randombytes_buf(out.as_mut_ptr(), out.len());
    Ok(())
}

// --- Ed25519 ---
pub(crate) fn ed25519_keypair() -> Result<(IdentitySecret, IdentityPublic), CryptoError> {
    let mut pk = [0u8; IDENTITY_PUBLIC_SIZE];
    let mut sk = [0u8; IDENTITY_SECRET_SIZE];

    let rc = ffi::ed25519_keypair(pk.as_mut_ptr(), sk.as_mut_ptr());
    if rc != 0 {
        return Err(CryptoError::KeypairFailure);
    }

    Ok((IdentitySecret(sk), IdentityPublic(pk)))
}

pub(crate) fn ed25519_sign(secret: &[u8; 64], msg: &[u8]) -> Result<Signature64, CryptoError> {
    let mut sig = [0u8; SIGNATURE_SIZE];
    let mut siglen: u64 = 0;

    let rc = ffi::ed25519_sign_detached(
        sig.as_mut_ptr(),
        &mut siglen as *mut u64 as *mut _,
        msg.as_ptr(),
        msg.len() as u64,
        secret.as_ptr(),
    );

    if rc != 0 || siglen != SIGNATURE_SIZE as u64 {
        return Err(CryptoError::SignFailure);
    }

    Ok(Signature64(sig))
}

pub(crate) fn ed25519_verify(
    public: &[u8; 32],
    msg: &[u8],
    sig: &Signature64,
) -> Result<(), CryptoError> {
    let rc = ffi::ed25519_verify_detached(sig.0.as_ptr(), msg.as_ptr(), msg.len() as u64, public.as_ptr());
    if rc != 0 {
        return Err(CryptoError::BadSignature);
    }
    Ok(())
}

// --- Curve25519 ---
pub(crate) fn box_keypair() -> Result<X25519Keypair, CryptoError> {
    let mut pk = [0u8; 32];
    let mut sk = [0u8; 32];

    let rc = ffi::box_keypair(pk.as_mut_ptr(), sk.as_mut_ptr());
    if rc != 0 {
        ffi::memzero(sk.as_mut_ptr(), sk.len());
        return Err(CryptoError::KeypairFailure);
    }

    Ok(X25519Keypair { public: pk, secret: sk })
}

pub(crate) fn box_precompute(
    peer_public: &[u8; 32],
    own_secret: &[u8; 32],
) -> Result<SessionKey, CryptoError> {
    let mut shared = [0u8; 32];
    let rc = ffi::box_beforenm(shared.as_mut_ptr(), peer_public.as_ptr(), own_secret.as_ptr());
    if rc != 0 {
        ffi::memzero(shared.as_mut_ptr(), shared.len());
        return Err(CryptoError::KeyAgreementFailure);
    }
    Ok(SessionKey(shared))
}

// --- secretbox (XSalsa20-Poly1305) ---
pub(crate) fn secretbox_seal(
    key: &SessionKey,
    nonce: &Nonce24,
    plaintext: &[u8],
) -> Result<Vec<u8>, CryptoError> {
    // ciphertext = 16-byte MAC followed by the encrypted message
    let mut c = vec![0u8; plaintext.len() + MAC_SIZE];

    let rc = ffi::secretbox_easy(
        c.as_mut_ptr(),
        plaintext.as_ptr(),
        plaintext.len() as u64,
        nonce.0.as_ptr(),
        key.0.as_ptr(),
    );

    if rc != 0 {
        return Err(CryptoError::SealFailure);
    }

    Ok(c)
}

pub(crate) fn secretbox_open(
    key: &SessionKey,
    nonce: &Nonce24,
    ciphertext: &[u8],
) -> Result<Vec<u8>, CryptoError> {
    if ciphertext.len() < MAC_SIZE {
        return Err(CryptoError::OpenFailure);
    }

    let mut m = vec![0u8; ciphertext.len() - MAC_SIZE];

    let rc = ffi::secretbox_open_easy(
        m.as_mut_ptr(),
        ciphertext.as_ptr(),
        ciphertext.len() as u64,
        nonce.0.as_ptr(),
        key.0.as_ptr(),
    );

    if rc != 0 {
        return Err(CryptoError::OpenFailure);
    }

    Ok(m)
}
