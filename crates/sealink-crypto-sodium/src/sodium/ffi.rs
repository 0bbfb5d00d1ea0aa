//! Unsafe FFI calls into libsodium.
//!
//! Policy: This is the only module allowed to use `unsafe` in this crate.

use libsodium_sys as sodium;
use std::os::raw::{c_int, c_uchar, c_ulonglong};

pub(crate) fn sodium_init() -> c_int {
    unsafe { sodium::sodium_init() }
}

pub(crate) fn randombytes_buf(buf: *mut c_uchar, size: usize) {
    unsafe { sodium::randombytes_buf(buf as *mut _, size) }
}

// --- Ed25519 ---
pub(crate) fn ed25519_keypair(pk: *mut c_uchar, sk: *mut c_uchar) -> c_int {
    unsafe { sodium::crypto_sign_keypair(pk as *mut _, sk as *mut _) }
}

pub(crate) fn ed25519_sign_detached(
    sig: *mut c_uchar,
    siglen: *mut c_ulonglong,
    msg: *const c_uchar,
    msglen: c_ulonglong,
    sk: *const c_uchar,
) -> c_int {
    unsafe {
        sodium::crypto_sign_detached(
            sig as *mut _,
            siglen as *mut _,
            msg as *const _,
            msglen,
            sk as *const _,
        )
    }
}

pub(crate) fn ed25519_verify_detached(
    sig: *const c_uchar,
    msg: *const c_uchar,
    msglen: c_ulonglong,
    pk: *const c_uchar,
) -> c_int {
    unsafe { sodium::crypto_sign_verify_detached(sig as *const _, msg as *const _, msglen, pk as *const _) }
}

// --- Curve25519 box keypair + shared-key precomputation ---
pub(crate) fn box_keypair(pk: *mut c_uchar, sk: *mut c_uchar) -> c_int {
    unsafe { sodium::crypto_box_keypair(pk as *mut _, sk as *mut _) }
}

pub(crate) fn box_beforenm(k: *mut c_uchar, pk: *const c_uchar, sk: *const c_uchar) -> c_int {
    unsafe { sodium::crypto_box_beforenm(k as *mut _, pk as *const _, sk as *const _) }
}

// --- secretbox (XSalsa20-Poly1305) ---
pub(crate) fn secretbox_easy(
    c: *mut c_uchar,
    m: *const c_uchar,
    mlen: c_ulonglong,
    n: *const c_uchar,
    k: *const c_uchar,
) -> c_int {
    unsafe { sodium::crypto_secretbox_easy(c as *mut _, m as *const _, mlen, n as *const _, k as *const _) }
}

pub(crate) fn secretbox_open_easy(
    m: *mut c_uchar,
    c: *const c_uchar,
    clen: c_ulonglong,
    n: *const c_uchar,
    k: *const c_uchar,
) -> c_int {
    unsafe {
        sodium::crypto_secretbox_open_easy(m as *mut _, c as *const _, clen, n as *const _, k as *const _)
    }
}

// --- memory hygiene ---
pub(crate) fn memzero(buf: *mut c_uchar, len: usize) {
    unsafe { sodium::sodium_memzero(buf as *mut _, len) }
}
