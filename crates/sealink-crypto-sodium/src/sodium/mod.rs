pub(crate) mod ffi;
pub(crate) mod safe;

use once_cell::sync::Lazy;

/// Ensure libsodium is initialized exactly once.
static SODIUM_INIT: Lazy<()> = Lazy::new(|| {
    // If initialization fails the backend cannot operate at all.
    safe::sodium_init().expect("libsodium initialization failed");
});

pub(crate) fn init() {
    Lazy::force(&SODIUM_INIT);
}
