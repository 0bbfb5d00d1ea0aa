use zeroize::Zeroize;

/// Overwrite `buf[..n]` with zero bytes. `n == 0` wipes the whole buffer,
/// and `n` larger than the buffer is clamped to its length. The store goes
/// through `zeroize`, which the compiler cannot elide.
pub fn wipe(buf: &mut [u8], n: usize) {
    if buf.is_empty() {
        return;
    }

    let stop = if n == 0 || n > buf.len() { buf.len() } else { n };
    buf[..stop].zeroize();
}
