#![cfg(test)]

/// Installs `env_logger` for the current test binary, so `RUST_LOG=trace` shows rehashes and
/// fix-up cases. Safe to call from every test.
pub fn init() {
    let _ = env_logger::builder().is_test(true).try_init();
}
