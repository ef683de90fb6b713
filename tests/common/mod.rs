//! Shared helpers for integration tests.

#![allow(dead_code)]

use std::path::PathBuf;
use std::sync::Once;

use tablekit::Sequence;
use tracing_subscriber::EnvFilter;

static INIT: Once = Once::new();

/// Installs a test-writer subscriber once. Set `RUST_LOG=tablekit=trace` to see draws and freezes.
pub fn init_tracing() {
    INIT.call_once(|| {
        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("tablekit=warn"));
        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .with_target(false)
            .try_init();
    });
}

/// Deterministic random integers in `-100..100`.
pub fn random_ints(seed: u64, len: usize) -> Sequence<i64> {
    let mut rng = fastrand::Rng::with_seed(seed);
    (0..len).map(|_| rng.i64(-100..100)).collect()
}

/// Writes `contents` to a unique file under the system temp dir.
pub fn write_temp(name: &str, contents: &str) -> PathBuf {
    let path = std::env::temp_dir().join(format!("tablekit-{}-{}", std::process::id(), name));
    std::fs::write(&path, contents).expect("temp file should be writable");
    path
}
