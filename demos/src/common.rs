use std::path::PathBuf;
use std::sync::{Arc, OnceLock};

use eodhd_options::{CredentialStore, EodhdError, EodhdOptions};
use tempfile::TempDir;

/// Set to run every demo against fixture data instead of the live API.
pub const USE_MOCK_ENV: &str = "EODHD_DEMOS_USE_MOCK";
/// API key picked up by the live demos.
pub const API_KEY_ENV: &str = "EODHD_API_KEY";

static SCRATCH: OnceLock<Option<TempDir>> = OnceLock::new();

/// Whether the demos run against the mock transport.
#[must_use]
pub fn use_mock() -> bool {
    std::env::var_os(USE_MOCK_ENV).is_some()
}

/// Throwaway directory shared by a mock run.
fn scratch() -> Option<PathBuf> {
    SCRATCH
        .get_or_init(|| tempfile::tempdir().ok())
        .as_ref()
        .map(|d| d.path().to_path_buf())
}

/// Return a client for demos.
///
/// In mock mode the key store lives in a temp dir so the real one is never
/// touched. Live runs use `EODHD_API_KEY` when set (saving it for later runs)
/// and the stored key otherwise.
///
/// # Errors
/// Returns `Config` when no key is available for a live run.
pub fn get_client() -> Result<EodhdOptions, EodhdError> {
    if use_mock() {
        println!("--- (Using Mock Transport for CI) ---");
        let dir = scratch().ok_or_else(|| EodhdError::config("cannot create a scratch dir"))?;
        return EodhdOptions::builder()
            .api_key("demo")
            .credential_store(CredentialStore::open(dir.join("eodhd_options"))?)
            .transport(Arc::new(eodhd_mock::MockTransport::new()))
            .build();
    }
    let key = std::env::var(API_KEY_ENV).ok();
    EodhdOptions::new(key.as_deref())
}

/// Where demos write files: the scratch dir under mock, else the working dir.
#[must_use]
pub fn output_path(file_name: &str) -> PathBuf {
    if use_mock() {
        if let Some(dir) = scratch() {
            return dir.join(file_name);
        }
    }
    PathBuf::from(file_name)
}

/// Install a compact `fmt` subscriber filtered by `RUST_LOG`.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_target(false)
        .try_init();
}
