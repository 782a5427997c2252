#![allow(dead_code)]

use std::sync::Arc;

use eodhd_options::{CredentialStore, EodhdOptions, EodhdTransport};
use tempfile::TempDir;

pub const KEY: &str = "test-key-123";

/// Store rooted in a fresh temp dir; keep the `TempDir` alive for the test.
pub fn temp_store() -> (TempDir, CredentialStore) {
    let dir = tempfile::tempdir().unwrap();
    let store = CredentialStore::open(dir.path().join("eodhd_options")).unwrap();
    (dir, store)
}

/// Client with an explicit key, a temp store, and the given transport.
pub fn client_with(transport: Arc<dyn EodhdTransport>) -> (TempDir, EodhdOptions) {
    let (dir, store) = temp_store();
    let client = EodhdOptions::builder()
        .api_key(KEY)
        .credential_store(store)
        .transport(transport)
        .build()
        .unwrap();
    (dir, client)
}
