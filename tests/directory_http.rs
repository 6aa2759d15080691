//! Integration tests for the HTTP profile directory client and resolver.
//!
//! Each test spins up an Axum server on a random port serving the directory
//! REST contract and exercises the real `HttpDirectory` against it.

use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use axum::Json;
use axum::extract::{Query, State};
use axum::http::{HeaderMap, StatusCode};
use axum::routing::get;
use axum::Router;
use serde_json::{Value, json};
use tokio::net::TcpListener;
use tokio::time::timeout;

use cast_onboard::config::AppConfig;
use cast_onboard::directory::resolver::info_message;
use cast_onboard::directory::{HttpDirectory, ProfileDirectory, ProfileResolver};
use cast_onboard::error::RegistryError;
use cast_onboard::registry::{IdRegistry, StaticRegistry};
use cast_onboard::wallet::Address;

/// Maximum time any test is allowed to run before we consider it hung.
const TEST_TIMEOUT: Duration = Duration::from_secs(5);

const API_KEY: &str = "it-test-key";
const ADDR_A: &str = "0xAAAA000000000000000000000000000000000001";
const ADDR_B: &str = "0xBbBb000000000000000000000000000000000002";

fn addr(s: &str) -> Address {
    s.parse().unwrap()
}

/// What the fake directory serves.
#[derive(Clone, Default)]
struct FakeDirectoryState {
    /// Response map for address lookups, keyed by query address.
    by_address: HashMap<String, Value>,
    /// Response for fid lookups.
    by_fid: HashMap<u64, Value>,
    /// When set, every endpoint answers with this status.
    fail_status: Option<u16>,
}

async fn bulk_by_address(
    State(state): State<Arc<FakeDirectoryState>>,
    headers: HeaderMap,
    Query(query): Query<HashMap<String, String>>,
) -> Result<Json<Value>, StatusCode> {
    if headers.get("x-api-key").and_then(|v| v.to_str().ok()) != Some(API_KEY) {
        return Err(StatusCode::UNAUTHORIZED);
    }
    if let Some(status) = state.fail_status {
        return Err(StatusCode::from_u16(status).unwrap());
    }
    let address = query.get("addresses").cloned().unwrap_or_default();
    Ok(Json(
        state.by_address.get(&address).cloned().unwrap_or(json!({})),
    ))
}

async fn bulk_by_fid(
    State(state): State<Arc<FakeDirectoryState>>,
    headers: HeaderMap,
    Query(query): Query<HashMap<String, String>>,
) -> Result<Json<Value>, StatusCode> {
    if headers.get("x-api-key").and_then(|v| v.to_str().ok()) != Some(API_KEY) {
        return Err(StatusCode::UNAUTHORIZED);
    }
    if let Some(status) = state.fail_status {
        return Err(StatusCode::from_u16(status).unwrap());
    }
    let fid: u64 = query
        .get("fids")
        .and_then(|raw| raw.parse().ok())
        .unwrap_or_default();
    Ok(Json(
        state
            .by_fid
            .get(&fid)
            .cloned()
            .unwrap_or(json!({ "users": [] })),
    ))
}

/// Start the fake directory, return a configured client.
async fn start_directory(state: FakeDirectoryState) -> HttpDirectory {
    let app = Router::new()
        .route("/user/bulk-by-address", get(bulk_by_address))
        .route("/user/bulk", get(bulk_by_fid))
        .with_state(Arc::new(state));

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let port = listener.local_addr().unwrap().port();

    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    // Give the server a moment to start accepting connections.
    tokio::time::sleep(Duration::from_millis(50)).await;

    let config = AppConfig {
        directory_base_url: format!("http://127.0.0.1:{port}"),
        directory_api_key: secrecy::SecretString::from(API_KEY),
        app_fid: 1,
    };
    HttpDirectory::new(&config)
}

/// Registry wrapper that counts lookups.
struct CountingRegistry {
    inner: StaticRegistry,
    calls: AtomicUsize,
}

#[async_trait]
impl IdRegistry for CountingRegistry {
    async fn id_of(&self, address: &Address) -> Result<Option<u64>, RegistryError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.inner.id_of(address).await
    }
}

#[tokio::test]
async fn registry_fallback_end_to_end() {
    timeout(TEST_TIMEOUT, async {
        // Address A: no directory entry, registry id 42, fid 42 has a profile.
        let profile = json!({
            "fid": 42,
            "username": "alice",
            "display_name": "Alice",
        });
        let directory = start_directory(FakeDirectoryState {
            by_fid: HashMap::from([(42, json!({ "users": [profile] }))]),
            ..Default::default()
        })
        .await;

        let registry = StaticRegistry::new().with_id(&addr(ADDR_A), 42);
        let resolver = ProfileResolver::new(Arc::new(directory), Arc::new(registry), 1);

        let resolution = resolver.resolve(addr(ADDR_A)).await;
        let profile = resolution.profile.expect("profile should resolve via registry");
        assert_eq!(profile.fid, 42);
        assert_eq!(profile.username.as_deref(), Some("alice"));
        assert_eq!(info_message(true, Some(&profile)), None);
    })
    .await
    .expect("test timed out");
}

#[tokio::test]
async fn lowercased_directory_hit_skips_registry() {
    timeout(TEST_TIMEOUT, async {
        // Address B: the directory answers under the lower-cased key.
        let profile = json!({ "fid": 7, "username": "bob" });
        let directory = start_directory(FakeDirectoryState {
            by_address: HashMap::from([(
                ADDR_B.to_string(),
                json!({ ADDR_B.to_lowercase(): [profile] }),
            )]),
            ..Default::default()
        })
        .await;

        let registry = Arc::new(CountingRegistry {
            inner: StaticRegistry::new().with_id(&addr(ADDR_B), 99),
            calls: AtomicUsize::new(0),
        });
        let resolver =
            ProfileResolver::new(Arc::new(directory), Arc::clone(&registry) as _, 1);

        let resolution = resolver.resolve(addr(ADDR_B)).await;
        assert_eq!(resolution.profile.map(|p| p.fid), Some(7));
        assert_eq!(registry.calls.load(Ordering::SeqCst), 0);
    })
    .await
    .expect("test timed out");
}

#[tokio::test]
async fn server_error_degrades_to_no_profile() {
    timeout(TEST_TIMEOUT, async {
        let directory = start_directory(FakeDirectoryState {
            fail_status: Some(500),
            ..Default::default()
        })
        .await;

        let resolver = ProfileResolver::new(
            Arc::new(directory),
            Arc::new(StaticRegistry::new().with_id(&addr(ADDR_A), 42)),
            1,
        );

        let resolution = resolver.resolve(addr(ADDR_A)).await;
        assert!(resolution.profile.is_none());
        assert!(info_message(true, resolution.profile.as_ref()).is_some());
    })
    .await
    .expect("test timed out");
}

#[tokio::test]
async fn directory_client_sends_api_key() {
    timeout(TEST_TIMEOUT, async {
        let directory = start_directory(FakeDirectoryState::default()).await;

        // The fake rejects requests without the right key; a successful
        // empty lookup proves the header went out.
        let result = directory.users_by_address(&addr(ADDR_A)).await;
        assert!(result.unwrap().is_empty());
    })
    .await
    .expect("test timed out");
}

#[tokio::test]
async fn fid_lookup_parses_users_envelope() {
    timeout(TEST_TIMEOUT, async {
        let directory = start_directory(FakeDirectoryState {
            by_fid: HashMap::from([(
                9,
                json!({ "users": [{ "fid": 9, "username": "carol", "pfp_url": "https://example.com/c.png" }] }),
            )]),
            ..Default::default()
        })
        .await;

        let users = directory.users_by_fid(9, 1).await.unwrap();
        assert_eq!(users.len(), 1);
        assert_eq!(users[0].username.as_deref(), Some("carol"));
        assert_eq!(users[0].pfp_url.as_deref(), Some("https://example.com/c.png"));
    })
    .await
    .expect("test timed out");
}
