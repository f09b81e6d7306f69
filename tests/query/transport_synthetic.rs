use crate::common::{self, CannedTransport, RefusingTransport};
use pskreporter::core::cache::cache_key;
use pskreporter::{CacheStore, MemoryStore, PskClient, PskError, QueryOption, ValidationError};
use std::error::Error as _;
use std::sync::Arc;
use std::sync::atomic::Ordering;
use std::time::{Duration, SystemTime};
use url::Url;

#[tokio::test]
async fn injected_transport_is_used() {
    let transport = CannedTransport::ok(common::fixture("query", "AG6K", "xml"));
    let client = PskClient::builder()
        .transport(transport.clone())
        .build()
        .unwrap();

    let resp = pskreporter::query(&client, [QueryOption::SenderCallsign("AG6K".into())])
        .await
        .unwrap();

    assert_eq!(transport.calls(), 1);
    common::check_fixture_response(&resp);
}

#[tokio::test]
async fn transport_failure_surfaces_and_leaves_cache_alone() {
    let transport = RefusingTransport::default();
    let store = Arc::new(MemoryStore::new());
    let client = PskClient::builder()
        .transport(transport.clone())
        .cache_store(store.clone())
        .build()
        .unwrap();

    let err = client.query().callsign("AG6K").fetch().await.unwrap_err();
    match &err {
        PskError::Transport(source) => assert!(source.to_string().contains("connection refused")),
        other => panic!("expected Transport error, got {other:?}"),
    }
    assert!(err.source().is_some());
    assert_eq!(transport.calls.load(Ordering::SeqCst), 1);
    assert!(store.is_empty());

    // an expired entry stays exactly as it was
    let key = cache_key("callsign=AG6K");
    let old = SystemTime::now() - Duration::from_secs(600);
    store.insert_at(key.clone(), common::fixture("query", "AG6K", "xml"), old);
    let _ = client.query().callsign("AG6K").fetch().await.unwrap_err();
    assert_eq!(store.load(&key).unwrap().unwrap().written, old);
}

#[tokio::test]
async fn refused_connection_is_a_transport_error() {
    let client = PskClient::builder()
        .base_url(Url::parse("http://127.0.0.1:1/query").unwrap())
        .timeout(Duration::from_secs(5))
        .build()
        .unwrap();

    let err = client.query().callsign("AG6K").fetch().await.unwrap_err();
    assert!(matches!(err, PskError::Transport(_)), "{err:?}");
}

#[tokio::test]
async fn invalid_options_never_reach_the_transport() {
    let transport = CannedTransport::ok(common::fixture("query", "AG6K", "xml"));
    let client = PskClient::builder()
        .transport(transport.clone())
        .build()
        .unwrap();

    let err = client
        .query()
        .flow_start_seconds(-90_000)
        .fetch()
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        PskError::Validation(ValidationError::FlowStartTooOld(-90_000))
    ));
    assert_eq!(transport.calls(), 0);
}

#[tokio::test]
async fn fresh_entry_means_zero_transport_calls() {
    let transport = CannedTransport::ok(common::fixture("query", "AG6K", "xml"));
    let store = Arc::new(MemoryStore::new());
    let client = PskClient::builder()
        .transport(transport.clone())
        .cache_store(store.clone())
        .build()
        .unwrap();

    let first = client.query().sender_callsign("AG6K").fetch().await.unwrap();
    let second = client.query().sender_callsign("AG6K").fetch().await.unwrap();

    assert_eq!(transport.calls(), 1);
    assert_eq!(first, second);
    assert!(store.load(&cache_key("senderCallsign=AG6K")).unwrap().is_some());
}
