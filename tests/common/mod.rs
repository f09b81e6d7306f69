#![allow(dead_code)]

use httpmock::{Method::GET, Mock, MockServer};
use pskreporter::{HttpResponse, PskClientBuilder, QueryResponse, Transport, TransportError};
use pskreporter::core::transport::TransportFuture;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::{env, fs, path::Path};
use url::Url;

pub fn setup_server() -> MockServer {
    MockServer::start()
}

pub fn fixture(endpoint: &str, label: &str, ext: &str) -> String {
    let dir = Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures");
    let filename = format!("{}_{}.{}", endpoint, label, ext);
    let path = dir.join(&filename);
    fs::read_to_string(&path)
        .unwrap_or_else(|e| panic!("failed to read fixture {}: {}", path.display(), e))
}

pub fn live_or_record_enabled() -> bool {
    env::var("PSK_LIVE").ok().as_deref() == Some("1") || is_recording()
}

pub fn is_recording() -> bool {
    env::var("PSK_RECORD").ok().as_deref() == Some("1")
}

/// Client builder pointed at `/query` on the mock server.
pub fn client_for(server: &MockServer) -> PskClientBuilder {
    pskreporter::PskClient::builder().base_url(Url::parse(&server.url("/query")).unwrap())
}

pub fn mock_query<'a>(server: &'a MockServer, callsign: &'a str) -> Mock<'a> {
    server.mock(|when, then| {
        when.method(GET)
            .path("/query")
            .query_param("callsign", callsign);
        then.status(200)
            .header("content-type", "text/xml")
            .body(fixture("query", "AG6K", "xml"));
    })
}

/// Asserts the shape of `tests/fixtures/query_AG6K.xml`.
pub fn check_fixture_response(resp: &QueryResponse) {
    assert_eq!(resp.current_seconds.as_deref(), Some("1693250412"));

    assert_eq!(resp.active_receivers.len(), 3);
    let rx = &resp.active_receivers[0];
    assert_eq!(rx.callsign, "AG6K");
    assert_eq!(rx.locator, "CM87vl");
    assert_eq!(rx.decoder_software, "WSJT-X v2.6.1");

    assert_eq!(resp.reception_reports.len(), 4);
    let rr = &resp.reception_reports[0];
    assert_eq!(rr.receiver_callsign, "KFS");
    assert_eq!(rr.sender_callsign, "AG6K");
    assert_eq!(rr.frequency, "14075533");
    assert_eq!(rr.snr, "-4");
    assert_eq!(rr.receiver_dxcc_code, "K");

    assert_eq!(resp.active_callsigns.len(), 2);
    assert_eq!(resp.active_callsigns[1].callsign, "N6ACA");
    assert_eq!(resp.active_callsigns[1].reports, "112");

    assert_eq!(resp.last_sequence_number.as_deref(), Some("31472865993"));
    assert_eq!(resp.max_flow_start_seconds.as_deref(), Some("1693250385"));
    let search = resp.sender_search.as_ref().expect("sender search echo");
    assert_eq!(search.callsign, "AG6K");
    assert_eq!(search.recent_flow_start_seconds, "1693250385");
}

/// Transport that answers every request with a canned response and counts calls.
#[derive(Debug, Clone)]
pub struct CannedTransport {
    pub status: u16,
    pub body: Vec<u8>,
    pub calls: Arc<AtomicUsize>,
}

impl CannedTransport {
    pub fn ok(body: impl Into<Vec<u8>>) -> Self {
        Self {
            status: 200,
            body: body.into(),
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl Transport for CannedTransport {
    fn get<'a>(&'a self, _url: &'a Url) -> TransportFuture<'a> {
        Box::pin(async move {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(HttpResponse {
                status: self.status,
                body: self.body.clone(),
            })
        })
    }
}

/// Transport that always fails as if the connection was refused.
#[derive(Debug, Clone, Default)]
pub struct RefusingTransport {
    pub calls: Arc<AtomicUsize>,
}

impl Transport for RefusingTransport {
    fn get<'a>(&'a self, _url: &'a Url) -> TransportFuture<'a> {
        Box::pin(async move {
            self.calls.fetch_add(1, Ordering::SeqCst);
            let err = std::io::Error::new(std::io::ErrorKind::ConnectionRefused, "connection refused");
            Err(Box::new(err) as TransportError)
        })
    }
}
