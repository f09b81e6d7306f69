use httpmock::Method::GET;
use httpmock::MockServer;
use url::Url;

#[tokio::test]
async fn query_returns_status_error_on_non_200() {
    let server = MockServer::start();

    let mock = server.mock(|when, then| {
        when.method(GET).path("/query");
        then.status(500).body("oops");
    });

    let client = pskreporter::PskClient::builder()
        .base_url(Url::parse(&server.url("/query")).unwrap())
        .build()
        .unwrap();

    let err = client.query().callsign("AG6K").fetch().await.unwrap_err();
    mock.assert();

    assert!(err.to_string().contains("unexpected http response"));
    match err {
        pskreporter::PskError::Status { status, url } => {
            assert_eq!(status, 500);
            assert!(url.contains("/query?callsign=AG6K"));
        }
        other => panic!("expected Status error, got {other:?}"),
    }
}

#[tokio::test]
async fn other_success_codes_are_still_unexpected() {
    let server = MockServer::start();

    let mock = server.mock(|when, then| {
        when.method(GET).path("/query");
        then.status(204);
    });

    let client = pskreporter::PskClient::builder()
        .base_url(Url::parse(&server.url("/query")).unwrap())
        .build()
        .unwrap();

    let err = client.query().fetch().await.unwrap_err();
    mock.assert();
    assert!(matches!(err, pskreporter::PskError::Status { status: 204, .. }));
}

#[tokio::test]
async fn non_xml_body_is_malformed() {
    let server = MockServer::start();

    let mock = server.mock(|when, then| {
        when.method(GET).path("/query");
        then.status(200).body("hello world");
    });

    let client = pskreporter::PskClient::builder()
        .base_url(Url::parse(&server.url("/query")).unwrap())
        .build()
        .unwrap();

    let err = client.query().callsign("AG6K").fetch().await.unwrap_err();
    mock.assert();
    assert!(matches!(err, pskreporter::PskError::Malformed(_)), "{err:?}");
}
