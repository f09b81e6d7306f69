use pskreporter::PskClient;

#[tokio::test]
#[ignore]
async fn live_query_smoke_and_or_record() {
    if !crate::common::live_or_record_enabled() {
        return;
    }

    let client = PskClient::builder()
        .user_agent(concat!("pskreporter-rs-tests/", env!("CARGO_PKG_VERSION")))
        .build()
        .unwrap();

    // With PSK_RECORD=1 and the test-mode feature this writes `tests/fixtures/query_<call>.xml`
    let resp = client
        .query()
        .sender_callsign("AG6K")
        .flow_start_seconds(-1800)
        .app_contact("pskreporter-rs@example.com")
        .fetch()
        .await
        .unwrap();

    if !crate::common::is_recording() {
        assert!(resp.current_seconds.is_some());
        assert!(resp.current_time().is_some());
        for report in &resp.reception_reports {
            assert_eq!(report.sender_callsign.to_uppercase(), "AG6K");
        }
    }
}
