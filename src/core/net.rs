#[cfg(feature = "test-mode")]
use std::env;

/// Hook for every successfully decoded response body.
/// In `test-mode`, if `PSK_RECORD=1`, the body is saved as a fixture via `core::fixtures`.
pub(crate) fn record_body(_endpoint: &str, _label: &str, _body: &[u8]) {
    #[cfg(feature = "test-mode")]
    {
        if env::var("PSK_RECORD").ok().as_deref() == Some("1")
            && let Err(e) = crate::core::fixtures::record_fixture(_endpoint, _label, "xml", _body)
        {
            eprintln!("PSK_RECORD: failed to write fixture for {_label}: {e}");
        }
    }
}
