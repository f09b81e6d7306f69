use crate::core::cache::cache_key;
use crate::core::{CacheMode, PskClient, PskError, net};
use crate::query::{ParameterSet, model::QueryResponse, wire};

/// Composes the request URL: the base URL with `encoded` as its query component.
pub(super) fn request_url(client: &PskClient, encoded: &str) -> url::Url {
    let mut url = client.base_url().clone();
    url.set_query((!encoded.is_empty()).then_some(encoded));
    url
}

pub(super) async fn fetch_reports(
    client: &PskClient,
    params: &ParameterSet,
    cache_mode: CacheMode,
) -> Result<QueryResponse, PskError> {
    let encoded = params.encode();
    let url = request_url(client, &encoded);
    let key = cache_key(&encoded);

    if cache_mode == CacheMode::Use
        && let Some(body) = client.cache_get(&key)
    {
        match decode_response(&body) {
            Ok(resp) => {
                #[cfg(feature = "tracing")]
                tracing::debug!(key = %key, "serving reception reports from cache");
                return Ok(resp);
            }
            // fall through to the network; the next successful fetch overwrites the entry
            Err(_e) => {
                #[cfg(feature = "tracing")]
                tracing::debug!(key = %key, error = %_e, "discarding undecodable cache entry");
            }
        }
    }

    let resp = client
        .transport()
        .get(&url)
        .await
        .map_err(PskError::Transport)?;

    if resp.status != 200 {
        return Err(PskError::Status {
            status: resp.status,
            url: url.to_string(),
        });
    }

    let decoded = decode_response(&resp.body)?;
    net::record_body("query", params.identity().unwrap_or("all"), &resp.body);

    if cache_mode != CacheMode::Bypass {
        client.cache_put(&key, &resp.body);
    }

    Ok(decoded)
}

/// Decodes a raw response body.
fn decode_response(body: &[u8]) -> Result<QueryResponse, PskError> {
    let xml = std::str::from_utf8(body)
        .map_err(|e| PskError::Malformed(format!("response is not valid UTF-8: {e}")))?;

    wire::check_root(xml).map_err(PskError::Malformed)?;

    let env: wire::ReceptionReportsEnvelope = quick_xml::de::from_str(xml)
        .map_err(|e| PskError::Malformed(format!("xml decode error: {e}")))?;

    Ok(env.into())
}
