use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::query::wire;

/// Decoded reply to a reception report query.
///
/// Attribute values are kept exactly as the service sent them; nothing is parsed into numbers.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct QueryResponse {
    /// Server time of the reply, in Unix seconds.
    pub current_seconds: Option<String>,
    /// Receivers currently reporting to the service.
    pub active_receivers: Vec<ActiveReceiver>,
    /// The reception reports matching the query.
    pub reception_reports: Vec<ReceptionReport>,
    /// Callsigns currently being reported.
    pub active_callsigns: Vec<ActiveCallsign>,
    /// Cursor to pass as `last_sequence_number` on the next poll.
    pub last_sequence_number: Option<String>,
    /// Newest `flowStartSeconds` among the returned reports.
    pub max_flow_start_seconds: Option<String>,
    /// Echo of the sender search, when the query named a sender.
    pub sender_search: Option<SenderSearch>,
}

impl QueryResponse {
    /// [`current_seconds`](Self::current_seconds) as a timestamp, if it parses.
    pub fn current_time(&self) -> Option<DateTime<Utc>> {
        self.current_seconds.as_deref().and_then(epoch_seconds)
    }
}

/// A station currently reporting to the service.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ActiveReceiver {
    pub callsign: String,
    pub locator: String,
    pub frequency: String,
    pub region: String,
    pub dxcc: String,
    pub decoder_software: String,
    pub antenna_information: String,
    pub mode: String,
    pub bands: String,
}

/// One station hearing another station's transmission.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ReceptionReport {
    pub receiver_callsign: String,
    pub receiver_locator: String,
    pub sender_callsign: String,
    pub sender_locator: String,
    /// Frequency in Hz.
    pub frequency: String,
    /// Time of reception in Unix seconds.
    pub flow_start_seconds: String,
    pub mode: String,
    pub is_sender: String,
    pub receiver_dxcc: String,
    pub receiver_dxcc_code: String,
    /// Signal-to-noise ratio in dB.
    pub snr: String,
}

impl ReceptionReport {
    /// [`flow_start_seconds`](Self::flow_start_seconds) as a timestamp, if it parses.
    pub fn flow_start_time(&self) -> Option<DateTime<Utc>> {
        epoch_seconds(&self.flow_start_seconds)
    }
}

/// A callsign that is currently being reported, with its report count.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ActiveCallsign {
    pub callsign: String,
    pub reports: String,
    pub dxcc: String,
    pub dxcc_code: String,
    pub frequency: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SenderSearch {
    pub callsign: String,
    pub recent_flow_start_seconds: String,
}

fn epoch_seconds(s: &str) -> Option<DateTime<Utc>> {
    s.trim()
        .parse::<i64>()
        .ok()
        .and_then(|secs| DateTime::from_timestamp(secs, 0))
}

/* ----- wire -> model ----- */

impl From<wire::ReceptionReportsEnvelope> for QueryResponse {
    fn from(env: wire::ReceptionReportsEnvelope) -> Self {
        Self {
            current_seconds: env.current_seconds,
            active_receivers: env.active_receivers.into_iter().map(Into::into).collect(),
            reception_reports: env.reception_reports.into_iter().map(Into::into).collect(),
            active_callsigns: env.active_callsigns.into_iter().map(Into::into).collect(),
            last_sequence_number: env.last_sequence_number.and_then(|n| n.value),
            max_flow_start_seconds: env.max_flow_start_seconds.and_then(|n| n.value),
            sender_search: env.sender_search.map(|s| SenderSearch {
                callsign: s.callsign.unwrap_or_default(),
                recent_flow_start_seconds: s.recent_flow_start_seconds.unwrap_or_default(),
            }),
        }
    }
}

impl From<wire::ActiveReceiverNode> for ActiveReceiver {
    fn from(n: wire::ActiveReceiverNode) -> Self {
        Self {
            callsign: n.callsign.unwrap_or_default(),
            locator: n.locator.unwrap_or_default(),
            frequency: n.frequency.unwrap_or_default(),
            region: n.region.unwrap_or_default(),
            dxcc: n.dxcc.unwrap_or_default(),
            decoder_software: n.decoder_software.unwrap_or_default(),
            antenna_information: n.antenna_information.unwrap_or_default(),
            mode: n.mode.unwrap_or_default(),
            bands: n.bands.unwrap_or_default(),
        }
    }
}

impl From<wire::ReceptionReportNode> for ReceptionReport {
    fn from(n: wire::ReceptionReportNode) -> Self {
        Self {
            receiver_callsign: n.receiver_callsign.unwrap_or_default(),
            receiver_locator: n.receiver_locator.unwrap_or_default(),
            sender_callsign: n.sender_callsign.unwrap_or_default(),
            sender_locator: n.sender_locator.unwrap_or_default(),
            frequency: n.frequency.unwrap_or_default(),
            flow_start_seconds: n.flow_start_seconds.unwrap_or_default(),
            mode: n.mode.unwrap_or_default(),
            is_sender: n.is_sender.unwrap_or_default(),
            receiver_dxcc: n.receiver_dxcc.unwrap_or_default(),
            receiver_dxcc_code: n.receiver_dxcc_code.unwrap_or_default(),
            snr: n.snr.unwrap_or_default(),
        }
    }
}

impl From<wire::ActiveCallsignNode> for ActiveCallsign {
    fn from(n: wire::ActiveCallsignNode) -> Self {
        Self {
            callsign: n.callsign.unwrap_or_default(),
            reports: n.reports.unwrap_or_default(),
            dxcc: n.dxcc.unwrap_or_default(),
            dxcc_code: n.dxcc_code.unwrap_or_default(),
            frequency: n.frequency.unwrap_or_default(),
        }
    }
}
