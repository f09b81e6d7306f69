use quick_xml::Reader;
use quick_xml::events::Event;
use serde::Deserialize;

/// Name of the document element of every query response.
pub(crate) const ROOT_ELEMENT: &[u8] = b"receptionReports";

#[derive(Deserialize)]
pub(crate) struct ReceptionReportsEnvelope {
    #[serde(rename = "@currentSeconds")]
    pub(crate) current_seconds: Option<String>,
    #[serde(rename = "activeReceiver", default)]
    pub(crate) active_receivers: Vec<ActiveReceiverNode>,
    #[serde(rename = "receptionReport", default)]
    pub(crate) reception_reports: Vec<ReceptionReportNode>,
    #[serde(rename = "activeCallsign", default)]
    pub(crate) active_callsigns: Vec<ActiveCallsignNode>,
    #[serde(rename = "lastSequenceNumber")]
    pub(crate) last_sequence_number: Option<ValueNode>,
    #[serde(rename = "maxFlowStartSeconds")]
    pub(crate) max_flow_start_seconds: Option<ValueNode>,
    #[serde(rename = "senderSearch")]
    pub(crate) sender_search: Option<SenderSearchNode>,
}

#[derive(Deserialize)]
pub(crate) struct ActiveReceiverNode {
    #[serde(rename = "@callsign")]
    pub(crate) callsign: Option<String>,
    #[serde(rename = "@locator")]
    pub(crate) locator: Option<String>,
    #[serde(rename = "@frequency")]
    pub(crate) frequency: Option<String>,
    #[serde(rename = "@region")]
    pub(crate) region: Option<String>,
    #[serde(rename = "@DXCC")]
    pub(crate) dxcc: Option<String>,
    #[serde(rename = "@decoderSoftware")]
    pub(crate) decoder_software: Option<String>,
    #[serde(rename = "@antennaInformation")]
    pub(crate) antenna_information: Option<String>,
    #[serde(rename = "@mode")]
    pub(crate) mode: Option<String>,
    #[serde(rename = "@bands")]
    pub(crate) bands: Option<String>,
}

#[derive(Deserialize)]
pub(crate) struct ReceptionReportNode {
    #[serde(rename = "@receiverCallsign")]
    pub(crate) receiver_callsign: Option<String>,
    #[serde(rename = "@receiverLocator")]
    pub(crate) receiver_locator: Option<String>,
    #[serde(rename = "@senderCallsign")]
    pub(crate) sender_callsign: Option<String>,
    #[serde(rename = "@senderLocator")]
    pub(crate) sender_locator: Option<String>,
    #[serde(rename = "@frequency")]
    pub(crate) frequency: Option<String>,
    #[serde(rename = "@flowStartSeconds")]
    pub(crate) flow_start_seconds: Option<String>,
    #[serde(rename = "@mode")]
    pub(crate) mode: Option<String>,
    #[serde(rename = "@isSender")]
    pub(crate) is_sender: Option<String>,
    #[serde(rename = "@receiverDXCC")]
    pub(crate) receiver_dxcc: Option<String>,
    #[serde(rename = "@receiverDXCCCode")]
    pub(crate) receiver_dxcc_code: Option<String>,
    #[serde(rename = "@sNR")]
    pub(crate) snr: Option<String>,
}

#[derive(Deserialize)]
pub(crate) struct ActiveCallsignNode {
    #[serde(rename = "@callsign")]
    pub(crate) callsign: Option<String>,
    #[serde(rename = "@reports")]
    pub(crate) reports: Option<String>,
    #[serde(rename = "@DXCC")]
    pub(crate) dxcc: Option<String>,
    #[serde(rename = "@DXCCcode")]
    pub(crate) dxcc_code: Option<String>,
    #[serde(rename = "@frequency")]
    pub(crate) frequency: Option<String>,
}

#[derive(Deserialize)]
pub(crate) struct ValueNode {
    #[serde(rename = "@value")]
    pub(crate) value: Option<String>,
}

#[derive(Deserialize)]
pub(crate) struct SenderSearchNode {
    #[serde(rename = "@callsign")]
    pub(crate) callsign: Option<String>,
    #[serde(rename = "@recentFlowStartSeconds")]
    pub(crate) recent_flow_start_seconds: Option<String>,
}

/// Checks that the first element of `xml` is `<receptionReports>`.
///
/// The serde deserializer accepts any root name, so without this an unrelated XML document
/// (or an HTML error page) would decode into an empty response.
pub(crate) fn check_root(xml: &str) -> Result<(), String> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(true);

    loop {
        match reader.read_event() {
            Ok(Event::Start(e) | Event::Empty(e)) => {
                return if e.name().as_ref() == ROOT_ELEMENT {
                    Ok(())
                } else {
                    Err(format!(
                        "unexpected root element <{}>",
                        String::from_utf8_lossy(e.name().as_ref())
                    ))
                };
            }
            Ok(Event::Text(_) | Event::CData(_)) => {
                return Err("text content before root element".into());
            }
            Ok(Event::End(_)) => return Err("unbalanced closing tag".into()),
            Ok(Event::Eof) => return Err("empty document".into()),
            Err(e) => return Err(format!("xml error: {e}")),
            // declaration, comments, processing instructions, doctype
            Ok(_) => {}
        }
    }
}
