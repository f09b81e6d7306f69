use std::collections::BTreeMap;

use url::Url;

use crate::core::ValidationError;

/// Farthest back `flowStartSeconds` may reach: one day.
pub const MAX_FLOW_START_AGE_SECS: i64 = 86_400;

/// Parameters of which at most one may be present in a query.
const IDENTITY_PARAMS: [&str; 3] = ["senderCallsign", "receiverCallsign", "callsign"];

/// A single query option. Applying it to a [`ParameterSet`] sets one parameter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueryOption {
    /// Reports *sent* by this callsign (`senderCallsign`).
    SenderCallsign(String),
    /// Reports *received* by this callsign (`receiverCallsign`).
    ReceiverCallsign(String),
    /// Reports where this callsign is either side (`callsign`).
    Callsign(String),
    /// Restrict to a mode such as `FT8` (`mode`).
    Mode(String),
    /// Maximum number of reports returned (`rptlimit`).
    ReportLimit(u32),
    /// Negative offset in seconds from now bounding how far back reports go (`flowStartSeconds`).
    FlowStartSeconds(i64),
    /// Contact e-mail for the service operators (`appcontact`).
    AppContact(String),
    /// Inclusive frequency range in Hz (`frange`).
    FrequencyRange { lower: u64, upper: u64 },
    /// Only return reports newer than this sequence number (`lastseqno`).
    LastSequenceNumber(String),
    /// Omit active receiver records (`noactive`).
    NoActive(bool),
    /// Include reports without a locator (`nolocator`).
    NoLocator(bool),
    /// Only return reception reports (`rronly`).
    ReceptionReportsOnly(bool),
    /// Include statistics (`statistics`).
    Statistics(bool),
}

impl QueryOption {
    /// Wire name of the parameter this option sets.
    pub const fn param(&self) -> &'static str {
        match self {
            Self::SenderCallsign(_) => "senderCallsign",
            Self::ReceiverCallsign(_) => "receiverCallsign",
            Self::Callsign(_) => "callsign",
            Self::Mode(_) => "mode",
            Self::ReportLimit(_) => "rptlimit",
            Self::FlowStartSeconds(_) => "flowStartSeconds",
            Self::AppContact(_) => "appcontact",
            Self::FrequencyRange { .. } => "frange",
            Self::LastSequenceNumber(_) => "lastseqno",
            Self::NoActive(_) => "noactive",
            Self::NoLocator(_) => "nolocator",
            Self::ReceptionReportsOnly(_) => "rronly",
            Self::Statistics(_) => "statistics",
        }
    }
}

const fn flag(yes: bool) -> &'static str {
    if yes { "1" } else { "0" }
}

/// The query string under construction, ordered by parameter name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParameterSet {
    values: BTreeMap<String, String>,
}

impl ParameterSet {
    /// Creates an empty parameter set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds a parameter set with the query pairs already present on `url`.
    /// A name repeated on the URL keeps its last value.
    pub fn from_url(url: &Url) -> Self {
        Self {
            values: url
                .query_pairs()
                .map(|(k, v)| (k.into_owned(), v.into_owned()))
                .collect(),
        }
    }

    /// Applies `options` in order on top of `self`, stopping at the first invalid one.
    pub fn with_options<'a, I>(mut self, options: I) -> Result<Self, ValidationError>
    where
        I: IntoIterator<Item = &'a QueryOption>,
    {
        for opt in options {
            self.apply(opt)?;
        }
        Ok(self)
    }

    /// Builds a parameter set from scratch out of `options`.
    pub fn build<'a, I>(options: I) -> Result<Self, ValidationError>
    where
        I: IntoIterator<Item = &'a QueryOption>,
    {
        Self::new().with_options(options)
    }

    /// Validates `opt` against the current contents and sets its parameter.
    ///
    /// The first identity option applied claims the identity group; any later identity option
    /// naming a different parameter fails, while repeating the same one replaces its value.
    pub fn apply(&mut self, opt: &QueryOption) -> Result<(), ValidationError> {
        let name = opt.param();
        let value = match opt {
            QueryOption::SenderCallsign(s)
            | QueryOption::ReceiverCallsign(s)
            | QueryOption::Callsign(s) => {
                if IDENTITY_PARAMS
                    .iter()
                    .any(|p| *p != name && self.values.contains_key(*p))
                {
                    return Err(ValidationError::ExclusivityViolation);
                }
                s.clone()
            }
            QueryOption::FlowStartSeconds(secs) => {
                let secs = *secs;
                if secs > 0 {
                    return Err(ValidationError::FlowStartPositive(secs));
                }
                if secs < -MAX_FLOW_START_AGE_SECS {
                    return Err(ValidationError::FlowStartTooOld(secs));
                }
                secs.to_string()
            }
            QueryOption::FrequencyRange { lower, upper } => {
                if lower > upper {
                    return Err(ValidationError::FrequencyRangeInverted {
                        lower: *lower,
                        upper: *upper,
                    });
                }
                format!("{lower}-{upper}")
            }
            QueryOption::ReportLimit(n) => n.to_string(),
            QueryOption::Mode(s)
            | QueryOption::AppContact(s)
            | QueryOption::LastSequenceNumber(s) => s.clone(),
            QueryOption::NoActive(b)
            | QueryOption::NoLocator(b)
            | QueryOption::ReceptionReportsOnly(b)
            | QueryOption::Statistics(b) => flag(*b).to_string(),
        };
        self.values.insert(name.to_string(), value);
        Ok(())
    }

    /// Value of parameter `name`, if set.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.values.get(name).map(String::as_str)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Iterates over `(name, value)` pairs in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// The identity parameter in use (`callsign`, `senderCallsign` or `receiverCallsign`), if any.
    pub fn identity(&self) -> Option<&str> {
        IDENTITY_PARAMS.iter().find_map(|p| self.get(p))
    }

    /// Form-urlencoded query string, sorted by parameter name.
    pub fn encode(&self) -> String {
        url::form_urlencoded::Serializer::new(String::new())
            .extend_pairs(self.values.iter())
            .finish()
    }
}
