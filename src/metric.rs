use serde::Deserialize;

/// The four counters the tracking object reports for a server.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BandwidthType {
    PublicIn,
    PublicOut,
    PrivateIn,
    PrivateOut,
}

impl BandwidthType {
    /// Column order of both report tables.
    pub const ALL: [BandwidthType; 4] = [
        BandwidthType::PublicIn,
        BandwidthType::PublicOut,
        BandwidthType::PrivateIn,
        BandwidthType::PrivateOut,
    ];

    pub fn key_name(self) -> &'static str {
        match self {
            BandwidthType::PublicIn => "publicIn_net_octet",
            BandwidthType::PublicOut => "publicOut_net_octet",
            BandwidthType::PrivateIn => "privateIn_net_octet",
            BandwidthType::PrivateOut => "privateOut_net_octet",
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            BandwidthType::PublicIn => "Pub In",
            BandwidthType::PublicOut => "Pub Out",
            BandwidthType::PrivateIn => "Pri In",
            BandwidthType::PrivateOut => "Pri Out",
        }
    }

    pub fn from_key_name(key_name: &str) -> Option<Self> {
        Self::ALL
            .iter()
            .copied()
            .find(|bandwidth_type| bandwidth_type.key_name() == key_name)
    }

    pub(crate) fn index(self) -> usize {
        self as usize
    }
}

/// A single data point as returned by `getBandwidthData`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct BandwidthSample {
    #[serde(rename = "dateTime")]
    pub date_time: String,
    #[serde(rename = "type")]
    pub metric_type: String,
    pub counter: f64,
}

impl BandwidthSample {
    #[cfg(test)]
    pub fn new(date_time: &str, metric_type: &str, counter: f64) -> Self {
        BandwidthSample {
            date_time: date_time.to_string(),
            metric_type: metric_type.to_string(),
            counter,
        }
    }
}
