use std::fmt;

use crate::error::BandwidthError;

/// Report window as typed by the user. Both ends are forwarded to the API
/// untouched; it accepts `YYYY-MM-DD`, `YYYY-MM-DDTHH:mm:ss` and offset forms.
#[derive(Debug, Clone, PartialEq)]
pub struct TimeRange {
    pub start: String,
    pub end: String,
}

impl TimeRange {
    pub fn new(start: &str, end: &str) -> Self {
        TimeRange {
            start: start.to_string(),
            end: end.to_string(),
        }
    }

    pub fn report_title(&self) -> String {
        format!("Bandwidth Report: {} - {}", self.start, self.end)
    }
}

/// Rollup interval in seconds. The API accepts 300, 600, 1800, 3600, 43200
/// or 86400.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SummaryPeriod(u32);

impl SummaryPeriod {
    pub const DEFAULT_SECS: u32 = 3600;

    pub fn as_secs(self) -> u32 {
        self.0
    }
}

impl Default for SummaryPeriod {
    fn default() -> Self {
        SummaryPeriod(Self::DEFAULT_SECS)
    }
}

impl TryFrom<u32> for SummaryPeriod {
    type Error = BandwidthError;

    fn try_from(secs: u32) -> Result<Self, Self::Error> {
        if secs == 0 {
            return Err(BandwidthError::InvalidPeriod(secs));
        }
        Ok(SummaryPeriod(secs))
    }
}

impl fmt::Display for SummaryPeriod {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}s", self.0)
    }
}

#[cfg(test)]
mod tests {
    use crate::error::BandwidthError;
    use crate::time_range::{SummaryPeriod, TimeRange};

    #[test]
    fn test_report_title() {
        let range = TimeRange::new("2019-05-01T00:01", "2019-05-02T00:00:01.00000-12:00");
        assert_eq!(
            range.report_title(),
            "Bandwidth Report: 2019-05-01T00:01 - 2019-05-02T00:00:01.00000-12:00"
        );
    }

    #[test]
    fn test_try_from() {
        assert_eq!(SummaryPeriod::try_from(300).unwrap().as_secs(), 300);
        assert_eq!(SummaryPeriod::default().as_secs(), 3600);
    }

    #[test]
    fn test_try_from_zero() {
        let result = SummaryPeriod::try_from(0);
        assert!(matches!(result, Err(BandwidthError::InvalidPeriod(0))));
    }
}
