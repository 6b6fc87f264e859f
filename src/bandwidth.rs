use chrono::DateTime;
use indexmap::IndexMap;
use serde_json::{Number, Value};
use tracing::debug;

use crate::metric::{BandwidthSample, BandwidthType};
use crate::report::ReportTable;
use crate::time_range::{SummaryPeriod, TimeRange};

const ROUND_DIGITS: usize = 4;
const CLEAN_TIME_FORMAT: &str = "%Y-%m-%d %H:%M";

const GIBIBYTE: f64 = (1u64 << 30) as f64;
const KIBIBYTE: f64 = (1u64 << 10) as f64;

pub const DETAIL_COLUMNS: [&str; 5] = ["Date", "Pub In", "Pub Out", "Pri In", "Pri Out"];
pub const SUMMARY_COLUMNS: [&str; 5] = ["Type", "Sum GB", "Average MBps", "Max GB", "Max Date"];

/// Turns an API timestamp such as `2019-05-20T23:00:00-06:00` into
/// `2019-05-20 23:00`, keeping the wall clock of its own offset. Anything
/// without a parseable offset is returned as-is.
pub fn normalize_timestamp(raw: &str) -> String {
    DateTime::parse_from_rfc3339(raw)
        .or_else(|_| DateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f%z"))
        .map(|date_time| date_time.format(CLEAN_TIME_FORMAT).to_string())
        .unwrap_or_else(|_| raw.to_string())
}

/// Rounds on the exact binary value of `value`, half to even, and returns the
/// float nearest to the rounded decimal. A float that prints as `0.00005` but
/// sits just above it rounds up.
fn round_digits(value: f64) -> f64 {
    format!("{:.*}", ROUND_DIGITS, value)
        .parse()
        .unwrap_or(value)
}

fn bytes_to_gibibytes(counter: f64) -> f64 {
    round_digits(counter / GIBIBYTE)
}

fn scale_down(value: f64) -> f64 {
    round_digits(value / KIBIBYTE)
}

fn decimal_cell(value: f64) -> Value {
    Number::from_f64(value).map_or(Value::Null, Value::Number)
}

/// Converted values for one timestamp bucket, indexed by `BandwidthType`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TimestampRow {
    values: [Option<f64>; 4],
}

impl TimestampRow {
    /// A metric that never showed up for this bucket reads as zero.
    pub fn get(&self, bandwidth_type: BandwidthType) -> f64 {
        self.values[bandwidth_type.index()].unwrap_or(0.0)
    }

    fn set(&mut self, bandwidth_type: BandwidthType, value: f64) {
        self.values[bandwidth_type.index()] = Some(value);
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct MetricAccumulator {
    pub bandwidth_type: BandwidthType,
    pub sum: f64,
    pub max: f64,
    pub max_date: Option<String>,
}

impl MetricAccumulator {
    fn new(bandwidth_type: BandwidthType) -> Self {
        MetricAccumulator {
            bandwidth_type,
            sum: 0.0,
            max: 0.0,
            max_date: None,
        }
    }

    fn add(&mut self, date: &str, value: f64) {
        // strictly greater: ties keep the earliest bucket
        if value > self.max {
            self.max = value;
            self.max_date = Some(date.to_string());
        }
        self.sum += value;
    }

    pub fn average(&self, row_count: usize, period: SummaryPeriod) -> f64 {
        if self.sum <= 0.0 || row_count == 0 {
            return 0.0;
        }
        round_digits(self.sum / row_count as f64 / f64::from(period.as_secs()))
    }
}

pub struct BandwidthAggregator {
    rows: IndexMap<String, TimestampRow>,
    totals: [MetricAccumulator; 4],
    period: SummaryPeriod,
}

impl BandwidthAggregator {
    pub fn ingest(samples: &[BandwidthSample], period: SummaryPeriod) -> Self {
        let mut rows: IndexMap<String, TimestampRow> = IndexMap::new();
        for sample in samples {
            let row = rows
                .entry(normalize_timestamp(&sample.date_time))
                .or_default();
            match BandwidthType::from_key_name(&sample.metric_type) {
                Some(bandwidth_type) => row.set(bandwidth_type, bytes_to_gibibytes(sample.counter)),
                None => debug!(metric_type = %sample.metric_type, "ignoring unknown bandwidth type"),
            }
        }

        let mut totals = BandwidthType::ALL.map(MetricAccumulator::new);
        for total in totals.iter_mut() {
            for (date, row) in &rows {
                total.add(date, row.get(total.bandwidth_type));
            }
        }
        debug!(rows = rows.len(), samples = samples.len(), "aggregated bandwidth samples");

        BandwidthAggregator {
            rows,
            totals,
            period,
        }
    }

    pub fn rows(&self) -> &IndexMap<String, TimestampRow> {
        &self.rows
    }

    pub fn totals(&self) -> &[MetricAccumulator; 4] {
        &self.totals
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn detail_table(&self, time_range: &TimeRange) -> ReportTable {
        render_rows(self.rows(), Some(time_range.report_title()))
    }

    pub fn summary_table(&self) -> ReportTable {
        render_summary(self.totals(), self.row_count(), self.period)
    }
}

pub fn render_rows(rows: &IndexMap<String, TimestampRow>, title: Option<String>) -> ReportTable {
    let mut table = ReportTable::new(&DETAIL_COLUMNS, title);
    for (date, row) in rows {
        let mut cells = vec![Value::String(date.clone())];
        cells.extend(
            BandwidthType::ALL
                .iter()
                .map(|bandwidth_type| decimal_cell(scale_down(row.get(*bandwidth_type)))),
        );
        table.add_row(cells);
    }
    table
}

pub fn render_summary(
    totals: &[MetricAccumulator],
    row_count: usize,
    period: SummaryPeriod,
) -> ReportTable {
    let mut table = ReportTable::new(&SUMMARY_COLUMNS, Some("Summary".to_string()));
    for total in totals {
        table.add_row(vec![
            Value::String(total.bandwidth_type.display_name().to_string()),
            decimal_cell(scale_down(total.sum)),
            decimal_cell(total.average(row_count, period)),
            decimal_cell(scale_down(total.max)),
            total.max_date.clone().map_or(Value::Null, Value::String),
        ]);
    }
    table
}
