//! Plain-text and JSON rendering of dasha records.

use dasha_vedic::dasha::{DashaLevel, DashaRecord, VimshottariReport};
use serde::Serialize;

/// One row of an active-period chain.
#[derive(Debug, Clone, Serialize)]
pub struct ActivePeriod {
    pub level: &'static str,
    pub abbreviation: &'static str,
    #[serde(flatten)]
    pub period: DashaRecord,
}

impl ActivePeriod {
    pub fn new(level: DashaLevel, period: DashaRecord) -> Self {
        Self {
            level: level.name(),
            abbreviation: level.abbreviation(),
            period,
        }
    }
}

/// Birth summary followed by the Mahadasha tree.
pub fn report_text(report: &VimshottariReport) -> String {
    let mut out = format!(
        "Moon {:.6} deg - {} (index {}), {:.4} elapsed\nStarting lord: {}\n\n",
        report.moon_sid_deg,
        report.nakshatra_name,
        report.nakshatra_index,
        report.nakshatra_fraction,
        report.start_lord,
    );
    push_records(&mut out, &report.mahadashas, Some(DashaLevel::Mahadasha), 0);
    out
}

/// Indented tree of records. `level` labels the first row set when known.
pub fn records_text(records: &[DashaRecord], level: Option<DashaLevel>) -> String {
    let mut out = String::new();
    push_records(&mut out, records, level, 0);
    out
}

/// Active chain, outermost first.
pub fn chain_text(chain: &[ActivePeriod]) -> String {
    chain
        .iter()
        .enumerate()
        .map(|(depth, row)| {
            format!(
                "{}{:<12} {}\n",
                "  ".repeat(depth),
                row.level,
                record_line(&row.period)
            )
        })
        .collect()
}

fn push_records(
    out: &mut String,
    records: &[DashaRecord],
    level: Option<DashaLevel>,
    indent: usize,
) {
    let label = level.map_or("", DashaLevel::abbreviation);
    for rec in records {
        out.push_str(&"  ".repeat(indent));
        if !label.is_empty() {
            out.push_str(&format!("{label:<3}"));
        }
        out.push_str(&record_line(rec));
        out.push('\n');
        push_records(
            out,
            &rec.children,
            level.and_then(DashaLevel::child_level),
            indent + 1,
        );
    }
}

fn record_line(rec: &DashaRecord) -> String {
    let years = (rec.end_jd - rec.start_jd) / dasha_vedic::dasha::DAYS_PER_YEAR;
    format!(
        "{:<8} {} - {} ({:.2} y)",
        rec.lord.name(),
        rec.start,
        rec.end,
        years
    )
}
