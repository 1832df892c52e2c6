//! Fixed-format console summary of a run.

use std::path::Path;

use crate::insights::{CorrelatedPair, Insights, RankedSector};
use crate::sector::SectorAggregate;

const RULE_WIDTH: usize = 60;
const NA: &str = "n/a";

fn pct(v: f64) -> String {
    format!("{:.2}%", v * 100.0)
}

fn signed_pct(v: f64) -> String {
    format!("{:+.2}%", v * 100.0)
}

fn ranked(r: &Option<RankedSector>, fmt: impl Fn(f64) -> String) -> String {
    match r {
        Some(r) => format!("{} ({})", r.sector, fmt(r.value)),
        None => NA.to_string(),
    }
}

fn pair(p: &Option<CorrelatedPair>) -> String {
    match p {
        Some(p) => format!("{} <-> {} ({:.2})", p.first, p.second, p.correlation),
        None => NA.to_string(),
    }
}

fn or_na(v: Option<f64>, fmt: impl Fn(f64) -> String) -> String {
    v.map(fmt).unwrap_or_else(|| NA.to_string())
}

/// Render the report printed at the end of a run.
pub fn format_summary(aggregates: &[SectorAggregate], insights: &Insights, files: &[&Path]) -> String {
    let rule = "=".repeat(RULE_WIDTH);
    let mut report = String::with_capacity(2048);

    report.push_str(&format!("{rule}\n"));
    report.push_str("SECTORAL - EXECUTIVE SUMMARY\n");
    report.push_str(&format!("{rule}\n"));

    report.push_str("\n--- Performance (12 months) ---\n");
    report.push_str(&format!(
        "Top sector:       {}\n",
        ranked(&insights.top_performer, signed_pct)
    ));
    report.push_str(&format!(
        "Worst sector:     {}\n",
        ranked(&insights.worst_performer, signed_pct)
    ));

    report.push_str("\n--- Risk ---\n");
    report.push_str(&format!(
        "Least volatile:   {}\n",
        ranked(&insights.least_volatile, |v| format!("{} vol", pct(v)))
    ));
    report.push_str(&format!(
        "Best Sharpe:      {}\n",
        ranked(&insights.best_sharpe, |v| format!("{v:.2}"))
    ));

    report.push_str("\n--- Correlations ---\n");
    report.push_str(&format!("Most correlated:  {}\n", pair(&insights.highest_correlation)));
    report.push_str(&format!("Least correlated: {}\n", pair(&insights.lowest_correlation)));

    report.push_str("\n--- Sector Detail ---\n");
    for a in aggregates {
        let s = &a.summary;
        report.push_str(&format!(
            "{:12} | Return: {:>8} | Vol: {:>7} | Sharpe: {:>5}\n",
            a.name,
            or_na(s.total_return_1y, signed_pct),
            or_na(s.volatility_1y, pct),
            or_na(s.sharpe_ratio, |v| format!("{v:.2}")),
        ));
    }

    report.push_str(&format!("\n{rule}\n"));
    report.push_str("Generated files:\n");
    for f in files {
        report.push_str(&format!("  {}\n", f.display()));
    }
    report.push_str(&format!("{rule}\n"));

    report
}
