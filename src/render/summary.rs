//! Plain-text typicality summary.

use console::style;
use std::fmt::Write;

use crate::stats::{CollectionProperties, TypicalityReport};
use crate::utils::format_with_commas;

pub fn render_summary(props: &CollectionProperties, report: &TypicalityReport) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "Collection: {} root(s), {} folders, {} files",
        props.n_roots,
        format_with_commas(props.n_folders),
        format_with_commas(props.n_files)
    );
    let _ = writeln!(out, "  {:<28} {:>12} {:>22} {:>12}", "metric", "value", "typical", "diff");

    for check in &report.checks {
        let range = format!("{} .. {}", format_value(check.range.low), format_value(check.range.high));
        let value = check.value.map(format_value).unwrap_or_else(|| "n/a".to_string());
        let diff = check.diff.map(format_signed).unwrap_or_default();
        let line = format!("  {:<28} {:>12} {:>22} {:>12}", check.metric.label(), value, range, diff);
        if check.is_typical() {
            let _ = writeln!(out, "{line}");
        } else {
            let _ = writeln!(out, "{}", style(line).yellow());
        }
    }

    let outside = report.atypical().count();
    if report.is_typical {
        let _ = writeln!(out, "All metrics fall within typical ranges.");
    } else {
        let _ = writeln!(out, "{} of {} metrics fall outside typical ranges.", outside, report.checks.len());
    }
    out
}

fn format_value(v: f64) -> String {
    if v.fract() == 0.0 && v.abs() < 1e15 {
        format!("{}", v as i64)
    } else {
        format!("{v:.2}")
    }
}

fn format_signed(v: f64) -> String {
    let body = format_value(v);
    if v > 0.0 {
        format!("+{body}")
    } else {
        body
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stats::aggregate::tests::tree;
    use crate::stats::{check_typicality, measure, StatsMode};

    #[test]
    fn summary_lists_every_metric() {
        let dict = tree(&[(1, None, 2), (2, Some(1), 1)]);
        let props = measure(&[dict], StatsMode::Lenient).unwrap();
        let report = check_typicality(&props);
        let text = render_summary(&props, &report);

        assert!(text.contains("Collection: 1 root(s), 2 folders, 3 files"));
        for check in &report.checks {
            assert!(text.contains(check.metric.label()), "missing {}", check.metric.label());
        }
        assert!(text.contains("metrics fall outside typical ranges"));
        assert!(text.contains("29123 .. 193001"));
        assert!(text.contains("n/a"));
    }

    #[test]
    fn values_formatting() {
        assert_eq!(format_value(3.0), "3");
        assert_eq!(format_value(5.2), "5.20");
        assert_eq!(format_signed(2.0), "+2");
        assert_eq!(format_signed(-4.25), "-4.25");
    }
}
