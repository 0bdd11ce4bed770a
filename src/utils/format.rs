//! Number and date formatting for terminal output

use chrono::DateTime;

pub fn format_with_commas(n: usize) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// `YYYY-MM-DD` (UTC) for a timestamp in seconds since the epoch.
pub fn format_iso_date(epoch_secs: f64) -> Option<String> {
    DateTime::from_timestamp(epoch_secs.trunc() as i64, 0).map(|dt| dt.format("%Y-%m-%d").to_string())
}
