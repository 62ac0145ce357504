// Display formatting for prediction values
use chrono::NaiveDate;

pub fn format_confidence(score: f64) -> String {
    format!("{}%", (score * 100.0).round() as i64)
}

pub fn format_occupancy(occupancy: f64) -> String {
    format!("{:.1}%", occupancy)
}

/// 12-hour clock label, e.g. `0` -> `12:00 AM`, `13` -> `1:00 PM`
pub fn format_hour(hour: u8) -> String {
    let period = if hour >= 12 { "PM" } else { "AM" };
    let display = match hour % 12 {
        0 => 12,
        h => h,
    };
    format!("{}:00 {}", display, period)
}

pub fn format_date(date: NaiveDate) -> String {
    date.format("%B %-d, %Y").to_string()
}

/// Group digits in threes with commas, e.g. `45000` -> `45,000`
pub fn format_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}
