/// Currency symbol prefixed to every monetary value.
pub const CURRENCY_SYMBOL: &str = "£";
/// Scale suffix: source values are expressed in millions.
pub const SCALE_SUFFIX: &str = "m";

/// Placeholder for an optional value the record does not state.
pub const NOT_AVAILABLE: &str = "n/a";

/// Format a monetary value, e.g. `12.3` -> `£12.30m`.
///
/// Every answer and detail line goes through this function so that the text
/// matches what the presentation layer shows.
pub fn format_money(value: f64) -> String {
    format!("{}{:.2}{}", CURRENCY_SYMBOL, value, SCALE_SUFFIX)
}

/// Format a closed monetary range, e.g. `£14.00m to £15.00m`.
pub fn format_money_range(lo: f64, hi: f64) -> String {
    format!("{} to {}", format_money(lo), format_money(hi))
}

/// Format a rate already expressed in percent, e.g. `7.5` -> `7.50%`.
pub fn format_percentage(value: f64) -> String {
    format!("{:.2}%", value)
}

/// Format a holding period, e.g. `5` -> `5 years`, `1` -> `1 year`, `2.5` -> `2.5 years`.
pub fn format_years(value: f64) -> String {
    let unit = if value == 1.0 { "year" } else { "years" };
    if value.fract() == 0.0 {
        format!("{:.0} {}", value, unit)
    } else {
        format!("{} {}", value, unit)
    }
}

/// Apply `format` to a present value, or return `n/a`.
pub fn format_optional(value: Option<f64>, format: fn(f64) -> String) -> String {
    value.map(format).unwrap_or_else(|| NOT_AVAILABLE.to_string())
}
