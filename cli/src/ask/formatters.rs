use crate::models::ValuationRecord;
use crate::utils::{
    format_money, format_money_range, format_optional, format_percentage, format_years, NOT_AVAILABLE,
};

/// Format the detail view for a selected record.
pub fn format_record_detail(record: &ValuationRecord) -> String {
    let lines = [
        format!("# {}", record.investor),
        format!(
            "Range: {} (base {})",
            format_money_range(record.low, record.high),
            format_money(record.base)
        ),
        format!("Discount rate: {}", format_optional(record.discount_rate, format_percentage)),
        format!("Exit yield: {}", format_optional(record.exit_yield, format_percentage)),
        format!("Hold period: {}", format_optional(record.hold_years, format_years)),
        format!("Profile: {}", record.profile.as_deref().unwrap_or(NOT_AVAILABLE)),
        format!("Why: {}", record.why.as_deref().unwrap_or(NOT_AVAILABLE)),
    ];
    lines.join("\n")
}

/// One-line summary used when listing records.
pub fn format_record_line(position: usize, record: &ValuationRecord) -> String {
    format!(
        "{}. {}: Low={}, Base={}, High={}, DiscountRate={}",
        position + 1,
        record.investor,
        format_money(record.low),
        format_money(record.base),
        format_money(record.high),
        format_optional(record.discount_rate, format_percentage)
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detail_with_every_field() {
        let record = ValuationRecord::new("Harbour Capital", 10.0, 12.3, 15.0)
            .with_discount_rate(7.5)
            .with_exit_yield(5.25)
            .with_hold_years(5.0)
            .with_profile("Long-hold pension money.")
            .with_why("Values the income stream.");

        assert_eq!(
            format_record_detail(&record),
            "# Harbour Capital\n\
             Range: £10.00m to £15.00m (base £12.30m)\n\
             Discount rate: 7.50%\n\
             Exit yield: 5.25%\n\
             Hold period: 5 years\n\
             Profile: Long-hold pension money.\n\
             Why: Values the income stream."
        );
    }

    #[test]
    fn test_detail_marks_absent_values() {
        let detail = format_record_detail(&ValuationRecord::new("Bare", 1.0, 2.0, 3.0));
        assert!(detail.contains("Discount rate: n/a"));
        assert!(detail.contains("Exit yield: n/a"));
        assert!(detail.contains("Hold period: n/a"));
        assert!(detail.contains("Profile: n/a"));
    }

    #[test]
    fn test_record_line() {
        let record = ValuationRecord::new("Northgate", 14.0, 18.0, 20.0).with_discount_rate(2.0);
        assert_eq!(
            format_record_line(0, &record),
            "1. Northgate: Low=£14.00m, Base=£18.00m, High=£20.00m, DiscountRate=2.00%"
        );
    }
}
