/// Render a price as currency: `$` prefix, thousands separators, two decimals
///
/// Negative values keep the sign after the currency symbol (`$-1,234.50`).
/// Values that round to zero drop the sign, so `-0.001` renders as `$0.00`
/// rather than `$-0.00`.
pub fn format_currency(value: f64) -> String {
    let fixed = format!("{:.2}", value.abs());
    let (whole, cents) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));

    let sign = if value < 0.0 && fixed != "0.00" { "-" } else { "" };

    format!("${}{}.{}", sign, group_thousands(whole), cents)
}

/// Insert a comma between every group of three digits
fn group_thousands(digits: &str) -> String {
    let len = digits.len();
    let mut grouped = String::with_capacity(len + len / 3);

    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    grouped
}
