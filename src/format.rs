use chrono::NaiveDate;

pub fn format_grouped(value: impl Into<i128>, separator: char) -> String {
    let value: i128 = value.into();
    let digits = value.unsigned_abs().to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    if value < 0 {
        out.push('-');
    }
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(separator);
        }
        out.push(ch);
    }
    out
}

/// `Rp. 1.500.000` style amount label.
pub fn format_currency(amount: impl Into<i128>, prefix: &str, separator: char) -> String {
    format!("{} {}", prefix, format_grouped(amount, separator))
}

pub fn format_due_date(date: NaiveDate) -> String {
    date.format("%a %b %d %Y").to_string()
}
