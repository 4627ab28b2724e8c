//! Display formatting for money and market numbers (en-US conventions).

const COMPACT_UNITS: [(f64, &str); 5] = [
    (1.0, ""),
    (1e3, "K"),
    (1e6, "M"),
    (1e9, "B"),
    (1e12, "T"),
];

fn currency_symbol(code: &str) -> Option<&'static str> {
    let sym = match code {
        "USD" => "$",
        "EUR" => "€",
        "GBP" => "£",
        "INR" => "₹",
        "JPY" => "¥",
        "CNY" => "CN¥",
        "KRW" => "₩",
        "CAD" => "CA$",
        "AUD" => "A$",
        "BTC" => "₿",
        _ => return None,
    };
    Some(sym)
}

fn fraction_digits(code: &str) -> usize {
    match code {
        "JPY" | "KRW" | "VND" | "CLP" | "ISK" => 0,
        _ => 2,
    }
}

fn group_thousands(int_part: &str) -> String {
    let len = int_part.len();
    let mut out = String::with_capacity(len + len / 3);
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

fn is_zero_digits(s: &str) -> bool {
    s.chars().all(|c| c == '0' || c == '.' || c == ',')
}

/// Formats `amount` as money in `code` (ISO 4217, case-insensitive).
///
/// `format_currency(1234.5, "USD")` gives `$1,234.50`. Unknown codes are
/// written in front of the number: `XYZ 10.00`.
pub fn format_currency(amount: f64, code: &str) -> String {
    if !amount.is_finite() {
        return "-".to_string();
    }

    let code = code.trim().to_uppercase();
    let digits = fraction_digits(&code);

    let fixed = format!("{:.*}", digits, amount.abs());
    let number = match fixed.split_once('.') {
        Some((int_part, frac)) => format!("{}.{}", group_thousands(int_part), frac),
        None => group_thousands(&fixed),
    };

    let sign = if amount < 0.0 && !is_zero_digits(&number) { "-" } else { "" };

    match currency_symbol(&code) {
        Some(sym) => format!("{sign}{sym}{number}"),
        None => format!("{sign}{code} {number}"),
    }
}

/// Abbreviates large values: `1_500_000.0` gives `1.5M`.
///
/// At most one fraction digit is kept and a trailing `.0` is dropped.
pub fn format_compact(value: f64) -> String {
    if !value.is_finite() {
        return "-".to_string();
    }

    let abs = value.abs();
    let mut idx = COMPACT_UNITS
        .iter()
        .rposition(|(unit, _)| abs >= *unit)
        .unwrap_or(0);

    let mut rounded = round1(abs / COMPACT_UNITS[idx].0);
    // 999_960 rounds to 1000.0K, which reads as 1M
    while rounded >= 1000.0 && idx + 1 < COMPACT_UNITS.len() {
        idx += 1;
        rounded = round1(abs / COMPACT_UNITS[idx].0);
    }

    let number = if rounded.fract() == 0.0 {
        format!("{rounded:.0}")
    } else {
        format!("{:.1}", rounded)
    };

    let sign = if value < 0.0 && rounded != 0.0 { "-" } else { "" };
    format!("{sign}{number}{}", COMPACT_UNITS[idx].1)
}

fn round1(x: f64) -> f64 {
    (x * 10.0).round() / 10.0
}

/// Signed percentage with two decimals: `+2.35%`, `-1.20%`, `0.00%`.
pub fn format_percent(value: f64) -> String {
    if !value.is_finite() {
        return "-".to_string();
    }

    let fixed = format!("{:.2}", value.abs());
    if is_zero_digits(&fixed) {
        return format!("{fixed}%");
    }

    let sign = if value < 0.0 { "-" } else { "+" };
    format!("{sign}{fixed}%")
}

/// CSS class used by templates to color a change value.
pub fn change_class(change: f64) -> &'static str {
    if change > 0.0 {
        "text-success"
    } else if change < 0.0 {
        "text-danger"
    } else {
        "text-muted"
    }
}
