//! Number formatting for labels and summaries.

/// Formats a number with apostrophes as thousands separators, e.g. `1000012.0` becomes
/// `1'000'012`. Whole numbers drop the decimal part and fractional parts are rounded to
/// `decimals` places with trailing zeros trimmed. NaN renders as `0`.
pub fn split_thousands(value: f64, decimals: usize) -> String {
    if value.is_nan() {
        return "0".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "inf" } else { "-inf" }.to_string();
    }

    let formatted = if value.fract() == 0.0 {
        format!("{value:.0}")
    } else {
        let mut s = format!("{value:.decimals$}");
        if decimals > 0 {
            s = s.trim_end_matches('0').trim_end_matches('.').to_string();
        }
        s
    };

    let (sign, unsigned) = match formatted.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", formatted.as_str()),
    };
    let (whole, fraction) = match unsigned.split_once('.') {
        Some((whole, fraction)) => (whole, Some(fraction)),
        None => (unsigned, None),
    };

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, digit) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push('\'');
        }
        grouped.push(digit);
    }

    match fraction {
        Some(fraction) => format!("{sign}{grouped}.{fraction}"),
        None => format!("{sign}{grouped}"),
    }
}
