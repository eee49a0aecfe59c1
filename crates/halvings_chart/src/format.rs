//! Axis and tooltip label formatting for USD prices.

/// Y-axis tick label on the log price scale.
///
/// Sub-dollar values keep their cents, thousands and millions are
/// abbreviated to one decimal.
pub fn format_tick(value: f64) -> String {
    if value == 0.0 {
        return "$0".to_string();
    }
    if value < 1.0 {
        return format!("${value:.2}");
    }

    let millions = value / 1_000_000.0;
    let thousands = value / 1_000.0;

    if millions >= 1.0 {
        format!("${millions:.1}M")
    } else if thousands >= 1.0 {
        format!("${thousands:.1}K")
    } else {
        format!("${value:.0}")
    }
}

/// Tooltip line for a hovered point: two decimals, comma thousands.
pub fn format_tooltip_price(price: f64) -> String {
    format!("Price: ${}", with_thousands(price, 2))
}

/// Fixed-decimal rendering with `,` between thousands groups.
pub fn with_thousands(value: f64, decimals: usize) -> String {
    let formatted = format!("{:.1$}", value.abs(), decimals);
    let (integer, fraction) = match formatted.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (formatted.as_str(), None),
    };

    let mut grouped = String::with_capacity(integer.len() + integer.len() / 3);
    for (i, ch) in integer.chars().enumerate() {
        if i > 0 && (integer.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    let negative = value.is_sign_negative() && formatted.chars().any(|c| c.is_ascii_digit() && c != '0');
    let sign = if negative { "-" } else { "" };

    match fraction {
        Some(f) => format!("{sign}{grouped}.{f}"),
        None => format!("{sign}{grouped}"),
    }
}
