//! Code normalization for node keys.

/// Largest magnitude at which every integer is exactly representable as f64.
const MAX_EXACT_INTEGER: f64 = 9_007_199_254_740_992.0;

/// Normalizes a raw cell value to its canonical code string.
///
/// Comma decimals are read as dots, integral numbers lose their fractional
/// part (`"5000.0"` and `"5000,0"` both become `"5000"`), other numbers keep
/// their shortest decimal form and non-numeric text is only trimmed. The
/// function is total and idempotent.
pub fn normalize_code(raw: &str) -> String {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return String::new();
    }
    let dotted = trimmed.replace(',', ".");
    match dotted.parse::<f64>() {
        Ok(value) if value.is_finite() => format_number(value),
        _ => trimmed.to_string(),
    }
}

/// Renders a node key for messages: integral float-like keys drop `.0`.
pub fn node_label(key: &str) -> String {
    if !key.contains('.') {
        return key.to_string();
    }
    match key.parse::<f64>() {
        Ok(value) if value.is_finite() && value.fract() == 0.0 => format_number(value),
        _ => key.to_string(),
    }
}

fn format_number(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < MAX_EXACT_INTEGER {
        // `-0.0` renders as "0".
        return format!("{}", value as i64);
    }
    let text = format!("{value}");
    if text.contains('.') {
        text.trim_end_matches('0').trim_end_matches('.').to_string()
    } else {
        text
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalizes_numeric_forms() {
        assert_eq!(normalize_code("5000.0"), "5000");
        assert_eq!(normalize_code("5000,0"), "5000");
        assert_eq!(normalize_code(" 12 "), "12");
        assert_eq!(normalize_code("1,5"), "1.5");
        assert_eq!(normalize_code("1.50"), "1.5");
        assert_eq!(normalize_code("-0"), "0");
    }

    #[test]
    fn keeps_text_codes() {
        assert_eq!(normalize_code("abc"), "abc");
        assert_eq!(normalize_code("NaN"), "NaN");
        assert_eq!(normalize_code("  "), "");
    }

    #[test]
    fn normalization_is_idempotent() {
        for raw in ["5000.0", "1,25", "7", "x-1", "3.000", "1e3", ""] {
            let once = normalize_code(raw);
            assert_eq!(normalize_code(&once), once, "raw value {raw:?}");
        }
    }

    #[test]
    fn labels_drop_integral_fraction() {
        assert_eq!(node_label("5000.0"), "5000");
        assert_eq!(node_label("5000.5"), "5000.5");
        assert_eq!(node_label("42"), "42");
        assert_eq!(node_label("v1.2.3"), "v1.2.3");
    }
}
