//! Text helpers shared by layout: subtitle splitting and amount formatting.

/// Full-width vertical bar delimiter.
pub const FULL_WIDTH_BAR: char = '｜';
/// Half-width vertical bar delimiter.
pub const HALF_WIDTH_BAR: char = '|';

const INTEGRAL_EPSILON: f64 = 1e-6;
const MISSING_AMOUNT: &str = "--";

/// Date and category halves of a poster subtitle.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SubtitleParts<'a> {
    pub date: &'a str,
    pub category: &'a str,
}

/// Split a subtitle into its date and category parts.
///
/// The full-width bar wins when both delimiters occur. Only the first
/// occurrence splits; both halves are trimmed. Without a delimiter the whole
/// subtitle is the category and the date is empty.
pub fn split_subtitle(subtitle: &str) -> SubtitleParts<'_> {
    let delimiter = if subtitle.contains(FULL_WIDTH_BAR) {
        Some(FULL_WIDTH_BAR)
    } else if subtitle.contains(HALF_WIDTH_BAR) {
        Some(HALF_WIDTH_BAR)
    } else {
        None
    };

    match delimiter.and_then(|sep| subtitle.split_once(sep)) {
        Some((date, category)) => SubtitleParts {
            date: date.trim(),
            category: category.trim(),
        },
        None => SubtitleParts {
            date: "",
            category: subtitle,
        },
    }
}

/// Format an optional amount for card display.
///
/// Integral values (within 1e-6) drop the decimal point; other values keep one
/// decimal digit with trailing zeros trimmed; absent values render as `--`.
pub fn format_amount(value: Option<f64>) -> String {
    let Some(value) = value else {
        return MISSING_AMOUNT.to_string();
    };
    if !value.is_finite() {
        return value.to_string();
    }
    let truncated = value.trunc();
    if (value - truncated).abs() < INTEGRAL_EPSILON {
        // Adding zero folds -0 into 0.
        return format!("{:.0}", truncated + 0.0);
    }
    let one_decimal = format!("{:.1}", value);
    one_decimal
        .trim_end_matches('0')
        .trim_end_matches('.')
        .to_string()
}

/// Join location and hotline into the footer info line.
///
/// Returns `None` when neither part is present. Empty strings count as absent.
pub fn compose_info_line(
    location: Option<&str>,
    hotline: Option<&str>,
    location_label: &str,
    hotline_label: &str,
) -> Option<String> {
    let mut parts = Vec::with_capacity(2);
    if let Some(location) = location.filter(|s| !s.is_empty()) {
        parts.push(format!("{}{}", location_label, location));
    }
    if let Some(hotline) = hotline.filter(|s| !s.is_empty()) {
        parts.push(format!("{}{}", hotline_label, hotline));
    }
    if parts.is_empty() {
        None
    } else {
        Some(parts.join(" | "))
    }
}
