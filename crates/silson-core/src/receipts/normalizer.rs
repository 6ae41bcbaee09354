use crate::reimbursement::Won;

pub(crate) fn normalize_cell(value: &str) -> String {
    let cleaned = value.replace(['\u{feff}', '\u{200b}'], "");
    cleaned.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Parses a spreadsheet amount such as `15000`, `15,000`, `15,000원` or
/// `15000.00`. Blank cells are zero. Returns `None` for anything else,
/// including negative numbers.
pub(crate) fn parse_amount(value: &str) -> Option<Won> {
    let scrubbed: String = value
        .trim()
        .trim_end_matches('원')
        .trim_start_matches('₩')
        .chars()
        .filter(|ch| !matches!(ch, ',' | ' ' | '\u{a0}'))
        .collect();

    if scrubbed.is_empty() {
        return Some(0);
    }

    let whole = match scrubbed.split_once('.') {
        Some((whole, fraction)) if fraction.chars().all(|ch| ch == '0') => whole,
        Some(_) => return None,
        None => scrubbed.as_str(),
    };

    if whole.is_empty() || !whole.bytes().all(|byte| byte.is_ascii_digit()) {
        return None;
    }

    whole.parse::<Won>().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_cell_strips_invisible_characters() {
        assert_eq!(normalize_cell("\u{feff}  상급   종합병원 "), "상급 종합병원");
        assert_eq!(normalize_cell("\u{200b}"), "");
    }

    #[test]
    fn parse_amount_accepts_formatted_won() {
        assert_eq!(parse_amount("15000"), Some(15_000));
        assert_eq!(parse_amount(" 15,000 "), Some(15_000));
        assert_eq!(parse_amount("1,234,567원"), Some(1_234_567));
        assert_eq!(parse_amount("₩2,000"), Some(2_000));
        assert_eq!(parse_amount("30000.00"), Some(30_000));
        assert_eq!(parse_amount(""), Some(0));
    }

    #[test]
    fn parse_amount_rejects_garbage_and_negatives() {
        assert_eq!(parse_amount("abc"), None);
        assert_eq!(parse_amount("-500"), None);
        assert_eq!(parse_amount("12.5"), None);
        assert_eq!(parse_amount("1e5"), None);
        assert_eq!(parse_amount("."), None);
        assert_eq!(parse_amount("99999999999999999999999"), None);
    }
}
