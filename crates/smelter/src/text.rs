//! Small text helpers shared by the quality and standardization engines.

/// Trim and lowercase a value.
pub fn normalize(value: &str) -> String {
    value.trim().to_lowercase()
}

/// Strip everything but ASCII digits.
pub fn digits_only(value: &str) -> String {
    value.chars().filter(|c| c.is_ascii_digit()).collect()
}

/// Uppercase the first letter of each whitespace-delimited word.
pub fn title_case(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    let mut at_word_start = true;
    for ch in value.chars() {
        if ch.is_whitespace() {
            at_word_start = true;
            out.push(ch);
        } else if at_word_start {
            out.extend(ch.to_uppercase());
            at_word_start = false;
        } else {
            out.push(ch);
        }
    }
    out
}

/// Human-readable size starting at kilobytes: `0 KB`, `3.25 KB`, `12.4 MB`.
pub fn format_bytes(bytes: u64) -> String {
    if bytes == 0 {
        return "0 KB".to_string();
    }
    const UNITS: [&str; 3] = ["KB", "MB", "GB"];
    let mut size = bytes as f64 / 1024.0;
    let mut unit = 0;
    while size >= 1024.0 && unit < UNITS.len() - 1 {
        size /= 1024.0;
        unit += 1;
    }
    let decimals = if size < 10.0 { 2 } else { 1 };
    format!("{:.*} {}", decimals, size, UNITS[unit])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize() {
        assert_eq!(normalize("  Hello "), "hello");
        assert_eq!(normalize(""), "");
    }

    #[test]
    fn test_digits_only() {
        assert_eq!(digits_only("(555) 123-4567"), "5551234567");
        assert_eq!(digits_only("abc"), "");
    }

    #[test]
    fn test_title_case() {
        assert_eq!(title_case("new york"), "New York");
        assert_eq!(title_case("SÃO paulo"), "SÃO Paulo");
        assert_eq!(title_case("a  b"), "A  B");
        assert_eq!(title_case(""), "");
    }

    #[test]
    fn test_title_case_stable() {
        assert_eq!(title_case("New York"), "New York");
    }

    #[test]
    fn test_format_bytes() {
        assert_eq!(format_bytes(0), "0 KB");
        assert_eq!(format_bytes(512), "0.50 KB");
        assert_eq!(format_bytes(1024), "1.00 KB");
        assert_eq!(format_bytes(15 * 1024), "15.0 KB");
        assert_eq!(format_bytes(3 * 1024 * 1024), "3.00 MB");
    }
}
