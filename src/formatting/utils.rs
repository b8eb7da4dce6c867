/// Shorten to `max_len` characters, ending in "..." when cut.
pub fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        return s.to_string();
    }
    if max_len <= 3 {
        return s.chars().take(max_len).collect();
    }
    let kept: String = s.chars().take(max_len - 3).collect();
    format!("{}...", kept)
}

pub fn extract_first_name(name: &str) -> &str {
    name.split_whitespace()
        .next()
        .unwrap_or(name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("a longer string", 8), "a lon...");
        assert_eq!(truncate("Zoë Ångström", 6), "Zoë...");
        assert_eq!(truncate("abcdef", 2), "ab");
    }

    #[test]
    fn test_extract_first_name() {
        assert_eq!(extract_first_name("Ada Byron"), "Ada");
        assert_eq!(extract_first_name(""), "");
    }
}
