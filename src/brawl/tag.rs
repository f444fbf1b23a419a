//! Player tags as typed by users (`#2pp0q8`, `2PPOQ8`, ...) and as the API
//! expects them.

/// Canonical form: no `#`, `O` read as `0`, upper case.
pub fn normalize(input: &str) -> String {
    input
        .trim()
        .chars()
        .filter(|&c| c != '#')
        .map(|c| match c {
            'O' | 'o' => '0',
            c => c.to_ascii_uppercase(),
        })
        .collect()
}

/// Path segment for a tag, including the url-encoded `#`.
pub fn encode(tag: &str) -> String {
    urlencoding::encode(&format!("#{}", normalize(tag))).into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalizes_user_input() {
        assert_eq!(normalize("#2pp0q8"), "2PP0Q8");
        assert_eq!(normalize(" 2PPOQ8 "), "2PP0Q8");
        assert_eq!(normalize("##abc"), "ABC");
    }

    #[test]
    fn encodes_hash() {
        assert_eq!(encode("#2PP"), "%232PP");
        assert_eq!(encode("2pp"), "%232PP");
    }
}
