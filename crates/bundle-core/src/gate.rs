//! Pre-flight TOML checks run before any destructive write

use toml_edit::DocumentMut;

const BOM: char = '\u{feff}';

/// Syntax and profile checks over raw TOML text.
#[derive(Debug, Default, Clone, Copy)]
pub struct TomlGate;

impl TomlGate {
    /// Parse `content` and surface the first parser error, prefixed with its
    /// line number when the parser reports a span.
    pub fn validate_syntax(content: &str) -> Result<(), String> {
        content
            .parse::<DocumentMut>()
            .map(|_| ())
            .map_err(|e| {
                let message = e.message().trim();
                match e.span() {
                    Some(span) => format!("line {}: {}", line_of(content, span.start), message),
                    None => message.to_string(),
                }
            })
    }

    /// The trimmed top-level `profile` string of a manifest document.
    ///
    /// Returns `None` when the document does not parse, has no `profile`,
    /// or the value is not a non-empty string.
    pub fn read_profile(content: &str) -> Option<String> {
        let doc = content.parse::<DocumentMut>().ok()?;
        doc.get("profile")
            .and_then(|item| item.as_str())
            .map(str::trim)
            .filter(|profile| !profile.is_empty())
            .map(str::to_string)
    }

    /// Strip a leading UTF-8 BOM and convert `\r\n` and lone `\r` to `\n`.
    pub fn normalize_content(content: &str) -> String {
        let content = content.strip_prefix(BOM).unwrap_or(content);
        content.replace("\r\n", "\n").replace('\r', "\n")
    }
}

fn line_of(content: &str, offset: usize) -> usize {
    let end = offset.min(content.len());
    content.as_bytes()[..end].iter().filter(|b| **b == b'\n').count() + 1
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    #[test]
    fn test_validate_syntax_accepts_valid_document() {
        let content = "profile = \"android\"\n\n[file_list]\nrequired = [\"config.toml\"]\n";
        assert_eq!(TomlGate::validate_syntax(content), Ok(()));
    }

    #[test]
    fn test_validate_syntax_reports_line() {
        let content = "a = 1\nb = @\n";
        let err = TomlGate::validate_syntax(content).unwrap_err();
        assert!(err.starts_with("line 2:"), "got: {err}");
    }

    #[test]
    fn test_validate_syntax_rejects_duplicate_keys() {
        assert!(TomlGate::validate_syntax("a = 1\na = 2\n").is_err());
    }

    #[rstest]
    #[case("profile = \"android\"", Some("android"))]
    #[case("profile = \"  desktop \"", Some("desktop"))]
    #[case("profile = \"\"", None)]
    #[case("profile = 3", None)]
    #[case("name = \"x\"", None)]
    #[case("profile = ", None)]
    #[case("[meta]\nprofile = \"android\"", None)]
    fn test_read_profile(#[case] content: &str, #[case] expected: Option<&str>) {
        assert_eq!(TomlGate::read_profile(content).as_deref(), expected);
    }

    #[rstest]
    #[case("\u{feff}a = 1\r\nb = 2\r\n", "a = 1\nb = 2\n")]
    #[case("a = 1\rb = 2\r", "a = 1\nb = 2\n")]
    #[case("a = 1\r\n\rb = 2", "a = 1\n\nb = 2")]
    #[case("a = 1\n", "a = 1\n")]
    fn test_normalize_content(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(TomlGate::normalize_content(input), expected);
    }
}
