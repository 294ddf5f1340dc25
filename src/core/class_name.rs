use regex::Regex;
use std::sync::OnceLock;

/// Tokens kept verbatim instead of being title-cased.
///
/// `I`, `V` and `IX` are not in the list, so titles using them come out as
/// `I`, `V` and `Ix`.
pub const ROMAN_NUMERALS: [&str; 6] = ["II", "III", "IV", "VI", "VII", "VIII"];

fn separator_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"[^\p{L}\p{N}\s]").expect("separator pattern is valid"))
}

/// Turns a problem title into a type identifier, e.g. "Two Sum" -> "TwoSum".
#[derive(Debug, Clone)]
pub struct ClassNameNormalizer {
    preserved: Vec<String>,
}

impl ClassNameNormalizer {
    pub fn new<I, T>(preserved: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        Self {
            preserved: preserved.into_iter().map(Into::into).collect(),
        }
    }

    pub fn preserved(&self) -> &[String] {
        &self.preserved
    }

    pub fn normalize(&self, title: &str) -> String {
        separator_pattern()
            .replace_all(title, " ")
            .split_whitespace()
            .map(|token| {
                if self.preserved.iter().any(|keep| keep == token) {
                    token.to_string()
                } else {
                    capitalize(token)
                }
            })
            .collect()
    }
}

impl Default for ClassNameNormalizer {
    fn default() -> Self {
        Self::new(ROMAN_NUMERALS)
    }
}

fn capitalize(token: &str) -> String {
    let mut chars = token.chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect(),
        None => String::new(),
    }
}
