use crate::domain::model::Difficulty;
use regex::Regex;
use std::sync::OnceLock;

pub const DEFAULT_IMPORTS: [&str; 3] = [
    "import java.util.*;",
    "import java.util.function.*;",
    "import java.util.stream.*;",
];

fn entry_type_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"\bclass Solution\b").expect("entry type pattern is valid"))
}

/// Everything the builder needs to render one archived solution.
#[derive(Debug, Clone)]
pub struct SourceFile<'a> {
    pub id: u32,
    pub title: &'a str,
    pub difficulty: Difficulty,
    pub url: &'a str,
    pub class_name: &'a str,
    pub category: &'a str,
    pub code: &'a str,
}

impl SourceFile<'_> {
    pub fn package(&self) -> String {
        format!(
            "{}.{}",
            self.category.to_lowercase(),
            self.difficulty.as_segment()
        )
    }
}

#[derive(Debug, Clone)]
pub struct SourceFileBuilder {
    imports: Vec<String>,
}

impl SourceFileBuilder {
    pub fn new<I, T>(imports: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        Self {
            imports: imports.into_iter().map(Into::into).collect(),
        }
    }

    pub fn build(&self, file: &SourceFile<'_>) -> String {
        let mut out = format!("package {};\n\n", file.package());

        if !self.imports.is_empty() {
            for import in &self.imports {
                out.push_str(import);
                out.push('\n');
            }
            out.push('\n');
        }

        out.push_str(&format!(
            "/**\n * Problem: {}. {}\n * Difficulty: {}\n * Link: {}\n */\n",
            file.id, file.title, file.difficulty, file.url
        ));
        out.push_str(&rename_entry_type(file.code, file.class_name));
        out
    }
}

impl Default for SourceFileBuilder {
    fn default() -> Self {
        Self::new(DEFAULT_IMPORTS)
    }
}

/// Replaces the first whole-word `class Solution` with `public class <name>`.
/// Code without that sequence comes back unchanged.
pub fn rename_entry_type(code: &str, class_name: &str) -> String {
    let replacement = format!("public class {}", class_name);
    entry_type_pattern()
        .replace(code, regex::NoExpand(replacement.as_str()))
        .into_owned()
}
