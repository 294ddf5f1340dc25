use crate::utils::error::Result;
use serde::Deserialize;
use std::collections::HashMap;
use std::io::Read;
use std::path::Path;

pub const DEFAULT_CATEGORY: &str = "other";

#[derive(Debug, Deserialize)]
struct CategoryRow {
    #[serde(rename = "Problem")]
    problem: String,
    #[serde(rename = "Category")]
    category: String,
}

/// Problem title to category label, keyed case-insensitively.
#[derive(Debug, Clone)]
pub struct CategoryLookup {
    entries: HashMap<String, String>,
    default_category: String,
}

impl CategoryLookup {
    pub fn empty() -> Self {
        Self {
            entries: HashMap::new(),
            default_category: DEFAULT_CATEGORY.to_string(),
        }
    }

    pub fn from_path<P: AsRef<Path>>(path: P, delimiter: u8) -> Result<Self> {
        let file = std::fs::File::open(path)?;
        Self::from_reader(file, delimiter)
    }

    /// Parses a table with `Problem` and `Category` columns. Later duplicates win.
    pub fn from_reader<R: Read>(reader: R, delimiter: u8) -> Result<Self> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .delimiter(delimiter)
            .trim(csv::Trim::All)
            .from_reader(reader);

        let mut entries = HashMap::new();
        for row in csv_reader.deserialize::<CategoryRow>() {
            let row = row?;
            entries.insert(row.problem.to_lowercase(), row.category);
        }

        tracing::debug!("Loaded {} category entries", entries.len());
        Ok(Self {
            entries,
            default_category: DEFAULT_CATEGORY.to_string(),
        })
    }

    pub fn with_default(mut self, default_category: impl Into<String>) -> Self {
        self.default_category = default_category.into();
        self
    }

    pub fn category_for(&self, title: &str) -> &str {
        self.entries
            .get(&title.to_lowercase())
            .map(String::as_str)
            .unwrap_or(&self.default_category)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for CategoryLookup {
    fn default() -> Self {
        Self::empty()
    }
}
