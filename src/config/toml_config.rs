use crate::core::archiver::DEFAULT_EXTENSION;
use crate::core::category::{CategoryLookup, DEFAULT_CATEGORY};
use crate::core::class_name::ROMAN_NUMERALS;
use crate::core::leetcode::{Credentials, DEFAULT_BASE_URL, DEFAULT_PAGE_SIZE};
use crate::utils::error::{ArchiveError, Result};
use crate::utils::validation::{self, Validate};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArchiverConfig {
    pub auth: AuthConfig,
    #[serde(default)]
    pub source: SourceConfig,
    #[serde(default)]
    pub categories: CategoriesConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    pub session: String,
    pub csrf_token: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SourceConfig {
    pub base_url: String,
    /// Submission language filter, e.g. "java".
    pub language: String,
    pub page_size: usize,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            language: "java".to_string(),
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CategoriesConfig {
    /// Table with Problem/Category/Difficulty columns. Without one every problem is "other".
    pub path: Option<String>,
    pub delimiter: String,
    pub default_category: String,
}

impl Default for CategoriesConfig {
    fn default() -> Self {
        Self {
            path: None,
            delimiter: ";".to_string(),
            default_category: DEFAULT_CATEGORY.to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub root: String,
    pub extension: String,
    pub preserved_tokens: Vec<String>,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            root: "./submissions".to_string(),
            extension: DEFAULT_EXTENSION.to_string(),
            preserved_tokens: ROMAN_NUMERALS.iter().map(|t| t.to_string()).collect(),
        }
    }
}

impl ArchiverConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| ArchiveError::ConfigError {
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${LEETCODE_SESSION})
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| ArchiveError::ConfigError {
            message: format!("invalid substitution pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    pub fn credentials(&self) -> Credentials {
        Credentials {
            session: self.auth.session.clone(),
            csrf_token: self.auth.csrf_token.clone(),
        }
    }

    pub fn delimiter(&self) -> Result<u8> {
        validation::validate_delimiter("categories.delimiter", &self.categories.delimiter)
    }

    /// Loads the configured category table, or an empty lookup when none is set.
    pub fn category_lookup(&self) -> Result<CategoryLookup> {
        let lookup = match &self.categories.path {
            Some(path) => {
                tracing::info!("Loading categories from {}", path);
                CategoryLookup::from_path(path, self.delimiter()?)?
            }
            None => {
                tracing::info!(
                    "No category table configured, everything goes under '{}'",
                    self.categories.default_category
                );
                CategoryLookup::empty()
            }
        };
        Ok(lookup.with_default(self.categories.default_category.clone()))
    }

    pub fn validate_config(&self) -> Result<()> {
        validation::validate_secret("auth.session", &self.auth.session)?;
        validation::validate_secret("auth.csrf_token", &self.auth.csrf_token)?;
        validation::validate_url("source.base_url", &self.source.base_url)?;
        validation::validate_non_empty_string("source.language", &self.source.language)?;
        validation::validate_positive_number("source.page_size", self.source.page_size, 1)?;

        if let Some(path) = &self.categories.path {
            validation::validate_path("categories.path", path)?;
        }
        self.delimiter()?;
        validation::validate_non_empty_string(
            "categories.default_category",
            &self.categories.default_category,
        )?;

        validation::validate_path("output.root", &self.output.root)?;
        validation::validate_non_empty_string("output.extension", &self.output.extension)?;

        Ok(())
    }
}

impl Validate for ArchiverConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}
