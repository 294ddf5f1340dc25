pub mod cli;
pub mod toml_config;

#[cfg(feature = "cli")]
use clap::Parser;

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Parser)]
#[command(name = "leetcode-archiver")]
#[command(about = "Archive accepted LeetCode submissions as source files grouped by category and difficulty")]
pub struct CliConfig {
    /// Path to TOML configuration file
    #[arg(short, long, default_value = "archiver.toml")]
    pub config: String,

    /// Override output.root from the config file
    #[arg(short, long)]
    pub output: Option<String>,

    /// Override categories.path from the config file
    #[arg(long)]
    pub categories: Option<String>,

    /// List solved problems and their destination files without fetching code
    #[arg(long)]
    pub dry_run: bool,

    /// Emit logs as JSON lines
    #[arg(long)]
    pub json_logs: bool,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

#[cfg(feature = "cli")]
impl CliConfig {
    pub fn apply_overrides(&self, config: &mut toml_config::ArchiverConfig) {
        if let Some(output) = &self.output {
            tracing::info!("🔧 Output root overridden to: {}", output);
            config.output.root = output.clone();
        }
        if let Some(categories) = &self.categories {
            tracing::info!("🔧 Category table overridden to: {}", categories);
            config.categories.path = Some(categories.clone());
        }
    }
}
