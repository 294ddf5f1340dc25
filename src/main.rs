use clap::Parser;
use leetcode_archiver::utils::error::{ArchiveError, ErrorSeverity};
use leetcode_archiver::utils::{logger, validation::Validate};
use leetcode_archiver::{
    Archiver, ArchiverConfig, CliConfig, ClassNameNormalizer, LeetCodeClient, LocalStorage,
};

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let cli = CliConfig::parse();

    // 初始化日誌
    if cli.json_logs {
        logger::init_json_logger(cli.verbose);
    } else {
        logger::init_cli_logger(cli.verbose);
    }

    tracing::info!("🚀 Starting leetcode-archiver");

    if let Err(e) = run(&cli).await {
        tracing::error!(
            "❌ Archive failed: {} (Category: {:?}, Severity: {:?})",
            e,
            e.category(),
            e.severity()
        );
        tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());

        eprintln!("❌ {}", e.user_friendly_message());
        eprintln!("💡 {}", e.recovery_suggestion());

        std::process::exit(exit_code(&e));
    }
}

async fn run(cli: &CliConfig) -> leetcode_archiver::Result<()> {
    tracing::info!("📁 Loading configuration from: {}", cli.config);
    let mut config = ArchiverConfig::from_file(&cli.config)?;

    // 應用命令列覆蓋設定
    cli.apply_overrides(&mut config);
    config.validate()?;
    tracing::info!("✅ Configuration loaded and validated successfully");

    let categories = config.category_lookup()?;
    let normalizer = ClassNameNormalizer::new(config.output.preserved_tokens.clone());
    tracing::debug!(
        "{} category entries, preserved tokens {:?}",
        categories.len(),
        normalizer.preserved()
    );

    let client = LeetCodeClient::new(
        &config.source.base_url,
        &config.credentials(),
        &config.source.language,
    )?
    .with_page_size(config.source.page_size);
    let storage = LocalStorage::new(&config.output.root);

    let archiver = Archiver::new(client, storage, categories)
        .with_normalizer(normalizer)
        .with_extension(config.output.extension.clone());

    if cli.dry_run {
        tracing::info!("🔍 DRY RUN MODE - nothing will be fetched or written");
        let planned = archiver.plan().await?;
        for file in &planned {
            println!(
                "{:>5}  {:<7} {}/{}",
                file.problem.id, file.problem.difficulty, config.output.root, file.relative_path
            );
        }
        println!("{} solved problems", planned.len());
        return Ok(());
    }

    let summary = archiver.run().await?;

    println!(
        "✅ Archived {}/{} solved problems into {}",
        summary.written, summary.total, config.output.root
    );
    if summary.skipped > 0 {
        println!("⚠️  {} problems skipped (no retrievable submission)", summary.skipped);
    }
    if summary.collisions > 0 {
        println!(
            "⚠️  {} files were overwritten by problems with the same class name",
            summary.collisions
        );
    }

    Ok(())
}

fn exit_code(error: &ArchiveError) -> i32 {
    match error.severity() {
        ErrorSeverity::Medium => 2,
        ErrorSeverity::High => 1,
        ErrorSeverity::Critical => 3,
    }
}
