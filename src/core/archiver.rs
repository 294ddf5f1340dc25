use crate::core::category::CategoryLookup;
use crate::core::class_name::ClassNameNormalizer;
use crate::core::source_file::{SourceFile, SourceFileBuilder};
use crate::domain::model::{ArchiveSummary, FetchOutcome, PlannedFile, Problem};
use crate::domain::ports::{Storage, SubmissionSource};
use crate::utils::error::Result;
use std::collections::HashMap;

pub const DEFAULT_EXTENSION: &str = "java";

/// Walks the solved problems one at a time and writes each solution into
/// `<category>/<difficulty>/<ClassName>.<ext>`.
pub struct Archiver<F: SubmissionSource, S: Storage> {
    source: F,
    storage: S,
    categories: CategoryLookup,
    normalizer: ClassNameNormalizer,
    builder: SourceFileBuilder,
    extension: String,
}

impl<F: SubmissionSource, S: Storage> Archiver<F, S> {
    pub fn new(source: F, storage: S, categories: CategoryLookup) -> Self {
        Self {
            source,
            storage,
            categories,
            normalizer: ClassNameNormalizer::default(),
            builder: SourceFileBuilder::default(),
            extension: DEFAULT_EXTENSION.to_string(),
        }
    }

    pub fn with_normalizer(mut self, normalizer: ClassNameNormalizer) -> Self {
        self.normalizer = normalizer;
        self
    }

    pub fn with_builder(mut self, builder: SourceFileBuilder) -> Self {
        self.builder = builder;
        self
    }

    pub fn with_extension(mut self, extension: impl Into<String>) -> Self {
        self.extension = extension.into();
        self
    }

    pub fn destination(&self, problem: &Problem) -> PlannedFile {
        let category = self.categories.category_for(&problem.title).to_lowercase();
        let class_name = self.normalizer.normalize(&problem.title);
        let directory = format!("{}/{}", category, problem.difficulty.as_segment());
        let relative_path = format!("{}/{}.{}", directory, class_name, self.extension);

        PlannedFile {
            problem: problem.clone(),
            category,
            class_name,
            directory,
            relative_path,
        }
    }

    /// Lists where every solved problem would be written, without fetching code.
    pub async fn plan(&self) -> Result<Vec<PlannedFile>> {
        let problems = self.source.solved_problems().await?;
        Ok(problems.iter().map(|problem| self.destination(problem)).collect())
    }

    pub async fn run(&self) -> Result<ArchiveSummary> {
        let problems = self.source.solved_problems().await?;
        let total = problems.len();
        let mut summary = ArchiveSummary {
            total,
            ..ArchiveSummary::default()
        };
        let mut written_by: HashMap<String, String> = HashMap::new();

        for (index, problem) in problems.iter().enumerate() {
            tracing::debug!("Fetching '{}' ({})", problem.title, problem.id);

            let submission = match self.source.fetch_submission(problem).await? {
                FetchOutcome::Success(submission) => submission,
                FetchOutcome::NotFound => {
                    tracing::warn!(
                        "Couldn't fetch code on retry, skipping question '{}'",
                        problem.title
                    );
                    summary.skipped += 1;
                    continue;
                }
                FetchOutcome::Failed { reason } => {
                    tracing::warn!("Skipping question '{}': {}", problem.title, reason);
                    summary.skipped += 1;
                    continue;
                }
            };

            let planned = self.destination(problem);
            self.storage.ensure_dir(&planned.directory).await?;

            let url = self.source.problem_url(problem);
            let content = self.builder.build(&SourceFile {
                id: problem.id,
                title: &problem.title,
                difficulty: problem.difficulty,
                url: &url,
                class_name: &planned.class_name,
                category: &planned.category,
                code: &submission.code,
            });

            if let Some(previous) =
                written_by.insert(planned.relative_path.clone(), problem.title.clone())
            {
                if previous != problem.title {
                    tracing::warn!(
                        "'{}' overwrites '{}' at {}",
                        problem.title,
                        previous,
                        planned.relative_path
                    );
                    summary.collisions += 1;
                }
            }

            self.storage
                .write_file(&planned.relative_path, content.as_bytes())
                .await?;
            summary.written += 1;

            tracing::info!("{}/{} done!", index + 1, total);
        }

        tracing::info!(
            "Archived {} of {} solved problems ({} skipped, {} collisions)",
            summary.written,
            summary.total,
            summary.skipped,
            summary.collisions
        );
        Ok(summary)
    }
}
