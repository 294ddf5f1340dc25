use crate::domain::model::{FetchOutcome, Problem};
use crate::utils::error::Result;
use async_trait::async_trait;

/// Output tree the archiver writes into. Paths are relative to the storage root.
pub trait Storage: Send + Sync {
    fn ensure_dir(&self, path: &str) -> impl std::future::Future<Output = Result<()>> + Send;
    fn write_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<()>> + Send;
}

#[async_trait]
pub trait SubmissionSource: Send + Sync {
    /// Solved problems in listing order.
    async fn solved_problems(&self) -> Result<Vec<Problem>>;

    /// Latest submitted code for `problem`, falling back to a slug lookup once.
    async fn fetch_submission(&self, problem: &Problem) -> Result<FetchOutcome>;

    fn problem_url(&self, problem: &Problem) -> String;
}
