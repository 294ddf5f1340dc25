pub mod archiver;
pub mod category;
pub mod class_name;
pub mod leetcode;
pub mod source_file;

pub use crate::domain::model::{ArchiveSummary, FetchOutcome, PlannedFile, Problem, Submission};
pub use crate::domain::ports::{Storage, SubmissionSource};
pub use crate::utils::error::Result;
