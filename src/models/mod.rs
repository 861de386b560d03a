//! Domain models

pub mod game;
pub mod progress;
pub mod submission;
pub mod task;

pub use game::Game;
pub use progress::{ProgressRecord, TaskCompletionRecord};
pub use submission::{NewSubmission, Submission, Verdict};
pub use task::{Task, TestCase};
