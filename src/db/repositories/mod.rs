//! PostgreSQL implementations of the service stores

pub mod game_repo;
pub mod progress_repo;
pub mod submission_repo;
pub mod task_repo;

pub use game_repo::GameRepository;
pub use progress_repo::ProgressRepository;
pub use submission_repo::SubmissionRepository;
pub use task_repo::TaskRepository;
