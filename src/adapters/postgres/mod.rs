//! PostgreSQL adapters - Database implementations for repository ports.
//!
//! Schema lives in `migrations/`.

mod email_stat_repository;
mod login_attempt_repository;
mod post_repository;
mod profile_repository;
mod subscriber_repository;

pub use email_stat_repository::PostgresEmailStatRepository;
pub use login_attempt_repository::PostgresLoginAttemptRepository;
pub use post_repository::PostgresPostRepository;
pub use profile_repository::PostgresProfileRepository;
pub use subscriber_repository::PostgresSubscriberRepository;
