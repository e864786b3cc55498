//! In-memory repository adapters for tests and local development.

mod email_stat_repository;
mod login_attempt_repository;
mod post_repository;
mod profile_repository;
mod subscriber_repository;

pub use email_stat_repository::InMemoryEmailStatRepository;
pub use login_attempt_repository::InMemoryLoginAttemptRepository;
pub use post_repository::InMemoryPostRepository;
pub use profile_repository::InMemoryProfileRepository;
pub use subscriber_repository::InMemorySubscriberRepository;
