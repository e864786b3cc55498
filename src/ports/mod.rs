//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! ## Persistence
//!
//! - `LoginAttemptRepository` - Failed-login ledger
//! - `SubscriberRepository` - Newsletter subscribers
//! - `EmailStatRepository` - Per-send tracking rows
//! - `PostRepository` - Read side of blog posts
//! - `ProfileRepository` - Profiles and the admin flag
//!
//! ## External services
//!
//! - `MailTransport` - Outbound email
//! - `SessionValidator` - Bearer token validation

mod email_stat_repository;
mod login_attempt_repository;
mod mail_transport;
mod post_repository;
mod profile_repository;
mod session_validator;
mod subscriber_repository;

pub use email_stat_repository::EmailStatRepository;
pub use login_attempt_repository::LoginAttemptRepository;
pub use mail_transport::{MailError, MailTransport, OutgoingEmail};
pub use post_repository::PostRepository;
pub use profile_repository::ProfileRepository;
pub use session_validator::SessionValidator;
pub use subscriber_repository::SubscriberRepository;
