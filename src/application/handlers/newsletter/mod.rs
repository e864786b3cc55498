//! Newsletter handlers.
//!
//! ## Commands
//! - Subscribing and unsubscribing
//! - Sending a post to subscribers
//! - Recording opens and clicks from tracking links
//!
//! ## Queries
//! - Per-post delivery statistics (admin)

mod get_newsletter_stats;
mod record_click;
mod record_open;
mod send_newsletter;
mod subscribe;
mod unsubscribe;

// Commands
pub use record_click::{RecordClickCommand, RecordClickHandler, RecordClickResult};
pub use record_open::{RecordOpenCommand, RecordOpenHandler};
pub use send_newsletter::{SendNewsletterCommand, SendNewsletterHandler, DEFAULT_SEND_DELAY};
pub use subscribe::{SubscribeCommand, SubscribeHandler, SubscribeOutcome, SubscribeResult};
pub use unsubscribe::{UnsubscribeCommand, UnsubscribeHandler};

// Queries
pub use get_newsletter_stats::{GetNewsletterStatsHandler, GetNewsletterStatsQuery};
