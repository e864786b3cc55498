//! Newsletter domain: subscribers, per-send tracking records, and the
//! rendering of a post into a tracked email.

mod dispatch;
mod email_stat;
mod errors;
mod links;
mod post;
mod subscriber;
mod template;
mod tokens;

pub use dispatch::{DispatchReport, DispatchTarget, NewsletterStats};
pub use email_stat::EmailStat;
pub use errors::NewsletterError;
pub use links::{LinkSigner, TrackingLinks, CLICK_PATH, OPEN_PIXEL_PATH, UNSUBSCRIBE_PATH};
pub use post::NewsletterPost;
pub use subscriber::Subscriber;
pub use template::{html_escape, render_newsletter, tracked_markdown_to_html, RenderedEmail};
pub use tokens::{TrackingToken, UnsubscribeToken, TOKEN_LEN};
