//! The slice of a blog post the newsletter needs.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{PostId, Timestamp};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewsletterPost {
    pub id: PostId,
    pub title: String,
    pub slug: String,
    pub excerpt: Option<String>,
    /// Markdown body.
    pub content: String,
    pub is_published: bool,
    pub email_sent: bool,
    pub email_sent_at: Option<Timestamp>,
}

impl NewsletterPost {
    /// Path of the post on the public site.
    pub fn path(&self) -> String {
        format!("/posts/{}", self.slug)
    }
}
