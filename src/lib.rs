//! Quillhouse - backend for a personal blog.
//!
//! Covers login throttling, newsletter subscription and dispatch with
//! open/click tracking, admin roles, and password strength hints.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
