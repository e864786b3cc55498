//! Use cases for login throttling, newsletters and admin roles.
//!
//! Each handler takes a command or query, talks to ports only, and returns
//! a module-specific error the HTTP layer maps to a status code.

pub mod handlers;
