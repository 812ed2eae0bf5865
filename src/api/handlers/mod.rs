//! Route handlers and shared request validation helpers.

pub mod auth;
pub mod health;
pub mod students;
pub mod tasks;
pub mod users;

use regex::Regex;

/// Lightweight email sanity check used before persisting data.
pub fn valid_email(email: &str) -> bool {
    Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").is_ok_and(|re| re.is_match(email))
}
