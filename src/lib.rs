//! # Tasklybe (Task Management API)
//!
//! `tasklybe` is a small multi-tenant task management backend. It exposes a
//! JSON API for user registration and login, a per-user task list, and a
//! student records module, all backed by PostgreSQL.
//!
//! ## Authentication
//!
//! Login issues a stateless HS256-signed JWT valid for 24 hours. Protected
//! routes require an `Authorization: Bearer <token>` header; the middleware
//! validates the signature and expiry and injects the authenticated identity
//! into the request extensions. Tokens are never stored and cannot be revoked
//! before expiry.
//!
//! ## Passwords
//!
//! Passwords are hashed with bcrypt before storage and are never serialized
//! in any response.

pub mod api;
pub mod cli;

#[allow(clippy::doc_markdown, clippy::needless_raw_string_hashes)]
pub mod built_info {
    include!(concat!(env!("OUT_DIR"), "/built.rs"));
}

pub const GIT_COMMIT_HASH: &str = match built_info::GIT_COMMIT_HASH {
    Some(hash) => hash,
    None => "unknown",
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_git_commit_hash_format() {
        if GIT_COMMIT_HASH == "unknown" {
            // Acceptable in non-git build environments
            return;
        }
        assert!(
            GIT_COMMIT_HASH.chars().all(|c| c.is_ascii_hexdigit()),
            "GIT_COMMIT_HASH should be a hex string, got: {GIT_COMMIT_HASH}"
        );
        assert!(
            GIT_COMMIT_HASH.len() >= 7,
            "GIT_COMMIT_HASH should be at least 7 characters long, got: {GIT_COMMIT_HASH}"
        );
    }
}
