//! Authentication and session boundary.
//!
//! Login issues a stateless HS256 JWT; [`middleware::require_auth`] validates
//! the bearer token on protected routes and injects a
//! [`principal::Principal`] into the request extensions. Passwords are hashed
//! with bcrypt via [`password`].

pub mod middleware;
pub mod password;
pub mod principal;
pub mod token;

#[cfg(test)]
mod tests;
