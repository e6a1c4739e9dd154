//! pulse-auth
//!
//! The principal-resolver boundary: bearer-JWT validation for
//! Cognito-issued tokens. Yields a verified subject or rejects the token;
//! everything past this crate trusts the subject it produced.

pub mod error;
pub mod jwt;
