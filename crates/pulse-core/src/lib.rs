//! pulse-core
//!
//! Pure domain types, ownership rules, the update sanitizer, and S3 key
//! conventions. No AWS SDK dependency — this is the shared vocabulary of
//! the Pulse system.

pub mod models;
pub mod ownership;
pub mod s3_keys;
pub mod update;
