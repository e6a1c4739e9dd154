//! pulse-storage
//!
//! The entity store: one JSON document per S3 object. Thin wrapper around
//! the AWS S3 SDK plus typed document helpers.

pub mod client;
pub mod documents;
pub mod error;
pub mod objects;
