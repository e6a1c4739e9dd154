//! The ownership rule: only the principal that created a resource may
//! mutate or delete it.

use thiserror::Error;
use uuid::Uuid;

/// A resource that records the principal permitted to mutate or delete it.
pub trait Owned {
    fn owner(&self) -> &str;
    fn resource_type(&self) -> &'static str;
    fn resource_id(&self) -> Uuid;
}

/// Raised when a principal attempts to mutate a resource it does not own.
///
/// Carries the resource type and id so the rejection can be logged with
/// full context at the HTTP boundary.
#[derive(Debug, Error)]
#[error("principal {principal} does not own {resource_type} {resource_id}")]
pub struct OwnershipError {
    pub principal: String,
    pub resource_type: &'static str,
    pub resource_id: Uuid,
}

/// Check that `principal` owns `resource`.
///
/// Pure decision function, no side effects. Must run on every update and
/// delete path; reads are never ownership-gated.
pub fn authorize_owner<R: Owned>(principal: &str, resource: &R) -> Result<(), OwnershipError> {
    if resource.owner() == principal {
        Ok(())
    } else {
        Err(OwnershipError {
            principal: principal.to_string(),
            resource_type: resource.resource_type(),
            resource_id: resource.resource_id(),
        })
    }
}
