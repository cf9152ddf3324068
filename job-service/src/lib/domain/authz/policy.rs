//! Role and ownership policies.
//!
//! Pure decision functions over an already-resolved identity. They never
//! touch persistence; callers load whatever resource state (e.g. a job's
//! employer) the policy needs before asking.

use crate::domain::identity::models::Identity;
use crate::domain::identity::models::IdentityId;
use crate::domain::identity::models::Role;
use crate::domain::authz::errors::AccessError;

/// Operations reserved to employers.
pub const EMPLOYER_ONLY: &[Role] = &[Role::Employer];

/// Operations open to employers and admins.
pub const EMPLOYER_OR_ADMIN: &[Role] = &[Role::Employer, Role::Admin];

/// Operations reserved to admins.
pub const ADMIN_ONLY: &[Role] = &[Role::Admin];

/// Allow only identities whose role is in `allowed`.
///
/// # Errors
/// * `Forbidden` - Role is not in the allowed set
pub fn require_any_role(identity: &Identity, allowed: &[Role]) -> Result<(), AccessError> {
    if allowed.contains(&identity.role) {
        Ok(())
    } else {
        Err(AccessError::Forbidden)
    }
}

/// Allow admins, or the identity owning the resource.
///
/// # Errors
/// * `Forbidden` - Acting identity is neither admin nor the owner
pub fn require_owner_or_admin(identity: &Identity, owner_id: &IdentityId) -> Result<(), AccessError> {
    if identity.role == Role::Admin || identity.id == *owner_id {
        Ok(())
    } else {
        Err(AccessError::Forbidden)
    }
}
