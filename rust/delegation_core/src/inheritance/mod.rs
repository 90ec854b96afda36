//! Direct vs. inherited classification of permission relations.
//!
//! A relation is *direct* (independently revocable) only when it is a
//! rightholder grant made between exactly the two parties in view, without an
//! intermediate party. Any other relation is inherited and can't be revoked
//! from this pair's context.

pub mod origin;

pub use origin::{inheritance_origin, inheritance_origins, InheritanceOrigin};

use crate::types::PermissionRelation;

/// Role code of a first-class, directly delegated grant.
pub const RIGHTHOLDER_ROLE_CODE: &str = "rettighetshaver";

/// Whether `code` is the rightholder role code.
pub fn is_rightholder(code: &str) -> bool {
    code == RIGHTHOLDER_ROLE_CODE
}

/// Returns `false` only when `permission` is a rightholder grant made
/// directly (no intermediate party) from `from_party_uuid` to `to_party_uuid`.
/// Total: absent roles count as inherited.
pub fn is_inherited(
    permission: &PermissionRelation,
    to_party_uuid: &str,
    from_party_uuid: &str,
) -> bool {
    let direct = permission.via.is_none()
        && permission.to.id == to_party_uuid
        && permission.from.id == from_party_uuid
        && permission
            .role
            .as_ref()
            .is_some_and(|role| is_rightholder(&role.code));
    !direct
}

/// Like [`is_inherited`], for callers that may not know the pair in view.
///
/// A missing party id never matches, so the relation counts as inherited.
pub fn is_inherited_for(
    permission: &PermissionRelation,
    to_party_uuid: Option<&str>,
    from_party_uuid: Option<&str>,
) -> bool {
    match (to_party_uuid, from_party_uuid) {
        (Some(to), Some(from)) => is_inherited(permission, to, from),
        _ => true,
    }
}
