//! Deletability classifier for a single package or role grant.

use tracing::trace;

use crate::inheritance::is_inherited_for;
use crate::types::{DeletableStatus, Delegation, PermissionRelation};

/// Classify whether the grant backed by `delegation` can be revoked by the
/// (to, from) pair in view.
///
/// An empty permission set is fully deletable. A missing party id makes every
/// relation count as inherited.
pub fn get_deletable_status(
    delegation: &Delegation,
    to_party_uuid: Option<&str>,
    from_party_uuid: Option<&str>,
) -> DeletableStatus {
    let permissions = &delegation.permissions;
    if permissions.is_empty() {
        return DeletableStatus::FullyDeletable;
    }

    let inherited = |p: &PermissionRelation| is_inherited_for(p, to_party_uuid, from_party_uuid);

    let status = if permissions.iter().all(inherited) {
        DeletableStatus::NotDeletable
    } else if permissions.iter().any(inherited) {
        DeletableStatus::PartiallyDeletable
    } else {
        DeletableStatus::FullyDeletable
    };

    trace!(
        permissions = permissions.len(),
        ?status,
        "classified deletable status"
    );
    status
}
