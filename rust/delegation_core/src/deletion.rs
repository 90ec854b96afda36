//! Deletion-status classifier for a whole user-to-user relationship.
//!
//! Gates a destructive action: a relationship can be removed in full, in
//! part (only its rightholder grants), or not at all. The audience decides
//! which framing the confirmation dialog uses.

use ahash::AHashSet;
use serde::Serialize;
use tracing::debug;

use crate::error::{EngineError, Result};
use crate::inheritance::is_rightholder;
use crate::types::{
    DeletionLevel, DeletionStatus, DeletionTarget, Entity, RolePermission, RoleProvider,
};

impl DeletionTarget {
    /// Map the viewing flags to an audience; `viewing_yourself` wins over `reportee_view`.
    pub fn from_flags(viewing_yourself: bool, reportee_view: bool) -> Self {
        if viewing_yourself {
            DeletionTarget::Yourself
        } else if reportee_view {
            DeletionTarget::Reportee
        } else {
            DeletionTarget::User
        }
    }

    /// Like [`DeletionTarget::from_flags`], but rejects both flags being set.
    pub fn resolve(viewing_yourself: bool, reportee_view: bool) -> Result<Self> {
        if viewing_yourself && reportee_view {
            return Err(EngineError::ConflictingAudience);
        }
        Ok(Self::from_flags(viewing_yourself, reportee_view))
    }
}

fn is_deletable_role(role_permission: &RolePermission) -> bool {
    is_rightholder(&role_permission.role.code)
        && (role_permission.permissions.is_empty()
            || role_permission.permissions.iter().any(|p| p.via.is_none()))
}

fn is_non_deletable_role(role_permission: &RolePermission) -> bool {
    !is_rightholder(&role_permission.role.code)
        || role_permission.permissions.iter().any(|p| p.via.is_some())
}

/// Aggregate deletability of a relationship's role set.
///
/// `None` (not loaded) is never deletable; an empty role set is fully deletable.
pub fn deletion_level(role_permissions: Option<&[RolePermission]>) -> DeletionLevel {
    let Some(role_permissions) = role_permissions else {
        return DeletionLevel::None;
    };
    if role_permissions.is_empty() {
        return DeletionLevel::Full;
    }

    let has_deletable = role_permissions.iter().any(is_deletable_role);
    let has_non_deletable = role_permissions.iter().any(is_non_deletable_role);

    match (has_deletable, has_non_deletable) {
        (true, true) => DeletionLevel::Limited,
        (true, false) => DeletionLevel::Full,
        (false, _) => DeletionLevel::None,
    }
}

/// Classify deletion of a relationship for the given audience flags.
pub fn get_deletion_status(
    role_permissions: Option<&[RolePermission]>,
    viewing_yourself: bool,
    reportee_view: bool,
) -> DeletionStatus {
    let status = DeletionStatus {
        target: DeletionTarget::from_flags(viewing_yourself, reportee_view),
        level: deletion_level(role_permissions),
    };
    debug!(
        roles = role_permissions.map(|r| r.len()),
        target = ?status.target,
        level = ?status.level,
        "classified deletion status"
    );
    status
}

/// [`get_deletion_status`] for call boundaries that must not pass both flags.
pub fn get_deletion_status_checked(
    role_permissions: Option<&[RolePermission]>,
    viewing_yourself: bool,
    reportee_view: bool,
) -> Result<DeletionStatus> {
    let target = DeletionTarget::resolve(viewing_yourself, reportee_view)?;
    Ok(DeletionStatus {
        target,
        level: deletion_level(role_permissions),
    })
}

/// One reason a relationship can't be removed in full.
#[derive(Debug, Clone, Hash, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum NonDeletableReason {
    /// The relationship holds a role that isn't a delegated rightholder grant.
    #[serde(rename_all = "camelCase")]
    Role {
        code: String,
        provider: Option<RoleProvider>,
    },
    /// A grant reaches the user through an intermediate party.
    #[serde(rename_all = "camelCase")]
    InheritedVia { via: Entity, role_code: String },
}

/// Itemize what blocks full deletion, de-duplicated, in input order.
///
/// Non-empty exactly when some role entry is non-deletable.
pub fn non_deletable_reasons(role_permissions: Option<&[RolePermission]>) -> Vec<NonDeletableReason> {
    let mut seen = AHashSet::new();
    let mut reasons = Vec::new();

    for role_permission in role_permissions.unwrap_or_default() {
        let code = &role_permission.role.code;
        if !is_rightholder(code) {
            let reason = NonDeletableReason::Role {
                code: code.clone(),
                provider: role_permission.role.provider.clone(),
            };
            if seen.insert(reason.clone()) {
                reasons.push(reason);
            }
        }
        for via in role_permission.permissions.iter().filter_map(|p| p.via.as_ref()) {
            let reason = NonDeletableReason::InheritedVia {
                via: via.clone(),
                role_code: code.clone(),
            };
            if seen.insert(reason.clone()) {
                reasons.push(reason);
            }
        }
    }

    reasons
}
