//! Why a permission relation counts as inherited.

use ahash::AHashSet;
use serde::Serialize;
use tracing::trace;

use crate::config::EngineConfig;
use crate::types::{Entity, PermissionRelation};

use super::is_inherited;

/// Source of a relation's authority, relative to the (to, from) pair in view.
#[derive(Debug, Clone, Hash, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum InheritanceOrigin {
    /// Rightholder grant between exactly the two parties; revocable.
    Direct,
    /// Held through a statutory key role on the intermediate party.
    #[serde(rename_all = "camelCase")]
    ViaKeyRole { via: Entity, role_code: String },
    /// Held because the intermediate party acts as agent for the grantor.
    #[serde(rename_all = "camelCase")]
    ViaAgent { via: Entity, role_code: String },
    /// Held through any other connection to the intermediate party.
    #[serde(rename_all = "camelCase")]
    ViaConnection {
        via: Entity,
        role_code: Option<String>,
    },
    /// A non-rightholder role held directly by the grantee.
    #[serde(rename_all = "camelCase")]
    ViaRole { role_code: String },
    /// The relation is between other parties than the pair in view.
    OtherParty,
    /// No role information at all.
    Unattributed,
}

/// Classify where `permission` gets its authority from.
pub fn inheritance_origin(
    permission: &PermissionRelation,
    to_party_uuid: &str,
    from_party_uuid: &str,
    config: &EngineConfig,
) -> InheritanceOrigin {
    if !is_inherited(permission, to_party_uuid, from_party_uuid) {
        return InheritanceOrigin::Direct;
    }

    if let Some(via) = &permission.via {
        let role_code = permission.effective_via_role().map(|role| role.code.clone());
        return match role_code {
            Some(code) if config.is_key_role(&code) => InheritanceOrigin::ViaKeyRole {
                via: via.clone(),
                role_code: code,
            },
            Some(code) if config.is_agent_role(&code) => InheritanceOrigin::ViaAgent {
                via: via.clone(),
                role_code: code,
            },
            role_code => InheritanceOrigin::ViaConnection {
                via: via.clone(),
                role_code,
            },
        };
    }

    if permission.to.id != to_party_uuid || permission.from.id != from_party_uuid {
        return InheritanceOrigin::OtherParty;
    }

    match &permission.role {
        Some(role) => InheritanceOrigin::ViaRole {
            role_code: role.code.clone(),
        },
        None => InheritanceOrigin::Unattributed,
    }
}

/// Distinct inherited origins of `permissions`, in first-occurrence order.
///
/// Empty iff no relation is inherited.
pub fn inheritance_origins(
    permissions: &[PermissionRelation],
    to_party_uuid: &str,
    from_party_uuid: &str,
    config: &EngineConfig,
) -> Vec<InheritanceOrigin> {
    let mut seen = AHashSet::new();
    let mut origins = Vec::new();

    for permission in permissions {
        let origin = inheritance_origin(permission, to_party_uuid, from_party_uuid, config);
        if origin == InheritanceOrigin::Direct {
            continue;
        }
        if seen.insert(origin.clone()) {
            origins.push(origin);
        }
    }

    trace!(
        to = to_party_uuid,
        from = from_party_uuid,
        origins = origins.len(),
        "collected inheritance origins"
    );
    origins
}
