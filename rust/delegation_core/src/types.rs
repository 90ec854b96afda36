//! Domain types shared across delegation_core modules.

use serde::{Deserialize, Serialize};

/// An identified party (organization, person, agent) or role reference.
///
/// Produced entirely by the backend; the engine only reads it.
#[derive(Debug, Clone, Hash, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Entity {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub entity_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub variant: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub organization_identifier: Option<String>,
}

impl Entity {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Entity {
            id: id.into(),
            name: name.into(),
            ..Default::default()
        }
    }
}

/// Role reference as carried on a permission relation.
///
/// `code` is the stable business identifier, e.g. `"rettighetshaver"`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompactRole {
    #[serde(default)]
    pub id: String,
    pub code: String,
    /// Nested roles; carried through but never inspected.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub children: Option<Vec<CompactRole>>,
}

impl CompactRole {
    pub fn new(id: impl Into<String>, code: impl Into<String>) -> Self {
        CompactRole {
            id: id.into(),
            code: code.into(),
            children: None,
        }
    }
}

/// One granted-permission edge: `from` granted something to `to`,
/// possibly through the intermediate party `via`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PermissionRelation {
    pub from: Entity,
    pub to: Entity,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub via: Option<Entity>,
    #[serde(default)]
    pub role: Option<CompactRole>,
    /// Only meaningful when `via` is set.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub via_role: Option<CompactRole>,
}

impl PermissionRelation {
    /// Direct relation without an intermediate party.
    pub fn direct(from: Entity, to: Entity, role: Option<CompactRole>) -> Self {
        PermissionRelation {
            from,
            to,
            via: None,
            role,
            via_role: None,
        }
    }

    /// Relation reaching `to` through `via`, connected by `via_role`.
    pub fn through(
        from: Entity,
        to: Entity,
        via: Entity,
        role: Option<CompactRole>,
        via_role: Option<CompactRole>,
    ) -> Self {
        PermissionRelation {
            from,
            to,
            via: Some(via),
            role,
            via_role,
        }
    }

    /// The connecting role, honouring "no `via`, no `viaRole`".
    pub fn effective_via_role(&self) -> Option<&CompactRole> {
        self.via.as_ref().and(self.via_role.as_ref())
    }

    /// Drop a dangling `via_role` left over on a relation without `via`.
    pub fn normalized(mut self) -> Self {
        if self.via.is_none() {
            self.via_role = None;
        }
        self
    }
}

/// The set of permissions backing one package or role grant.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Delegation {
    #[serde(default)]
    pub permissions: Vec<PermissionRelation>,
}

/// Service provider owning a role (e.g. the register a statutory role comes from).
#[derive(Debug, Clone, Hash, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoleProvider {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

/// Role entry of a user-to-user relationship.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoleSummary {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub code: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub provider: Option<RoleProvider>,
}

/// A role together with the permission relations that back it.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RolePermission {
    pub role: RoleSummary,
    #[serde(default)]
    pub permissions: Vec<PermissionRelation>,
}

// ============================================================================
// Derived types
// ============================================================================

/// A role attached to a connection node, remembering the intermediate party
/// it was attributed through.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RoleWithOrigin {
    pub id: String,
    pub code: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub via_party: Option<Entity>,
}

/// The party of a connection node plus its aggregate inheritance flag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConnectionParty {
    #[serde(flatten)]
    pub entity: Entity,
    pub is_inherited: bool,
}

impl ConnectionParty {
    pub fn id(&self) -> &str {
        &self.entity.id
    }
}

/// A node of the connection hierarchy. `connections` holds direct children
/// only; the hierarchy is at most two levels deep.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Connection {
    pub party: ConnectionParty,
    pub roles: Vec<RoleWithOrigin>,
    pub connections: Vec<Connection>,
}

impl Connection {
    pub(crate) fn new(entity: Entity) -> Self {
        Connection {
            party: ConnectionParty {
                entity,
                is_inherited: false,
            },
            roles: Vec::new(),
            connections: Vec::new(),
        }
    }
}

/// Revocability of one package or role for the (to, from) pair in view.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum DeletableStatus {
    NotDeletable,
    PartiallyDeletable,
    FullyDeletable,
}

/// Whose relationship is being removed, relative to the viewer.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum DeletionTarget {
    Yourself,
    Reportee,
    User,
}

/// Aggregate deletability of a relationship's role set.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum DeletionLevel {
    Full,
    Limited,
    None,
}

/// Verdict for deleting a whole user-to-user relationship.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeletionStatus {
    pub target: DeletionTarget,
    pub level: DeletionLevel,
}
