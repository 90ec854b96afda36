//! Connection graph builder: flat permission relations folded into a
//! two-level party hierarchy.
//!
//! Roots are parties reached directly (`to` of a relation without `via`) or
//! intermediate parties (`via`). Children are parties reached through a root.
//! Nodes are looked up through explicit id-keyed indexes, never by aliasing
//! the entities of the input payload.

use ahash::AHashMap;
use tracing::{debug, trace};

use crate::inheritance::is_inherited;
use crate::types::{CompactRole, Connection, Entity, PermissionRelation, RoleWithOrigin};

/// Index-backed builder preserving first-insertion order of roots and children.
#[derive(Debug, Default)]
struct ConnectionTable {
    roots: Vec<Connection>,
    root_index: AHashMap<String, usize>,
    /// (root id, child id) -> position in the root's `connections`.
    child_index: AHashMap<(String, String), usize>,
}

impl ConnectionTable {
    fn root_position(&mut self, party: &Entity) -> usize {
        if let Some(&idx) = self.root_index.get(&party.id) {
            return idx;
        }
        let idx = self.roots.len();
        self.roots.push(Connection::new(party.clone()));
        self.root_index.insert(party.id.clone(), idx);
        idx
    }

    fn root_mut(&mut self, party: &Entity) -> &mut Connection {
        let idx = self.root_position(party);
        &mut self.roots[idx]
    }

    fn child_mut(&mut self, root: &Entity, party: &Entity) -> &mut Connection {
        let root_idx = self.root_position(root);
        let key = (root.id.clone(), party.id.clone());
        let idx = match self.child_index.get(&key).copied() {
            Some(idx) => idx,
            None => {
                let children = &mut self.roots[root_idx].connections;
                let idx = children.len();
                children.push(Connection::new(party.clone()));
                self.child_index.insert(key, idx);
                idx
            }
        };
        &mut self.roots[root_idx].connections[idx]
    }

    fn into_roots(self) -> Vec<Connection> {
        self.roots
    }
}

/// Add `role` unless a role with the same code is already attached.
fn add_role(node: &mut Connection, role: &CompactRole, via_party: Option<&Entity>) {
    if node.roles.iter().any(|existing| existing.code == role.code) {
        return;
    }
    node.roles.push(RoleWithOrigin {
        id: role.id.clone(),
        code: role.code.clone(),
        via_party: via_party.cloned(),
    });
}

fn tag_inherited(node: &mut Connection, permissions: &[PermissionRelation], from_party_uuid: &str) {
    let id = node.party.entity.id.as_str();
    node.party.is_inherited = permissions
        .iter()
        .any(|p| is_inherited(p, id, from_party_uuid));
    for child in &mut node.connections {
        tag_inherited(child, permissions, from_party_uuid);
    }
}

/// Build the connection hierarchy for relations granted by `from_party_uuid`.
///
/// A party reached both directly and through an intermediate party yields two
/// independent nodes; they are not merged.
pub fn build_connections(
    permissions: &[PermissionRelation],
    from_party_uuid: &str,
) -> Vec<Connection> {
    let mut table = ConnectionTable::default();

    for permission in permissions {
        match &permission.via {
            Some(via) => {
                let child = table.child_mut(via, &permission.to);
                if let Some(via_role) = &permission.via_role {
                    add_role(child, via_role, Some(via));
                }
            }
            None => {
                let root = table.root_mut(&permission.to);
                if let Some(role) = &permission.role {
                    add_role(root, role, None);
                }
            }
        }
    }

    let mut roots = table.into_roots();
    for root in &mut roots {
        tag_inherited(root, permissions, from_party_uuid);
        trace!(
            party = root.party.id(),
            roles = root.roles.len(),
            children = root.connections.len(),
            inherited = root.party.is_inherited,
            "built connection"
        );
    }

    debug!(
        relations = permissions.len(),
        roots = roots.len(),
        "built connection graph"
    );
    roots
}
