//! Backend JSON payload decoding.
//!
//! The access-management API returns camelCase JSON with nullable `via`,
//! `role` and `viaRole`. Decoding maps `null`/absent fields to `None` and
//! drops a `viaRole` that has no `via` to go with it.

use tracing::{debug, warn};

use crate::error::Result;
use crate::types::{Delegation, PermissionRelation, RolePermission};

fn decode<T: serde::de::DeserializeOwned>(json: &str, what: &str) -> Result<T> {
    serde_json::from_str(json).map_err(|e| {
        warn!(payload = what, error = %e, "rejected payload");
        e.into()
    })
}

/// Decode a JSON array of permission relations.
pub fn parse_permissions(json: &str) -> Result<Vec<PermissionRelation>> {
    let permissions: Vec<PermissionRelation> = decode(json, "permissions")?;
    let permissions: Vec<_> = permissions
        .into_iter()
        .map(PermissionRelation::normalized)
        .collect();
    debug!(relations = permissions.len(), "decoded permissions");
    Ok(permissions)
}

/// Decode a package/role delegation object (`{"permissions": [...]}`).
pub fn parse_delegation(json: &str) -> Result<Delegation> {
    let delegation: Delegation = decode(json, "delegation")?;
    Ok(Delegation {
        permissions: delegation
            .permissions
            .into_iter()
            .map(PermissionRelation::normalized)
            .collect(),
    })
}

/// Decode the role set of a user-to-user relationship.
pub fn parse_role_permissions(json: &str) -> Result<Vec<RolePermission>> {
    let role_permissions: Vec<RolePermission> = decode(json, "role permissions")?;
    let role_permissions: Vec<_> = role_permissions
        .into_iter()
        .map(|rp| RolePermission {
            role: rp.role,
            permissions: rp
                .permissions
                .into_iter()
                .map(PermissionRelation::normalized)
                .collect(),
        })
        .collect();
    debug!(roles = role_permissions.len(), "decoded role permissions");
    Ok(role_permissions)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::EngineError;

    const PERMISSIONS: &str = r#"[
        {
            "from": {"id": "org-a", "name": "Org A", "type": "Organisasjon", "organizationIdentifier": "310000001"},
            "to": {"id": "p-b", "name": "Person B", "type": "Person", "variant": "Person"},
            "via": null,
            "role": {"id": "r1", "code": "rettighetshaver", "children": null},
            "viaRole": null,
            "unknownField": 42
        },
        {
            "from": {"id": "org-a", "name": "Org A"},
            "to": {"id": "p-c", "name": "Person C"},
            "via": {"id": "org-b", "name": "Org B"},
            "role": {"id": "r1", "code": "rettighetshaver"},
            "viaRole": {"id": "r2", "code": "daglig-leder"}
        },
        {
            "from": {"id": "org-a", "name": "Org A"},
            "to": {"id": "p-d", "name": "Person D"},
            "role": null,
            "viaRole": {"id": "r2", "code": "daglig-leder"}
        }
    ]"#;

    #[test]
    fn decodes_backend_permissions() {
        let permissions = parse_permissions(PERMISSIONS).unwrap();
        assert_eq!(permissions.len(), 3);

        let first = &permissions[0];
        assert_eq!(first.from.entity_type.as_deref(), Some("Organisasjon"));
        assert_eq!(first.from.organization_identifier.as_deref(), Some("310000001"));
        assert_eq!(first.to.variant.as_deref(), Some("Person"));
        assert!(first.via.is_none());
        assert_eq!(first.role.as_ref().map(|r| r.code.as_str()), Some("rettighetshaver"));

        let second = &permissions[1];
        assert_eq!(second.via.as_ref().map(|v| v.id.as_str()), Some("org-b"));
        assert_eq!(
            second.via_role.as_ref().map(|r| r.code.as_str()),
            Some("daglig-leder")
        );
    }

    #[test]
    fn via_role_without_via_is_dropped() {
        let permissions = parse_permissions(PERMISSIONS).unwrap();
        let third = &permissions[2];
        assert!(third.via.is_none());
        assert!(third.via_role.is_none());
        assert!(third.role.is_none());
    }

    #[test]
    fn decodes_delegation() {
        let json = format!(r#"{{"id": "pkg-1", "permissions": {PERMISSIONS}}}"#);
        let delegation = parse_delegation(&json).unwrap();
        assert_eq!(delegation.permissions.len(), 3);
        assert!(delegation.permissions[2].via_role.is_none());

        let empty = parse_delegation("{}").unwrap();
        assert!(empty.permissions.is_empty());
    }

    #[test]
    fn decodes_role_permissions() {
        let json = r#"[
            {"role": {"code": "rettighetshaver"}, "permissions": [
                {"from": {"id": "a"}, "to": {"id": "b"}, "via": null, "role": null}
            ]},
            {"role": {"id": "x", "code": "dagl", "provider": {"code": "sys-ccr", "name": "Enhetsregisteret"}}}
        ]"#;
        let role_permissions = parse_role_permissions(json).unwrap();
        assert_eq!(role_permissions.len(), 2);
        assert_eq!(role_permissions[0].permissions.len(), 1);
        assert!(role_permissions[1].permissions.is_empty());
        let provider = role_permissions[1].role.provider.as_ref().unwrap();
        assert_eq!(provider.name.as_deref(), Some("Enhetsregisteret"));
    }

    #[test]
    fn missing_endpoint_is_rejected() {
        let err = parse_permissions(r#"[{"from": {"id": "a"}}]"#).unwrap_err();
        assert!(matches!(err, EngineError::Payload(_)));
        assert!(err.to_string().starts_with("invalid payload"));
    }
}
