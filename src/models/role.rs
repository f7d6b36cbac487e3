use serde::Deserialize;

use crate::cache::{Hydrate, Patch, Registry};

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RolePayload {
    pub id: Patch<String>,
    pub name: Patch<String>,
    pub color: Patch<i64>,
    pub hoist: Patch<bool>,
    pub position: Patch<i64>,
    pub permissions: Patch<String>,
    pub managed: Patch<bool>,
    pub mentionable: Patch<bool>,
}

/// A guild role, cached per guild. The `@everyone` role shares its id
/// with the guild itself.
#[derive(Debug, Clone, PartialEq)]
pub struct Role {
    pub id: String,
    pub name: Option<String>,
    pub color: Option<i64>,
    pub hoist: Option<bool>,
    pub position: Option<i64>,
    pub permissions: Option<String>,
    pub managed: Option<bool>,
    pub mentionable: Option<bool>,
}

impl Hydrate for Role {
    type Payload = RolePayload;

    fn from_payload(_registry: &Registry, payload: &RolePayload) -> Self {
        let mut role = Role {
            id: payload.id.cloned_or_default(),
            name: None,
            color: None,
            hoist: None,
            position: None,
            permissions: None,
            managed: None,
            mentionable: None,
        };
        role.apply(payload);
        role
    }

    fn apply(&mut self, payload: &RolePayload) {
        payload.id.apply_required(&mut self.id);
        payload.name.apply(&mut self.name);
        payload.color.apply(&mut self.color);
        payload.hoist.apply(&mut self.hoist);
        payload.position.apply(&mut self.position);
        payload.permissions.apply(&mut self.permissions);
        payload.managed.apply(&mut self.managed);
        payload.mentionable.apply(&mut self.mentionable);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::MockTransport;

    #[test]
    fn test_patch_overwrites_only_defined_fields() {
        let registry = Registry::new(MockTransport::empty());
        let mut role = Role::from_payload(
            &registry,
            &RolePayload {
                id: Patch::Value("1".into()),
                name: Patch::Value("admin".into()),
                color: Patch::Value(0xff0000),
                hoist: Patch::Value(true),
                ..Default::default()
            },
        );

        role.apply(&RolePayload {
            // Defined-but-zero must overwrite; absent fields must not.
            color: Patch::Value(0),
            hoist: Patch::Value(false),
            ..Default::default()
        });

        assert_eq!(role.id, "1");
        assert_eq!(role.name.as_deref(), Some("admin"));
        assert_eq!(role.color, Some(0));
        assert_eq!(role.hoist, Some(false));
    }

    #[test]
    fn test_null_unsets_a_field() {
        let registry = Registry::new(MockTransport::empty());
        let mut role = Role::from_payload(
            &registry,
            &RolePayload {
                id: Patch::Value("1".into()),
                permissions: Patch::Value("8".into()),
                ..Default::default()
            },
        );

        role.apply(&RolePayload {
            permissions: Patch::Null,
            ..Default::default()
        });
        assert_eq!(role.permissions, None);
    }
}
