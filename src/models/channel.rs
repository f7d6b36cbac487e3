use serde::Deserialize;

use crate::cache::{Hydrate, Patch, Registry, Scoped};

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ChannelPayload {
    pub id: Patch<String>,
    #[serde(rename = "type")]
    pub kind: Patch<i64>,
    pub guild_id: Patch<String>,
    pub name: Patch<String>,
    pub topic: Patch<String>,
    pub position: Patch<i64>,
    pub nsfw: Patch<bool>,
    pub parent_id: Patch<String>,
}

/// A channel, cached globally; guild channels additionally appear
/// through their guild's scoped view over the same store.
#[derive(Debug, Clone, PartialEq)]
pub struct Channel {
    pub id: String,
    pub kind: Option<i64>,
    pub guild_id: Option<String>,
    pub name: Option<String>,
    pub topic: Option<String>,
    pub position: Option<i64>,
    pub nsfw: Option<bool>,
    pub parent_id: Option<String>,
}

impl Hydrate for Channel {
    type Payload = ChannelPayload;

    fn from_payload(_registry: &Registry, payload: &ChannelPayload) -> Self {
        let mut channel = Channel {
            id: payload.id.cloned_or_default(),
            kind: None,
            guild_id: None,
            name: None,
            topic: None,
            position: None,
            nsfw: None,
            parent_id: None,
        };
        channel.apply(payload);
        channel
    }

    fn apply(&mut self, payload: &ChannelPayload) {
        payload.id.apply_required(&mut self.id);
        payload.kind.apply(&mut self.kind);
        payload.guild_id.apply(&mut self.guild_id);
        payload.name.apply(&mut self.name);
        payload.topic.apply(&mut self.topic);
        payload.position.apply(&mut self.position);
        payload.nsfw.apply(&mut self.nsfw);
        payload.parent_id.apply(&mut self.parent_id);
    }
}

impl Scoped for Channel {
    fn owner_id(&self) -> Option<&str> {
        self.guild_id.as_deref()
    }

    fn set_owner_id(&mut self, owner: &str) {
        self.guild_id = Some(owner.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::MockTransport;

    #[test]
    fn test_type_field_maps_to_kind() {
        let payload: ChannelPayload =
            serde_json::from_value(serde_json::json!({"id": "9", "type": 0, "name": "general"}))
                .unwrap();
        let registry = Registry::new(MockTransport::empty());
        let channel = Channel::from_payload(&registry, &payload);
        assert_eq!(channel.kind, Some(0));
        assert_eq!(channel.name.as_deref(), Some("general"));
        assert_eq!(channel.owner_id(), None);
    }
}
