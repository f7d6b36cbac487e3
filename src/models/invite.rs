use serde::Deserialize;

use crate::cache::{Hydrate, Patch, Registry};

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct InvitePayload {
    pub code: Patch<String>,
    pub guild_id: Patch<String>,
    pub channel_id: Patch<String>,
    pub uses: Patch<i64>,
    pub max_uses: Patch<i64>,
    pub max_age: Patch<i64>,
    pub temporary: Patch<bool>,
}

/// An invite, cached per guild and keyed by its code.
#[derive(Debug, Clone, PartialEq)]
pub struct Invite {
    pub code: String,
    pub guild_id: Option<String>,
    pub channel_id: Option<String>,
    pub uses: Option<i64>,
    pub max_uses: Option<i64>,
    pub max_age: Option<i64>,
    pub temporary: Option<bool>,
}

impl Hydrate for Invite {
    type Payload = InvitePayload;

    fn from_payload(_registry: &Registry, payload: &InvitePayload) -> Self {
        let mut invite = Invite {
            code: payload.code.cloned_or_default(),
            guild_id: None,
            channel_id: None,
            uses: None,
            max_uses: None,
            max_age: None,
            temporary: None,
        };
        invite.apply(payload);
        invite
    }

    fn apply(&mut self, payload: &InvitePayload) {
        payload.code.apply_required(&mut self.code);
        payload.guild_id.apply(&mut self.guild_id);
        payload.channel_id.apply(&mut self.channel_id);
        payload.uses.apply(&mut self.uses);
        payload.max_uses.apply(&mut self.max_uses);
        payload.max_age.apply(&mut self.max_age);
        payload.temporary.apply(&mut self.temporary);
    }
}
