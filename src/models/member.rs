use chrono::{DateTime, Utc};
use serde::Deserialize;

use crate::cache::{Hydrate, Patch, Registry};

use super::{User, UserPayload};

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct MemberPayload {
    pub user: Patch<UserPayload>,
    pub nick: Patch<String>,
    pub roles: Patch<Vec<String>>,
    pub joined_at: Patch<DateTime<Utc>>,
    pub deaf: Patch<bool>,
    pub mute: Patch<bool>,
}

/// A guild member, cached per guild and keyed by the member's user id.
///
/// Constructing a member also hydrates the nested user payload into the
/// global user store, so the account is resolvable across guilds.
#[derive(Debug, Clone, PartialEq)]
pub struct Member {
    pub id: String,
    pub username: Option<String>,
    pub nick: Option<String>,
    pub roles: Option<Vec<String>>,
    pub joined_at: Option<DateTime<Utc>>,
    pub deaf: Option<bool>,
    pub mute: Option<bool>,
}

impl Member {
    pub fn display_name(&self) -> Option<&str> {
        self.nick.as_deref().or(self.username.as_deref())
    }
}

impl Hydrate for Member {
    type Payload = MemberPayload;

    fn from_payload(registry: &Registry, payload: &MemberPayload) -> Self {
        if let Some(user) = payload.user.value() {
            if let Some(user_id) = user.id.value() {
                registry.users.upsert(
                    user_id,
                    || User::from_payload(registry, user),
                    |resident| resident.apply(user),
                );
            }
        }

        let mut member = Member {
            id: payload
                .user
                .value()
                .map(|u| u.id.cloned_or_default())
                .unwrap_or_default(),
            username: None,
            nick: None,
            roles: None,
            joined_at: None,
            deaf: None,
            mute: None,
        };
        member.apply(payload);
        member
    }

    fn apply(&mut self, payload: &MemberPayload) {
        if let Some(user) = payload.user.value() {
            user.id.apply_required(&mut self.id);
            user.username.apply(&mut self.username);
        }
        payload.nick.apply(&mut self.nick);
        payload.roles.apply(&mut self.roles);
        payload.joined_at.apply(&mut self.joined_at);
        payload.deaf.apply(&mut self.deaf);
        payload.mute.apply(&mut self.mute);
    }
}
