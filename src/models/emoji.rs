use std::sync::Arc;

use anyhow::Result;
use serde::Deserialize;

use crate::api::endpoints;
use crate::cache::{EntityCache, Hydrate, Manager, Patch, Registry, Scoped};

use super::Guild;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct EmojiPayload {
    pub id: Patch<String>,
    pub name: Patch<String>,
    pub roles: Patch<Vec<String>>,
    pub require_colons: Patch<bool>,
    pub managed: Patch<bool>,
    pub animated: Patch<bool>,
    pub available: Patch<bool>,
    pub guild_id: Patch<String>,
}

/// A custom emoji, cached globally; each guild's emoji view shares the
/// same physical store.
///
/// `guild` is a read-time relationship: the stored entity only carries
/// `guild_id`, and [`EmojiManager::get`] attaches the owning guild on
/// the copy it returns when (and only when) that guild is resident in
/// the global guild cache.
#[derive(Debug, Clone)]
pub struct Emoji {
    pub id: String,
    pub name: Option<String>,
    pub roles: Option<Vec<String>>,
    pub require_colons: Option<bool>,
    pub managed: Option<bool>,
    pub animated: Option<bool>,
    pub available: Option<bool>,
    pub guild_id: Option<String>,
    pub guild: Option<Box<Guild>>,
}

impl Hydrate for Emoji {
    type Payload = EmojiPayload;

    fn from_payload(_registry: &Registry, payload: &EmojiPayload) -> Self {
        let mut emoji = Emoji {
            id: payload.id.cloned_or_default(),
            name: None,
            roles: None,
            require_colons: None,
            managed: None,
            animated: None,
            available: None,
            guild_id: None,
            guild: None,
        };
        emoji.apply(payload);
        emoji
    }

    fn apply(&mut self, payload: &EmojiPayload) {
        payload.id.apply_required(&mut self.id);
        payload.name.apply(&mut self.name);
        payload.roles.apply(&mut self.roles);
        payload.require_colons.apply(&mut self.require_colons);
        payload.managed.apply(&mut self.managed);
        payload.animated.apply(&mut self.animated);
        payload.available.apply(&mut self.available);
        payload.guild_id.apply(&mut self.guild_id);
    }
}

impl Scoped for Emoji {
    fn owner_id(&self) -> Option<&str> {
        self.guild_id.as_deref()
    }

    fn set_owner_id(&mut self, owner: &str) {
        self.guild_id = Some(owner.to_string());
    }
}

/// Global emoji manager with best-effort guild attachment.
///
/// Resolution only consults the guild cache; a missing guild leaves the
/// reference unset and never triggers a fetch.
#[derive(Clone, Debug)]
pub struct EmojiManager {
    inner: Manager<Emoji>,
    guilds: EntityCache<Guild>,
}

impl EmojiManager {
    pub fn new(registry: &Registry) -> Self {
        let inner = Manager::new(
            "emojis",
            registry.clone(),
            registry.emojis.clone(),
            Arc::new(|parent: Option<&str>, id: &str| {
                endpoints::guild_emoji(parent.unwrap_or_default(), id)
            }),
        );
        Self {
            inner,
            guilds: registry.guilds.clone(),
        }
    }

    /// Cache-only lookup with the owning guild attached when resident.
    pub fn get(&self, id: &str) -> Option<Emoji> {
        let mut emoji = self.inner.get(id)?;
        self.attach_guild(&mut emoji);
        Some(emoji)
    }

    /// Merge-patch hydration into the shared emoji store.
    pub fn set(&self, id: &str, payload: &EmojiPayload) -> Emoji {
        self.inner.set(id, payload)
    }

    /// Fetch one guild emoji via its composite endpoint and cache it.
    pub async fn fetch(&self, guild_id: &str, id: &str) -> Result<Emoji> {
        let mut emoji = self.inner.fetch_from(Some(guild_id), id).await?;
        self.attach_guild(&mut emoji);
        Ok(emoji)
    }

    pub fn remove(&self, id: &str) -> bool {
        self.inner.remove(id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.inner.contains(id)
    }

    fn attach_guild(&self, emoji: &mut Emoji) {
        if let Some(guild_id) = emoji.guild_id.as_deref() {
            if let Some(guild) = self.guilds.get(guild_id) {
                emoji.guild = Some(Box::new(guild));
            }
        }
    }
}
