//! Cross-reference registry of shared stores.

use std::sync::Arc;

use crate::api::Transport;
use crate::models::{Channel, Emoji, Guild, User};

use super::EntityCache;

/// The process-wide set of shared entity stores, plus the transport,
/// reachable from the client and handed to entity construction.
///
/// Relationship resolution (an emoji looking up its owning guild) and
/// aggregate wiring (a guild building scoped views over the global
/// channel and emoji stores) both go through here. Cloning shares every
/// store.
#[derive(Clone)]
pub struct Registry {
    transport: Arc<dyn Transport>,
    pub guilds: EntityCache<Guild>,
    pub users: EntityCache<User>,
    pub channels: EntityCache<Channel>,
    pub emojis: EntityCache<Emoji>,
}

impl Registry {
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        Self {
            transport,
            guilds: EntityCache::new("guilds"),
            users: EntityCache::new("users"),
            channels: EntityCache::new("channels"),
            emojis: EntityCache::new("emojis"),
        }
    }

    pub fn transport(&self) -> &Arc<dyn Transport> {
        &self.transport
    }
}

impl std::fmt::Debug for Registry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Registry")
            .field("guilds", &self.guilds.len())
            .field("users", &self.users.len())
            .field("channels", &self.channels.len())
            .field("emojis", &self.emojis.len())
            .finish()
    }
}
