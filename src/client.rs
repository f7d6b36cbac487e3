//! Central client object tying the managers together.

use std::sync::Arc;

use anyhow::{anyhow, Result};
use tracing::debug;

use crate::api::{endpoints, RestTransport, Transport};
use crate::cache::{Manager, Registry};
use crate::config::Config;
use crate::models::{Channel, EmojiManager, Guild, Member, User};

/// The client-like root of the cache layer.
///
/// Owns the cross-reference registry and one top-level manager per
/// entity collection. Guild aggregates constructed through `guilds`
/// share the channel and emoji stores with the corresponding top-level
/// managers, so a write through either view is visible through both.
pub struct Client {
    registry: Registry,
    pub guilds: Manager<Guild>,
    pub users: Manager<User>,
    pub channels: Manager<Channel>,
    pub emojis: EmojiManager,
    identity: Option<User>,
}

impl Client {
    /// Build a client over an arbitrary transport.
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        let registry = Registry::new(transport);
        debug!("client registry initialized");

        let guilds = Manager::new(
            "guilds",
            registry.clone(),
            registry.guilds.clone(),
            Arc::new(|_: Option<&str>, id: &str| endpoints::guild(id)),
        );
        let users = Manager::new(
            "users",
            registry.clone(),
            registry.users.clone(),
            Arc::new(|_: Option<&str>, id: &str| endpoints::user(id)),
        );
        let channels = Manager::new(
            "channels",
            registry.clone(),
            registry.channels.clone(),
            Arc::new(|_: Option<&str>, id: &str| endpoints::channel(id)),
        );
        let emojis = EmojiManager::new(&registry);

        Self {
            guilds,
            users,
            channels,
            emojis,
            registry,
            identity: None,
        }
    }

    /// Build a client with the default REST transport from configuration.
    pub fn from_config(config: &Config) -> Result<Self> {
        let transport = RestTransport::new(config)?;
        Ok(Self::new(Arc::new(transport)))
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Record the authenticated account this client acts as.
    pub fn set_identity(&mut self, user: User) {
        self.identity = Some(user);
    }

    pub fn identity(&self) -> Option<&User> {
        self.identity.as_ref()
    }

    /// The current identity's member record in the given guild.
    ///
    /// Unlike a plain cache lookup this promises a resolved value, so a
    /// missing identity, guild or member record is an error rather than
    /// an absent result. Never fetches.
    pub fn me(&self, guild_id: &str) -> Result<Member> {
        let identity = self
            .identity
            .as_ref()
            .ok_or_else(|| anyhow!("current identity is not set"))?;
        let guild = self
            .guilds
            .get(guild_id)
            .ok_or_else(|| anyhow!("guild {} is not cached", guild_id))?;
        guild.members.get(&identity.id).ok_or_else(|| {
            anyhow!(
                "member record for the current identity is not cached in guild {}",
                guild_id
            )
        })
    }
}

impl std::fmt::Debug for Client {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Client")
            .field("registry", &self.registry)
            .field("identity", &self.identity.as_ref().map(|u| u.id.as_str()))
            .finish()
    }
}
