use std::sync::Arc;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::Deserialize;

use crate::api::endpoints;
use crate::cache::{EntityCache, Hydrate, Manager, Patch, Registry, ScopedManager};

use super::{Channel, Emoji, Invite, Member, Role, User, UserPayload};

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct GuildPayload {
    pub id: Patch<String>,
    pub unavailable: Patch<bool>,
    pub name: Patch<String>,
    pub icon: Patch<String>,
    pub splash: Patch<String>,
    pub owner_id: Patch<String>,
    pub afk_channel_id: Patch<String>,
    pub afk_timeout: Patch<i64>,
    pub verification_level: Patch<i64>,
    pub features: Patch<Vec<String>>,
    pub mfa_level: Patch<i64>,
    pub system_channel_id: Patch<String>,
    pub rules_channel_id: Patch<String>,
    pub joined_at: Patch<DateTime<Utc>>,
    pub large: Patch<bool>,
    pub member_count: Patch<i64>,
    pub max_members: Patch<i64>,
    pub vanity_url_code: Patch<String>,
    pub description: Patch<String>,
    pub banner: Patch<String>,
    pub premium_tier: Patch<i64>,
    pub preferred_locale: Patch<String>,
}

/// The guild aggregate.
///
/// A guild is availability-gated: while `unavailable` is set, only the
/// id and the gate itself are defined and every extended field stays
/// unset. The nested collection managers are wired up unconditionally
/// at construction, so relationship access works even for a guild that
/// has never delivered its full payload.
///
/// Roles, members and invites live in per-guild scopes; channels and
/// emojis are scoped views over the global stores.
#[derive(Debug, Clone)]
pub struct Guild {
    registry: Registry,
    pub id: String,
    pub unavailable: bool,
    pub name: Option<String>,
    pub icon: Option<String>,
    pub splash: Option<String>,
    pub owner_id: Option<String>,
    pub afk_channel_id: Option<String>,
    pub afk_timeout: Option<i64>,
    pub verification_level: Option<i64>,
    pub features: Option<Vec<String>>,
    pub mfa_level: Option<i64>,
    pub system_channel_id: Option<String>,
    pub rules_channel_id: Option<String>,
    pub joined_at: Option<DateTime<Utc>>,
    pub large: Option<bool>,
    pub member_count: Option<i64>,
    pub max_members: Option<i64>,
    pub vanity_url_code: Option<String>,
    pub description: Option<String>,
    pub banner: Option<String>,
    pub premium_tier: Option<i64>,
    pub preferred_locale: Option<String>,
    pub roles: Manager<Role>,
    pub members: Manager<Member>,
    pub invites: Manager<Invite>,
    pub channels: ScopedManager<Channel>,
    pub emojis: ScopedManager<Emoji>,
}

impl Guild {
    /// The `@everyone` role, which shares the guild's id. Cache-only.
    pub fn everyone_role(&self) -> Option<Role> {
        self.roles.get(&self.id)
    }

    /// Fetch the guild's integrations. Integrations are not cached;
    /// each call returns freshly constructed entities.
    pub async fn fetch_integrations(&self) -> Result<Vec<Integration>> {
        let raw = self
            .registry
            .transport()
            .get(&endpoints::guild_integrations(&self.id))
            .await?;
        let payloads: Vec<IntegrationPayload> = serde_json::from_value(raw)
            .with_context(|| format!("Failed to decode integrations for guild {}", self.id))?;
        Ok(payloads
            .iter()
            .map(|payload| Integration::from_payload(&self.registry, payload))
            .collect())
    }

    fn clear_extended(&mut self) {
        self.name = None;
        self.icon = None;
        self.splash = None;
        self.owner_id = None;
        self.afk_channel_id = None;
        self.afk_timeout = None;
        self.verification_level = None;
        self.features = None;
        self.mfa_level = None;
        self.system_channel_id = None;
        self.rules_channel_id = None;
        self.joined_at = None;
        self.large = None;
        self.member_count = None;
        self.max_members = None;
        self.vanity_url_code = None;
        self.description = None;
        self.banner = None;
        self.premium_tier = None;
        self.preferred_locale = None;
    }
}

impl Hydrate for Guild {
    type Payload = GuildPayload;

    fn from_payload(registry: &Registry, payload: &GuildPayload) -> Self {
        let id = payload.id.cloned_or_default();

        // Nested managers are wired before any payload field lands.
        let roles = Manager::new(
            "roles",
            registry.clone(),
            EntityCache::new(format!("roles:{}", id)),
            {
                let guild_id = id.clone();
                Arc::new(move |_: Option<&str>, role_id: &str| {
                    endpoints::guild_role(&guild_id, role_id)
                })
            },
        );
        let members = Manager::new(
            "members",
            registry.clone(),
            EntityCache::new(format!("members:{}", id)),
            {
                let guild_id = id.clone();
                Arc::new(move |_: Option<&str>, user_id: &str| {
                    endpoints::guild_member(&guild_id, user_id)
                })
            },
        );
        let invites = Manager::new(
            "invites",
            registry.clone(),
            EntityCache::new(format!("invites:{}", id)),
            Arc::new(|_: Option<&str>, code: &str| endpoints::invite(code)),
        );
        let channels = ScopedManager::new(
            id.clone(),
            Manager::new(
                "channels",
                registry.clone(),
                registry.channels.clone(),
                Arc::new(|_: Option<&str>, channel_id: &str| endpoints::channel(channel_id)),
            ),
        );
        let emojis = ScopedManager::new(
            id.clone(),
            Manager::new(
                "emojis",
                registry.clone(),
                registry.emojis.clone(),
                Arc::new(|parent: Option<&str>, emoji_id: &str| {
                    endpoints::guild_emoji(parent.unwrap_or_default(), emoji_id)
                }),
            ),
        );

        let mut guild = Guild {
            registry: registry.clone(),
            id,
            unavailable: false,
            name: None,
            icon: None,
            splash: None,
            owner_id: None,
            afk_channel_id: None,
            afk_timeout: None,
            verification_level: None,
            features: None,
            mfa_level: None,
            system_channel_id: None,
            rules_channel_id: None,
            joined_at: None,
            large: None,
            member_count: None,
            max_members: None,
            vanity_url_code: None,
            description: None,
            banner: None,
            premium_tier: None,
            preferred_locale: None,
            roles,
            members,
            invites,
            channels,
            emojis,
        };
        guild.apply(payload);
        guild
    }

    fn apply(&mut self, payload: &GuildPayload) {
        payload.id.apply_required(&mut self.id);

        // Only a payload that explicitly sets the gate transitions it.
        if let Some(&unavailable) = payload.unavailable.value() {
            if unavailable && !self.unavailable {
                // Extended fields are untrustworthy while gated.
                self.clear_extended();
            }
            self.unavailable = unavailable;
        }

        if !self.unavailable {
            payload.name.apply(&mut self.name);
            payload.icon.apply(&mut self.icon);
            payload.splash.apply(&mut self.splash);
            payload.owner_id.apply(&mut self.owner_id);
            payload.afk_channel_id.apply(&mut self.afk_channel_id);
            payload.afk_timeout.apply(&mut self.afk_timeout);
            payload.verification_level.apply(&mut self.verification_level);
            payload.features.apply(&mut self.features);
            payload.mfa_level.apply(&mut self.mfa_level);
            payload.system_channel_id.apply(&mut self.system_channel_id);
            payload.rules_channel_id.apply(&mut self.rules_channel_id);
            payload.joined_at.apply(&mut self.joined_at);
            payload.large.apply(&mut self.large);
            payload.member_count.apply(&mut self.member_count);
            payload.max_members.apply(&mut self.max_members);
            payload.vanity_url_code.apply(&mut self.vanity_url_code);
            payload.description.apply(&mut self.description);
            payload.banner.apply(&mut self.banner);
            payload.premium_tier.apply(&mut self.premium_tier);
            payload.preferred_locale.apply(&mut self.preferred_locale);
        }
    }
}

// ============================================================================
// Integrations
// ============================================================================

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct IntegrationAccountPayload {
    pub id: Patch<String>,
    pub name: Patch<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct IntegrationPayload {
    pub id: Patch<String>,
    pub name: Patch<String>,
    #[serde(rename = "type")]
    pub kind: Patch<String>,
    pub enabled: Patch<bool>,
    pub syncing: Patch<bool>,
    pub role_id: Patch<String>,
    pub expire_behavior: Patch<i64>,
    pub expire_grace_period: Patch<i64>,
    pub user: Patch<UserPayload>,
    pub account: Patch<IntegrationAccountPayload>,
    pub synced_at: Patch<DateTime<Utc>>,
    pub subscriber_count: Patch<i64>,
    pub revoked: Patch<bool>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct IntegrationAccount {
    pub id: Option<String>,
    pub name: Option<String>,
}

/// A guild integration. Fetch-only; never cached.
#[derive(Debug, Clone, PartialEq)]
pub struct Integration {
    pub id: String,
    pub name: Option<String>,
    pub kind: Option<String>,
    pub enabled: Option<bool>,
    pub syncing: Option<bool>,
    pub role_id: Option<String>,
    pub expire_behavior: Option<i64>,
    pub expire_grace_period: Option<i64>,
    pub user: Option<User>,
    pub account: Option<IntegrationAccount>,
    pub synced_at: Option<DateTime<Utc>>,
    pub subscriber_count: Option<i64>,
    pub revoked: Option<bool>,
}

impl Integration {
    pub fn from_payload(registry: &Registry, payload: &IntegrationPayload) -> Self {
        let user = payload.user.value().map(|user_payload| {
            let user = User::from_payload(registry, user_payload);
            if !user.id.is_empty() {
                registry.users.upsert(
                    &user.id,
                    || user.clone(),
                    |resident| resident.apply(user_payload),
                );
            }
            user
        });

        Integration {
            id: payload.id.cloned_or_default(),
            name: payload.name.value().cloned(),
            kind: payload.kind.value().cloned(),
            enabled: payload.enabled.value().copied(),
            syncing: payload.syncing.value().copied(),
            role_id: payload.role_id.value().cloned(),
            expire_behavior: payload.expire_behavior.value().copied(),
            expire_grace_period: payload.expire_grace_period.value().copied(),
            user,
            account: payload.account.value().map(|account| IntegrationAccount {
                id: account.id.value().cloned(),
                name: account.name.value().cloned(),
            }),
            synced_at: payload.synced_at.value().copied(),
            subscriber_count: payload.subscriber_count.value().copied(),
            revoked: payload.revoked.value().copied(),
        }
    }
}
