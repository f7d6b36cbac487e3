//! guildcache - local object cache for a chat-platform REST API.
//!
//! This crate keeps typed, partially-hydrated representations of remote
//! entities (guilds, emojis, roles, members, channels, invites, users)
//! synchronized with a backing service without a network round trip on
//! every access:
//!
//! - a cache lookup ([`Manager::get`](cache::Manager::get)) never
//!   touches the network; a miss is simply absent
//! - an explicit refresh ([`Manager::fetch`](cache::Manager::fetch))
//!   always round-trips and merges the response into the cache
//! - hydration is merge-patch: only fields a payload explicitly defines
//!   overwrite the cached entity, so partial updates never clobber
//!   known state
//! - aggregates (guilds) own nested scoped managers, some of which are
//!   layered views over the same physical stores as the global managers

pub mod api;
pub mod cache;
pub mod client;
pub mod config;
pub mod models;

#[cfg(test)]
pub(crate) mod testutil;

pub use api::{ApiError, RestTransport, Transport};
pub use cache::{EntityCache, Hydrate, Manager, Patch, Registry, Scoped, ScopedManager};
pub use client::Client;
pub use config::Config;
pub use models::{
    Channel, Emoji, EmojiManager, Guild, Integration, Invite, Member, Role, User,
};
