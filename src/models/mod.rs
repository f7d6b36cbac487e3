//! Entity models and their wire payloads.
//!
//! Every entity kind comes in two shapes: a `*Payload` struct whose
//! fields are all [`Patch`](crate::cache::Patch)es (the raw, optional-
//! fields wire representation) and the hydrated entity itself. Entities
//! implement [`Hydrate`](crate::cache::Hydrate) so the managers can
//! construct and merge-patch them:
//!
//! - `Guild`: the availability-gated aggregate owning nested managers
//! - `Emoji` (+ `EmojiManager`): globally cached, guild relationship
//!   resolved at read time
//! - `Role`, `Member`, `Invite`: cached in per-guild scopes
//! - `Channel`, `User`: cached globally
//! - `Integration`: fetch-only, never cached

pub mod channel;
pub mod emoji;
pub mod guild;
pub mod invite;
pub mod member;
pub mod role;
pub mod user;

pub use channel::{Channel, ChannelPayload};
pub use emoji::{Emoji, EmojiManager, EmojiPayload};
pub use guild::{
    Guild, GuildPayload, Integration, IntegrationAccount, IntegrationAccountPayload,
    IntegrationPayload,
};
pub use invite::{Invite, InvitePayload};
pub use member::{Member, MemberPayload};
pub use role::{Role, RolePayload};
pub use user::{User, UserPayload};
