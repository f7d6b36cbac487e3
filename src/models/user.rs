use serde::Deserialize;

use crate::cache::{Hydrate, Patch, Registry};

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct UserPayload {
    pub id: Patch<String>,
    pub username: Patch<String>,
    pub discriminator: Patch<String>,
    pub avatar: Patch<String>,
    pub bot: Patch<bool>,
}

/// A platform account, cached globally by user id.
#[derive(Debug, Clone, PartialEq)]
pub struct User {
    pub id: String,
    pub username: Option<String>,
    pub discriminator: Option<String>,
    pub avatar: Option<String>,
    pub bot: Option<bool>,
}

impl User {
    /// "name#discriminator" handle, as far as the cached fields allow.
    pub fn tag(&self) -> String {
        format!(
            "{}#{}",
            self.username.as_deref().unwrap_or(""),
            self.discriminator.as_deref().unwrap_or("0000")
        )
    }
}

impl Hydrate for User {
    type Payload = UserPayload;

    fn from_payload(_registry: &Registry, payload: &UserPayload) -> Self {
        let mut user = User {
            id: payload.id.cloned_or_default(),
            username: None,
            discriminator: None,
            avatar: None,
            bot: None,
        };
        user.apply(payload);
        user
    }

    fn apply(&mut self, payload: &UserPayload) {
        payload.id.apply_required(&mut self.id);
        payload.username.apply(&mut self.username);
        payload.discriminator.apply(&mut self.discriminator);
        payload.avatar.apply(&mut self.avatar);
        payload.bot.apply(&mut self.bot);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::MockTransport;

    #[test]
    fn test_tag() {
        let registry = Registry::new(MockTransport::empty());
        let user = User::from_payload(
            &registry,
            &UserPayload {
                id: Patch::Value("500".into()),
                username: Patch::Value("pepe".into()),
                discriminator: Patch::Value("0042".into()),
                ..Default::default()
            },
        );
        assert_eq!(user.tag(), "pepe#0042");
    }
}
