//! Endpoint path builders for the REST API.
//!
//! Managers never format URL paths themselves; they go through these
//! builders so that path layout lives in one place. Paths are relative
//! to the configured API base URL.

pub fn guild(id: &str) -> String {
    format!("/guilds/{}", id)
}

pub fn guild_emoji(guild_id: &str, id: &str) -> String {
    format!("/guilds/{}/emojis/{}", guild_id, id)
}

pub fn guild_role(guild_id: &str, id: &str) -> String {
    format!("/guilds/{}/roles/{}", guild_id, id)
}

pub fn guild_member(guild_id: &str, user_id: &str) -> String {
    format!("/guilds/{}/members/{}", guild_id, user_id)
}

pub fn guild_integrations(guild_id: &str) -> String {
    format!("/guilds/{}/integrations", guild_id)
}

pub fn channel(id: &str) -> String {
    format!("/channels/{}", id)
}

pub fn user(id: &str) -> String {
    format!("/users/{}", id)
}

pub fn invite(code: &str) -> String {
    format!("/invites/{}", code)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paths() {
        assert_eq!(guild("7"), "/guilds/7");
        assert_eq!(guild_emoji("7", "42"), "/guilds/7/emojis/42");
        assert_eq!(guild_role("7", "1"), "/guilds/7/roles/1");
        assert_eq!(guild_member("7", "500"), "/guilds/7/members/500");
        assert_eq!(guild_integrations("7"), "/guilds/7/integrations");
        assert_eq!(channel("9"), "/channels/9");
        assert_eq!(user("500"), "/users/500");
        assert_eq!(invite("abc123"), "/invites/abc123");
    }
}
