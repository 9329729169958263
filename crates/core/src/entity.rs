use cmdroute_schema::Permission;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// A platform ID.
pub type Snowflake = u64;

/// A platform user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// User ID.
    pub id: Snowflake,
    /// Account name.
    pub name: String,
    /// Whether the account is an automated bot.
    #[serde(default)]
    pub bot: bool,
}

impl User {
    /// Mention syntax that the USER coercer accepts back.
    pub fn mention(&self) -> String {
        format!("<@{}>", self.id)
    }
}

/// A guild role.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Role {
    /// Role ID. The public role shares its ID with the guild.
    pub id: Snowflake,
    /// Role name.
    pub name: String,
}

impl Role {
    /// Mention syntax that the ROLE coercer accepts back.
    pub fn mention(&self) -> String {
        format!("<@&{}>", self.id)
    }
}

/// A guild channel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Channel {
    /// Channel ID.
    pub id: Snowflake,
    /// Channel name.
    pub name: String,
}

impl Channel {
    /// Mention syntax that the CHANNEL coercer accepts back.
    pub fn mention(&self) -> String {
        format!("<#{}>", self.id)
    }
}

/// An uploaded file attached to an interaction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attachment {
    /// Attachment ID.
    pub id: Snowflake,
    /// Original file name.
    pub filename: String,
    /// Download URL.
    pub url: String,
    /// Size in bytes.
    #[serde(default)]
    pub size: u64,
}

/// Either a user or a role.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Mentionable {
    /// A mentioned user.
    User(User),
    /// A mentioned role.
    Role(Role),
}

/// A guild member invoking a command.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Member {
    /// The member's user account.
    pub user: User,
    /// Permissions the member holds in the channel the command came from.
    #[serde(default)]
    pub permissions: BTreeSet<Permission>,
}

impl Member {
    /// Create a member holding the given permissions.
    pub fn new(user: User, permissions: impl IntoIterator<Item = Permission>) -> Self {
        Self {
            user,
            permissions: permissions.into_iter().collect(),
        }
    }

    /// Whether the member may invoke a command requiring `required`.
    ///
    /// An empty requirement admits everyone; otherwise holding any one of the
    /// listed permissions is enough.
    pub fn holds_any(&self, required: &BTreeSet<Permission>) -> bool {
        required.is_empty() || required.iter().any(|p| self.permissions.contains(p))
    }
}

/// Lookups against the guild a command was invoked in.
///
/// Implementations may hit a cache or the network; the coercers await each
/// lookup and never hold locks across it.
pub trait GuildDirectory: Send + Sync {
    /// Find a guild member's user account by ID.
    fn user_by_id(&self, id: Snowflake) -> impl Future<Output = Option<User>> + Send;

    /// Find a role by ID.
    fn role_by_id(&self, id: Snowflake) -> impl Future<Output = Option<Role>> + Send;

    /// Find a channel by ID.
    fn channel_by_id(&self, id: Snowflake) -> impl Future<Output = Option<Channel>> + Send;

    /// The implicit role every member has (`@everyone`).
    fn public_role(&self) -> Role;
}
