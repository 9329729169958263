//! In-memory guild directory for the cmdroute router.
//!
//! A [`StaticDirectory`] answers the user, role and channel lookups that the
//! USER, ROLE and CHANNEL coercers make. It is loaded from a JSON (or JSONC)
//! snapshot of a guild and is useful for tools, tests and offline replays.

use cmdroute_core::{Channel, GuildDirectory, Role, Snowflake, User};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use thiserror::Error;

/// Errors that can occur when loading or validating a directory file.
#[derive(Debug, Error)]
pub enum DirectoryError {
    /// JSON deserialization failed.
    #[error("invalid directory JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),

    /// An entry failed validation.
    #[error("invalid {field}: {reason}")]
    InvalidField {
        /// Path of the offending entry (e.g. `"roles[2].id"`).
        field: String,
        /// Why the value was rejected.
        reason: String,
    },
}

/// On-disk form of a guild snapshot.
///
/// ```json
/// {
///   "publicRole": { "id": 99, "name": "@everyone" },
///   "users":    [{ "id": 1, "name": "ada" }],
///   "roles":    [{ "id": 10, "name": "mods" }],
///   "channels": [{ "id": 20, "name": "general" }]
/// }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct DirectoryFile {
    /// The guild-wide role every member holds. Shares its ID with the guild.
    pub public_role: Role,
    /// Guild members' user accounts.
    #[serde(default)]
    pub users: Vec<User>,
    /// Guild roles, excluding the public role.
    #[serde(default)]
    pub roles: Vec<Role>,
    /// Guild channels.
    #[serde(default)]
    pub channels: Vec<Channel>,
}

/// A read-only directory built from a [`DirectoryFile`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StaticDirectory {
    public_role: Role,
    users: BTreeMap<Snowflake, User>,
    roles: BTreeMap<Snowflake, Role>,
    channels: BTreeMap<Snowflake, Channel>,
}

impl StaticDirectory {
    /// Validate and index a directory file.
    ///
    /// - every ID is non-zero and every name non-empty
    /// - IDs are unique within users, roles and channels
    /// - the public role does not also appear in `roles`
    pub fn new(file: DirectoryFile) -> Result<Self, DirectoryError> {
        check_entry("publicRole", file.public_role.id, &file.public_role.name)?;

        let users = index("users", file.users, |u| (u.id, u.name.as_str()))?;
        let roles = index("roles", file.roles, |r| (r.id, r.name.as_str()))?;
        let channels = index("channels", file.channels, |c| (c.id, c.name.as_str()))?;

        if roles.contains_key(&file.public_role.id) {
            return Err(DirectoryError::InvalidField {
                field: "roles".into(),
                reason: format!(
                    "role {} duplicates the public role; list it only as publicRole",
                    file.public_role.id
                ),
            });
        }

        tracing::debug!(
            users = users.len(),
            roles = roles.len(),
            channels = channels.len(),
            "loaded guild directory"
        );
        Ok(Self {
            public_role: file.public_role,
            users,
            roles,
            channels,
        })
    }

    /// Number of users known to the directory.
    pub fn user_count(&self) -> usize {
        self.users.len()
    }

    /// Back to the on-disk form, entries sorted by ID.
    pub fn to_file(&self) -> DirectoryFile {
        DirectoryFile {
            public_role: self.public_role.clone(),
            users: self.users.values().cloned().collect(),
            roles: self.roles.values().cloned().collect(),
            channels: self.channels.values().cloned().collect(),
        }
    }
}

/// Load and validate a [`StaticDirectory`] from JSON or JSONC text.
pub fn load_directory_from_str(s: &str) -> Result<StaticDirectory, DirectoryError> {
    let file: DirectoryFile = serde_json::from_str(&cmdroute_jsonc_strip::strip_jsonc(s))?;
    StaticDirectory::new(file)
}

fn check_entry(field: &str, id: Snowflake, name: &str) -> Result<(), DirectoryError> {
    if id == 0 {
        return Err(DirectoryError::InvalidField {
            field: format!("{field}.id"),
            reason: "must be > 0".into(),
        });
    }
    if name.trim().is_empty() {
        return Err(DirectoryError::InvalidField {
            field: format!("{field}.name"),
            reason: "must not be empty".into(),
        });
    }
    Ok(())
}

fn index<T>(
    field: &str,
    entries: Vec<T>,
    key: impl Fn(&T) -> (Snowflake, &str),
) -> Result<BTreeMap<Snowflake, T>, DirectoryError> {
    let mut map = BTreeMap::new();
    for (i, entry) in entries.into_iter().enumerate() {
        let (id, name) = key(&entry);
        check_entry(&format!("{field}[{i}]"), id, name)?;
        if map.insert(id, entry).is_some() {
            return Err(DirectoryError::InvalidField {
                field: format!("{field}[{i}].id"),
                reason: format!("duplicate id {id}"),
            });
        }
    }
    Ok(map)
}

impl GuildDirectory for StaticDirectory {
    async fn user_by_id(&self, id: Snowflake) -> Option<User> {
        self.users.get(&id).cloned()
    }

    async fn role_by_id(&self, id: Snowflake) -> Option<Role> {
        if id == self.public_role.id {
            return Some(self.public_role.clone());
        }
        self.roles.get(&id).cloned()
    }

    async fn channel_by_id(&self, id: Snowflake) -> Option<Channel> {
        self.channels.get(&id).cloned()
    }

    fn public_role(&self) -> Role {
        self.public_role.clone()
    }
}
