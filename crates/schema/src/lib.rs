//! Command schema types for cmdroute.
//!
//! Defines the closed set of option types, command kinds and member
//! permissions, plus the declarative command-file format ([`CommandFile`],
//! [`CommandSpec`], [`OptionSpec`]) that operators use to describe a command
//! tree without writing Rust. The core crate compiles these descriptions into
//! its immutable command tree.

#![warn(missing_docs)]

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::OnceLock;

/// Current format version for command files.
pub const COMMAND_FILE_FORMAT_VERSION: &str = "1.0.0";

// ─── Option types ───────────────────────────────────────────────────────────

/// The type of a command option.
///
/// `SubCommand` and `SubCommandGroup` are structural markers used by the
/// platform to describe command nesting. They are never valid as the type of
/// an argument.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OptionType {
    /// Structural marker: a sub-command.
    SubCommand,
    /// Structural marker: a group of sub-commands.
    SubCommandGroup,
    /// Free-form string.
    String,
    /// Signed 64-bit integer.
    Integer,
    /// `true` or `false`.
    Boolean,
    /// Reference to a guild user.
    User,
    /// Reference to a guild channel.
    Channel,
    /// Reference to a guild role.
    Role,
    /// Reference to either a user or a role.
    Mentionable,
    /// Double-precision float.
    Number,
    /// An uploaded file.
    Attachment,
}

impl OptionType {
    /// Every option type, in platform wire-code order.
    pub const ALL: [OptionType; 11] = [
        OptionType::SubCommand,
        OptionType::SubCommandGroup,
        OptionType::String,
        OptionType::Integer,
        OptionType::Boolean,
        OptionType::User,
        OptionType::Channel,
        OptionType::Role,
        OptionType::Mentionable,
        OptionType::Number,
        OptionType::Attachment,
    ];

    /// The platform's numeric wire code for this type.
    pub fn code(self) -> u8 {
        match self {
            OptionType::SubCommand => 1,
            OptionType::SubCommandGroup => 2,
            OptionType::String => 3,
            OptionType::Integer => 4,
            OptionType::Boolean => 5,
            OptionType::User => 6,
            OptionType::Channel => 7,
            OptionType::Role => 8,
            OptionType::Mentionable => 9,
            OptionType::Number => 10,
            OptionType::Attachment => 11,
        }
    }

    /// Look up a type by wire code. Unknown codes return `None`.
    pub fn from_code(code: u8) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.code() == code)
    }

    /// Whether this is one of the sub-command markers.
    pub fn is_structural(self) -> bool {
        matches!(self, OptionType::SubCommand | OptionType::SubCommandGroup)
    }

    /// Whether values of this type can be written in a text message.
    pub fn has_text_encoding(self) -> bool {
        !matches!(
            self,
            OptionType::SubCommand
                | OptionType::SubCommandGroup
                | OptionType::Mentionable
                | OptionType::Attachment
        )
    }
}

impl std::fmt::Display for OptionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            OptionType::SubCommand => "SUB_COMMAND",
            OptionType::SubCommandGroup => "SUB_COMMAND_GROUP",
            OptionType::String => "STRING",
            OptionType::Integer => "INTEGER",
            OptionType::Boolean => "BOOLEAN",
            OptionType::User => "USER",
            OptionType::Channel => "CHANNEL",
            OptionType::Role => "ROLE",
            OptionType::Mentionable => "MENTIONABLE",
            OptionType::Number => "NUMBER",
            OptionType::Attachment => "ATTACHMENT",
        };
        f.write_str(s)
    }
}

// ─── Command kinds ──────────────────────────────────────────────────────────

/// Which input channel a command is registered for.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum CommandKind {
    /// Prefix-triggered text message command.
    #[default]
    Message,
    /// Platform slash command delivered as a structured interaction.
    Slash,
}

impl std::fmt::Display for CommandKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CommandKind::Message => write!(f, "message"),
            CommandKind::Slash => write!(f, "slash"),
        }
    }
}

// ─── Permissions ────────────────────────────────────────────────────────────

/// A guild permission a member may hold.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "snake_case")]
#[non_exhaustive]
pub enum Permission {
    /// Full access; implies nothing on its own at this layer.
    Administrator,
    /// Manage guild settings.
    ManageGuild,
    /// Create, edit and assign roles.
    ManageRoles,
    /// Create and edit channels.
    ManageChannels,
    /// Delete and pin other members' messages.
    ManageMessages,
    /// Remove members from the guild.
    KickMembers,
    /// Ban members from the guild.
    BanMembers,
    /// Time out members.
    ModerateMembers,
    /// Send messages in text channels.
    SendMessages,
    /// Use `@everyone` and `@here`.
    MentionEveryone,
}

impl std::fmt::Display for Permission {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Permission::Administrator => "administrator",
            Permission::ManageGuild => "manage_guild",
            Permission::ManageRoles => "manage_roles",
            Permission::ManageChannels => "manage_channels",
            Permission::ManageMessages => "manage_messages",
            Permission::KickMembers => "kick_members",
            Permission::BanMembers => "ban_members",
            Permission::ModerateMembers => "moderate_members",
            Permission::SendMessages => "send_messages",
            Permission::MentionEveryone => "mention_everyone",
        };
        f.write_str(s)
    }
}

// ─── Choices ────────────────────────────────────────────────────────────────

/// Value carried by a [`Choice`].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum ChoiceValue {
    /// Integer choice.
    Integer(i64),
    /// Floating-point choice.
    Number(f64),
    /// String choice.
    String(String),
}

impl std::fmt::Display for ChoiceValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ChoiceValue::Integer(i) => write!(f, "{i}"),
            ChoiceValue::Number(n) => write!(f, "{n}"),
            ChoiceValue::String(s) => f.write_str(s),
        }
    }
}

/// A predefined value an option may take, with its display name.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Choice {
    /// Name shown to the user.
    pub name: String,
    /// Value delivered to the handler.
    pub value: ChoiceValue,
}

impl Choice {
    /// Create a choice.
    pub fn new(name: impl Into<String>, value: ChoiceValue) -> Self {
        Self {
            name: name.into(),
            value,
        }
    }
}

// ─── Declarative command files ──────────────────────────────────────────────

/// Declarative value constraints, compiled into validators by the core crate.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct OptionConstraints {
    /// Inclusive lower bound for integer and number options.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_value: Option<f64>,
    /// Inclusive upper bound for integer and number options.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_value: Option<f64>,
    /// Minimum character count for string options.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_length: Option<u32>,
    /// Maximum character count for string options.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_length: Option<u32>,
}

impl OptionConstraints {
    /// Whether no constraint is set.
    pub fn is_empty(&self) -> bool {
        self.min_value.is_none()
            && self.max_value.is_none()
            && self.min_length.is_none()
            && self.max_length.is_none()
    }
}

fn default_true() -> bool {
    true
}

/// One option of a leaf command in a command file.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct OptionSpec {
    /// Option type.
    pub r#type: OptionType,
    /// Option name, unique within its command.
    pub name: String,
    /// Short description.
    #[serde(default)]
    pub description: String,
    /// Whether the platform requires a value.
    #[serde(default = "default_true")]
    pub required: bool,
    /// Allowed values. Empty means unrestricted.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub choices: Vec<Choice>,
    /// Range and length constraints.
    #[serde(default, skip_serializing_if = "OptionConstraints::is_empty")]
    pub constraints: OptionConstraints,
}

/// One command (root or sub-command) in a command file.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CommandSpec {
    /// Command name, unique among siblings.
    pub name: String,
    /// Short description.
    #[serde(default)]
    pub description: String,
    /// Input channel. Sub-commands inherit their parent's kind when omitted.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<CommandKind>,
    /// Permissions, any one of which allows invocation. Empty means everyone.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub permissions: Vec<Permission>,
    /// Options of a leaf command.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<OptionSpec>,
    /// Sub-commands of a branch command.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub subcommands: Vec<CommandSpec>,
}

/// Top-level container of a command file.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommandFile {
    /// File format version for compatibility checks.
    #[serde(default = "default_format_version")]
    pub format_version: String,
    /// Root commands.
    pub commands: Vec<CommandSpec>,

    /// Cached map from root command name → index into `commands`.
    #[serde(skip)]
    by_name: OnceLock<HashMap<String, usize>>,
}

fn default_format_version() -> String {
    COMMAND_FILE_FORMAT_VERSION.to_string()
}

impl CommandFile {
    /// Create a command file at the current format version.
    pub fn new(commands: Vec<CommandSpec>) -> Self {
        Self {
            format_version: default_format_version(),
            commands,
            by_name: OnceLock::new(),
        }
    }

    /// Parse a command file from JSON or JSONC text.
    pub fn from_jsonc(input: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(&cmdroute_jsonc_strip::strip_jsonc(input))
    }

    /// Look up a root command by name. The first entry wins on duplicates;
    /// registration reports duplicates as configuration errors.
    pub fn command(&self, name: &str) -> Option<&CommandSpec> {
        let map = self.by_name.get_or_init(|| {
            let mut m = HashMap::new();
            for (i, c) in self.commands.iter().enumerate() {
                m.entry(c.name.clone()).or_insert(i);
            }
            m
        });
        map.get(name).map(|&i| &self.commands[i])
    }
}
