use crate::args::InteractionOption;
use crate::entity::{Member, User};
use serde::{Deserialize, Serialize};

/// A raw text message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageEvent {
    /// Message author.
    pub author: User,
    /// Author's guild membership; absent for direct messages.
    #[serde(default)]
    pub member: Option<Member>,
    /// Raw message text.
    pub content: String,
}

/// A structured slash-command interaction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InteractionEvent {
    /// Root command name.
    pub command: String,
    /// Sub-command group, if the invoked command sits inside one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subcommand_group: Option<String>,
    /// Sub-command name, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subcommand: Option<String>,
    /// Invoking member; absent outside guilds.
    #[serde(default)]
    pub member: Option<Member>,
    /// Pre-typed options of the invoked leaf.
    #[serde(default)]
    pub options: Vec<InteractionOption>,
}
