use super::value::{Argument, Value};
use crate::diag::codes;
use crate::entity::{Attachment, Channel, Mentionable, Role, User};
use crate::error::ArgumentError;
use serde::{Deserialize, Serialize};

/// A pre-typed option value delivered with a structured interaction.
///
/// Mirrors the platform payload, so it can carry the structural markers and
/// types this library does not know about.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OptionPayload {
    /// Sub-command marker.
    SubCommand,
    /// Sub-command group marker.
    SubCommandGroup,
    /// Type code this library does not recognise.
    Unknown(u8),
    /// Text value.
    String(String),
    /// Integer value.
    Integer(i64),
    /// Float value.
    Number(f64),
    /// Boolean value.
    Boolean(bool),
    /// Resolved user.
    User(User),
    /// Resolved role.
    Role(Role),
    /// Resolved channel.
    Channel(Channel),
    /// Resolved user or role.
    Mentionable(Mentionable),
    /// Uploaded file.
    Attachment(Attachment),
}

/// One named option of a structured interaction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InteractionOption {
    /// Option name.
    pub name: String,
    /// Typed payload.
    #[serde(flatten)]
    pub payload: OptionPayload,
}

impl InteractionOption {
    /// Create an option.
    pub fn new(name: impl Into<String>, payload: OptionPayload) -> Self {
        Self {
            name: name.into(),
            payload,
        }
    }
}

/// Wrap structured options into arguments without any coercion.
///
/// Structural markers and unknown types fail the whole list.
pub fn from_interaction(options: &[InteractionOption]) -> Result<Vec<Argument>, ArgumentError> {
    options
        .iter()
        .map(|opt| {
            let value = match &opt.payload {
                OptionPayload::String(s) => Value::String(s.clone()),
                OptionPayload::Integer(i) => Value::Integer(*i),
                OptionPayload::Number(n) => Value::Number(*n),
                OptionPayload::Boolean(b) => Value::Boolean(*b),
                OptionPayload::User(u) => Value::User(u.clone()),
                OptionPayload::Role(r) => Value::Role(r.clone()),
                OptionPayload::Channel(c) => Value::Channel(c.clone()),
                OptionPayload::Mentionable(m) => Value::Mentionable(m.clone()),
                OptionPayload::Attachment(a) => Value::Attachment(a.clone()),
                OptionPayload::SubCommand
                | OptionPayload::SubCommandGroup
                | OptionPayload::Unknown(_) => {
                    return Err(ArgumentError::new(
                        codes::STRUCTURED_MARKER,
                        format!(
                            "Option type {} is not supported as an argument.",
                            marker_name(&opt.payload)
                        ),
                    )
                    .for_option(opt.name.clone()));
                }
            };
            Ok(Argument::new(opt.name.clone(), value))
        })
        .collect()
}

fn marker_name(payload: &OptionPayload) -> String {
    match payload {
        OptionPayload::SubCommand => "SUB_COMMAND".into(),
        OptionPayload::SubCommandGroup => "SUB_COMMAND_GROUP".into(),
        OptionPayload::Unknown(code) => format!("UNKNOWN({code})"),
        _ => "value".into(),
    }
}
