use crate::entity::{Attachment, Channel, Mentionable, Role, User};
use cmdroute_schema::{ChoiceValue, OptionType};
use serde::{Deserialize, Serialize};

/// A typed argument value.
///
/// The variant fixes the argument's [`OptionType`]; there is no way to build
/// an [`Argument`] whose type and value disagree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Value {
    /// Free-form text.
    String(String),
    /// Signed 64-bit integer.
    Integer(i64),
    /// Double-precision float.
    Number(f64),
    /// Boolean flag.
    Boolean(bool),
    /// Resolved guild user.
    User(User),
    /// Resolved guild role.
    Role(Role),
    /// Resolved guild channel.
    Channel(Channel),
    /// Resolved user or role.
    Mentionable(Mentionable),
    /// Uploaded file.
    Attachment(Attachment),
}

impl Value {
    /// The option type this value belongs to.
    pub fn option_type(&self) -> OptionType {
        match self {
            Value::String(_) => OptionType::String,
            Value::Integer(_) => OptionType::Integer,
            Value::Number(_) => OptionType::Number,
            Value::Boolean(_) => OptionType::Boolean,
            Value::User(_) => OptionType::User,
            Value::Role(_) => OptionType::Role,
            Value::Channel(_) => OptionType::Channel,
            Value::Mentionable(_) => OptionType::Mentionable,
            Value::Attachment(_) => OptionType::Attachment,
        }
    }

    /// The string, if this is a string value.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    /// The integer, if this is an integer value.
    pub fn as_integer(&self) -> Option<i64> {
        match self {
            Value::Integer(i) => Some(*i),
            _ => None,
        }
    }

    /// The number, if this is a number value.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Value::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// The flag, if this is a boolean value.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Boolean(b) => Some(*b),
            _ => None,
        }
    }

    /// The user, if this is a user value.
    pub fn as_user(&self) -> Option<&User> {
        match self {
            Value::User(u) => Some(u),
            _ => None,
        }
    }

    /// The role, if this is a role value.
    pub fn as_role(&self) -> Option<&Role> {
        match self {
            Value::Role(r) => Some(r),
            _ => None,
        }
    }

    /// The channel, if this is a channel value.
    pub fn as_channel(&self) -> Option<&Channel> {
        match self {
            Value::Channel(c) => Some(c),
            _ => None,
        }
    }

    /// Whether this value equals a declared choice.
    ///
    /// Integer values match integer choices and also number choices with an
    /// integral value; numbers match either numeric kind.
    pub fn matches_choice(&self, choice: &ChoiceValue) -> bool {
        match (self, choice) {
            (Value::String(s), ChoiceValue::String(c)) => s == c,
            (Value::Integer(i), ChoiceValue::Integer(c)) => i == c,
            (Value::Integer(i), ChoiceValue::Number(c)) => (*i as f64) == *c,
            (Value::Number(n), ChoiceValue::Number(c)) => n == c,
            (Value::Number(n), ChoiceValue::Integer(c)) => *n == (*c as f64),
            _ => false,
        }
    }

    /// Text that the matching coercer parses back into this value.
    ///
    /// `None` for values without a text encoding (mentionables, attachments)
    /// and for strings that no quoting can reproduce.
    pub fn to_text(&self) -> Option<String> {
        match self {
            Value::String(s) => quote(s),
            Value::Integer(i) => Some(i.to_string()),
            Value::Number(n) => Some(n.to_string()),
            Value::Boolean(b) => Some(b.to_string()),
            Value::User(u) => Some(u.mention()),
            Value::Role(r) => Some(r.mention()),
            Value::Channel(c) => Some(c.mention()),
            Value::Mentionable(_) | Value::Attachment(_) => None,
        }
    }
}

/// Quote `s` so the STRING coercer reads it back as one argument.
fn quote(s: &str) -> Option<String> {
    if !s.is_empty() && !s.starts_with('"') && !s.contains(' ') {
        return Some(s.to_string());
    }
    let quoted = format!("\"{s}\"");
    let pieces: Vec<&str> = quoted.split(' ').collect();
    // The coercer stops at the first piece ending in a quote; that must be
    // the final piece or the text is cut short.
    let first_close = pieces
        .iter()
        .enumerate()
        .position(|(i, p)| p.ends_with('"') && (i > 0 || p.len() > 1))?;
    (first_close == pieces.len() - 1).then_some(quoted)
}

impl std::fmt::Display for Value {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Value::String(s) => f.write_str(s),
            Value::Integer(i) => write!(f, "{i}"),
            Value::Number(n) => write!(f, "{n}"),
            Value::Boolean(b) => write!(f, "{b}"),
            Value::User(u) => write!(f, "@{}", u.name),
            Value::Role(r) => write!(f, "@{}", r.name),
            Value::Channel(c) => write!(f, "#{}", c.name),
            Value::Mentionable(Mentionable::User(u)) => write!(f, "@{}", u.name),
            Value::Mentionable(Mentionable::Role(r)) => write!(f, "@{}", r.name),
            Value::Attachment(a) => f.write_str(&a.filename),
        }
    }
}

/// A named, typed argument handed to a command executor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Argument {
    /// Name of the option this argument fills.
    pub name: String,
    /// Typed value.
    #[serde(flatten)]
    pub value: Value,
}

impl Argument {
    /// Create an argument.
    pub fn new(name: impl Into<String>, value: Value) -> Self {
        Self {
            name: name.into(),
            value,
        }
    }

    /// The argument's option type, derived from its value.
    pub fn option_type(&self) -> OptionType {
        self.value.option_type()
    }

    #[track_caller]
    fn mismatch(&self, wanted: OptionType) -> ! {
        panic!(
            "argument `{}` is {}, not {wanted}",
            self.name,
            self.option_type()
        )
    }

    /// The string value.
    ///
    /// # Panics
    ///
    /// If the argument is not a STRING. Executors know their own schema, so
    /// a mismatch is a bug in the command.
    #[track_caller]
    pub fn string(&self) -> &str {
        self.value
            .as_str()
            .unwrap_or_else(|| self.mismatch(OptionType::String))
    }

    /// The integer value. Panics if the argument is not an INTEGER.
    #[track_caller]
    pub fn integer(&self) -> i64 {
        self.value
            .as_integer()
            .unwrap_or_else(|| self.mismatch(OptionType::Integer))
    }

    /// The number value. Panics if the argument is not a NUMBER.
    #[track_caller]
    pub fn number(&self) -> f64 {
        self.value
            .as_number()
            .unwrap_or_else(|| self.mismatch(OptionType::Number))
    }

    /// The boolean value. Panics if the argument is not a BOOLEAN.
    #[track_caller]
    pub fn boolean(&self) -> bool {
        self.value
            .as_bool()
            .unwrap_or_else(|| self.mismatch(OptionType::Boolean))
    }

    /// The user value. Panics if the argument is not a USER.
    #[track_caller]
    pub fn user(&self) -> &User {
        self.value
            .as_user()
            .unwrap_or_else(|| self.mismatch(OptionType::User))
    }

    /// The role value. Panics if the argument is not a ROLE.
    #[track_caller]
    pub fn role(&self) -> &Role {
        self.value
            .as_role()
            .unwrap_or_else(|| self.mismatch(OptionType::Role))
    }

    /// The channel value. Panics if the argument is not a CHANNEL.
    #[track_caller]
    pub fn channel(&self) -> &Channel {
        self.value
            .as_channel()
            .unwrap_or_else(|| self.mismatch(OptionType::Channel))
    }

    /// The mentionable value. Panics if the argument is not a MENTIONABLE.
    #[track_caller]
    pub fn mentionable(&self) -> &Mentionable {
        match &self.value {
            Value::Mentionable(m) => m,
            _ => self.mismatch(OptionType::Mentionable),
        }
    }

    /// The attachment value. Panics if the argument is not an ATTACHMENT.
    #[track_caller]
    pub fn attachment(&self) -> &Attachment {
        match &self.value {
            Value::Attachment(a) => a,
            _ => self.mismatch(OptionType::Attachment),
        }
    }
}
