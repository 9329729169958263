use super::scanner::{Token, TokenQueue};
use super::value::Value;
use crate::diag::{Span, codes};
use crate::entity::{GuildDirectory, Snowflake};
use crate::error::ArgumentError;
use cmdroute_schema::OptionType;

/// Converts tokens from the front of a [`TokenQueue`] into one typed value.
///
/// One variant per option type that the text channel understands, plus
/// [`Coercer::Unsupported`] for types that exist on the structured path only.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Coercer {
    /// One token verbatim, or a double-quoted run of tokens.
    String,
    /// Base-10 signed 64-bit integer.
    Integer,
    /// Finite double.
    Number,
    /// `true` / `false`, any case.
    Boolean,
    /// `<@ID>`, `<@!ID>` or a bare ID, resolved through the directory.
    User,
    /// `<@&ID>`, a bare ID or `@everyone`.
    Role,
    /// `<#ID>` or a bare ID.
    Channel,
    /// A type with no text encoding. Consumes one token and fails.
    Unsupported(OptionType),
}

/// A successfully coerced value and the raw text it came from.
#[derive(Debug, Clone, PartialEq)]
pub struct Coerced {
    /// The typed value.
    pub value: Value,
    /// Tokens consumed, joined by single spaces.
    pub source: String,
    /// Span of the consumed tokens.
    pub span: Span,
}

impl Coercer {
    /// The coercer for an option type.
    ///
    /// Returns `None` for the structural markers, which are never argument
    /// types.
    pub fn for_type(option_type: OptionType) -> Option<Self> {
        match option_type {
            OptionType::String => Some(Coercer::String),
            OptionType::Integer => Some(Coercer::Integer),
            OptionType::Number => Some(Coercer::Number),
            OptionType::Boolean => Some(Coercer::Boolean),
            OptionType::User => Some(Coercer::User),
            OptionType::Role => Some(Coercer::Role),
            OptionType::Channel => Some(Coercer::Channel),
            OptionType::Mentionable | OptionType::Attachment => {
                Some(Coercer::Unsupported(option_type))
            }
            OptionType::SubCommand | OptionType::SubCommandGroup => None,
        }
    }

    /// Consume one value's worth of tokens from the front of `queue`.
    ///
    /// Tokens are consumed even when coercion fails. Errors carry the failing
    /// text and its span but no option name; the dispatcher attributes them.
    pub async fn consume<D: GuildDirectory>(
        self,
        queue: &mut TokenQueue<'_>,
        directory: &D,
    ) -> Result<Coerced, ArgumentError> {
        let Some(first) = queue.pop_front() else {
            return Err(ArgumentError::new(
                codes::INSUFFICIENT_ARGUMENTS,
                "There are no more arguments to parse.",
            ));
        };
        let raw = first.text;
        let span = first.span();
        let fail = |code: &'static str, message: String| -> Result<Coerced, ArgumentError> {
            Err(ArgumentError::new(code, message).with_fragment(raw, Some(span)))
        };
        let value = match self {
            Coercer::String => return consume_string(first, queue),
            Coercer::Integer => match raw.parse::<i64>() {
                Ok(i) => Value::Integer(i),
                Err(_) => {
                    return fail(
                        codes::EXPECTED_INTEGER,
                        "Provided argument is not a valid integer.".into(),
                    );
                }
            },
            Coercer::Number => match raw.parse::<f64>() {
                Ok(n) if n.is_finite() => Value::Number(n),
                _ => {
                    return fail(
                        codes::EXPECTED_NUMBER,
                        "Provided argument is not a valid number.".into(),
                    );
                }
            },
            Coercer::Boolean => {
                if raw.eq_ignore_ascii_case("true") {
                    Value::Boolean(true)
                } else if raw.eq_ignore_ascii_case("false") {
                    Value::Boolean(false)
                } else {
                    return fail(
                        codes::EXPECTED_BOOLEAN,
                        "Provided argument is not a valid boolean. Expected 'true' or 'false'."
                            .into(),
                    );
                }
            }
            Coercer::User => {
                let Some(id) = reference_id(raw, &["<@!", "<@"]) else {
                    return fail(codes::INVALID_REFERENCE, bad_reference("user", "<@"));
                };
                match directory.user_by_id(id).await {
                    Some(user) => Value::User(user),
                    None => {
                        return fail(
                            codes::REFERENCE_NOT_FOUND,
                            "No member found with the provided user ID".into(),
                        );
                    }
                }
            }
            Coercer::Role => {
                if raw == "@everyone" {
                    Value::Role(directory.public_role())
                } else {
                    let Some(id) = reference_id(raw, &["<@&"]) else {
                        return fail(codes::INVALID_REFERENCE, bad_reference("role", "<@&"));
                    };
                    match directory.role_by_id(id).await {
                        Some(role) => Value::Role(role),
                        None => {
                            return fail(
                                codes::REFERENCE_NOT_FOUND,
                                "No role found with the provided role ID".into(),
                            );
                        }
                    }
                }
            }
            Coercer::Channel => {
                let Some(id) = reference_id(raw, &["<#"]) else {
                    return fail(codes::INVALID_REFERENCE, bad_reference("channel", "<#"));
                };
                match directory.channel_by_id(id).await {
                    Some(channel) => Value::Channel(channel),
                    None => {
                        return fail(
                            codes::REFERENCE_NOT_FOUND,
                            "No channel found with the provided channel ID".into(),
                        );
                    }
                }
            }
            Coercer::Unsupported(option_type) => {
                return fail(
                    codes::UNSUPPORTED_TEXT_TYPE,
                    format!("Arguments of type {option_type} cannot be parsed from a text message."),
                );
            }
        };

        Ok(Coerced {
            value,
            source: raw.to_string(),
            span,
        })
    }
}

fn consume_string(first: Token<'_>, queue: &mut TokenQueue<'_>) -> Result<Coerced, ArgumentError> {
    let text = first.text;
    if !text.starts_with('"') {
        return Ok(Coerced {
            value: Value::String(text.to_string()),
            source: text.to_string(),
            span: first.span(),
        });
    }
    if text.len() > 1 && text.ends_with('"') {
        return Ok(Coerced {
            value: Value::String(text[1..text.len() - 1].to_string()),
            source: text.to_string(),
            span: first.span(),
        });
    }

    let mut joined = text.to_string();
    let mut span = first.span();
    loop {
        let Some(next) = queue.pop_front() else {
            return Err(ArgumentError::new(
                codes::UNTERMINATED_STRING,
                "Provided argument does not have an ending quotation mark.",
            )
            .with_fragment(joined, Some(span)));
        };
        joined.push(' ');
        joined.push_str(next.text);
        span = span.cover(next.span());
        if next.text.ends_with('"') {
            break;
        }
    }

    // `joined` starts and ends with a quote and is at least two bytes long.
    let inner = joined[1..joined.len() - 1].to_string();
    Ok(Coerced {
        value: Value::String(inner),
        source: joined,
        span,
    })
}

/// Strip the first matching mention wrapper and parse the digits inside.
fn reference_id(raw: &str, prefixes: &[&str]) -> Option<Snowflake> {
    let body = prefixes
        .iter()
        .find_map(|p| raw.strip_prefix(p).and_then(|rest| rest.strip_suffix('>')))
        .unwrap_or(raw);
    if body.is_empty() || !body.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    body.parse().ok()
}

fn bad_reference(noun: &str, prefix: &str) -> String {
    format!(
        "Provided argument is not a valid {noun} ID. Expected either a {noun} mention \
         in the format '{prefix}123456789>' or a numeric {noun} ID."
    )
}
