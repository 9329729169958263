//! Diagnostics for cmdroute.
//!
//! Provides [`Diagnostic`], [`Severity`] and [`Span`] types used to report
//! argument and usage errors from the parser and router. Diagnostic codes are
//! defined in the [`codes`] module.

#![warn(missing_docs)]

/// Diagnostic ID constants.
pub mod codes;

use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::collections::BTreeMap;

/// Severity level for a diagnostic message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[non_exhaustive]
pub enum Severity {
    /// Hard error: the invocation was rejected.
    Error,
    /// Warning: the invocation proceeded but something looked off.
    Warn,
    /// Informational note.
    Info,
}

/// Byte span in the message text.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct Span {
    /// Byte offset of the first character (0-based).
    pub start: usize,
    /// Byte offset one past the last character.
    pub end: usize,
}

impl Span {
    /// Create a span covering `[start, end)`.
    ///
    /// Panics if `end < start`.
    pub fn new(start: usize, end: usize) -> Self {
        assert!(end >= start, "Span end ({end}) < start ({start})");
        Self { start, end }
    }

    /// Create a zero-width span at the given position.
    pub fn empty(pos: usize) -> Self {
        Self {
            start: pos,
            end: pos,
        }
    }

    /// Smallest span covering both `self` and `other`.
    pub fn cover(self, other: Span) -> Self {
        Self {
            start: self.start.min(other.start),
            end: self.end.max(other.end),
        }
    }
}

/// A diagnostic message produced by the parser or router.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostic {
    /// Unique diagnostic code (e.g., `"CMD1003"`).
    pub id: Cow<'static, str>,
    /// Severity level.
    pub severity: Severity,
    /// Human-readable diagnostic message.
    pub message: String,
    /// Optional byte span in the message text that this diagnostic relates to.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub span: Option<Span>,
    /// Machine-readable context for tooling. Keys and values are free-form strings.
    ///
    /// Uses `BTreeMap` for deterministic key ordering in serialized output.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub context: Option<BTreeMap<String, String>>,
}

impl Diagnostic {
    /// Create a diagnostic with the given fields.
    pub fn new(
        id: impl Into<Cow<'static, str>>,
        severity: Severity,
        message: impl Into<String>,
        span: Option<Span>,
    ) -> Self {
        Self {
            id: id.into(),
            severity,
            message: message.into(),
            span,
            context: None,
        }
    }

    /// Shorthand for an `Error` diagnostic.
    pub fn error(
        id: impl Into<Cow<'static, str>>,
        message: impl Into<String>,
        span: Option<Span>,
    ) -> Self {
        Self::new(id, Severity::Error, message, span)
    }

    /// Shorthand for a `Warn` diagnostic.
    pub fn warn(
        id: impl Into<Cow<'static, str>>,
        message: impl Into<String>,
        span: Option<Span>,
    ) -> Self {
        Self::new(id, Severity::Warn, message, span)
    }

    /// Attach machine-readable context metadata (builder pattern).
    ///
    /// Keys are short descriptors like `"option"`, `"source"`, `"command"`.
    pub fn with_context(mut self, ctx: BTreeMap<String, String>) -> Self {
        self.context = Some(ctx);
        self
    }

    /// Returns the human-readable explanation for this diagnostic's code, if available.
    pub fn explain(&self) -> Option<&'static str> {
        explain(&self.id)
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Severity::Error => write!(f, "error"),
            Severity::Warn => write!(f, "warn"),
            Severity::Info => write!(f, "info"),
        }
    }
}

impl std::fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}[{}]: {}", self.severity, self.id, self.message)
    }
}

/// Returns the human-readable explanation for a diagnostic code, if known.
pub fn explain(id: &str) -> Option<&'static str> {
    let text = match id {
        codes::INSUFFICIENT_ARGUMENTS => {
            "The message ended before every declared option received a value. \
             Options are positional on the text path; supply one value per option."
        }
        codes::UNTERMINATED_STRING => {
            "A string argument opened with a double quote but no later token ended \
             with a closing double quote."
        }
        codes::EXPECTED_INTEGER => {
            "The option expects a base-10 whole number that fits in a signed 64-bit integer."
        }
        codes::EXPECTED_NUMBER => "The option expects a finite decimal number such as `2.5`.",
        codes::EXPECTED_BOOLEAN => {
            "The option expects `true` or `false` (any letter case). Other spellings \
             such as `1`, `yes` or `on` are rejected."
        }
        codes::INVALID_REFERENCE => {
            "The option expects a mention (`<@id>`, `<@&id>`, `<#id>`) or a bare numeric ID."
        }
        codes::REFERENCE_NOT_FOUND => {
            "The ID was well-formed but no matching user, role or channel exists in this guild."
        }
        codes::UNSUPPORTED_TEXT_TYPE => {
            "Mentionable and attachment options have no text encoding and can only be \
             supplied through slash-command interactions."
        }
        codes::LEFTOVER_ARGUMENTS => {
            "More tokens were supplied than the command declares options for. Quote \
             multi-word strings so they are read as one argument."
        }
        codes::VALIDATOR_REJECTED => {
            "The value parsed correctly but a validator attached to the option rejected it."
        }
        codes::INVALID_CHOICE => "The option only accepts one of its declared choices.",
        codes::STRUCTURED_MARKER => {
            "A structured interaction carried a sub-command, sub-command group or \
             unknown type where an argument value was expected."
        }
        codes::INCORRECT_USAGE => {
            "The command path did not end on an executable command. The usage tree \
             lists the available sub-commands and their options."
        }
        codes::UNKNOWN_SUBCOMMAND => {
            "The interaction named a sub-command or sub-command group that is not \
             registered under the command."
        }
        _ => return None,
    };
    Some(text)
}
