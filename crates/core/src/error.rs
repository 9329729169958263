//! Error types for command registration, argument parsing and dispatch.

use crate::diag::{Diagnostic, Span};
use cmdroute_schema::{CommandKind, OptionType};
use std::collections::BTreeMap;

/// A mistake in how commands were declared.
///
/// Returned from builders and registration; the process is expected to stop
/// at startup rather than run with a partially registered tree.
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    /// A root command with this name is already registered.
    #[error("command with name `{0}` has already been registered")]
    DuplicateCommand(String),

    /// Only root nodes can be registered.
    #[error("`{0}` is a sub-command and cannot be registered as a root command")]
    NotRoot(String),

    /// Two sub-commands of one parent share a name.
    #[error("command `{parent}` declares sub-command `{child}` more than once")]
    DuplicateSubCommand {
        /// Qualified path of the parent.
        parent: String,
        /// Repeated child name.
        child: String,
    },

    /// Two options of one command share a name.
    #[error("command `{command}` declares option `{option}` more than once")]
    DuplicateOption {
        /// Qualified command path.
        command: String,
        /// Repeated option name.
        option: String,
    },

    /// Command names must be non-empty and free of whitespace.
    #[error("invalid command name `{0}`")]
    InvalidName(String),

    /// A command declared both options and sub-commands.
    #[error("command `{0}` cannot have options and sub-commands at the same time")]
    OptionsAndSubCommands(String),

    /// A command declared both an executor and sub-commands.
    #[error("command `{0}` has sub-commands and cannot have an executor of its own")]
    ExecutorOnBranch(String),

    /// A sub-command's kind differs from its parent's.
    #[error("sub-command `{child}` is a {child_kind} command but its parent `{parent}` is a {parent_kind} command")]
    KindMismatch {
        /// Qualified path of the parent.
        parent: String,
        /// Child name.
        child: String,
        /// Parent kind.
        parent_kind: CommandKind,
        /// Child kind.
        child_kind: CommandKind,
    },

    /// Slash commands allow a group level and a sub-command level only.
    #[error("slash command `{command}` nests deeper than {max} levels")]
    TooDeep {
        /// Qualified path of the offending node.
        command: String,
        /// Deepest allowed depth.
        max: usize,
    },

    /// A sub-command marker was declared as an option type.
    #[error("option `{option}` of `{command}` uses structural type {option_type}")]
    StructuralOption {
        /// Qualified command path.
        command: String,
        /// Option name.
        option: String,
        /// The marker type.
        option_type: OptionType,
    },

    /// No text coercer exists for a declared option type.
    #[error("argument parser for {option_type} (option `{option}`) not found")]
    MissingCoercer {
        /// Option name.
        option: String,
        /// Declared type.
        option_type: OptionType,
    },
}

/// An invalid argument in user input.
///
/// Always recoverable: the router turns it into a reply explaining what was
/// wrong with the message.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("{message}")]
pub struct ArgumentError {
    /// Diagnostic code from [`crate::codes`].
    pub code: &'static str,
    /// Name of the option being parsed, if any positional context exists.
    pub option: Option<String>,
    /// Human-readable message.
    pub message: String,
    /// Raw text that failed to parse.
    pub fragment: Option<String>,
    /// Byte span of `fragment` in the scanned text.
    pub span: Option<Span>,
}

impl ArgumentError {
    /// Create an error with no option attribution and no fragment.
    pub fn new(code: &'static str, message: impl Into<String>) -> Self {
        Self {
            code,
            option: None,
            message: message.into(),
            fragment: None,
            span: None,
        }
    }

    /// Attribute the error to an option.
    pub fn for_option(mut self, name: impl Into<String>) -> Self {
        self.option = Some(name.into());
        self
    }

    /// Attach the raw text that failed and where it sits.
    pub fn with_fragment(mut self, fragment: impl Into<String>, span: Option<Span>) -> Self {
        self.fragment = Some(fragment.into());
        self.span = span;
        self
    }

    /// Convert into a diagnostic with option/fragment context.
    pub fn to_diagnostic(&self) -> Diagnostic {
        let mut ctx: BTreeMap<String, String> =
            ctx!("option" => self.option.as_deref().unwrap_or("none"));
        if let Some(fragment) = &self.fragment {
            ctx.insert("fragment".to_string(), fragment.clone());
        }
        Diagnostic::error(self.code, self.message.clone(), self.span).with_context(ctx)
    }
}

/// Failure of a full argument parse.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ParseError {
    /// The input was wrong.
    #[error(transparent)]
    Argument(#[from] ArgumentError),
    /// The schema was wrong.
    #[error(transparent)]
    Config(#[from] ConfigError),
}

impl ParseError {
    /// The argument error, if this failure was caused by user input.
    pub fn as_argument(&self) -> Option<&ArgumentError> {
        match self {
            ParseError::Argument(e) => Some(e),
            ParseError::Config(_) => None,
        }
    }
}

/// A contract violation discovered while dispatching one event.
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum DispatchError {
    /// The handler produced a directive the text channel cannot deliver.
    #[error("{directive} responses are not supported in reply to a text message")]
    UnsupportedDirective {
        /// Directive name (e.g. `"modal"`).
        directive: &'static str,
    },

    /// Text-message replies are always public.
    #[error("cannot send an ephemeral reply to a text message")]
    EphemeralMessage,

    /// The resolved command's schema has no usable coercer.
    #[error(transparent)]
    Config(#[from] ConfigError),
}
