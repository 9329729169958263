//! cmdroute core library.
//!
//! Routes chat-bot commands: a text message or a structured interaction is
//! matched to a registered command, walked down its sub-command tree, and
//! its arguments are coerced into typed values before the handler runs.
//! The main entry points are [`Router`] for dispatch, [`CommandBuilder`] and
//! [`RegistryBuilder`] for registration, and [`parse_all`] for parsing a
//! token stream against an option list directly.

#![warn(missing_docs)]

macro_rules! ctx {
    ($($k:expr => $v:expr),+ $(,)?) => {
        std::collections::BTreeMap::from([$(($k.into(), $v.into())),+])
    };
}

/// Tokenizing, coercion and argument values.
pub mod args;
/// Command tree, registry, resolver and usage text.
pub mod command;
/// Re-exports from the diagnostics crate.
pub mod diag;
/// Platform entities and the guild directory interface.
pub mod entity;
/// Error types.
pub mod error;
/// Event routing and response directives.
pub mod router;

// ── Convenience re-exports ──────────────────────────────────────────────────
// Flat imports for the most common entry points. The full module paths
// remain available for less common types.

// Arguments
pub use args::{
    Argument, Coercer, InteractionOption, OptionPayload, ParseOutcome, Token, TokenQueue, Value,
    from_interaction, parse_all, scan,
};

// Commands
pub use command::{
    CommandBuilder, CommandNode, Executor, Invocation, OptionSchema, Registry, RegistryBuilder,
    Resolution, Source, executor_fn, resolve, usage,
};

// Routing
pub use router::{
    Directive, Dispatch, Embed, IgnoreReason, InteractionEvent, MessageEvent, Response, Routed,
    Router, RouterConfig,
};

// Entities
pub use entity::{
    Attachment, Channel, GuildDirectory, Member, Mentionable, Role, Snowflake, User,
};

// Errors and diagnostics
pub use diag::{Diagnostic, Severity, Span, codes};
pub use error::{ArgumentError, ConfigError, DispatchError, ParseError};

// Schema types used throughout the API
pub use cmdroute_schema::{Choice, ChoiceValue, CommandKind, OptionType, Permission};
