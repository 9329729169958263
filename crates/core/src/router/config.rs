use super::response::{Embed, Response};
use crate::command::{CommandNode, usage};
use crate::error::ArgumentError;
use std::fmt;
use std::sync::Arc;

/// Colour of the default error embeds.
pub const ERROR_COLOR: u32 = 0xFF0000;

/// Builds the reply for a command reached without an executable target.
pub type UsageHook = Arc<dyn Fn(&CommandNode) -> Response + Send + Sync>;

/// Builds the reply for an argument that failed to parse.
pub type ArgumentHook = Arc<dyn Fn(&CommandNode, &ArgumentError) -> Response + Send + Sync>;

/// Router settings.
#[non_exhaustive]
#[derive(Clone)]
pub struct RouterConfig {
    /// Text that starts every command message.
    pub prefix: String,
    /// Drop messages written by bot accounts.
    pub ignore_bots: bool,
    /// Send usage and argument errors to interactions as ephemeral replies.
    pub ephemeral_errors: bool,
    /// Custom usage reply; the default is a red "Wrong command usage" embed.
    pub on_incorrect_usage: Option<UsageHook>,
    /// Custom argument-error reply; the default is a red embed naming the
    /// failing text and the error.
    pub on_incorrect_argument: Option<ArgumentHook>,
}

impl Default for RouterConfig {
    fn default() -> Self {
        Self {
            prefix: "!".into(),
            ignore_bots: true,
            ephemeral_errors: true,
            on_incorrect_usage: None,
            on_incorrect_argument: None,
        }
    }
}

impl RouterConfig {
    /// Default settings with a different prefix.
    pub fn with_prefix(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            ..Self::default()
        }
    }

    /// Whether bot-authored messages are dropped.
    pub fn ignore_bots(mut self, ignore: bool) -> Self {
        self.ignore_bots = ignore;
        self
    }

    /// Whether interaction error replies are ephemeral.
    pub fn ephemeral_errors(mut self, ephemeral: bool) -> Self {
        self.ephemeral_errors = ephemeral;
        self
    }

    /// Replace the usage reply.
    pub fn on_incorrect_usage(
        mut self,
        hook: impl Fn(&CommandNode) -> Response + Send + Sync + 'static,
    ) -> Self {
        self.on_incorrect_usage = Some(Arc::new(hook));
        self
    }

    /// Replace the argument-error reply.
    pub fn on_incorrect_argument(
        mut self,
        hook: impl Fn(&CommandNode, &ArgumentError) -> Response + Send + Sync + 'static,
    ) -> Self {
        self.on_incorrect_argument = Some(Arc::new(hook));
        self
    }

    pub(crate) fn usage_response(&self, command: &CommandNode) -> Response {
        match &self.on_incorrect_usage {
            Some(hook) => hook(command),
            None => default_usage_response(command),
        }
    }

    pub(crate) fn argument_response(&self, command: &CommandNode, error: &ArgumentError) -> Response {
        match &self.on_incorrect_argument {
            Some(hook) => hook(command, error),
            None => default_argument_response(error),
        }
    }
}

impl fmt::Debug for RouterConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RouterConfig")
            .field("prefix", &self.prefix)
            .field("ignore_bots", &self.ignore_bots)
            .field("ephemeral_errors", &self.ephemeral_errors)
            .field("on_incorrect_usage", &self.on_incorrect_usage.is_some())
            .field("on_incorrect_argument", &self.on_incorrect_argument.is_some())
            .finish()
    }
}

/// Red embed with the command's usage tree in a code block.
pub fn default_usage_response(command: &CommandNode) -> Response {
    Response::embeds([Embed::new()
        .color(ERROR_COLOR)
        .description("Wrong command usage")
        .field("Correct Usage", format!("```\n{}\n```", usage(command)), false)])
}

/// Red embed naming the text that failed to parse and why.
pub fn default_argument_response(error: &ArgumentError) -> Response {
    Response::embeds([Embed::new()
        .color(ERROR_COLOR)
        .description("There has been an error while parsing arguments")
        .field("Argument", error.fragment.as_deref().unwrap_or("none"), false)
        .field("Error", &error.message, false)])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::command::CommandBuilder;
    use crate::diag::codes;
    use crate::router::Directive;

    fn first_embed(r: &Response) -> &Embed {
        match &r.directive {
            Directive::Embeds { embeds } => &embeds[0],
            other => panic!("expected embeds, got {other:?}"),
        }
    }

    #[test]
    fn default_argument_reply_has_none_without_fragment() {
        let err = ArgumentError::new(codes::INSUFFICIENT_ARGUMENTS, "Missing: a");
        let r = default_argument_response(&err);
        let e = first_embed(&r);
        assert_eq!(e.color, Some(ERROR_COLOR));
        assert_eq!(e.field_value("Argument"), Some("none"));
        assert_eq!(e.field_value("Error"), Some("Missing: a"));
    }

    #[test]
    fn default_usage_reply_fences_usage() {
        let node = CommandBuilder::message("ping", "")
            .execute(|_| Response::text("pong"))
            .build()
            .unwrap();
        let r = RouterConfig::default().usage_response(&node);
        assert_eq!(first_embed(&r).field_value("Correct Usage"), Some("```\nping\n```"));
    }

    #[test]
    fn hooks_replace_defaults() {
        let config = RouterConfig::with_prefix("?")
            .on_incorrect_usage(|c| Response::text(format!("usage: {}", c.name())));
        let node = CommandBuilder::message("x", "").build().unwrap();
        assert_eq!(config.prefix, "?");
        assert_eq!(config.usage_response(&node), Response::text("usage: x"));
    }
}
