//! Dispatch adapter: turns message and interaction events into handler
//! invocations and replies.

/// Router settings and default error replies.
pub mod config;
/// Inbound platform events.
pub mod event;
/// Response directives.
pub mod response;

pub use config::{
    ArgumentHook, ERROR_COLOR, RouterConfig, UsageHook, default_argument_response,
    default_usage_response,
};
pub use event::{InteractionEvent, MessageEvent};
pub use response::{Directive, Embed, EmbedField, Modal, ModalInput, Response, RichMessage};

use crate::args::{Argument, Token, TokenQueue, from_interaction, parse_all, scan};
use crate::command::{CommandNode, Halt, Invocation, Registry, Source, resolve};
use crate::diag::{Diagnostic, Span, codes};
use crate::entity::{GuildDirectory, Member};
use crate::error::{ArgumentError, DispatchError, ParseError};
use cmdroute_schema::CommandKind;
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

/// Why an event was dropped without a reply.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IgnoreReason {
    /// Written by a bot account.
    BotAuthor,
    /// Not sent by a guild member.
    NoMember,
    /// Does not start with the prefix.
    NoPrefix,
    /// Names no registered command.
    UnknownCommand,
    /// Names a command registered for the other input channel.
    WrongKind,
}

impl fmt::Display for IgnoreReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            IgnoreReason::BotAuthor => "bot author",
            IgnoreReason::NoMember => "no guild member",
            IgnoreReason::NoPrefix => "missing prefix",
            IgnoreReason::UnknownCommand => "unknown command",
            IgnoreReason::WrongKind => "wrong command kind",
        };
        f.write_str(s)
    }
}

/// Where routing an event ended, before any handler runs.
#[derive(Debug)]
pub enum Routed<'r> {
    /// Dropped silently.
    Ignored(IgnoreReason),
    /// The member holds none of the command's permissions. Dropped silently.
    Denied {
        /// The gated command.
        command: &'r CommandNode,
    },
    /// No executable command at the resolved node.
    Usage {
        /// Deepest node reached.
        command: &'r CommandNode,
        /// Why resolution did not reach an executor.
        diagnostic: Diagnostic,
    },
    /// Arguments did not parse.
    InvalidArguments {
        /// The resolved command.
        command: &'r CommandNode,
        /// First failure.
        error: ArgumentError,
    },
    /// Ready to execute.
    Ready {
        /// The resolved command.
        command: &'r CommandNode,
        /// Invoking member.
        member: &'r Member,
        /// Parsed arguments, in option order.
        arguments: Vec<Argument>,
    },
}

/// Final result of handling one event.
#[derive(Debug, Clone, PartialEq)]
pub enum Dispatch {
    /// Dropped silently.
    Ignored(IgnoreReason),
    /// Dropped silently for lack of permission.
    Denied,
    /// The handler ran and replied.
    Replied(Response),
    /// Usage reply.
    Usage {
        /// Reply to send.
        response: Response,
        /// What went wrong.
        diagnostic: Diagnostic,
    },
    /// Argument-error reply.
    InvalidArguments {
        /// Reply to send.
        response: Response,
        /// What went wrong.
        error: ArgumentError,
    },
}

impl Dispatch {
    /// The reply to send, if any.
    pub fn response(&self) -> Option<&Response> {
        match self {
            Dispatch::Ignored(_) | Dispatch::Denied => None,
            Dispatch::Replied(r)
            | Dispatch::Usage { response: r, .. }
            | Dispatch::InvalidArguments { response: r, .. } => Some(r),
        }
    }
}

/// Routes events against a frozen [`Registry`].
///
/// Cheap to clone and safe to share between concurrent dispatches.
#[derive(Debug, Clone)]
pub struct Router {
    registry: Arc<Registry>,
    config: RouterConfig,
}

impl Router {
    /// Create a router.
    pub fn new(registry: impl Into<Arc<Registry>>, config: RouterConfig) -> Self {
        Self {
            registry: registry.into(),
            config,
        }
    }

    /// The registry routed against.
    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Router settings.
    pub fn config(&self) -> &RouterConfig {
        &self.config
    }

    /// Resolve and parse a text message without running the handler.
    pub async fn route_message<'r, D: GuildDirectory>(
        &'r self,
        event: &'r MessageEvent,
        directory: &D,
    ) -> Result<Routed<'r>, DispatchError> {
        if self.config.ignore_bots && event.author.bot {
            tracing::debug!(author = event.author.id, "ignoring bot message");
            return Ok(Routed::Ignored(IgnoreReason::BotAuthor));
        }
        let Some(member) = event.member.as_ref() else {
            tracing::debug!(author = event.author.id, "ignoring message without member");
            return Ok(Routed::Ignored(IgnoreReason::NoMember));
        };

        let tokens = scan(event.content.trim_end_matches(' '));
        let Some((head, rest)) = tokens.split_first() else {
            return Ok(Routed::Ignored(IgnoreReason::NoPrefix));
        };
        let Some(name) = head.text.strip_prefix(self.config.prefix.as_str()) else {
            return Ok(Routed::Ignored(IgnoreReason::NoPrefix));
        };
        let Some(root) = self.registry.get(name) else {
            return Ok(Routed::Ignored(IgnoreReason::UnknownCommand));
        };
        if root.kind() != CommandKind::Message {
            return Ok(Routed::Ignored(IgnoreReason::WrongKind));
        }

        let resolution = resolve(root, rest);
        let command = resolution.node;
        tracing::debug!(
            command = %command.qualified_name(),
            halt = ?resolution.halt,
            remaining = resolution.remaining.len(),
            "resolved message command"
        );
        if resolution.halt == Halt::Unmatched {
            let unmatched = resolution.remaining.first();
            return Ok(Routed::Usage {
                command,
                diagnostic: usage_diagnostic(command, unmatched),
            });
        }
        if command.executor().is_none() {
            return Ok(Routed::Usage {
                command,
                diagnostic: usage_diagnostic(command, None),
            });
        }
        if !member.holds_any(command.permissions()) {
            tracing::warn!(
                command = %command.qualified_name(),
                member = member.user.id,
                "member lacks permission; dropping invocation"
            );
            return Ok(Routed::Denied { command });
        }

        let queue = TokenQueue::from(resolution.remaining);
        match parse_all(command.options(), queue, directory).await {
            Ok(arguments) => Ok(Routed::Ready {
                command,
                member,
                arguments,
            }),
            Err(ParseError::Argument(error)) => {
                tracing::debug!(
                    command = %command.qualified_name(),
                    code = error.code,
                    "argument error: {error}"
                );
                Ok(Routed::InvalidArguments { command, error })
            }
            Err(ParseError::Config(error)) => Err(error.into()),
        }
    }

    /// Resolve a structured interaction without running the handler.
    pub fn route_interaction<'r>(&'r self, event: &'r InteractionEvent) -> Routed<'r> {
        let Some(root) = self.registry.get(&event.command) else {
            return Routed::Ignored(IgnoreReason::UnknownCommand);
        };
        if root.kind() != CommandKind::Slash {
            return Routed::Ignored(IgnoreReason::WrongKind);
        }
        let Some(member) = event.member.as_ref() else {
            return Routed::Ignored(IgnoreReason::NoMember);
        };

        let mut command = root;
        if let Some(sub) = &event.subcommand {
            let path = event.subcommand_group.iter().chain(std::iter::once(sub));
            for name in path {
                match command.child(name) {
                    Some(child) => command = child,
                    None => {
                        return Routed::Usage {
                            command,
                            diagnostic: unknown_subcommand(command, name),
                        };
                    }
                }
            }
        }
        if command.executor().is_none() {
            return Routed::Usage {
                command,
                diagnostic: usage_diagnostic(command, None),
            };
        }
        if !member.holds_any(command.permissions()) {
            tracing::warn!(
                command = %command.qualified_name(),
                member = member.user.id,
                "member lacks permission; dropping interaction"
            );
            return Routed::Denied { command };
        }

        match from_interaction(&event.options) {
            Ok(arguments) => Routed::Ready {
                command,
                member,
                arguments,
            },
            Err(error) => {
                tracing::warn!(
                    command = %command.qualified_name(),
                    "structured option rejected: {error}"
                );
                Routed::InvalidArguments { command, error }
            }
        }
    }

    /// Route a text message, run its handler and return the reply.
    ///
    /// Errors when the handler asks for a reply the text channel cannot send
    /// (modal, defer, ephemeral) or the command's schema is unusable.
    pub async fn dispatch_message<D: GuildDirectory>(
        &self,
        event: &MessageEvent,
        directory: &D,
    ) -> Result<Dispatch, DispatchError> {
        let routed = self.route_message(event, directory).await?;
        self.finish_message(routed).await
    }

    /// Run the handler for an already routed text message and build the
    /// reply, applying the text channel's directive limits.
    pub async fn finish_message(&self, routed: Routed<'_>) -> Result<Dispatch, DispatchError> {
        let dispatch = self.finish(routed, Source::Message, false).await;
        if let Dispatch::Replied(response) = &dispatch {
            if response.ephemeral {
                tracing::error!("handler returned an ephemeral reply to a text message");
                return Err(DispatchError::EphemeralMessage);
            }
            if !response.directive.fits_text_channel() {
                let directive = response.directive.name();
                tracing::error!(
                    directive,
                    "handler returned a directive the text channel cannot send"
                );
                return Err(DispatchError::UnsupportedDirective { directive });
            }
        }
        Ok(dispatch)
    }

    /// Route a structured interaction, run its handler and return the reply.
    pub async fn dispatch_interaction(&self, event: &InteractionEvent) -> Dispatch {
        self.finish_interaction(self.route_interaction(event)).await
    }

    /// Run the handler for an already routed interaction and build the reply.
    /// Error replies are ephemeral unless disabled in the config.
    pub async fn finish_interaction(&self, routed: Routed<'_>) -> Dispatch {
        self.finish(routed, Source::Interaction, self.config.ephemeral_errors)
            .await
    }

    async fn finish(&self, routed: Routed<'_>, source: Source, ephemeral_errors: bool) -> Dispatch {
        let private = |r: Response| if ephemeral_errors { r.ephemeral() } else { r };
        match routed {
            Routed::Ignored(reason) => Dispatch::Ignored(reason),
            Routed::Denied { .. } => Dispatch::Denied,
            Routed::Usage {
                command,
                diagnostic,
            } => Dispatch::Usage {
                response: private(self.config.usage_response(command)),
                diagnostic,
            },
            Routed::InvalidArguments { command, error } => Dispatch::InvalidArguments {
                response: private(self.config.argument_response(command, &error)),
                error,
            },
            Routed::Ready {
                command,
                member,
                arguments,
            } => {
                let Some(executor) = command.executor() else {
                    return Dispatch::Usage {
                        response: private(self.config.usage_response(command)),
                        diagnostic: usage_diagnostic(command, None),
                    };
                };
                let invocation = Invocation {
                    member,
                    command,
                    arguments: &arguments,
                    source,
                };
                let response = executor.execute(invocation).await;
                tracing::debug!(
                    command = %command.qualified_name(),
                    directive = response.directive.name(),
                    "handler replied"
                );
                Dispatch::Replied(response)
            }
        }
    }
}

fn usage_diagnostic(command: &CommandNode, unmatched: Option<&Token<'_>>) -> Diagnostic {
    let mut context: BTreeMap<String, String> = ctx!("command" => command.qualified_name());
    let span: Option<Span> = unmatched.map(Token::span);
    if let Some(token) = unmatched {
        context.insert("unmatched".into(), token.text.to_string());
    }
    Diagnostic::error(codes::INCORRECT_USAGE, "Wrong command usage", span).with_context(context)
}

fn unknown_subcommand(command: &CommandNode, name: &str) -> Diagnostic {
    Diagnostic::error(
        codes::UNKNOWN_SUBCOMMAND,
        format!("`{}` has no sub-command `{name}`", command.qualified_name()),
        None,
    )
    .with_context(ctx!(
        "command" => command.qualified_name(),
        "unmatched" => name,
    ))
}
