use super::node::CommandNode;
use crate::args::Argument;
use crate::entity::Member;
use crate::router::Response;
use futures::FutureExt;
use futures::future::{self, BoxFuture};
use std::sync::Arc;

/// Which channel an invocation arrived on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Source {
    /// A prefixed text message.
    Message,
    /// A structured slash-command interaction.
    Interaction,
}

/// Everything a handler receives for one invocation.
#[derive(Debug, Clone, Copy)]
pub struct Invocation<'a> {
    /// The invoking member.
    pub member: &'a Member,
    /// The resolved command.
    pub command: &'a CommandNode,
    /// Parsed arguments, in option declaration order.
    pub arguments: &'a [Argument],
    /// Input channel.
    pub source: Source,
}

impl<'a> Invocation<'a> {
    /// Argument by option name.
    pub fn argument(&self, name: &str) -> Option<&'a Argument> {
        self.arguments.iter().find(|a| a.name == name)
    }
}

/// A command handler.
///
/// Stored as `Arc<dyn Executor>` in the command tree and shared by every
/// concurrent dispatch, so implementations must not rely on exclusive access.
pub trait Executor: Send + Sync {
    /// Run the command and produce its reply.
    fn execute<'a>(&'a self, invocation: Invocation<'a>) -> BoxFuture<'a, Response>;
}

struct FnExecutor<F>(F);

impl<F> Executor for FnExecutor<F>
where
    F: Fn(Invocation<'_>) -> Response + Send + Sync,
{
    fn execute<'a>(&'a self, invocation: Invocation<'a>) -> BoxFuture<'a, Response> {
        future::ready((self.0)(invocation)).boxed()
    }
}

/// Wrap a synchronous closure as an executor.
pub fn executor_fn<F>(f: F) -> Arc<dyn Executor>
where
    F: Fn(Invocation<'_>) -> Response + Send + Sync + 'static,
{
    Arc::new(FnExecutor(f))
}
