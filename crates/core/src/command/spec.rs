use super::executor::Executor;
use super::node::CommandBuilder;
use super::option::OptionSchema;
use cmdroute_schema::{CommandSpec, OptionSpec};
use std::sync::Arc;

/// Binds a handler to a leaf, given the leaf's path from the root.
pub type Binder<'a> = dyn Fn(&[String]) -> Option<Arc<dyn Executor>> + 'a;

/// Turn a declarative command description into a builder.
///
/// `bind` is asked for a handler for every leaf; returning `None` leaves the
/// leaf without an executor, which the router reports as incorrect usage.
pub fn builder_from_spec(spec: &CommandSpec, bind: &Binder<'_>) -> CommandBuilder {
    builder_under(spec, &[], bind)
}

fn builder_under(spec: &CommandSpec, parent: &[String], bind: &Binder<'_>) -> CommandBuilder {
    let mut path = parent.to_vec();
    path.push(spec.name.clone());

    let mut builder = CommandBuilder::new(&spec.name, &spec.description)
        .permissions(spec.permissions.iter().copied())
        .options(spec.options.iter().map(option_from_spec));
    if let Some(kind) = spec.kind {
        builder = builder.kind(kind);
    }
    for sub in &spec.subcommands {
        builder = builder.subcommand(builder_under(sub, &path, bind));
    }
    if spec.subcommands.is_empty()
        && let Some(executor) = bind(&path)
    {
        builder = builder.executor(executor);
    }
    builder
}

/// Build an option schema from its declarative form.
pub fn option_from_spec(spec: &OptionSpec) -> OptionSchema {
    OptionSchema::builder(spec.r#type, &spec.name, &spec.description)
        .required(spec.required)
        .choices(spec.choices.iter().cloned())
        .constraints(&spec.constraints)
        .build()
}
