use super::executor::Executor;
use super::node::{CommandBuilder, CommandNode};
use super::spec::{Binder, builder_from_spec};
use crate::error::ConfigError;
use cmdroute_schema::{CommandFile, CommandKind};
use std::collections::BTreeMap;
use std::sync::Arc;

/// Collects root commands during startup.
///
/// Registration is single-threaded; [`freeze`](Self::freeze) hands back an
/// immutable [`Registry`] that dispatch shares without locking.
#[derive(Debug, Default)]
pub struct RegistryBuilder {
    commands: BTreeMap<String, CommandNode>,
}

impl RegistryBuilder {
    /// Empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a built root command. Names are globally unique.
    pub fn register(&mut self, command: CommandNode) -> Result<&mut Self, ConfigError> {
        if command.depth() != 0 {
            return Err(ConfigError::NotRoot(command.qualified_name()));
        }
        if self.commands.contains_key(command.name()) {
            return Err(ConfigError::DuplicateCommand(command.name().to_string()));
        }
        tracing::info!(
            command = command.name(),
            kind = %command.kind(),
            "registered command"
        );
        self.commands.insert(command.name().to_string(), command);
        Ok(self)
    }

    /// Build and register.
    pub fn register_builder(&mut self, builder: CommandBuilder) -> Result<&mut Self, ConfigError> {
        self.register(builder.build()?)
    }

    /// Register every command of a command file, binding leaf handlers with
    /// `bind`. Stops at the first configuration error.
    pub fn register_file(
        &mut self,
        file: &CommandFile,
        bind: &Binder<'_>,
    ) -> Result<&mut Self, ConfigError> {
        for spec in &file.commands {
            self.register_builder(builder_from_spec(spec, bind))?;
        }
        Ok(self)
    }

    /// Register a command file with the same handler on every leaf.
    pub fn register_file_with(
        &mut self,
        file: &CommandFile,
        executor: Arc<dyn Executor>,
    ) -> Result<&mut Self, ConfigError> {
        self.register_file(file, &|_| Some(Arc::clone(&executor)))
    }

    /// Finish registration.
    pub fn freeze(self) -> Registry {
        Registry {
            commands: self.commands,
        }
    }
}

/// Immutable set of root commands, keyed by name.
#[derive(Debug, Default)]
pub struct Registry {
    commands: BTreeMap<String, CommandNode>,
}

impl Registry {
    /// Root command by name.
    pub fn get(&self, name: &str) -> Option<&CommandNode> {
        self.commands.get(name)
    }

    /// Root command by name, only if it accepts `kind`.
    pub fn get_kind(&self, name: &str, kind: CommandKind) -> Option<&CommandNode> {
        self.get(name).filter(|c| c.kind() == kind)
    }

    /// Any node by its full path.
    pub fn node<S: AsRef<str>>(&self, path: &[S]) -> Option<&CommandNode> {
        let (root, rest) = path.split_first()?;
        self.get(root.as_ref())?.descend(rest)
    }

    /// Root commands, sorted by name.
    pub fn iter(&self) -> impl Iterator<Item = &CommandNode> {
        self.commands.values()
    }

    /// Number of root commands.
    pub fn len(&self) -> usize {
        self.commands.len()
    }

    /// Whether nothing is registered.
    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::router::Response;

    fn ping() -> CommandBuilder {
        CommandBuilder::message("ping", "").execute(|_| Response::text("pong"))
    }

    #[test]
    fn duplicate_root_rejected() {
        let mut reg = RegistryBuilder::new();
        reg.register_builder(ping()).unwrap();
        let err = reg.register_builder(ping()).unwrap_err();
        assert_eq!(err, ConfigError::DuplicateCommand("ping".into()));
    }

    #[test]
    fn sub_command_cannot_be_root() {
        let tree = CommandBuilder::message("a", "")
            .subcommand(ping())
            .build()
            .unwrap();
        let sub = tree.child("ping").unwrap().clone();
        let err = RegistryBuilder::new().register(sub).unwrap_err();
        assert_eq!(err, ConfigError::NotRoot("a ping".into()));
    }

    #[test]
    fn lookup_by_kind_and_path() {
        let mut reg = RegistryBuilder::new();
        reg.register_builder(ping())
            .unwrap()
            .register_builder(
                CommandBuilder::slash("cfg", "")
                    .subcommand(CommandBuilder::new("show", "").execute(|_| Response::defer())),
            )
            .unwrap();
        let reg = reg.freeze();
        assert_eq!(reg.len(), 2);
        assert!(reg.get_kind("ping", CommandKind::Message).is_some());
        assert!(reg.get_kind("ping", CommandKind::Slash).is_none());
        assert_eq!(reg.node(&["cfg", "show"]).map(|n| n.depth()), Some(1));
        assert!(reg.node::<&str>(&[]).is_none());
    }
}
