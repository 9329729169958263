use super::executor::{Executor, Invocation, executor_fn};
use super::option::OptionSchema;
use crate::error::ConfigError;
use crate::router::Response;
use cmdroute_schema::{CommandKind, Permission};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::sync::Arc;

/// Deepest slash-command nesting: root → group → sub-command.
pub const MAX_SLASH_DEPTH: usize = 2;

/// A node of the immutable command tree.
///
/// Either a branch (has children, no options, no executor) or a leaf (no
/// children). [`CommandBuilder::build`] guarantees the split.
#[derive(Clone)]
pub struct CommandNode {
    name: String,
    description: String,
    kind: CommandKind,
    executor: Option<Arc<dyn Executor>>,
    options: Vec<OptionSchema>,
    permissions: BTreeSet<Permission>,
    children: BTreeMap<String, CommandNode>,
    path: Vec<String>,
}

impl CommandNode {
    /// Node name, unique among its siblings.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Description.
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Input channel this command accepts.
    pub fn kind(&self) -> CommandKind {
        self.kind
    }

    /// Handler, if this node executes.
    pub fn executor(&self) -> Option<&Arc<dyn Executor>> {
        self.executor.as_ref()
    }

    /// Declared options, in positional order.
    pub fn options(&self) -> &[OptionSchema] {
        &self.options
    }

    /// Permissions, any one of which admits a member. Empty admits everyone.
    pub fn permissions(&self) -> &BTreeSet<Permission> {
        &self.permissions
    }

    /// Child by name.
    pub fn child(&self, name: &str) -> Option<&CommandNode> {
        self.children.get(name)
    }

    /// Children, sorted by name.
    pub fn children(&self) -> impl Iterator<Item = &CommandNode> {
        self.children.values()
    }

    /// Whether this node has no sub-commands.
    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    /// Names from the root down to this node.
    pub fn path(&self) -> &[String] {
        &self.path
    }

    /// Path of the parent node, empty for a root.
    pub fn parent_path(&self) -> &[String] {
        &self.path[..self.path.len().saturating_sub(1)]
    }

    /// 0 for a root, parent depth + 1 otherwise.
    pub fn depth(&self) -> usize {
        self.path.len().saturating_sub(1)
    }

    /// Space-joined path, as typed after the prefix.
    pub fn qualified_name(&self) -> String {
        self.path.join(" ")
    }

    /// Find a descendant by a relative path of names.
    pub fn descend<S: AsRef<str>>(&self, names: &[S]) -> Option<&CommandNode> {
        names
            .iter()
            .try_fold(self, |node, name| node.child(name.as_ref()))
    }
}

impl fmt::Debug for CommandNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CommandNode")
            .field("path", &self.path)
            .field("kind", &self.kind)
            .field("executor", &self.executor.is_some())
            .field("options", &self.options)
            .field("permissions", &self.permissions)
            .field("children", &self.children)
            .finish()
    }
}

/// Assembles a [`CommandNode`] tree at startup.
///
/// Nothing is checked until [`build`](Self::build); mistakes come back as a
/// single [`ConfigError`].
#[derive(Clone)]
pub struct CommandBuilder {
    name: String,
    description: String,
    kind: Option<CommandKind>,
    executor: Option<Arc<dyn Executor>>,
    options: Vec<OptionSchema>,
    permissions: BTreeSet<Permission>,
    subcommands: Vec<CommandBuilder>,
}

impl CommandBuilder {
    /// Start a command whose kind is inherited from its parent, or
    /// [`CommandKind::Message`] for a root.
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            kind: None,
            executor: None,
            options: Vec::new(),
            permissions: BTreeSet::new(),
            subcommands: Vec::new(),
        }
    }

    /// Start a text-message command.
    pub fn message(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self::new(name, description).kind(CommandKind::Message)
    }

    /// Start a slash command.
    pub fn slash(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self::new(name, description).kind(CommandKind::Slash)
    }

    /// Set the kind explicitly. Children must match their parent.
    pub fn kind(mut self, kind: CommandKind) -> Self {
        self.kind = Some(kind);
        self
    }

    /// Set the handler.
    pub fn executor(mut self, executor: Arc<dyn Executor>) -> Self {
        self.executor = Some(executor);
        self
    }

    /// Set a synchronous closure as the handler.
    pub fn execute<F>(self, f: F) -> Self
    where
        F: Fn(Invocation<'_>) -> Response + Send + Sync + 'static,
    {
        self.executor(executor_fn(f))
    }

    /// Append an option.
    pub fn option(mut self, option: OptionSchema) -> Self {
        self.options.push(option);
        self
    }

    /// Append several options.
    pub fn options(mut self, options: impl IntoIterator<Item = OptionSchema>) -> Self {
        self.options.extend(options);
        self
    }

    /// Require a permission (any one of the set admits).
    pub fn permission(mut self, permission: Permission) -> Self {
        self.permissions.insert(permission);
        self
    }

    /// Require several permissions (any one of the set admits).
    pub fn permissions(mut self, permissions: impl IntoIterator<Item = Permission>) -> Self {
        self.permissions.extend(permissions);
        self
    }

    /// Append a sub-command.
    pub fn subcommand(mut self, subcommand: CommandBuilder) -> Self {
        self.subcommands.push(subcommand);
        self
    }

    /// Name this builder was created with.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Validate and freeze the tree rooted at this builder.
    ///
    /// A sub-command that declares no permissions inherits its parent's.
    pub fn build(self) -> Result<CommandNode, ConfigError> {
        self.build_under(&[], None, &BTreeSet::new())
    }

    fn build_under(
        mut self,
        parent_path: &[String],
        parent_kind: Option<CommandKind>,
        parent_permissions: &BTreeSet<Permission>,
    ) -> Result<CommandNode, ConfigError> {
        if self.name.is_empty() || self.name.chars().any(char::is_whitespace) {
            return Err(ConfigError::InvalidName(self.name));
        }
        let mut path = parent_path.to_vec();
        path.push(self.name.clone());
        let qualified = path.join(" ");

        let kind = match (self.kind, parent_kind) {
            (Some(own), Some(parent)) if own != parent => {
                return Err(ConfigError::KindMismatch {
                    parent: parent_path.join(" "),
                    child: self.name,
                    parent_kind: parent,
                    child_kind: own,
                });
            }
            (Some(own), _) => own,
            (None, Some(parent)) => parent,
            (None, None) => CommandKind::Message,
        };

        let depth = path.len() - 1;
        if kind == CommandKind::Slash && depth > MAX_SLASH_DEPTH {
            return Err(ConfigError::TooDeep {
                command: qualified,
                max: MAX_SLASH_DEPTH,
            });
        }

        if !self.subcommands.is_empty() {
            if !self.options.is_empty() {
                return Err(ConfigError::OptionsAndSubCommands(qualified));
            }
            if self.executor.is_some() {
                return Err(ConfigError::ExecutorOnBranch(qualified));
            }
        }

        let mut seen = BTreeSet::new();
        for option in &self.options {
            if option.option_type().is_structural() {
                return Err(ConfigError::StructuralOption {
                    command: qualified,
                    option: option.name().to_string(),
                    option_type: option.option_type(),
                });
            }
            if !seen.insert(option.name()) {
                return Err(ConfigError::DuplicateOption {
                    command: qualified,
                    option: option.name().to_string(),
                });
            }
            if kind == CommandKind::Message && !option.option_type().has_text_encoding() {
                tracing::warn!(
                    command = %qualified,
                    option = option.name(),
                    option_type = %option.option_type(),
                    "option type cannot be parsed from text messages"
                );
            }
        }

        if self.permissions.is_empty() {
            self.permissions = parent_permissions.clone();
        }

        let mut children = BTreeMap::new();
        for sub in self.subcommands {
            if children.contains_key(&sub.name) {
                return Err(ConfigError::DuplicateSubCommand {
                    parent: qualified,
                    child: sub.name,
                });
            }
            let child = sub.build_under(&path, Some(kind), &self.permissions)?;
            children.insert(child.name.clone(), child);
        }

        Ok(CommandNode {
            name: self.name,
            description: self.description,
            kind,
            executor: self.executor,
            options: self.options,
            permissions: self.permissions,
            children,
            path,
        })
    }
}

impl fmt::Debug for CommandBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CommandBuilder")
            .field("name", &self.name)
            .field("kind", &self.kind)
            .field("executor", &self.executor.is_some())
            .field("options", &self.options.len())
            .field("subcommands", &self.subcommands)
            .finish()
    }
}
