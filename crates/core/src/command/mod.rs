/// Handler trait and invocation context.
pub mod executor;
/// Command tree nodes and their builder.
pub mod node;
/// Option schemas and validators.
pub mod option;
/// Root-command registry.
pub mod registry;
/// Command-tree resolution.
pub mod resolve;
/// Compilation of declarative command files.
pub mod spec;
/// Usage text rendering.
pub mod usage;

pub use executor::{Executor, Invocation, Source, executor_fn};
pub use node::{CommandBuilder, CommandNode, MAX_SLASH_DEPTH};
pub use option::{OptionBuilder, OptionSchema, Validator};
pub use registry::{Registry, RegistryBuilder};
pub use resolve::{Halt, Resolution, resolve};
pub use spec::{Binder, builder_from_spec, option_from_spec};
pub use usage::usage;
