/// Per-type coercers that turn raw tokens into typed values.
pub mod coerce;
/// The coercion dispatcher.
pub mod parse;
/// Space-splitting scanner and the token front-queue.
pub mod scanner;
/// Wrapping of pre-typed interaction options.
pub mod structured;
/// Typed argument values.
pub mod value;

pub use coerce::{Coerced, Coercer};
pub use parse::{ParseOutcome, parse_all};
pub use scanner::{Token, TokenQueue, scan};
pub use structured::{InteractionOption, OptionPayload, from_interaction};
pub use value::{Argument, Value};
