//! Re-exports from the diagnostics crate.

pub use cmdroute_diagnostics::{Diagnostic, Severity, Span, codes, explain};
