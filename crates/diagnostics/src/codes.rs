//! Diagnostic ID constants.
//!
//! Use these instead of string literals to get compile-time typo detection
//! and IDE autocomplete. `CMD1xxx` codes are argument errors reported back to
//! the invoking user; `CMD2xxx` codes are usage and structured-input errors.

// ── Argument errors ─────────────────────────────────────────────────────

/// Fewer tokens than declared options.
pub const INSUFFICIENT_ARGUMENTS: &str = "CMD1001";

/// A quoted string argument never reached its closing quote.
pub const UNTERMINATED_STRING: &str = "CMD1002";

/// Token is not a base-10 signed 64-bit integer.
pub const EXPECTED_INTEGER: &str = "CMD1003";

/// Token is not a finite floating-point number.
pub const EXPECTED_NUMBER: &str = "CMD1004";

/// Token is neither `true` nor `false`.
pub const EXPECTED_BOOLEAN: &str = "CMD1005";

/// Token is neither a mention nor a numeric ID.
pub const INVALID_REFERENCE: &str = "CMD1006";

/// Well-formed ID that the guild directory does not know.
pub const REFERENCE_NOT_FOUND: &str = "CMD1007";

/// Option type has no text encoding (mentionable, attachment).
pub const UNSUPPORTED_TEXT_TYPE: &str = "CMD1008";

/// Tokens left over after every option was satisfied.
pub const LEFTOVER_ARGUMENTS: &str = "CMD1009";

/// A user-supplied validator rejected the argument.
pub const VALIDATOR_REJECTED: &str = "CMD1010";

/// Value is not one of the option's declared choices.
pub const INVALID_CHOICE: &str = "CMD1011";

// ── Usage / structured input ────────────────────────────────────────────

/// Structured option carried a sub-command marker or unknown type.
pub const STRUCTURED_MARKER: &str = "CMD2001";

/// Resolution ended on a node without an executor.
pub const INCORRECT_USAGE: &str = "CMD2002";

/// A structured interaction named a sub-command or group that does not exist.
pub const UNKNOWN_SUBCOMMAND: &str = "CMD2003";

/// Every code defined in this module, in declaration order.
pub const ALL: &[&str] = &[
    INSUFFICIENT_ARGUMENTS,
    UNTERMINATED_STRING,
    EXPECTED_INTEGER,
    EXPECTED_NUMBER,
    EXPECTED_BOOLEAN,
    INVALID_REFERENCE,
    REFERENCE_NOT_FOUND,
    UNSUPPORTED_TEXT_TYPE,
    LEFTOVER_ARGUMENTS,
    VALIDATOR_REJECTED,
    INVALID_CHOICE,
    STRUCTURED_MARKER,
    INCORRECT_USAGE,
    UNKNOWN_SUBCOMMAND,
];
