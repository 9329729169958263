use crate::args::{Argument, Value};
use cmdroute_schema::{Choice, ChoiceValue, OptionConstraints, OptionType};
use std::fmt;
use std::sync::Arc;

/// Predicate signature for [`Validator`]. Returns `true` when the argument is
/// invalid.
pub type RejectFn = dyn Fn(&Argument) -> bool + Send + Sync;

/// A rejection rule attached to an option.
#[derive(Clone)]
pub struct Validator {
    reject: Arc<RejectFn>,
    message: String,
}

impl Validator {
    /// Create a validator that fails with `message` whenever `reject` returns
    /// `true`.
    pub fn new(
        message: impl Into<String>,
        reject: impl Fn(&Argument) -> bool + Send + Sync + 'static,
    ) -> Self {
        Self {
            reject: Arc::new(reject),
            message: message.into(),
        }
    }

    /// Whether this validator rejects the argument.
    pub fn rejects(&self, argument: &Argument) -> bool {
        (self.reject)(argument)
    }

    /// Message reported when the validator rejects.
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Debug for Validator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Validator")
            .field("message", &self.message)
            .finish_non_exhaustive()
    }
}

/// One declared option of a leaf command. Immutable once built.
#[derive(Debug, Clone)]
pub struct OptionSchema {
    option_type: OptionType,
    name: String,
    description: String,
    required: bool,
    choices: Vec<Choice>,
    validators: Vec<Validator>,
}

impl OptionSchema {
    /// Start building an option.
    pub fn builder(
        option_type: OptionType,
        name: impl Into<String>,
        description: impl Into<String>,
    ) -> OptionBuilder {
        OptionBuilder {
            schema: OptionSchema {
                option_type,
                name: name.into(),
                description: description.into(),
                required: true,
                choices: Vec::new(),
                validators: Vec::new(),
            },
        }
    }

    /// Declared type.
    pub fn option_type(&self) -> OptionType {
        self.option_type
    }

    /// Option name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Description shown in platform UIs.
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Whether the platform requires this option.
    pub fn required(&self) -> bool {
        self.required
    }

    /// Allowed values, in declaration order.
    pub fn choices(&self) -> &[Choice] {
        &self.choices
    }

    /// Validators, in declaration order.
    pub fn validators(&self) -> &[Validator] {
        &self.validators
    }

    /// Whether `value` is one of the declared choices. Always true when no
    /// choices are declared.
    pub fn accepts(&self, value: &Value) -> bool {
        self.choices.is_empty() || self.choices.iter().any(|c| value.matches_choice(&c.value))
    }

    /// First validator that rejects `argument`, if any.
    pub fn first_rejection(&self, argument: &Argument) -> Option<&Validator> {
        self.validators.iter().find(|v| v.rejects(argument))
    }
}

/// Builder for [`OptionSchema`].
#[derive(Debug, Clone)]
pub struct OptionBuilder {
    schema: OptionSchema,
}

impl OptionBuilder {
    /// Mark the option optional on the platform side.
    ///
    /// Text parsing is positional and still expects a value.
    pub fn required(mut self, required: bool) -> Self {
        self.schema.required = required;
        self
    }

    /// Add one allowed value.
    pub fn choice(mut self, name: impl Into<String>, value: ChoiceValue) -> Self {
        self.schema.choices.push(Choice::new(name, value));
        self
    }

    /// Add several allowed values.
    pub fn choices(mut self, choices: impl IntoIterator<Item = Choice>) -> Self {
        self.schema.choices.extend(choices);
        self
    }

    /// Add a validator; `reject` returns `true` for invalid arguments.
    pub fn validate(
        mut self,
        message: impl Into<String>,
        reject: impl Fn(&Argument) -> bool + Send + Sync + 'static,
    ) -> Self {
        self.schema.validators.push(Validator::new(message, reject));
        self
    }

    /// Add validators enforcing declarative range and length constraints.
    pub fn constraints(mut self, constraints: &OptionConstraints) -> Self {
        let name = self.schema.name.clone();
        if let Some(lo) = constraints.min_value {
            self.schema.validators.push(Validator::new(
                format!("{name} must be at least {}", trim_f64(lo)),
                move |arg| numeric(arg).is_some_and(|n| n < lo),
            ));
        }
        if let Some(hi) = constraints.max_value {
            self.schema.validators.push(Validator::new(
                format!("{name} must be at most {}", trim_f64(hi)),
                move |arg| numeric(arg).is_some_and(|n| n > hi),
            ));
        }
        if let Some(minl) = constraints.min_length {
            self.schema.validators.push(Validator::new(
                format!("{name} shorter than minLength {minl}"),
                move |arg| char_count(arg).is_some_and(|len| len < minl as usize),
            ));
        }
        if let Some(maxl) = constraints.max_length {
            self.schema.validators.push(Validator::new(
                format!("{name} exceeds maxLength {maxl}"),
                move |arg| char_count(arg).is_some_and(|len| len > maxl as usize),
            ));
        }
        self
    }

    /// Finish the option.
    pub fn build(self) -> OptionSchema {
        self.schema
    }
}

fn numeric(arg: &Argument) -> Option<f64> {
    match arg.value {
        Value::Integer(i) => Some(i as f64),
        Value::Number(n) => Some(n),
        _ => None,
    }
}

fn char_count(arg: &Argument) -> Option<usize> {
    arg.value.as_str().map(|s| s.chars().count())
}

/// Format a float without trailing zeros (`2.50` → `2.5`, `3.0` → `3`).
///
/// Uses the shortest round-trip form, so small bounds keep their digits.
fn trim_f64(n: f64) -> String {
    if n == 0.0 {
        return "0".to_string();
    }
    n.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn choices_restrict_values() {
        let opt = OptionSchema::builder(OptionType::String, "color", "")
            .choice("Red", ChoiceValue::String("red".into()))
            .choice("Blue", ChoiceValue::String("blue".into()))
            .build();
        assert!(opt.accepts(&Value::String("red".into())));
        assert!(!opt.accepts(&Value::String("green".into())));

        let open = OptionSchema::builder(OptionType::String, "any", "").build();
        assert!(open.accepts(&Value::String("green".into())));
    }

    #[test]
    fn constraints_become_validators() {
        let opt = OptionSchema::builder(OptionType::Integer, "days", "")
            .constraints(&OptionConstraints {
                min_value: Some(1.0),
                max_value: Some(7.0),
                ..Default::default()
            })
            .build();
        assert_eq!(opt.validators().len(), 2);
        let low = Argument::new("days", Value::Integer(0));
        assert_eq!(
            opt.first_rejection(&low).map(Validator::message),
            Some("days must be at least 1")
        );
        assert!(opt.first_rejection(&Argument::new("days", Value::Integer(7))).is_none());
    }

    #[test]
    fn length_counts_characters_not_bytes() {
        let opt = OptionSchema::builder(OptionType::String, "tag", "")
            .constraints(&OptionConstraints {
                max_length: Some(3),
                ..Default::default()
            })
            .build();
        assert!(opt.first_rejection(&Argument::new("tag", Value::String("äöü".into()))).is_none());
        assert!(opt.first_rejection(&Argument::new("tag", Value::String("abcd".into()))).is_some());
    }

    #[test]
    fn validators_run_in_declaration_order() {
        let opt = OptionSchema::builder(OptionType::Integer, "n", "")
            .validate("first", |a| a.integer() > 10)
            .validate("second", |a| a.integer() > 5)
            .build();
        let arg = Argument::new("n", Value::Integer(20));
        assert_eq!(opt.first_rejection(&arg).map(Validator::message), Some("first"));
    }

    #[test]
    fn trim_f64_drops_trailing_zeros() {
        assert_eq!(trim_f64(2.5), "2.5");
        assert_eq!(trim_f64(3.0), "3");
        assert_eq!(trim_f64(0.0), "0");
        assert_eq!(trim_f64(-0.0), "0");
    }

    #[test]
    fn tiny_bounds_keep_their_digits() {
        assert_eq!(trim_f64(0.0000001), "0.0000001");
        assert_eq!(trim_f64(-1.25e-9), "-0.00000000125");

        let opt = OptionSchema::builder(OptionType::Number, "eps", "")
            .constraints(&OptionConstraints {
                min_value: Some(0.0000005),
                ..Default::default()
            })
            .build();
        assert_eq!(opt.validators()[0].message(), "eps must be at least 0.0000005");
    }
}
