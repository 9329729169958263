use super::coerce::Coercer;
use super::scanner::TokenQueue;
use super::value::Argument;
use crate::command::OptionSchema;
use crate::diag::codes;
use crate::entity::GuildDirectory;
use crate::error::{ArgumentError, ConfigError, ParseError};

/// Result of parsing a full argument list.
pub type ParseOutcome = Result<Vec<Argument>, ParseError>;

/// Coerce `queue` against `schemas`, in order.
///
/// Fails fast: the first insufficient, malformed, out-of-choice or rejected
/// argument ends the parse and is attributed to the schema being parsed.
/// Tokens left after the last schema are an error attributed to that schema.
/// A schema whose type has no coercer is a configuration error.
pub async fn parse_all<D: GuildDirectory>(
    schemas: &[OptionSchema],
    mut queue: TokenQueue<'_>,
    directory: &D,
) -> ParseOutcome {
    let mut parsed = Vec::with_capacity(schemas.len());

    for (idx, schema) in schemas.iter().enumerate() {
        if queue.is_empty() {
            let missing: Vec<&str> = schemas[idx..].iter().map(OptionSchema::name).collect();
            return Err(ArgumentError::new(
                codes::INSUFFICIENT_ARGUMENTS,
                format!(
                    "Insufficient arguments provided. Missing: {}",
                    missing.join(", ")
                ),
            )
            .for_option(schema.name())
            .into());
        }

        let Some(coercer) = Coercer::for_type(schema.option_type()) else {
            tracing::error!(
                option = schema.name(),
                option_type = %schema.option_type(),
                "no text coercer for declared option type"
            );
            return Err(ConfigError::MissingCoercer {
                option: schema.name().to_string(),
                option_type: schema.option_type(),
            }
            .into());
        };

        let coerced = coercer
            .consume(&mut queue, directory)
            .await
            .map_err(|e| e.for_option(schema.name()))?;

        if !schema.accepts(&coerced.value) {
            let allowed: Vec<String> = schema
                .choices()
                .iter()
                .map(|c| c.value.to_string())
                .collect();
            return Err(ArgumentError::new(
                codes::INVALID_CHOICE,
                format!(
                    "Provided argument is not one of the allowed choices: {}",
                    allowed.join(", ")
                ),
            )
            .for_option(schema.name())
            .with_fragment(coerced.source, Some(coerced.span))
            .into());
        }

        let argument = Argument::new(schema.name(), coerced.value);
        if let Some(validator) = schema.first_rejection(&argument) {
            return Err(ArgumentError::new(codes::VALIDATOR_REJECTED, validator.message())
                .for_option(schema.name())
                .with_fragment(coerced.source, Some(coerced.span))
                .into());
        }
        parsed.push(argument);
    }

    if !queue.is_empty() {
        let mut err = ArgumentError::new(
            codes::LEFTOVER_ARGUMENTS,
            "Unable to parse the remaining arguments.",
        )
        .with_fragment(queue.remaining_text(), queue.remaining_span());
        if let Some(last) = schemas.last() {
            err = err.for_option(last.name());
        }
        return Err(err.into());
    }

    tracing::debug!(count = parsed.len(), "parsed arguments");
    Ok(parsed)
}
