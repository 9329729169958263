//! Dispatcher tests: ordering, fail-fast attribution, leftovers and
//! schema-level checks (choices, validators, constraints).

mod common;

use cmdroute_core::{
    ChoiceValue, ConfigError, OptionSchema, OptionType, ParseError, Value, codes, parse_all,
    scan, TokenQueue,
};
use cmdroute_schema::OptionConstraints;
use common::{ADA, FixedDirectory, opt, queue};

fn argument_error(err: ParseError) -> cmdroute_core::ArgumentError {
    match err {
        ParseError::Argument(e) => e,
        other => panic!("expected argument error, got {other:?}"),
    }
}

// ─── Happy path ──────────────────────────────────────────────────────────────

#[tokio::test]
async fn arguments_come_back_in_option_order() {
    let schemas = [
        opt(OptionType::User, "to"),
        opt(OptionType::Number, "amount"),
        opt(OptionType::String, "memo"),
        opt(OptionType::Boolean, "public"),
    ];
    let args = parse_all(
        &schemas,
        TokenQueue::from(scan("<@1> 12.5 \"for lunch\" false")),
        &FixedDirectory::default(),
    )
    .await
    .unwrap();

    let names: Vec<&str> = args.iter().map(|a| a.name.as_str()).collect();
    assert_eq!(names, ["to", "amount", "memo", "public"]);
    assert_eq!(args[0].user().id, ADA);
    assert_eq!(args[1].number(), 12.5);
    assert_eq!(args[2].string(), "for lunch");
    assert!(!args[3].boolean());
}

#[tokio::test]
async fn no_schemas_and_no_tokens_is_empty() {
    let args = parse_all(&[], queue(&[]), &FixedDirectory::default())
        .await
        .unwrap();
    assert!(args.is_empty());
}

// ─── Failures ────────────────────────────────────────────────────────────────

#[tokio::test]
async fn first_failure_wins_and_names_its_option() {
    let dir = FixedDirectory::default();
    let schemas = [
        opt(OptionType::Integer, "count"),
        opt(OptionType::User, "who"),
    ];
    let err = parse_all(&schemas, queue(&["notanumber", "<@1>"]), &dir)
        .await
        .unwrap_err();
    let err = argument_error(err);
    assert_eq!(err.code, codes::EXPECTED_INTEGER);
    assert_eq!(err.option.as_deref(), Some("count"));
    assert_eq!(err.fragment.as_deref(), Some("notanumber"));
    assert_eq!(dir.lookups(), 0, "later options must not be coerced");
}

#[tokio::test]
async fn missing_tokens_list_every_missing_option() {
    let schemas = [
        opt(OptionType::String, "a"),
        opt(OptionType::Integer, "b"),
        opt(OptionType::Boolean, "c"),
    ];
    let err = argument_error(
        parse_all(&schemas, queue(&["x"]), &FixedDirectory::default())
            .await
            .unwrap_err(),
    );
    assert_eq!(err.code, codes::INSUFFICIENT_ARGUMENTS);
    assert_eq!(err.message, "Insufficient arguments provided. Missing: b, c");
    assert_eq!(err.option.as_deref(), Some("b"));
    assert_eq!(err.fragment, None);
}

#[tokio::test]
async fn leftover_tokens_are_reported_with_their_text() {
    let body = "\"hi\" extra words";
    let err = argument_error(
        parse_all(
            &[opt(OptionType::String, "text")],
            TokenQueue::from(scan(body)),
            &FixedDirectory::default(),
        )
        .await
        .unwrap_err(),
    );
    assert_eq!(err.code, codes::LEFTOVER_ARGUMENTS);
    assert_eq!(err.fragment.as_deref(), Some("extra words"));
    assert_eq!(err.option.as_deref(), Some("text"));
    let span = err.span.unwrap();
    assert_eq!(&body[span.start..span.end], "extra words");
}

#[tokio::test]
async fn tokens_without_schemas_are_leftovers() {
    let err = argument_error(
        parse_all(&[], queue(&["stray"]), &FixedDirectory::default())
            .await
            .unwrap_err(),
    );
    assert_eq!(err.code, codes::LEFTOVER_ARGUMENTS);
    assert_eq!(err.option, None);
}

#[tokio::test]
async fn unterminated_quote_is_attributed_to_the_string_option() {
    let schemas = [
        opt(OptionType::String, "title"),
        opt(OptionType::Integer, "n"),
    ];
    let err = argument_error(
        parse_all(&schemas, queue(&["\"open", "ended", "3"]), &FixedDirectory::default())
            .await
            .unwrap_err(),
    );
    assert_eq!(err.code, codes::UNTERMINATED_STRING);
    assert_eq!(err.option.as_deref(), Some("title"));
}

// ─── Schema checks ───────────────────────────────────────────────────────────

#[tokio::test]
async fn value_outside_choices_is_rejected() {
    let color = OptionSchema::builder(OptionType::String, "color", "")
        .choice("Red", ChoiceValue::String("red".into()))
        .choice("Blue", ChoiceValue::String("blue".into()))
        .build();
    let dir = FixedDirectory::default();

    let ok = parse_all(std::slice::from_ref(&color), queue(&["blue"]), &dir)
        .await
        .unwrap();
    assert_eq!(ok[0].value, Value::String("blue".into()));

    let err = argument_error(
        parse_all(&[color], queue(&["green"]), &dir)
            .await
            .unwrap_err(),
    );
    assert_eq!(err.code, codes::INVALID_CHOICE);
    assert!(err.message.contains("red, blue"), "{}", err.message);
    assert_eq!(err.fragment.as_deref(), Some("green"));
}

#[tokio::test]
async fn first_rejecting_validator_supplies_the_message() {
    let schema = OptionSchema::builder(OptionType::Integer, "n", "")
        .validate("n must be even", |a| a.integer() % 2 != 0)
        .validate("n must be small", |a| a.integer() > 10)
        .build();
    let err = argument_error(
        parse_all(&[schema], queue(&["13"]), &FixedDirectory::default())
            .await
            .unwrap_err(),
    );
    assert_eq!(err.code, codes::VALIDATOR_REJECTED);
    assert_eq!(err.message, "n must be even");
    assert_eq!(err.fragment.as_deref(), Some("13"));
}

#[tokio::test]
async fn declarative_constraints_bound_numbers_and_lengths() {
    let dir = FixedDirectory::default();
    let days = OptionSchema::builder(OptionType::Integer, "days", "")
        .constraints(&OptionConstraints {
            min_value: Some(0.0),
            max_value: Some(7.0),
            ..Default::default()
        })
        .build();
    let nick = OptionSchema::builder(OptionType::String, "nick", "")
        .constraints(&OptionConstraints {
            min_length: Some(2),
            max_length: Some(4),
            ..Default::default()
        })
        .build();

    for (schema, token, expected) in [
        (&days, "8", Some("days must be at most 7")),
        (&days, "-1", Some("days must be at least 0")),
        (&days, "7", None),
        (&nick, "a", Some("nick shorter than minLength 2")),
        (&nick, "abcde", Some("nick exceeds maxLength 4")),
        (&nick, "\"é é\"", None),
    ] {
        let got = parse_all(std::slice::from_ref(schema), queue(&[token]), &dir).await;
        match expected {
            None => assert!(got.is_ok(), "{token}: {got:?}"),
            Some(msg) => assert_eq!(argument_error(got.unwrap_err()).message, msg, "{token}"),
        }
    }
}

#[tokio::test]
async fn structural_option_type_is_a_configuration_error() {
    let err = parse_all(
        &[opt(OptionType::SubCommand, "nested")],
        queue(&["anything"]),
        &FixedDirectory::default(),
    )
    .await
    .unwrap_err();
    assert_eq!(
        err,
        ParseError::Config(ConfigError::MissingCoercer {
            option: "nested".into(),
            option_type: OptionType::SubCommand,
        })
    );
    assert!(err.as_argument().is_none());
}
