//! Coercer tests: token consumption, typed values and reference lookups.
//!
//! Dispatcher-level behaviour (attribution, fail-fast, leftovers) lives in
//! `parse_all.rs`.

mod common;

use common::{ADA, FixedDirectory, GENERAL, GUILD, MODS, queue};
use cmdroute_core::{Coercer, OptionType, Value, codes, scan, TokenQueue};

async fn coerce(
    coercer: Coercer,
    q: &mut TokenQueue<'_>,
) -> Result<cmdroute_core::args::Coerced, cmdroute_core::ArgumentError> {
    coercer.consume(q, &FixedDirectory::default()).await
}

// ─── STRING ──────────────────────────────────────────────────────────────────

#[tokio::test]
async fn unquoted_string_takes_exactly_one_token() {
    for tokens in [
        vec!["hello", "world"],
        vec!["a\"", "b"],
        vec!["", "x"],
        vec!["x\"y\"", "z"],
    ] {
        let mut q = queue(&tokens);
        let got = coerce(Coercer::String, &mut q).await.unwrap();
        assert_eq!(got.value, Value::String(tokens[0].into()));
        assert_eq!(q.len(), tokens.len() - 1, "{tokens:?}");
    }
}

#[tokio::test]
async fn quoted_run_consumes_n_tokens_and_strips_outer_quotes() {
    for n in 1..=5 {
        let mut words: Vec<String> = (0..n).map(|i| format!("w{i}")).collect();
        words[0] = format!("\"{}", words[0]);
        let last = words.len() - 1;
        words[last] = format!("{}\"", words[last]);
        let mut texts: Vec<&str> = words.iter().map(String::as_str).collect();
        texts.push("after");

        let mut q = queue(&texts);
        let got = coerce(Coercer::String, &mut q).await.unwrap();
        let expected: Vec<String> = (0..n).map(|i| format!("w{i}")).collect();
        assert_eq!(got.value, Value::String(expected.join(" ")));
        assert_eq!(q.remaining_text(), "after", "n = {n}");
    }
}

#[tokio::test]
async fn unterminated_quote_drains_queue() {
    let mut q = queue(&["\"never", "closed", "at", "all"]);
    let err = coerce(Coercer::String, &mut q).await.unwrap_err();
    assert_eq!(err.code, codes::UNTERMINATED_STRING);
    assert_eq!(err.fragment.as_deref(), Some("\"never closed at all"));
    assert!(q.is_empty());
}

#[tokio::test]
async fn lone_quote_token_is_unterminated_at_end() {
    let mut q = queue(&["\""]);
    let err = coerce(Coercer::String, &mut q).await.unwrap_err();
    assert_eq!(err.code, codes::UNTERMINATED_STRING);
}

#[tokio::test]
async fn quoted_span_covers_the_run() {
    let body = "\"big red\" dog";
    let mut q = TokenQueue::from(scan(body));
    let got = coerce(Coercer::String, &mut q).await.unwrap();
    assert_eq!(&body[got.span.start..got.span.end], "\"big red\"");
    assert_eq!(got.source, "\"big red\"");
}

// ─── Numbers and booleans ────────────────────────────────────────────────────

#[tokio::test]
async fn integer_and_number_parse_one_token() {
    let mut q = queue(&["-42", "2.5", "1e3"]);
    assert_eq!(
        coerce(Coercer::Integer, &mut q).await.unwrap().value,
        Value::Integer(-42)
    );
    assert_eq!(
        coerce(Coercer::Number, &mut q).await.unwrap().value,
        Value::Number(2.5)
    );
    assert_eq!(
        coerce(Coercer::Number, &mut q).await.unwrap().value,
        Value::Number(1000.0)
    );
}

#[tokio::test]
async fn malformed_numbers_report_the_token() {
    for (coercer, token, code) in [
        (Coercer::Integer, "12.5", codes::EXPECTED_INTEGER),
        (Coercer::Integer, "9223372036854775808", codes::EXPECTED_INTEGER),
        (Coercer::Number, "abc", codes::EXPECTED_NUMBER),
        (Coercer::Number, "NaN", codes::EXPECTED_NUMBER),
        (Coercer::Number, "inf", codes::EXPECTED_NUMBER),
    ] {
        let mut q = queue(&[token, "next"]);
        let err = coerce(coercer, &mut q).await.unwrap_err();
        assert_eq!(err.code, code, "{token}");
        assert_eq!(err.fragment.as_deref(), Some(token));
        assert_eq!(q.remaining_text(), "next");
    }
}

#[tokio::test]
async fn boolean_is_strict_but_case_insensitive() {
    for (token, expected) in [("true", true), ("FALSE", false), ("TrUe", true)] {
        let mut q = queue(&[token]);
        assert_eq!(
            coerce(Coercer::Boolean, &mut q).await.unwrap().value,
            Value::Boolean(expected)
        );
    }
    for token in ["1", "0", "yes", "on", "truee", ""] {
        let mut q = queue(&[token]);
        let err = coerce(Coercer::Boolean, &mut q).await.unwrap_err();
        assert_eq!(err.code, codes::EXPECTED_BOOLEAN, "{token:?}");
    }
}

// ─── References ──────────────────────────────────────────────────────────────

#[tokio::test]
async fn user_accepts_mentions_and_bare_ids() {
    let dir = FixedDirectory::default();
    for token in ["<@1>", "<@!1>", "1"] {
        let mut q = queue(&[token]);
        let got = Coercer::User.consume(&mut q, &dir).await.unwrap();
        assert_eq!(got.value.as_user().map(|u| u.id), Some(ADA), "{token}");
    }
}

#[tokio::test]
async fn malformed_reference_never_reaches_directory() {
    let dir = FixedDirectory::default();
    for (coercer, token) in [
        (Coercer::User, "<@abc>"),
        (Coercer::User, "@ada"),
        (Coercer::Role, "<@1>"),
        (Coercer::Channel, "<@&20>"),
        (Coercer::Channel, "#general"),
    ] {
        let mut q = queue(&[token]);
        let err = coercer.consume(&mut q, &dir).await.unwrap_err();
        assert_eq!(err.code, codes::INVALID_REFERENCE, "{token}");
    }
    assert_eq!(dir.lookups(), 0);
}

#[tokio::test]
async fn unknown_id_is_not_found_not_malformed() {
    let dir = FixedDirectory::default();
    for (coercer, token) in [
        (Coercer::User, "<@404>"),
        (Coercer::Role, "<@&404>"),
        (Coercer::Channel, "<#404>"),
    ] {
        let mut q = queue(&[token]);
        let err = coercer.consume(&mut q, &dir).await.unwrap_err();
        assert_eq!(err.code, codes::REFERENCE_NOT_FOUND, "{token}");
        assert_eq!(err.fragment.as_deref(), Some(token));
    }
    assert_eq!(dir.lookups(), 3);
}

#[tokio::test]
async fn everyone_maps_to_public_role_without_lookup() {
    let dir = FixedDirectory::default();
    let mut q = queue(&["@everyone"]);
    let got = Coercer::Role.consume(&mut q, &dir).await.unwrap();
    assert_eq!(got.value.as_role().map(|r| r.id), Some(GUILD));
    assert_eq!(dir.lookups(), 0);
}

#[tokio::test]
async fn role_and_channel_resolve() {
    let dir = FixedDirectory::default();
    let mut q = queue(&["<@&10>", "<#20>"]);
    let role = Coercer::Role.consume(&mut q, &dir).await.unwrap();
    let channel = Coercer::Channel.consume(&mut q, &dir).await.unwrap();
    assert_eq!(role.value.as_role().map(|r| r.id), Some(MODS));
    assert_eq!(channel.value.as_channel().map(|c| c.id), Some(GENERAL));
}

#[tokio::test]
async fn opaque_types_fail_as_unsupported() {
    for t in [OptionType::Mentionable, OptionType::Attachment] {
        let coercer = Coercer::for_type(t).unwrap();
        let mut q = queue(&["<@1>", "rest"]);
        let err = coerce(coercer, &mut q).await.unwrap_err();
        assert_eq!(err.code, codes::UNSUPPORTED_TEXT_TYPE);
        assert_eq!(q.len(), 1);
    }
}

// ─── Round trip ──────────────────────────────────────────────────────────────

#[tokio::test]
async fn canonical_text_reparses_to_the_same_value() {
    let dir = FixedDirectory::default();
    let mut samples = vec![
        Value::String("plain".into()),
        Value::String("with several spaces".into()),
        Value::String(String::new()),
        Value::Integer(i64::MIN),
        Value::Number(-0.125),
        Value::Boolean(false),
    ];
    let mut q = queue(&["<@1>", "<@&10>", "<#20>", "@everyone"]);
    for coercer in [Coercer::User, Coercer::Role, Coercer::Channel, Coercer::Role] {
        samples.push(coercer.consume(&mut q, &dir).await.unwrap().value);
    }

    for value in samples {
        let text = value.to_text().expect("has a text encoding");
        let coercer = Coercer::for_type(value.option_type()).unwrap();
        let mut q = TokenQueue::from(scan(&text));
        let back = coercer.consume(&mut q, &dir).await.unwrap();
        assert_eq!(back.value, value, "via {text:?}");
        assert!(q.is_empty(), "{text:?} left tokens behind");
    }
}
