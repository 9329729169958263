//! Pretty diagnostic rendering using ariadne.
//!
//! Argument and usage diagnostics carry byte spans into the message text;
//! ariadne underlines the offending tokens. Spanless diagnostics (missing
//! arguments, unknown interaction sub-commands) print as a single line.

use std::io::{self, IsTerminal};

use ariadne::{Color, Config, Label, Report, ReportKind, Source};
use cmdroute_diagnostics::{Diagnostic, Severity};

// ── Output format ───────────────────────────────────────────────────────

/// Output format for command results.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Format {
    /// Coloured, source-annotated output (ariadne).
    Pretty,
    /// Machine-readable JSON.
    Json,
}

impl Format {
    /// Use the explicit choice, or pretty for terminals and JSON for pipes.
    pub(crate) fn resolve_or_detect(explicit: Option<&str>) -> Self {
        match explicit {
            Some("json") => Format::Json,
            Some("pretty") => Format::Pretty,
            _ => {
                if io::stdout().is_terminal() {
                    Format::Pretty
                } else {
                    Format::Json
                }
            }
        }
    }
}

// ── Severity mapping ────────────────────────────────────────────────────

fn report_kind(severity: &Severity) -> ReportKind<'static> {
    match severity {
        Severity::Error => ReportKind::Error,
        Severity::Warn => ReportKind::Warning,
        Severity::Info => ReportKind::Advice,
        _ => ReportKind::Warning,
    }
}

fn severity_color(severity: &Severity) -> Color {
    match severity {
        Severity::Error => Color::Red,
        Severity::Warn => Color::Yellow,
        Severity::Info => Color::Blue,
        _ => Color::White,
    }
}

fn context_note(diag: &Diagnostic) -> Option<String> {
    let ctx = diag.context.as_ref().filter(|c| !c.is_empty())?;
    Some(
        ctx.iter()
            .map(|(k, v)| format!("{k}={v}"))
            .collect::<Vec<_>>()
            .join(", "),
    )
}

// ── Pretty rendering ────────────────────────────────────────────────────

/// Render diagnostics against `source` (the message text) to stderr.
pub(crate) fn render_diagnostics_pretty(source: &str, name: &str, diagnostics: &[Diagnostic]) {
    let config = Config::default().with_compact(false);
    let mut cache = (name, Source::from(source));

    for diag in diagnostics {
        let Some(span) = &diag.span else {
            let kind = match diag.severity {
                Severity::Error => "error",
                Severity::Warn => "warning",
                Severity::Info => "info",
                _ => "diagnostic",
            };
            eprintln!("{kind}[{}]: {}", diag.id, diag.message);
            if let Some(note) = context_note(diag) {
                eprintln!("  = note: {note}");
            }
            if let Some(explanation) = diag.explain() {
                eprintln!("  = help: {explanation}");
            }
            continue;
        };

        let start = span.start.min(source.len());
        let end = span.end.min(source.len()).max(start);

        let mut builder = Report::build(report_kind(&diag.severity), (name, start..end))
            .with_code(diag.id.as_ref())
            .with_message(&diag.message)
            .with_config(config)
            .with_label(
                Label::new((name, start..end))
                    .with_message(context_note(diag).unwrap_or_else(|| diag.message.clone()))
                    .with_color(severity_color(&diag.severity)),
            );
        if let Some(explanation) = diag.explain() {
            builder = builder.with_help(explanation);
        }
        builder.finish().eprint(&mut cache).ok();
    }
}
