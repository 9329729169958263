mod render;

use std::fs;
use std::process;
use std::sync::Arc;

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use cmdroute_core::{
    Argument, CommandNode, Dispatch, Executor, InteractionEvent, Member, MessageEvent, Permission,
    Registry, RegistryBuilder, Response, Role, Routed, Router, RouterConfig, User, executor_fn,
    usage,
};
use cmdroute_diagnostics::{self as diag, Diagnostic};
use cmdroute_directory::{DirectoryFile, StaticDirectory, load_directory_from_str};
use cmdroute_schema::CommandFile;
use serde::Serialize;
use tracing_subscriber::EnvFilter;

use crate::render::{Format, render_diagnostics_pretty};

// ── CLI definition ──────────────────────────────────────────────────────

#[derive(Parser, Debug)]
#[command(
    name = "cmdroute",
    version,
    about = "cmdroute: route chat-bot command messages against a command file"
)]
struct Cli {
    /// Output mode: "pretty" for coloured terminal output, "json" for
    /// machine-readable JSON. Defaults to "pretty" when stdout is a TTY,
    /// "json" otherwise.
    #[arg(long, global = true, value_parser = ["pretty", "json"])]
    output: Option<String>,

    /// Log filter used when `RUST_LOG` is unset (e.g. "debug",
    /// "cmdroute_core=trace").
    #[arg(long, global = true, default_value = "warn")]
    log_level: String,

    #[command(subcommand)]
    cmd: Cmd,
}

#[derive(Subcommand, Debug)]
enum Cmd {
    /// Resolve and parse one text message, then run the echo handler.
    Route {
        /// Command file (JSON or JSONC).
        #[arg(long)]
        commands: String,
        /// Guild directory file used to resolve mentions.
        #[arg(long)]
        directory: Option<String>,
        /// Message prefix.
        #[arg(long, default_value = "!")]
        prefix: String,
        /// Permissions held by the sending member (comma separated, e.g.
        /// `ban_members,kick_members`).
        #[arg(long, value_delimiter = ',', value_parser = parse_permission)]
        member_perms: Vec<Permission>,
        /// The raw message text.
        message: String,
    },

    /// Route a structured interaction read from a JSON file.
    Interact {
        /// Command file (JSON or JSONC).
        #[arg(long)]
        commands: String,
        /// Interaction event file.
        event: String,
    },

    /// Print the usage tree of a command.
    Usage {
        /// Command file (JSON or JSONC).
        #[arg(long)]
        commands: String,
        /// Command path, root first (e.g. `mod ban`).
        #[arg(required = true)]
        path: Vec<String>,
    },

    /// Validate a command file. Exits 1 on the first configuration error.
    Check {
        /// Command file (JSON or JSONC).
        #[arg(long)]
        commands: String,
    },

    /// Explain a diagnostic code (e.g. CMD1003).
    Explain { id: String },
}

fn parse_permission(s: &str) -> Result<Permission, String> {
    serde_json::from_value(serde_json::Value::String(s.trim().to_string()))
        .map_err(|_| format!("unknown permission `{s}`"))
}

// ── Main ────────────────────────────────────────────────────────────────

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(&cli.log_level);
    let format = Format::resolve_or_detect(cli.output.as_deref());

    let code = match cli.cmd {
        Cmd::Route {
            commands,
            directory,
            prefix,
            member_perms,
            message,
        } => {
            cmd_route(
                &commands,
                directory.as_deref(),
                prefix,
                member_perms,
                message,
                format,
            )
            .await?
        }
        Cmd::Interact { commands, event } => cmd_interact(&commands, &event, format).await?,
        Cmd::Usage { commands, path } => cmd_usage(&commands, &path, format)?,
        Cmd::Check { commands } => cmd_check(&commands, format)?,
        Cmd::Explain { id } => cmd_explain(&id, format)?,
    };

    if code != 0 {
        process::exit(code);
    }
    Ok(())
}

fn init_tracing(level: &str) {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level)),
        )
        .init();
}

// ── Outcome ─────────────────────────────────────────────────────────────

/// What happened to one routed event. Printed as the JSON envelope.
#[derive(Debug, Serialize)]
struct Outcome {
    outcome: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    reason: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    command: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    arguments: Vec<Argument>,
    #[serde(skip_serializing_if = "Option::is_none")]
    usage: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    response: Option<Response>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    diagnostics: Vec<Diagnostic>,
    /// Usage and argument errors fail, everything else succeeds.
    #[serde(skip)]
    exit_code: i32,
}

/// The parts of a [`Routed`] event worth printing that [`Dispatch`] drops.
struct Target {
    command: Option<String>,
    usage: Option<String>,
    arguments: Vec<Argument>,
}

impl Target {
    fn of(routed: &Routed<'_>) -> Self {
        let command = match routed {
            Routed::Ignored(_) => None,
            Routed::Denied { command }
            | Routed::Usage { command, .. }
            | Routed::InvalidArguments { command, .. }
            | Routed::Ready { command, .. } => Some(*command),
        };
        Self {
            command: command.map(CommandNode::qualified_name),
            usage: match routed {
                Routed::Usage { command, .. } => Some(usage(command)),
                _ => None,
            },
            arguments: match routed {
                Routed::Ready { arguments, .. } => arguments.clone(),
                _ => Vec::new(),
            },
        }
    }
}

impl Outcome {
    fn settled(target: Target, dispatch: &Dispatch) -> Self {
        let (outcome, reason, diagnostics, exit_code) = match dispatch {
            Dispatch::Ignored(reason) => ("ignored", Some(reason.to_string()), Vec::new(), 0),
            Dispatch::Denied => ("denied", None, Vec::new(), 0),
            Dispatch::Replied(_) => ("replied", None, Vec::new(), 0),
            Dispatch::Usage { diagnostic, .. } => ("usage", None, vec![diagnostic.clone()], 1),
            Dispatch::InvalidArguments { error, .. } => {
                ("invalid_arguments", None, vec![error.to_diagnostic()], 1)
            }
        };
        Self {
            outcome,
            reason,
            command: target.command,
            arguments: target.arguments,
            usage: target.usage,
            response: dispatch.response().cloned(),
            diagnostics,
            exit_code,
        }
    }
}

fn print_outcome(outcome: &Outcome, source: Option<&str>, format: Format) -> Result<()> {
    match format {
        Format::Json => println!("{}", serde_json::to_string_pretty(outcome)?),
        Format::Pretty => {
            match (&outcome.command, &outcome.reason) {
                (Some(command), _) => println!("{}: {command}", outcome.outcome),
                (None, Some(reason)) => println!("{}: {reason}", outcome.outcome),
                (None, None) => println!("{}", outcome.outcome),
            }
            for arg in &outcome.arguments {
                println!("  {} = {} ({})", arg.name, arg.value, arg.option_type());
            }
            if let Some(usage) = &outcome.usage {
                println!("{usage}");
            }
            if let Some(response) = &outcome.response {
                println!("{}", serde_json::to_string(response)?);
            }
            render_diagnostics_pretty(source.unwrap_or(""), "<message>", &outcome.diagnostics);
        }
    }
    Ok(())
}

// ── Commands ────────────────────────────────────────────────────────────

async fn cmd_route(
    commands: &str,
    directory: Option<&str>,
    prefix: String,
    member_perms: Vec<Permission>,
    message: String,
    format: Format,
) -> Result<i32> {
    let registry = load_registry(commands)?;
    let directory = load_directory(directory)?;
    let router = Router::new(registry, RouterConfig::with_prefix(prefix));

    let author = User {
        id: 1,
        name: "cli".into(),
        bot: false,
    };
    let event = MessageEvent {
        member: Some(Member::new(author.clone(), member_perms)),
        author,
        content: message,
    };

    let routed = router
        .route_message(&event, &directory)
        .await
        .context("command file declares an option the text path cannot parse")?;
    let target = Target::of(&routed);
    let dispatch = router
        .finish_message(routed)
        .await
        .context("handler reply cannot be sent to a text message")?;
    let outcome = Outcome::settled(target, &dispatch);
    print_outcome(&outcome, Some(&event.content), format)?;
    Ok(outcome.exit_code)
}

async fn cmd_interact(commands: &str, event_path: &str, format: Format) -> Result<i32> {
    let registry = load_registry(commands)?;
    let text = fs::read_to_string(event_path)
        .with_context(|| format!("failed to read interaction file '{event_path}'"))?;
    let event: InteractionEvent = serde_json::from_str(&text)
        .with_context(|| format!("failed to parse interaction file '{event_path}'"))?;

    let router = Router::new(registry, RouterConfig::default());
    let routed = router.route_interaction(&event);
    let target = Target::of(&routed);
    let dispatch = router.finish_interaction(routed).await;
    let outcome = Outcome::settled(target, &dispatch);
    print_outcome(&outcome, None, format)?;
    Ok(outcome.exit_code)
}

fn cmd_usage(commands: &str, path: &[String], format: Format) -> Result<i32> {
    let registry = load_registry(commands)?;
    let Some(node) = registry.node(path) else {
        bail!("no command `{}` in '{commands}'", path.join(" "));
    };
    let text = usage(node);
    match format {
        Format::Json => {
            let out = serde_json::json!({
                "command": node.qualified_name(),
                "kind": node.kind(),
                "usage": text,
            });
            println!("{}", serde_json::to_string_pretty(&out)?);
        }
        Format::Pretty => println!("{text}"),
    }
    Ok(0)
}

fn cmd_check(commands: &str, format: Format) -> Result<i32> {
    let file = read_command_file(commands)?;
    let mut builder = RegistryBuilder::new();
    let result = builder.register_file_with(&file, echo_executor()).map(|_| ());
    let count = builder.freeze().len();

    match format {
        Format::Json => {
            let out = match &result {
                Ok(()) => serde_json::json!({ "ok": true, "commands": count }),
                Err(e) => serde_json::json!({ "ok": false, "error": e.to_string() }),
            };
            println!("{}", serde_json::to_string_pretty(&out)?);
        }
        Format::Pretty => match &result {
            Ok(()) => println!("ok: {count} commands"),
            Err(e) => eprintln!("error: {e}"),
        },
    }
    Ok(if result.is_ok() { 0 } else { 1 })
}

fn cmd_explain(id: &str, format: Format) -> Result<i32> {
    match format {
        Format::Json => {
            let out = serde_json::json!({
                "id": id,
                "explanation": diag::explain(id),
            });
            println!("{}", serde_json::to_string_pretty(&out)?);
        }
        Format::Pretty => {
            if let Some(text) = diag::explain(id) {
                use ariadne::Fmt;
                println!("{}: {}", id.fg(ariadne::Color::Cyan), text);
            } else {
                println!("{id}: (no explanation available)");
            }
        }
    }
    Ok(0)
}

// ── Helpers ─────────────────────────────────────────────────────────────

/// Handler bound to every leaf: replies with the path and parsed arguments.
fn echo_executor() -> Arc<dyn Executor> {
    executor_fn(|inv| {
        let args: Vec<String> = inv
            .arguments
            .iter()
            .map(|a| format!("{}={}", a.name, a.value))
            .collect();
        Response::text(format!("{} {}", inv.command.qualified_name(), args.join(" ")).trim_end())
    })
}

fn read_command_file(path: &str) -> Result<CommandFile> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("failed to read command file '{path}'"))?;
    CommandFile::from_jsonc(&text).with_context(|| format!("failed to parse command file '{path}'"))
}

fn load_registry(path: &str) -> Result<Registry> {
    let file = read_command_file(path)?;
    let mut builder = RegistryBuilder::new();
    builder
        .register_file_with(&file, echo_executor())
        .with_context(|| format!("invalid command file '{path}'"))?;
    Ok(builder.freeze())
}

/// Load the guild directory, or an empty guild when none is given.
fn load_directory(path: Option<&str>) -> Result<StaticDirectory> {
    let Some(path) = path else {
        let empty = DirectoryFile {
            public_role: Role {
                id: 1,
                name: "@everyone".into(),
            },
            users: Vec::new(),
            roles: Vec::new(),
            channels: Vec::new(),
        };
        return Ok(StaticDirectory::new(empty)?);
    };
    let text = fs::read_to_string(path)
        .with_context(|| format!("failed to read directory file '{path}'"))?;
    load_directory_from_str(&text).with_context(|| format!("invalid directory file '{path}'"))
}
