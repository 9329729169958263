//! Shared test helpers for `cmdroute_core` integration tests.

#![allow(unreachable_pub)]

use cmdroute_core::{
    Argument, Channel, ChoiceValue, CommandBuilder, GuildDirectory, Member, MessageEvent,
    OptionSchema, OptionType, Permission, Registry, RegistryBuilder, Response, Role, Snowflake,
    TokenQueue, User,
};
use cmdroute_schema::OptionConstraints;
use std::collections::BTreeMap;
use std::sync::atomic::{AtomicUsize, Ordering};

pub const ADA: Snowflake = 1;
pub const BOB: Snowflake = 2;
pub const MODS: Snowflake = 10;
pub const GENERAL: Snowflake = 20;
pub const GUILD: Snowflake = 99;

// ─── Directory ───────────────────────────────────────────────────────────────

/// Deterministic in-memory directory that counts lookups.
#[derive(Debug)]
pub struct FixedDirectory {
    users: BTreeMap<Snowflake, User>,
    roles: BTreeMap<Snowflake, Role>,
    channels: BTreeMap<Snowflake, Channel>,
    lookups: AtomicUsize,
}

impl Default for FixedDirectory {
    fn default() -> Self {
        let users = [user(ADA, "ada"), user(BOB, "bob")]
            .into_iter()
            .map(|u| (u.id, u))
            .collect();
        let roles = BTreeMap::from([(
            MODS,
            Role {
                id: MODS,
                name: "mods".into(),
            },
        )]);
        let channels = BTreeMap::from([(
            GENERAL,
            Channel {
                id: GENERAL,
                name: "general".into(),
            },
        )]);
        Self {
            users,
            roles,
            channels,
            lookups: AtomicUsize::new(0),
        }
    }
}

impl FixedDirectory {
    /// Number of lookups served so far.
    #[allow(dead_code)]
    pub fn lookups(&self) -> usize {
        self.lookups.load(Ordering::SeqCst)
    }
}

impl GuildDirectory for FixedDirectory {
    async fn user_by_id(&self, id: Snowflake) -> Option<User> {
        self.lookups.fetch_add(1, Ordering::SeqCst);
        self.users.get(&id).cloned()
    }

    async fn role_by_id(&self, id: Snowflake) -> Option<Role> {
        self.lookups.fetch_add(1, Ordering::SeqCst);
        match self.roles.get(&id) {
            Some(role) => Some(role.clone()),
            None => (id == GUILD).then(|| self.public_role()),
        }
    }

    async fn channel_by_id(&self, id: Snowflake) -> Option<Channel> {
        self.lookups.fetch_add(1, Ordering::SeqCst);
        self.channels.get(&id).cloned()
    }

    fn public_role(&self) -> Role {
        Role {
            id: GUILD,
            name: "@everyone".into(),
        }
    }
}

// ─── Entities and events ─────────────────────────────────────────────────────

#[allow(dead_code)]
pub fn user(id: Snowflake, name: &str) -> User {
    User {
        id,
        name: name.into(),
        bot: false,
    }
}

#[allow(dead_code)]
pub fn member(perms: &[Permission]) -> Member {
    Member::new(user(ADA, "ada"), perms.iter().copied())
}

/// A message from a permission-less member.
#[allow(dead_code)]
pub fn message(content: &str) -> MessageEvent {
    message_from(member(&[]), content)
}

#[allow(dead_code)]
pub fn message_from(member: Member, content: &str) -> MessageEvent {
    MessageEvent {
        author: member.user.clone(),
        member: Some(member),
        content: content.into(),
    }
}

/// Queue over borrowed texts, for coercer and parser tests.
#[allow(dead_code)]
pub fn queue<'a>(texts: &[&'a str]) -> TokenQueue<'a> {
    TokenQueue::from_texts(texts)
}

// ─── Schemas and trees ───────────────────────────────────────────────────────

#[allow(dead_code)]
pub fn opt(option_type: OptionType, name: &str) -> OptionSchema {
    OptionSchema::builder(option_type, name, "").build()
}

fn describe(args: &[Argument]) -> String {
    args.iter()
        .map(|a| format!("{}={}", a.name, a.value))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Registry used by routing tests.
///
/// - `ping`: no options
/// - `echo text:STRING`
/// - `pay to:USER amount:NUMBER`
/// - `flags enabled:BOOLEAN color:STRING` (choices red/blue)
/// - `mod` (ban_members) → `ban user:USER days:INTEGER` (0..=7), `warn user:USER reason:STRING`
/// - `cfg` (slash) → `show`, `roles` → `add role:ROLE`
/// - `form`: replies with a modal; `whisper`: replies ephemerally
/// - `todo`: leaf without an executor
#[allow(dead_code)]
pub fn registry() -> Registry {
    let reply = |inv: cmdroute_core::Invocation<'_>| {
        Response::text(format!(
            "{} {}",
            inv.command.qualified_name(),
            describe(inv.arguments)
        ))
    };

    let mut reg = RegistryBuilder::new();
    reg.register_builder(CommandBuilder::message("ping", "Ping").execute(|_| Response::text("pong")))
        .unwrap()
        .register_builder(
            CommandBuilder::message("echo", "Echo")
                .option(opt(OptionType::String, "text"))
                .execute(|inv| Response::text(inv.arguments[0].string())),
        )
        .unwrap()
        .register_builder(
            CommandBuilder::message("pay", "Pay someone")
                .option(opt(OptionType::User, "to"))
                .option(opt(OptionType::Number, "amount"))
                .execute(reply),
        )
        .unwrap()
        .register_builder(
            CommandBuilder::message("flags", "Flags")
                .option(opt(OptionType::Boolean, "enabled"))
                .option(
                    OptionSchema::builder(OptionType::String, "color", "")
                        .choice("Red", ChoiceValue::String("red".into()))
                        .choice("Blue", ChoiceValue::String("blue".into()))
                        .build(),
                )
                .execute(reply),
        )
        .unwrap()
        .register_builder(
            CommandBuilder::message("mod", "Moderation")
                .permission(Permission::BanMembers)
                .subcommand(
                    CommandBuilder::new("ban", "Ban a member")
                        .option(opt(OptionType::User, "user"))
                        .option(
                            OptionSchema::builder(OptionType::Integer, "days", "")
                                .constraints(&OptionConstraints {
                                    min_value: Some(0.0),
                                    max_value: Some(7.0),
                                    ..Default::default()
                                })
                                .build(),
                        )
                        .execute(reply),
                )
                .subcommand(
                    CommandBuilder::new("warn", "Warn a member")
                        .option(opt(OptionType::User, "user"))
                        .option(opt(OptionType::String, "reason"))
                        .execute(reply),
                ),
        )
        .unwrap()
        .register_builder(
            CommandBuilder::slash("cfg", "Configuration")
                .subcommand(CommandBuilder::new("show", "Show").execute(reply))
                .subcommand(
                    CommandBuilder::new("roles", "Roles").subcommand(
                        CommandBuilder::new("add", "Add a role")
                            .option(opt(OptionType::Role, "role"))
                            .execute(reply),
                    ),
                ),
        )
        .unwrap()
        .register_builder(CommandBuilder::message("form", "Form").execute(|_| {
            Response::modal(cmdroute_core::router::Modal {
                custom_id: "form".into(),
                title: "Form".into(),
                inputs: Vec::new(),
            })
        }))
        .unwrap()
        .register_builder(
            CommandBuilder::message("whisper", "Whisper")
                .execute(|_| Response::text("psst").ephemeral()),
        )
        .unwrap()
        .register_builder(CommandBuilder::message("todo", "Not done"))
        .unwrap();
    reg.freeze()
}

/// The text of a plain text reply.
#[allow(dead_code)]
pub fn text_of(response: &Response) -> &str {
    match &response.directive {
        cmdroute_core::Directive::Text { content } => content,
        other => panic!("expected text reply, got {other:?}"),
    }
}
