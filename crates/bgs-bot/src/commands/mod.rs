//! The command set and the contract every command implements.
//!
//! Dispatch is two-level: the registry resolves the command by its first
//! token, then each command resolves a verb from the first argument token
//! via an explicit `match`. The verb space is closed; nothing else on the
//! handler is reachable.

mod adminroles;
mod bgsrole;
mod forbiddenroles;
mod help;
mod hi;
mod myguild;
mod sort;
mod systemstatus;

pub use adminroles::AdminRoles;
pub use bgsrole::BgsRole;
pub use forbiddenroles::ForbiddenRoles;
pub use help::Help;
pub use hi::Hi;
pub use myguild::MyGuild;
pub use sort::Sort;
pub use systemstatus::SystemStatus;

use anyhow::Result;
use async_trait::async_trait;
use bgs_types::HelpEntry;
use elitebgs_client::EbgsApi;

use crate::registry::CommandRegistry;
use crate::sink::ReplySink;
use crate::store::GuildStore;

/// The identity a command runs as.
#[derive(Debug, Clone, Default)]
pub struct Invoker {
    pub user_id: u64,
    /// `None` for direct messages.
    pub guild_id: Option<u64>,
    /// Roles held by the invoker in the guild.
    pub roles: Vec<u64>,
    /// All role ids that exist in the guild, for validating arguments.
    pub guild_roles: Vec<u64>,
}

/// Everything one invocation needs. Services are injected; commands own no
/// shared state.
pub struct CommandContext<'a, S, A> {
    pub invoker: Invoker,
    pub store: &'a S,
    pub api: &'a A,
    pub sink: &'a dyn ReplySink,
}

/// A named command with verb handlers and static help metadata.
#[async_trait]
pub trait Command<S: GuildStore, A: EbgsApi>: Send + Sync {
    /// Registry key; stored lowercased.
    fn name(&self) -> &'static str;

    fn help(&self) -> HelpEntry;

    /// Run the command with everything after its name, single-spaced.
    async fn exec(&self, ctx: &CommandContext<'_, S, A>, args: &str) -> Result<()>;
}

/// Build the full command registry.
pub fn build_registry<S, A>() -> CommandRegistry<S, A>
where
    S: GuildStore + 'static,
    A: EbgsApi + 'static,
{
    let mut registry = CommandRegistry::new();
    registry.register(Box::new(Hi));
    registry.register(Box::new(MyGuild));
    registry.register(Box::new(BgsRole));
    registry.register(Box::new(AdminRoles));
    registry.register(Box::new(ForbiddenRoles));
    registry.register(Box::new(Sort));
    registry.register(Box::new(SystemStatus));

    // The help command lists every registered command, itself included.
    let mut entries = registry.help_entries();
    entries.push(Help::entry());
    entries.sort_by(|a, b| a.command.cmp(b.command));
    registry.register(Box::new(Help::new(entries)));

    registry
}
