//! Command execution.
//!
//! Commands:
//! - `init [args...]` - run the initialization handler
//! - `invoke <function> [args...]` - run one ledger function, committing on success
//! - `dump` - print the committed world state

use donation_ledger_dispatch::Response;

use crate::{CliError, Command, LedgerContext};

/// Result of executing a command
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandResult {
    /// Command succeeded, with output for stdout
    Ok(String),
    /// The ledger answered with a failure envelope
    Failed(String),
}

impl CommandResult {
    fn from_response(response: &Response) -> Result<Self, CliError> {
        let text = serde_json::to_string_pretty(response)?;
        Ok(if response.is_ok() {
            CommandResult::Ok(text)
        } else {
            CommandResult::Failed(text)
        })
    }

    pub fn output(&self) -> &str {
        match self {
            CommandResult::Ok(text) | CommandResult::Failed(text) => text,
        }
    }

    pub fn exit_code(&self) -> i32 {
        match self {
            CommandResult::Ok(_) => 0,
            CommandResult::Failed(_) => 1,
        }
    }
}

/// Execute a command against an opened ledger
pub async fn execute(command: &Command, ctx: &mut LedgerContext) -> Result<CommandResult, CliError> {
    match command {
        Command::Init { args } => CommandResult::from_response(&ctx.dispatcher().init(args)),
        Command::Invoke { function, args } => {
            let response = ctx.invoke(function, args).await?;
            CommandResult::from_response(&response)
        }
        Command::Dump => {
            let text = serde_json::to_string_pretty(&ctx.world_state_json())?;
            Ok(CommandResult::Ok(text))
        }
    }
}
