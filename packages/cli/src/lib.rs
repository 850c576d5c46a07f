//! # donation-ledger-cli
//!
//! A command-line bootstrap for the donation ledger.
//!
//! Each run decodes one `(function, args)` call from the command line,
//! opens the ledger snapshot, runs the call in a fresh transaction and
//! prints the response envelope as JSON on stdout. Logs go to stderr.
//!
//! ## Usage
//!
//! ```bash
//! donation-ledger invoke addDonation FAO water 3.2
//! donation-ledger invoke readDonation <key>
//! donation-ledger invoke updateDonation <key> itemType toys
//! donation-ledger --domains domains.json invoke addDonation UNICEF books 4
//! donation-ledger dump
//! ```

pub mod args;
pub mod commands;
pub mod context;
mod error;

pub use args::{Cli, Command};
pub use commands::{execute, CommandResult};
pub use context::LedgerContext;
pub use error::CliError;

use donation_ledger_dispatch::Dispatcher;
use donation_ledger_record::{DomainConfig, Validator};
use donation_ledger_service::RecordService;

/// Build the ledger described by `cli` and run its command.
pub async fn run(cli: &Cli) -> Result<CommandResult, CliError> {
    let config = match &cli.domains {
        Some(path) => DomainConfig::from_json_file(path)?,
        None => DomainConfig::default(),
    };
    let validator = Validator::new(config);
    if let Some(tx_id) = &cli.tx_id {
        validator.check_key(tx_id).map_err(CliError::InvalidTxId)?;
    }
    let dispatcher = Dispatcher::new(RecordService::new(validator));

    let mut ctx = LedgerContext::open(&cli.state, dispatcher, cli.tx_id.clone())?;
    execute(&cli.command, &mut ctx).await
}
