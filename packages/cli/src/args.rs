use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// donation-ledger - run donation record operations against a local ledger
#[derive(Parser, Debug)]
#[command(name = "donation-ledger")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Ledger snapshot file; created on the first write
    #[arg(long, value_name = "FILE", default_value = "ledger.json")]
    pub state: PathBuf,

    /// JSON file with projects, itemTypes and keyLength
    #[arg(long, value_name = "FILE")]
    pub domains: Option<PathBuf>,

    /// Use this transaction id instead of a generated one
    #[arg(long, value_name = "ID")]
    pub tx_id: Option<String>,

    /// Log more (-v info, -vv debug, -vvv trace); RUST_LOG takes precedence
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Run the initialization handler
    Init {
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        args: Vec<String>,
    },

    /// Invoke a ledger function in a new transaction
    Invoke {
        /// Function name, e.g. addDonation
        function: String,
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        args: Vec<String>,
    },

    /// Print the committed world state
    Dump,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_invoke_with_args() {
        let cli = Cli::try_parse_from([
            "donation-ledger",
            "--state",
            "/tmp/l.json",
            "-vv",
            "invoke",
            "addDonation",
            "FAO",
            "water",
            "-3",
        ])
        .unwrap();
        assert_eq!(cli.state, PathBuf::from("/tmp/l.json"));
        assert_eq!(cli.verbose, 2);
        assert_eq!(
            cli.command,
            Command::Invoke {
                function: "addDonation".to_string(),
                args: vec!["FAO".to_string(), "water".to_string(), "-3".to_string()],
            }
        );
    }

    #[test]
    fn defaults() {
        let cli = Cli::try_parse_from(["donation-ledger", "dump"]).unwrap();
        assert_eq!(cli.state, PathBuf::from("ledger.json"));
        assert!(cli.domains.is_none());
        assert!(cli.tx_id.is_none());
        assert_eq!(cli.command, Command::Dump);
    }

    #[test]
    fn init_collects_stray_args() {
        let cli = Cli::try_parse_from(["donation-ledger", "init", "unexpected"]).unwrap();
        assert_eq!(
            cli.command,
            Command::Init {
                args: vec!["unexpected".to_string()]
            }
        );
    }
}
