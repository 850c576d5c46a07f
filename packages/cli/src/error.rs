use donation_ledger_record::{ConfigError, Error as RecordError};
use donation_ledger_state::StateError;

#[derive(thiserror::Error, Debug)]
pub enum CliError {
    #[error("ledger state: {0}")]
    State(#[from] StateError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("invalid --tx-id: {0}")]
    InvalidTxId(#[source] RecordError),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
