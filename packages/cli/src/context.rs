//! A snapshot-backed ledger plus the dispatcher that serves it.

use std::path::{Path, PathBuf};

use donation_ledger_dispatch::{Dispatcher, Response};
use donation_ledger_service::aggregate::parse_or_text;
use donation_ledger_state::{InMemoryLedger, Snapshot};
use serde_json::Value as JsonValue;

use crate::CliError;

pub struct LedgerContext {
    state_path: PathBuf,
    ledger: InMemoryLedger,
    dispatcher: Dispatcher,
    tx_id: Option<String>,
}

impl LedgerContext {
    /// Load the ledger at `state_path`; a missing file is an empty ledger.
    pub fn open(
        state_path: impl Into<PathBuf>,
        dispatcher: Dispatcher,
        tx_id: Option<String>,
    ) -> Result<Self, CliError> {
        let state_path = state_path.into();
        let ledger = Snapshot::load_ledger(&state_path)?;
        tracing::debug!(
            path = %state_path.display(),
            height = ledger.height(),
            "opened ledger"
        );
        Ok(Self {
            state_path,
            ledger,
            dispatcher,
            tx_id,
        })
    }

    pub fn state_path(&self) -> &Path {
        &self.state_path
    }

    pub fn ledger(&self) -> &InMemoryLedger {
        &self.ledger
    }

    pub fn dispatcher(&self) -> &Dispatcher {
        &self.dispatcher
    }

    /// Run one invocation in a fresh transaction.
    ///
    /// Writes are committed and the snapshot saved only when the invocation
    /// succeeds.
    pub async fn invoke(&mut self, function: &str, args: &[String]) -> Result<Response, CliError> {
        let mut tx = match &self.tx_id {
            Some(id) => self.ledger.begin_with_id(id.clone()),
            None => self.ledger.begin(),
        };
        let response = self.dispatcher.invoke(&mut tx, function, args).await;

        if response.is_ok() && tx.is_dirty() {
            let tx_id = tx.commit();
            Snapshot::capture(&self.ledger).save(&self.state_path)?;
            tracing::info!(tx_id = %tx_id, path = %self.state_path.display(), "saved ledger");
        }
        Ok(response)
    }

    /// Committed world state with values parsed as JSON where possible.
    pub fn world_state_json(&self) -> JsonValue {
        JsonValue::Object(
            self.ledger
                .world_state()
                .iter()
                .map(|(key, value)| (key.clone(), parse_or_text(value)))
                .collect(),
        )
    }
}
