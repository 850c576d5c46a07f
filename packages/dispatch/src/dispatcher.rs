//! Routing of `(function, args)` invocations.
//!
//! An invocation is routed to an [`Operation`] through a registry built when
//! the dispatcher is constructed, executed against the store it is handed,
//! and turned into a [`Response`]. No error escapes: every failure becomes an
//! error envelope carrying the error's message.

use std::collections::BTreeSet;

use bytes::Bytes;
use donation_ledger_record::{RecordCodec, Validator};
use donation_ledger_service::RecordService;
use donation_ledger_state::StateStore;

use crate::{DispatchError, Operation, Response};

pub struct Dispatcher {
    service: RecordService,
    registry: BTreeSet<Operation>,
}

impl Dispatcher {
    /// A dispatcher serving every operation.
    pub fn new(service: RecordService) -> Self {
        let registry = Operation::ALL.into_iter().collect();
        Self { service, registry }
    }

    /// A dispatcher serving only `operations`.
    ///
    /// Fails if an operation is listed twice.
    pub fn with_operations(
        service: RecordService,
        operations: impl IntoIterator<Item = Operation>,
    ) -> Result<Self, DispatchError> {
        let mut registry = BTreeSet::new();
        for op in operations {
            if !registry.insert(op) {
                return Err(DispatchError::DuplicateOperation { name: op.name() });
            }
        }
        Ok(Self { service, registry })
    }

    pub fn service(&self) -> &RecordService {
        &self.service
    }

    /// Registered operations in declaration order.
    pub fn operations(&self) -> impl Iterator<Item = Operation> + '_ {
        self.registry.iter().copied()
    }

    /// Resolve a function name to a registered operation.
    pub fn route(&self, function: &str) -> Result<Operation, DispatchError> {
        let op: Operation = function.parse()?;
        if !self.registry.contains(&op) {
            return Err(DispatchError::MethodNotFound {
                name: function.to_string(),
            });
        }
        Ok(op)
    }

    /// Handle the one-off initialization call, which takes no arguments.
    pub fn init(&self, args: &[String]) -> Response {
        tracing::info!(?args, "init");
        match Validator::check_exact_arity(args, 0) {
            Ok(()) => Response::success(Bytes::new()),
            Err(e) => {
                tracing::error!(error = %e, "init failed");
                Response::error(e.to_string())
            }
        }
    }

    /// Route and execute one invocation.
    pub async fn invoke(
        &self,
        store: &mut dyn StateStore,
        function: &str,
        args: &[String],
    ) -> Response {
        tracing::info!(tx_id = %store.tx_id(), function, ?args, "invoke");

        let op = match self.route(function) {
            Ok(op) => op,
            Err(e) => {
                tracing::error!(function, "no operation registered under this name");
                return Response::error(e.to_string());
            }
        };

        match self.execute(op, store, args).await {
            Ok(payload) => {
                tracing::debug!(operation = %op, write = op.is_write(), "operation succeeded");
                Response::success(payload)
            }
            Err(e) => {
                tracing::error!(operation = %op, error = %e, "operation failed");
                Response::error(e.to_string())
            }
        }
    }

    /// Execute a resolved operation and serialize its result.
    pub async fn execute(
        &self,
        op: Operation,
        store: &mut dyn StateStore,
        args: &[String],
    ) -> Result<Bytes, DispatchError> {
        let service = &self.service;
        let payload = match op {
            Operation::AddDonation => RecordCodec::encode(&service.create(store, args).await?)?,
            Operation::ReadDonation => RecordCodec::encode(&service.read(store, args).await?)?,
            Operation::ReadMultipleDonations => {
                RecordCodec::encode(&service.read_many(store, args).await?)?
            }
            Operation::IsPresent => RecordCodec::encode(&service.exists(store, args).await?)?,
            Operation::GetHistoryForDonation => {
                RecordCodec::encode(&service.history(store, args).await?)?
            }
            Operation::UpdateDonation => RecordCodec::encode(&service.update(store, args).await?)?,
            Operation::RemoveDonation => RecordCodec::encode(&service.delete(store, args).await?)?,
            Operation::ReadDonationRange => {
                RecordCodec::encode(&service.read_range(store, args).await?)?
            }
        };
        Ok(payload)
    }
}

impl Default for Dispatcher {
    fn default() -> Self {
        Self::new(RecordService::default())
    }
}
