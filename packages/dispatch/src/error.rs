use donation_ledger_record::Error as RecordError;

#[derive(thiserror::Error, Debug)]
pub enum DispatchError {
    /// The requested function name is not registered. The name is kept for
    /// logging only and is not part of the message.
    #[error("method not found")]
    MethodNotFound { name: String },

    #[error("operation registered twice: {name}")]
    DuplicateOperation { name: &'static str },

    #[error(transparent)]
    Record(#[from] RecordError),
}
