use thiserror::Error;

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActorError {
    #[error("MailboxClosed")]
    MailboxClosed,
    #[error("CallbackDropped")]
    CallbackDropped,
}

impl<T> From<tokio::sync::mpsc::error::SendError<T>> for ActorError {
    fn from(_: tokio::sync::mpsc::error::SendError<T>) -> Self {
        ActorError::MailboxClosed
    }
}
