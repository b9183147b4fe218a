use crate::domains::error::ActorError;

#[derive(Debug)]
pub(crate) struct Callback<T>(pub(crate) tokio::sync::oneshot::Sender<T>);

impl<T> Callback<T> {
    pub(crate) fn create() -> (Self, CallbackAwaiter<T>) {
        let (tx, rx) = tokio::sync::oneshot::channel();
        (Callback(tx), CallbackAwaiter(rx))
    }

    // requester may have gone away; nothing to do about it here
    pub(crate) fn send(self, value: T) {
        let _ = self.0.send(value);
    }
}

#[derive(Debug)]
pub(crate) struct CallbackAwaiter<T>(pub(crate) tokio::sync::oneshot::Receiver<T>);

impl<T> CallbackAwaiter<T> {
    pub(crate) async fn recv(self) -> Result<T, ActorError> {
        self.0.await.map_err(|_| ActorError::CallbackDropped)
    }
}
