//! Streaming handles used by the generated server contracts.
//!
//! The router never wires these: streaming methods appear in the contract
//! but have no routing entry. The handles are backed by `tokio::sync::mpsc`
//! so a transport that does support streaming can drive them.

use tokio::sync::mpsc;

use crate::domain::errors::{CallError, ErrorKind};

/// Inbound half of a client-streaming call.
#[derive(Debug)]
pub struct ClientStream<T> {
    rx: mpsc::Receiver<Result<T, CallError>>,
}

impl<T: Send + 'static> ClientStream<T> {
    /// Create a stream together with the sender a transport feeds it from.
    pub fn channel(buffer: usize) -> (mpsc::Sender<Result<T, CallError>>, Self) {
        let (tx, rx) = mpsc::channel(buffer);
        (tx, Self { rx })
    }

    /// Next message, `None` once the peer has finished sending.
    pub async fn receive(&mut self) -> Option<Result<T, CallError>> {
        self.rx.recv().await
    }
}

/// Outbound half of a server-streaming call.
#[derive(Debug, Clone)]
pub struct ServerStream<T> {
    tx: mpsc::Sender<T>,
}

impl<T: Send + 'static> ServerStream<T> {
    pub fn channel(buffer: usize) -> (Self, mpsc::Receiver<T>) {
        let (tx, rx) = mpsc::channel(buffer);
        (Self { tx }, rx)
    }

    pub async fn send(&self, msg: T) -> Result<(), CallError> {
        self.tx
            .send(msg)
            .await
            .map_err(|_| CallError::new(ErrorKind::Cancelled, "stream peer went away"))
    }
}

/// Both halves of a bidirectional call.
#[derive(Debug)]
pub struct BidiStream<Req, Res> {
    incoming: ClientStream<Req>,
    outgoing: ServerStream<Res>,
}

impl<Req: Send + 'static, Res: Send + 'static> BidiStream<Req, Res> {
    pub fn new(incoming: ClientStream<Req>, outgoing: ServerStream<Res>) -> Self {
        Self { incoming, outgoing }
    }

    pub async fn receive(&mut self) -> Option<Result<Req, CallError>> {
        self.incoming.receive().await
    }

    pub async fn send(&self, msg: Res) -> Result<(), CallError> {
        self.outgoing.send(msg).await
    }

    pub fn into_parts(self) -> (ClientStream<Req>, ServerStream<Res>) {
        (self.incoming, self.outgoing)
    }
}
