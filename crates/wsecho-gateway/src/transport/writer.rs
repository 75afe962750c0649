//! Serialized, deadline-bounded writes to one WebSocket.
//!
//! The receive loop and the probe loop both write to the same connection.
//! The sink half sits behind an async mutex so frames never interleave, and
//! every send (lock wait included) is bounded by the write deadline.

use std::pin::Pin;
use std::sync::Arc;
use std::time::Duration;

use axum::extract::ws::Message;
use futures_util::{Sink, SinkExt};
use tokio::sync::Mutex;

use wsecho_core::error::{Result, WsEchoError};

/// Write half of a connection (the split sink in production).
type WsSink = Pin<Box<dyn Sink<Message, Error = axum::Error> + Send>>;

#[derive(Clone)]
pub struct SessionWriter {
    sink: Arc<Mutex<WsSink>>,
    write_wait: Duration,
}

impl SessionWriter {
    pub fn new<S>(sink: S, write_wait: Duration) -> Self
    where
        S: Sink<Message, Error = axum::Error> + Send + 'static,
    {
        Self {
            sink: Arc::new(Mutex::new(Box::pin(sink))),
            write_wait,
        }
    }

    /// Send one frame. Errors are final for the connection; callers do not retry.
    pub async fn send(&self, msg: Message) -> Result<()> {
        let write = async {
            let mut sink = self.sink.lock().await;
            sink.send(msg).await
        };

        match tokio::time::timeout(self.write_wait, write).await {
            Ok(Ok(())) => Ok(()),
            Ok(Err(e)) => Err(WsEchoError::Transport(e.to_string())),
            Err(_) => Err(WsEchoError::Timeout("write")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn stalled_sink_hits_write_deadline() {
        let sink = futures_util::sink::unfold((), |(), _msg: Message| {
            std::future::pending::<std::result::Result<(), axum::Error>>()
        });
        let writer = SessionWriter::new(sink, Duration::from_secs(5));

        let err = writer.send(Message::Text("x".into())).await.unwrap_err();
        assert_eq!(err.client_code().as_str(), "TIMEOUT");
    }

    #[tokio::test]
    async fn sink_error_is_transport() {
        let sink = futures_util::sink::unfold((), |(), _msg: Message| async {
            Err::<(), _>(axum::Error::new("broken pipe"))
        });
        let writer = SessionWriter::new(sink, Duration::from_secs(5));

        let err = writer.send(Message::Ping(Vec::new())).await.unwrap_err();
        assert_eq!(err.client_code().as_str(), "TRANSPORT");
    }
}
