//! One upgraded connection: receive loop, replies, and shutdown.
//!
//! Lifecycle:
//! 1. Arm the read deadline and start the ping loop.
//! 2. Receive frames under the deadline; every frame renews it. Text frames
//!    get exactly one reply built by `wsecho_core::protocol::reply`.
//! 3. On the first terminal condition (idle timeout, read error, write error,
//!    peer close) stop the ping loop, send a best-effort normal-closure frame
//!    and drop the socket.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::extract::ws::{close_code, CloseFrame, Message, WebSocket};
use futures_util::stream::SplitStream;
use futures_util::StreamExt;
use tracing::Instrument;

use wsecho_core::protocol;
use wsecho_core::SequenceCounter;

use crate::transport::heartbeat::{spawn_probe_loop, HeartbeatConfig, ProbeGuard, ReadDeadline};
use crate::transport::writer::SessionWriter;

/// Why a session ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CloseCause {
    IdleTimeout,
    PeerClosed,
    ReadError,
    WriteError,
}

impl CloseCause {
    /// Reason text carried in the close frame.
    pub fn reason(self) -> &'static str {
        match self {
            CloseCause::IdleTimeout => "idle timeout",
            CloseCause::PeerClosed => "peer closed",
            CloseCause::ReadError => "read error",
            CloseCause::WriteError => "write error",
        }
    }
}

pub struct Session {
    remote: SocketAddr,
    heartbeat: HeartbeatConfig,
    seq: Arc<SequenceCounter>,
}

impl Session {
    pub fn new(remote: SocketAddr, heartbeat: HeartbeatConfig, seq: Arc<SequenceCounter>) -> Self {
        Self {
            remote,
            heartbeat,
            seq,
        }
    }

    /// Drive the connection to completion. Never returns an error: every
    /// failure is scoped to this session and only logged.
    pub async fn run(self, socket: WebSocket) -> CloseCause {
        let span = tracing::info_span!("ws_session", remote = %self.remote);
        self.run_inner(socket).instrument(span).await
    }

    async fn run_inner(self, socket: WebSocket) -> CloseCause {
        tracing::info!("connection opened");

        let (sink, stream) = socket.split();
        let writer = SessionWriter::new(sink, self.heartbeat.write_wait);
        let probe = spawn_probe_loop(writer.clone(), self.heartbeat, self.remote);

        let cause = self.receive_loop(stream, &writer).await;
        self.shutdown(probe, &writer, cause).await;
        cause
    }

    async fn receive_loop(
        &self,
        mut stream: SplitStream<WebSocket>,
        writer: &SessionWriter,
    ) -> CloseCause {
        let mut deadline = ReadDeadline::arm(self.heartbeat.idle_timeout);

        loop {
            let msg = match tokio::time::timeout_at(deadline.at(), stream.next()).await {
                Err(_) => {
                    deadline.expire();
                    tracing::info!(state = ?deadline.state(), "idle timeout");
                    return CloseCause::IdleTimeout;
                }
                Ok(None) => return CloseCause::PeerClosed,
                Ok(Some(Err(e))) => {
                    tracing::warn!(error = %e, "read error");
                    return CloseCause::ReadError;
                }
                Ok(Some(Ok(msg))) => msg,
            };

            // Any frame counts as liveness, pongs included.
            deadline.renew();

            match msg {
                Message::Text(payload) => {
                    let out = protocol::reply(&payload, &self.seq);
                    if let Err(e) = writer.send(Message::Text(out)).await {
                        let code = e.client_code().as_str();
                        tracing::warn!(code, error = %e, "write error");
                        return CloseCause::WriteError;
                    }
                }
                Message::Pong(data) => {
                    tracing::debug!(len = data.len(), "pong");
                }
                // Answered by the websocket layer.
                Message::Ping(_) => {}
                Message::Binary(data) => {
                    tracing::debug!(len = data.len(), "binary frame ignored");
                }
                Message::Close(frame) => {
                    tracing::debug!(?frame, "close from peer");
                    return CloseCause::PeerClosed;
                }
            }
        }
    }

    async fn shutdown(&self, probe: ProbeGuard, writer: &SessionWriter, cause: CloseCause) {
        let probe_exit = probe.stop().await;

        let frame = CloseFrame {
            code: close_code::NORMAL,
            reason: cause.reason().into(),
        };
        if let Err(e) = writer.send(Message::Close(Some(frame))).await {
            let code = e.client_code().as_str();
            tracing::debug!(code, error = %e, "close frame not delivered");
        }

        tracing::info!(
            ?cause,
            ?probe_exit,
            last_seq = self.seq.current(),
            "connection closed"
        );
    }
}
