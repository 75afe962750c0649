//! Heartbeat: read deadline tracking + background ping loop.
//!
//! The read deadline is enforced by the receive call itself
//! (`timeout_at(deadline, stream.next())`), so expiry is noticed by the
//! session loop, not by a poller. Pings run on their own task because the
//! receive loop is parked on the socket between frames.

use std::net::SocketAddr;
use std::time::Duration;

use axum::extract::ws::Message;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior};

use crate::config::GatewaySection;
use crate::transport::writer::SessionWriter;

/// Timing for one session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HeartbeatConfig {
    pub idle_timeout: Duration,
    pub ping_interval: Duration,
    pub write_wait: Duration,
}

impl HeartbeatConfig {
    pub fn from_section(gw: &GatewaySection) -> Self {
        Self {
            idle_timeout: gw.idle_timeout(),
            ping_interval: gw.ping_interval(),
            write_wait: gw.write_wait(),
        }
    }
}

/// Liveness state of the read side.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeartbeatState {
    /// Deadline set at connect, nothing received yet.
    Armed,
    /// Deadline pushed forward by a frame or pong.
    Renewed,
    /// Deadline elapsed with no liveness evidence.
    Expired,
}

#[derive(Debug)]
pub struct ReadDeadline {
    idle_timeout: Duration,
    at: Instant,
    state: HeartbeatState,
}

impl ReadDeadline {
    pub fn arm(idle_timeout: Duration) -> Self {
        Self {
            idle_timeout,
            at: Instant::now() + idle_timeout,
            state: HeartbeatState::Armed,
        }
    }

    pub fn renew(&mut self) {
        self.at = Instant::now() + self.idle_timeout;
        self.state = HeartbeatState::Renewed;
    }

    pub fn expire(&mut self) {
        self.state = HeartbeatState::Expired;
    }

    pub fn at(&self) -> Instant {
        self.at
    }

    pub fn state(&self) -> HeartbeatState {
        self.state
    }
}

/// Why the ping loop ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProbeExit {
    Stopped,
    SendFailed,
}

/// Owns the stop signal of a running ping loop.
///
/// The signal fires at most once: from [`ProbeGuard::stop`], or from `Drop`
/// if the session unwinds without reaching shutdown.
pub struct ProbeGuard {
    stop: Option<oneshot::Sender<()>>,
    task: Option<JoinHandle<ProbeExit>>,
}

impl ProbeGuard {
    /// Signal the loop and wait for it to exit. No ping is sent after this returns.
    pub async fn stop(mut self) -> Option<ProbeExit> {
        if let Some(tx) = self.stop.take() {
            let _ = tx.send(());
        }
        match self.task.take() {
            Some(task) => task.await.ok(),
            None => None,
        }
    }
}

impl Drop for ProbeGuard {
    fn drop(&mut self) {
        if let Some(tx) = self.stop.take() {
            let _ = tx.send(());
        }
    }
}

/// Start pinging every `cfg.ping_interval`, first ping one interval from now.
pub fn spawn_probe_loop(
    writer: SessionWriter,
    cfg: HeartbeatConfig,
    remote: SocketAddr,
) -> ProbeGuard {
    let (tx, rx) = oneshot::channel();
    let task = tokio::spawn(probe_loop(writer, cfg.ping_interval, remote, rx));
    ProbeGuard {
        stop: Some(tx),
        task: Some(task),
    }
}

async fn probe_loop(
    writer: SessionWriter,
    every: Duration,
    remote: SocketAddr,
    mut stop: oneshot::Receiver<()>,
) -> ProbeExit {
    let mut tick = tokio::time::interval_at(Instant::now() + every, every);
    tick.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        tokio::select! {
            biased;
            _ = &mut stop => return ProbeExit::Stopped,
            _ = tick.tick() => {}
        }

        // A failed ping means the socket is gone; the receive loop will see it too.
        if let Err(e) = writer.send(Message::Ping(Vec::new())).await {
            tracing::warn!(
                %remote,
                code = e.client_code().as_str(),
                error = %e,
                "ping write error"
            );
            return ProbeExit::SendFailed;
        }
        tracing::debug!(%remote, "ping sent");
    }
}
