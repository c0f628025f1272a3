use crate::chat::envelope::{Outbound, ServerEvent};
use crate::chat::log::{LogEntry, Role};
use crate::config::Config;
use crate::session::SessionContext;
use futures_util::{SinkExt, StreamExt};
use std::time::Duration;
use tokio::net::TcpStream;
use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tokio_tungstenite::tungstenite::Message as WsMessage;
use tokio_tungstenite::{MaybeTlsStream, WebSocketStream, connect_async};
use tokio_util::sync::CancellationToken;

/// Fixed re-dial delay mandated by the service contract: unconditional,
/// unbounded, no backoff growth, no jitter.
pub const DEFAULT_RECONNECT_DELAY: Duration = Duration::from_millis(3000);

/// Lifecycle stage of the chat channel. Derived state only; never persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::Display)]
#[strum(serialize_all = "lowercase")]
pub enum ConnectionState {
    Connecting,
    Open,
    Closed,
}

#[derive(Debug, Clone)]
pub struct ChannelOptions {
    pub url: String,
    pub reconnect_delay: Duration,
}

impl ChannelOptions {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            reconnect_delay: DEFAULT_RECONNECT_DELAY,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self {
            url: config.server.ws_url(),
            reconnect_delay: Duration::from_millis(config.channel.reconnect_ms),
        }
    }

    pub fn reconnect_delay(mut self, delay: Duration) -> Self {
        self.reconnect_delay = delay;
        self
    }
}

/// Handle to one logical chat session's channel.
///
/// The spawned task is the single writer of connection state and the typing
/// indicator; the handle only reads snapshots and enqueues sends. Dropping
/// the handle (or calling [`ChannelHandle::shutdown`]) cancels any pending
/// reconnect and closes the transport — the sole termination path.
#[derive(Debug)]
pub struct ChannelHandle {
    session: SessionContext,
    outbound_tx: mpsc::UnboundedSender<Outbound>,
    state_rx: watch::Receiver<ConnectionState>,
    typing_rx: watch::Receiver<bool>,
    cancel: CancellationToken,
    task: Option<JoinHandle<()>>,
}

impl ChannelHandle {
    /// Spawn the channel task. Returns the handle plus the stream of log
    /// entries the manager emits (assistant replies and service errors);
    /// the caller owns the log and appends them.
    pub fn spawn(
        options: ChannelOptions,
        session: SessionContext,
    ) -> (Self, mpsc::UnboundedReceiver<LogEntry>) {
        let (state_tx, state_rx) = watch::channel(ConnectionState::Connecting);
        let (typing_tx, typing_rx) = watch::channel(false);
        let (events_tx, events_rx) = mpsc::unbounded_channel();
        let (outbound_tx, outbound_rx) = mpsc::unbounded_channel();
        let cancel = CancellationToken::new();

        let task = tokio::spawn(run(
            options,
            cancel.clone(),
            outbound_rx,
            state_tx,
            typing_tx,
            events_tx,
        ));

        (
            Self {
                session,
                outbound_tx,
                state_rx,
                typing_rx,
                cancel,
                task: Some(task),
            },
            events_rx,
        )
    }

    pub fn session(&self) -> &SessionContext {
        &self.session
    }

    pub fn state(&self) -> ConnectionState {
        *self.state_rx.borrow()
    }

    pub fn state_changes(&self) -> watch::Receiver<ConnectionState> {
        self.state_rx.clone()
    }

    pub fn is_typing(&self) -> bool {
        *self.typing_rx.borrow()
    }

    pub fn typing_changes(&self) -> watch::Receiver<bool> {
        self.typing_rx.clone()
    }

    /// Send one user message. Blank text and sends while the channel is not
    /// open are dropped silently — the disabled send affordance is the only
    /// feedback. On acceptance, returns the optimistic `user` entry for the
    /// caller to append before any acknowledgment arrives.
    pub fn send(&self, text: &str) -> Option<LogEntry> {
        let text = text.trim();
        if text.is_empty() || self.state() != ConnectionState::Open {
            return None;
        }

        let envelope = Outbound::new(text, &self.session);
        if self.outbound_tx.send(envelope).is_err() {
            return None;
        }

        Some(LogEntry::now(Role::User, text))
    }

    /// Tear the channel down: cancel the reconnect timer, close the
    /// transport, and wait for the task to finish.
    pub async fn shutdown(mut self) {
        self.cancel.cancel();
        if let Some(task) = self.task.take() {
            let _ = task.await;
        }
    }
}

impl Drop for ChannelHandle {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}

type WsConnection = WebSocketStream<MaybeTlsStream<TcpStream>>;

/// Connect → drive → re-dial loop. Every pass builds a brand-new transport;
/// a closed one is never reused.
async fn run(
    options: ChannelOptions,
    cancel: CancellationToken,
    mut outbound_rx: mpsc::UnboundedReceiver<Outbound>,
    state_tx: watch::Sender<ConnectionState>,
    typing_tx: watch::Sender<bool>,
    events_tx: mpsc::UnboundedSender<LogEntry>,
) {
    loop {
        tokio::select! {
            () = cancel.cancelled() => break,
            connected = connect_async(&options.url) => match connected {
                Ok((connection, _)) => {
                    tracing::info!(url = %options.url, "chat channel open");
                    let _ = state_tx.send(ConnectionState::Open);
                    drive(connection, &cancel, &mut outbound_rx, &typing_tx, &events_tx).await;
                    let _ = typing_tx.send(false);
                    let _ = state_tx.send(ConnectionState::Closed);
                }
                Err(error) => {
                    tracing::warn!(url = %options.url, %error, "chat channel connect failed");
                    let _ = typing_tx.send(false);
                    let _ = state_tx.send(ConnectionState::Closed);
                }
            }
        }

        if cancel.is_cancelled() {
            break;
        }

        tokio::select! {
            () = cancel.cancelled() => break,
            () = tokio::time::sleep(options.reconnect_delay) => {}
        }

        let _ = state_tx.send(ConnectionState::Connecting);
    }

    let _ = typing_tx.send(false);
    let _ = state_tx.send(ConnectionState::Closed);
}

/// Pump one live connection until it closes, errors, or teardown.
async fn drive(
    connection: WsConnection,
    cancel: &CancellationToken,
    outbound_rx: &mut mpsc::UnboundedReceiver<Outbound>,
    typing_tx: &watch::Sender<bool>,
    events_tx: &mpsc::UnboundedSender<LogEntry>,
) {
    let (mut write, mut read) = connection.split();

    loop {
        tokio::select! {
            () = cancel.cancelled() => {
                let _ = write.close().await;
                return;
            }
            envelope = outbound_rx.recv() => {
                let Some(envelope) = envelope else { return; };
                let Ok(payload) = serde_json::to_string(&envelope) else {
                    continue;
                };
                if let Err(error) = write.send(WsMessage::Text(payload.into())).await {
                    tracing::warn!(%error, "chat channel send failed");
                    return;
                }
            }
            inbound = read.next() => {
                let Some(Ok(frame)) = inbound else {
                    tracing::warn!("chat channel socket closed");
                    return;
                };
                let Some(raw) = frame_to_text(frame) else {
                    continue;
                };
                dispatch(&raw, typing_tx, events_tx);
            }
        }
    }
}

fn dispatch(
    raw: &str,
    typing_tx: &watch::Sender<bool>,
    events_tx: &mpsc::UnboundedSender<LogEntry>,
) {
    match ServerEvent::parse(raw) {
        Some(ServerEvent::Typing { status }) => {
            let _ = typing_tx.send(status);
        }
        Some(ServerEvent::AssistantMessage { message, timestamp }) => {
            let _ = events_tx.send(LogEntry::new(Role::Assistant, message, timestamp));
        }
        Some(ServerEvent::Error { message, timestamp }) => {
            let _ = events_tx.send(LogEntry::new(Role::Error, message, timestamp));
        }
        Some(ServerEvent::Unknown) => {}
        None => {
            tracing::warn!("dropping malformed chat channel payload");
        }
    }
}

fn frame_to_text(frame: WsMessage) -> Option<String> {
    match frame {
        WsMessage::Text(text) => Some(text.to_string()),
        WsMessage::Binary(bytes) => String::from_utf8(bytes.to_vec()).ok(),
        _ => None,
    }
}
