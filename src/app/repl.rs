use crate::api::ApiClient;
use crate::chat::{ChannelHandle, ChannelOptions, ChatLog, ConnectionState, Message, Role};
use crate::commands::{Command, parse_command};
use crate::config::Config;
use crate::session::{SessionContext, StateStore, mint_session_id};
use crate::ui::style;
use anyhow::Result;
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader};

/// Interactive chat loop: stdin lines, channel events, and connection
/// notices multiplexed on one task.
pub async fn run_chat(config: Arc<Config>, new_session: bool) -> Result<()> {
    let mut store = StateStore::load(&config.state_path)?;
    if new_session {
        store.clear_session_id()?;
    }

    // The durable session identifier is minted (time-derived) and persisted
    // before anything is transmitted; it survives reconnects and is only
    // discarded on explicit user action.
    let session_id = match store.session_id() {
        Some(id) => id.to_string(),
        None => {
            let id = mint_session_id();
            store.set_session_id(id.as_str())?;
            id
        }
    };

    let session = resolve_identity(&config, &store, session_id).await;
    let options = ChannelOptions::from_config(&config);
    let (handle, mut events) = ChannelHandle::spawn(options, session);

    let mut state_rx = handle.state_changes();
    let mut typing_rx = handle.typing_changes();

    let mut log = ChatLog::with_greeting();
    if let Some(greeting) = log.messages().last() {
        render_message(greeting);
    }
    println!("{}", style::dim(t!("chat.help")));

    let stdin = BufReader::new(tokio::io::stdin());
    let mut lines = stdin.lines();

    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line? else { break; };
                match parse_command(&line) {
                    Some(Command::Quit) => break,
                    Some(Command::New) => {
                        let greeting = log.new_chat().clone();
                        println!("{}", style::dim(t!("chat.new_chat")));
                        render_message(&greeting);
                    }
                    Some(Command::Status) => {
                        println!(
                            "{}",
                            style::dim(format!(
                                "{} · {}",
                                handle.state(),
                                handle.session().session_id
                            ))
                        );
                    }
                    Some(Command::Help) => {
                        println!("{}", style::dim(t!("chat.help")));
                    }
                    None => {
                        // Optimistic append: the entry lands in the log
                        // before any acknowledgment. Blank input and sends
                        // while disconnected are dropped without comment.
                        if let Some(entry) = handle.send(&line) {
                            let message = log.append(entry).clone();
                            render_message(&message);
                        }
                    }
                }
            }
            entry = events.recv() => {
                let Some(entry) = entry else { break; };
                let message = log.append(entry).clone();
                render_message(&message);
            }
            changed = state_rx.changed() => {
                if changed.is_err() {
                    break;
                }
                render_state(*state_rx.borrow_and_update());
            }
            changed = typing_rx.changed() => {
                if changed.is_err() {
                    break;
                }
                if *typing_rx.borrow_and_update() {
                    println!("{}", style::dim(t!("chat.typing")));
                }
            }
            _ = tokio::signal::ctrl_c() => break,
        }
    }

    handle.shutdown().await;
    Ok(())
}

/// Attach the authenticated identity when a stored credential resolves;
/// otherwise chat anonymously.
async fn resolve_identity(config: &Config, store: &StateStore, session_id: String) -> SessionContext {
    let Some(token) = store.token() else {
        return SessionContext::anonymous(session_id);
    };

    let api = ApiClient::new(config, Some(token.to_string()));
    match api.me().await {
        Ok(user) => SessionContext::authenticated(session_id, user.id.to_string(), user.email),
        Err(error) => {
            tracing::warn!(%error, "stored credential rejected; chatting anonymously");
            SessionContext::anonymous(session_id)
        }
    }
}

fn render_message(message: &Message) {
    let label = match message.role {
        Role::User => style::user("you"),
        Role::Assistant => style::assistant("rafiq"),
        Role::Error => style::danger("error"),
    };
    println!("{label}  {}", message.content);
}

fn render_state(state: ConnectionState) {
    match state {
        ConnectionState::Open => {
            println!("{}", style::success(format!("● {}", t!("chat.connected"))));
        }
        ConnectionState::Closed => {
            println!("{}", style::dim(format!("○ {}", t!("chat.disconnected"))));
        }
        ConnectionState::Connecting => {}
    }
}
