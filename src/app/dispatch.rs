use crate::api::{ApiClient, Credentials, UserUpdate};
use crate::cli::commands::{AdminCommands, AuthCommands, Cli, Commands, ConversationCommands};
use crate::config::Config;
use crate::session::StateStore;
use crate::ui::style;
use anyhow::{Result, bail};
use std::sync::Arc;

pub async fn dispatch(cli: Cli, config: Arc<Config>) -> Result<()> {
    match cli.command {
        Commands::Chat { new_session } => super::repl::run_chat(config, new_session).await,

        Commands::Auth { auth_command } => handle_auth(auth_command, &config).await,

        Commands::Conversations {
            conversation_command,
        } => handle_conversations(conversation_command, &config).await,

        Commands::Admin { admin_command } => handle_admin(admin_command, &config).await,

        Commands::Status => {
            let store = StateStore::load(&config.state_path)?;
            println!("{}", super::status::render_status(&config, &store));
            Ok(())
        }
    }
}

/// Client bound to the stored bearer credential, if any. Endpoints that
/// need one fail with an auth error before touching the wire.
fn stored_client(config: &Config, store: &StateStore) -> ApiClient {
    ApiClient::new(config, store.token().map(ToOwned::to_owned))
}

async fn handle_auth(command: AuthCommands, config: &Config) -> Result<()> {
    let mut store = StateStore::load(&config.state_path)?;

    match command {
        AuthCommands::Login { email } => {
            let credentials = prompt_credentials(email)?;
            let api = ApiClient::new(config, None);
            let response = api.login(&credentials).await?;
            store.set_token(response.access_token.as_str())?;
            println!(
                "{} {} {}",
                style::success("✓"),
                t!("auth.logged_in"),
                style::value(&response.user.email)
            );
        }

        AuthCommands::Register { email } => {
            let credentials = prompt_credentials(email)?;
            let api = ApiClient::new(config, None);
            let token = api.register(&credentials).await?;
            store.set_token(token.access_token.as_str())?;
            println!(
                "{} {} {}",
                style::success("✓"),
                t!("auth.registered"),
                style::value(&credentials.email)
            );
        }

        AuthCommands::Logout => {
            if let Some(token) = store.token() {
                let api = ApiClient::new(config, Some(token.to_string()));
                if let Err(error) = api.logout().await {
                    tracing::warn!(%error, "service logout failed; clearing local credential anyway");
                }
            }
            store.clear_token()?;
            println!("{}", t!("auth.logged_out"));
        }

        AuthCommands::Whoami => match store.token() {
            Some(token) => {
                let user = ApiClient::new(config, Some(token.to_string())).me().await?;
                let role = if user.is_admin { "admin" } else { "user" };
                println!("{} ({role})", style::value(&user.email));
            }
            None => println!("{}", t!("auth.not_logged_in")),
        },
    }

    Ok(())
}

async fn handle_conversations(command: ConversationCommands, config: &Config) -> Result<()> {
    let store = StateStore::load(&config.state_path)?;
    let api = stored_client(config, &store);

    match command {
        ConversationCommands::List { limit } => {
            let conversations = api.conversations(limit).await?;
            if conversations.is_empty() {
                println!("{}", style::dim(t!("conversations.empty")));
                return Ok(());
            }
            for conversation in conversations {
                println!(
                    "{:>6}  {}  {}",
                    style::accent(conversation.id),
                    conversation.title,
                    style::dim(format!(
                        "({} · {})",
                        conversation.message_count, conversation.updated_at
                    ))
                );
            }
        }

        ConversationCommands::Show { id } => {
            let detail = api.conversation(id).await?;
            println!(
                "{} {}",
                style::header(&detail.conversation.title),
                style::dim(&detail.conversation.created_at)
            );
            for message in detail.messages {
                println!(
                    "{:>10}  {}",
                    style::accent(&message.role),
                    message.content
                );
            }
        }

        ConversationCommands::Delete { id } => {
            api.delete_conversation(id).await?;
            println!("{} {}", style::success("✓"), t!("conversations.deleted"));
        }
    }

    Ok(())
}

async fn handle_admin(command: AdminCommands, config: &Config) -> Result<()> {
    let store = StateStore::load(&config.state_path)?;
    let api = stored_client(config, &store);

    match command {
        AdminCommands::Stats => {
            let stats = api.admin_stats().await?;
            println!(
                "{}: {}   {}: {}   {}: {}   {}: {}   {}: {}",
                t!("admin.users_total"),
                style::value(stats.total_users),
                t!("admin.users_active"),
                style::value(stats.active_users),
                t!("admin.users_inactive"),
                style::value(stats.inactive_users),
                t!("admin.users_admin"),
                style::value(stats.admin_users),
                t!("admin.users_today"),
                style::value(stats.users_created_today)
            );
        }

        AdminCommands::Users { skip, limit } => {
            let users = api.admin_users(skip, limit).await?;
            for user in users {
                let mut flags = Vec::new();
                if user.is_admin {
                    flags.push("admin");
                }
                if !user.is_active {
                    flags.push("inactive");
                }
                println!(
                    "{:>6}  {}  {}",
                    style::accent(user.id),
                    user.email,
                    style::dim(flags.join(", "))
                );
            }
        }

        AdminCommands::Show { id } => {
            let user = api.admin_user(id).await?;
            println!(
                "{} {}",
                style::header(&user.email),
                style::dim(format!(
                    "(id {}, since {})",
                    user.id, user.created_at
                ))
            );
            println!(
                "  admin: {}  active: {}  messages: {}",
                user.is_admin, user.is_active, user.total_messages
            );
            for conversation in user.conversations {
                println!(
                    "  {:>6}  {}  {}",
                    style::accent(conversation.id),
                    conversation.title.unwrap_or_else(|| "—".into()),
                    style::dim(conversation.messages_count)
                );
            }
        }

        AdminCommands::Update {
            id,
            admin,
            active,
            name,
        } => {
            let update = UserUpdate {
                is_admin: admin,
                is_active: active,
                name,
            };
            if update.is_empty() {
                bail!("Nothing to update: pass --admin, --active, or --name");
            }
            api.update_user(id, &update).await?;
            println!("{} {}", style::success("✓"), t!("admin.user_updated"));
        }

        AdminCommands::Delete { id } => {
            api.delete_user(id).await?;
            println!("{} {}", style::success("✓"), t!("admin.user_deleted"));
        }
    }

    Ok(())
}

fn prompt_credentials(email: Option<String>) -> Result<Credentials> {
    let email = match email {
        Some(email) => email,
        None => dialoguer::Input::<String>::new()
            .with_prompt(t!("auth.email").into_owned())
            .interact_text()?,
    };
    let password = dialoguer::Password::new()
        .with_prompt(t!("auth.password").into_owned())
        .interact()?;

    Ok(Credentials { email, password })
}
