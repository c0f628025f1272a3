use clap::{Parser, Subcommand};

/// `Rafiq` - Terminal client for the Rafiq assistant service.
#[derive(Parser, Debug)]
#[command(name = "rafiq")]
#[command(version = "0.1.0")]
#[command(about = "Chat with the Rafiq assistant from your terminal.", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Start an interactive chat session
    Chat {
        /// Discard the stored session identifier and start fresh
        #[arg(long)]
        new_session: bool,
    },

    /// Manage credentials for the assistant service
    Auth {
        #[command(subcommand)]
        auth_command: AuthCommands,
    },

    /// Browse stored conversations
    Conversations {
        #[command(subcommand)]
        conversation_command: ConversationCommands,
    },

    /// Administer service users (admin accounts only)
    Admin {
        #[command(subcommand)]
        admin_command: AdminCommands,
    },

    /// Show client status (endpoint, credentials, session)
    Status,
}

#[derive(Subcommand, Debug)]
pub enum AuthCommands {
    /// Log in and store the bearer credential
    Login {
        /// Email address (prompted when omitted)
        #[arg(long)]
        email: Option<String>,
    },
    /// Create an account and store the bearer credential
    Register {
        /// Email address (prompted when omitted)
        #[arg(long)]
        email: Option<String>,
    },
    /// Invalidate the stored credential
    Logout,
    /// Show the currently authenticated account
    Whoami,
}

#[derive(Subcommand, Debug)]
pub enum ConversationCommands {
    /// List recent conversations
    List {
        #[arg(long, default_value = "20")]
        limit: usize,
    },
    /// Show one conversation with its messages
    Show { id: i64 },
    /// Delete a conversation
    Delete { id: i64 },
}

#[derive(Subcommand, Debug)]
pub enum AdminCommands {
    /// Dashboard counters
    Stats,
    /// List service users
    Users {
        #[arg(long, default_value = "0")]
        skip: usize,
        #[arg(long, default_value = "100")]
        limit: usize,
    },
    /// Show one user with their conversations
    Show { id: i64 },
    /// Update a user's flags or name
    Update {
        id: i64,
        /// Grant or revoke admin rights
        #[arg(long)]
        admin: Option<bool>,
        /// Activate or deactivate the account
        #[arg(long)]
        active: Option<bool>,
        /// Set the display name
        #[arg(long)]
        name: Option<String>,
    },
    /// Delete a user
    Delete { id: i64 },
}
