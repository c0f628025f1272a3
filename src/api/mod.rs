pub mod admin;
pub mod auth;
pub mod client;
pub mod conversations;

pub use admin::{AdminUser, AdminUserDetail, DashboardStats, UserUpdate};
pub use auth::{Credentials, LoginResponse, Token, User};
pub use client::ApiClient;
pub use conversations::{ConversationDetail, ConversationMessage, ConversationSummary};
