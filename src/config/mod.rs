pub mod schema;

pub use schema::{ChannelConfig, Config, ServerConfig};
