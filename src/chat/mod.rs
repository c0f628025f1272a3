pub mod envelope;
pub mod log;
pub mod manager;

pub use envelope::{Outbound, ServerEvent};
pub use log::{ChatLog, LogEntry, Message, Role};
pub use manager::{ChannelHandle, ChannelOptions, ConnectionState, DEFAULT_RECONNECT_DELAY};
