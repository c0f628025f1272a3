/// In-chat slash command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Reset the log to a fresh greeting; the session identifier survives.
    New,
    /// Show connection and session state.
    Status,
    Help,
    Quit,
}
