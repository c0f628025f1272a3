use console::style;
use std::fmt::Display;

/// Green bold — success checkmarks, confirmations
pub fn success<D: Display>(text: D) -> String {
    style(text).green().bold().to_string()
}

/// White bold — section headers, titles
pub fn header<D: Display>(text: D) -> String {
    style(text).white().bold().to_string()
}

/// Dim — subtitles, secondary text, connection notices
pub fn dim<D: Display>(text: D) -> String {
    style(text).dim().to_string()
}

/// Green — confirmed values, ids, names
pub fn value<D: Display>(text: D) -> String {
    style(text).green().to_string()
}

/// Cyan bold — field labels, bullet points
pub fn accent<D: Display>(text: D) -> String {
    style(text).cyan().bold().to_string()
}

/// Cyan bold — the assistant's speaker label
pub fn assistant<D: Display>(text: D) -> String {
    style(text).cyan().bold().to_string()
}

/// Green bold — the local user's speaker label
pub fn user<D: Display>(text: D) -> String {
    style(text).green().bold().to_string()
}

/// Red bold — error log entries
pub fn danger<D: Display>(text: D) -> String {
    style(text).red().bold().to_string()
}
