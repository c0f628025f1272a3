use super::types::Command;

pub fn parse_command(input: &str) -> Option<Command> {
    let trimmed = input.trim();
    if !trimmed.starts_with('/') {
        return None;
    }

    let mut parts = trimmed.splitn(2, char::is_whitespace);
    let cmd = parts.next()?.to_lowercase();

    match cmd.as_str() {
        "/new" | "/reset" => Some(Command::New),
        "/status" => Some(Command::Status),
        "/help" | "/?" => Some(Command::Help),
        "/quit" | "/exit" => Some(Command::Quit),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_command() {
        assert_eq!(parse_command("/new"), Some(Command::New));
    }

    #[test]
    fn reset_alias() {
        assert_eq!(parse_command("/reset"), Some(Command::New));
    }

    #[test]
    fn status_command() {
        assert_eq!(parse_command("/status"), Some(Command::Status));
    }

    #[test]
    fn status_case_insensitive() {
        assert_eq!(parse_command("/STATUS"), Some(Command::Status));
    }

    #[test]
    fn quit_and_exit() {
        assert_eq!(parse_command("/quit"), Some(Command::Quit));
        assert_eq!(parse_command("/exit"), Some(Command::Quit));
    }

    #[test]
    fn help_question_mark() {
        assert_eq!(parse_command("/?"), Some(Command::Help));
    }

    #[test]
    fn plain_text_returns_none() {
        assert_eq!(parse_command("hello"), None);
    }

    #[test]
    fn unknown_command_returns_none() {
        assert_eq!(parse_command("/unknown"), None);
    }

    #[test]
    fn leading_whitespace_accepted() {
        assert_eq!(parse_command("  /new"), Some(Command::New));
    }

    #[test]
    fn command_ignores_extra_args() {
        assert_eq!(parse_command("/status extra args"), Some(Command::Status));
    }
}
