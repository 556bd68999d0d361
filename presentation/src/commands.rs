/// A line typed at the chat prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChatCommand {
    Message(String),
    NewSession,
    UseSession(String),
    Reset,
    History,
    Sessions,
    Help,
    Exit,
    Empty,
    Invalid(String),
}

pub const HELP: &str = "\
/new           start a fresh session
/use <id>      switch to (or create) the session with this id
/reset         clear the current session's history
/history       show the current session's turns
/sessions      list known sessions
/help          show this help
exit | quit    leave the chat";

pub fn parse_command(input: &str) -> ChatCommand {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return ChatCommand::Empty;
    }
    if trimmed.eq_ignore_ascii_case("exit") || trimmed.eq_ignore_ascii_case("quit") {
        return ChatCommand::Exit;
    }
    let Some(rest) = trimmed.strip_prefix('/') else {
        return ChatCommand::Message(trimmed.to_string());
    };

    let (name, arg) = match rest.split_once(char::is_whitespace) {
        Some((name, arg)) => (name, arg.trim()),
        None => (rest, ""),
    };
    match name.to_lowercase().as_str() {
        "new" => ChatCommand::NewSession,
        "use" if arg.is_empty() => ChatCommand::Invalid("usage: /use <session id>".to_string()),
        "use" => ChatCommand::UseSession(arg.to_string()),
        "reset" => ChatCommand::Reset,
        "history" => ChatCommand::History,
        "sessions" => ChatCommand::Sessions,
        "help" => ChatCommand::Help,
        "exit" | "quit" => ChatCommand::Exit,
        other => ChatCommand::Invalid(format!("unknown command '/{}', try /help", other)),
    }
}
