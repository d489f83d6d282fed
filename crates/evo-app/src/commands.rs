//! Slash-command tokenizer and dispatch table.
//!
//! One tokenizer splits the leading `/word` from the remainder; everything
//! not matching the closed command set (and not empty) is a chat turn.

/// The closed interactive command set. Arguments are carried verbatim,
/// trimmed; `None` means the command was given without one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command<'a> {
    Help,
    Clear,
    Role(Option<&'a str>),
    Mode(Option<&'a str>),
    Exit,
    Save(Option<&'a str>),
    Load(Option<&'a str>),
    List,
    LoadFile(Option<&'a str>),
    UnloadFile,
    Calc(Option<&'a str>),
    Convert(Option<&'a str>),
    Pw(Option<&'a str>),
    /// A `/word` outside the command set.
    Unknown(&'a str),
    /// Plain input, forwarded to the model.
    Chat(&'a str),
}

/// Tokenize one line of input. Commands are matched literally and
/// case-sensitively; bare `exit` is accepted alongside `/exit`.
pub fn parse(input: &str) -> Command<'_> {
    let input = input.trim();

    if input.eq_ignore_ascii_case("exit") {
        return Command::Exit;
    }
    if !input.starts_with('/') {
        return Command::Chat(input);
    }

    let (word, rest) = match input.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest.trim()),
        None => (input, ""),
    };
    let arg = if rest.is_empty() { None } else { Some(rest) };

    match word {
        "/help" => Command::Help,
        "/clear" => Command::Clear,
        "/role" => Command::Role(arg),
        "/mode" => Command::Mode(arg),
        "/exit" => Command::Exit,
        "/save" => Command::Save(arg),
        "/load" => Command::Load(arg),
        "/list" => Command::List,
        "/loadfile" => Command::LoadFile(arg),
        "/unloadfile" => Command::UnloadFile,
        "/calc" => Command::Calc(arg),
        "/convert" => Command::Convert(arg),
        "/pw" => Command::Pw(arg),
        _ => Command::Unknown(word),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bare_words_are_chat_turns() {
        assert_eq!(parse("hello there"), Command::Chat("hello there"));
        assert_eq!(parse("  padded  "), Command::Chat("padded"));
    }

    #[test]
    fn exit_forms() {
        assert_eq!(parse("/exit"), Command::Exit);
        assert_eq!(parse("exit"), Command::Exit);
        assert_eq!(parse("EXIT"), Command::Exit);
    }

    #[test]
    fn commands_without_arguments() {
        assert_eq!(parse("/help"), Command::Help);
        assert_eq!(parse("/clear"), Command::Clear);
        assert_eq!(parse("/list"), Command::List);
        assert_eq!(parse("/unloadfile"), Command::UnloadFile);
        assert_eq!(parse("/role"), Command::Role(None));
        assert_eq!(parse("/save"), Command::Save(None));
    }

    #[test]
    fn commands_with_arguments() {
        assert_eq!(parse("/calc 2 + 2"), Command::Calc(Some("2 + 2")));
        assert_eq!(
            parse("/convert km_to_miles 10"),
            Command::Convert(Some("km_to_miles 10"))
        );
        assert_eq!(parse("/pw hunter2"), Command::Pw(Some("hunter2")));
        assert_eq!(parse("/save work"), Command::Save(Some("work")));
        assert_eq!(
            parse("/loadfile notes/todo.txt"),
            Command::LoadFile(Some("notes/todo.txt"))
        );
        assert_eq!(
            parse("/role You are a pirate."),
            Command::Role(Some("You are a pirate."))
        );
    }

    #[test]
    fn matching_is_case_sensitive() {
        assert_eq!(parse("/Help"), Command::Unknown("/Help"));
        assert_eq!(parse("/CLEAR"), Command::Unknown("/CLEAR"));
    }

    #[test]
    fn unknown_slash_words_are_flagged() {
        assert_eq!(parse("/frobnicate now"), Command::Unknown("/frobnicate"));
    }

    #[test]
    fn empty_input_is_an_empty_chat_turn() {
        assert_eq!(parse("   "), Command::Chat(""));
    }
}
