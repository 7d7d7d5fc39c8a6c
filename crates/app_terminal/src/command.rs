/// One line of user input at the form prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    From(String),
    To(String),
    Swap,
    Translate,
    Languages(Option<String>),
    Show,
    Clear,
    Help,
    Quit,
    /// Text appended to the input area.
    Text(String),
    Unknown(String),
}

/// Lines starting with `:` are commands, `::` escapes a literal colon, and an
/// empty line submits the form.
pub fn parse(line: &str) -> Command {
    let line = line.trim_end_matches(['\r', '\n']);
    if line.trim().is_empty() {
        return Command::Translate;
    }
    if let Some(literal) = line.strip_prefix("::") {
        return Command::Text(format!(":{literal}"));
    }
    let Some(rest) = line.strip_prefix(':') else {
        return Command::Text(line.to_string());
    };

    let rest = rest.trim();
    let (name, arg) = match rest.split_once(char::is_whitespace) {
        Some((name, arg)) => (name, Some(arg.trim()).filter(|arg| !arg.is_empty())),
        None => (rest, None),
    };

    match (name.to_ascii_lowercase().as_str(), arg) {
        ("from" | "source", Some(arg)) => Command::From(arg.to_string()),
        ("to" | "target", Some(arg)) => Command::To(arg.to_string()),
        ("swap", None) => Command::Swap,
        ("go" | "translate", None) => Command::Translate,
        ("langs" | "languages", filter) => Command::Languages(filter.map(str::to_string)),
        ("show", None) => Command::Show,
        ("clear", None) => Command::Clear,
        ("help" | "?", None) => Command::Help,
        ("quit" | "q" | "exit", None) => Command::Quit,
        _ => Command::Unknown(line.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_lines_are_text() {
        assert_eq!(parse("hello world\n"), Command::Text("hello world".into()));
        assert_eq!(parse("::) smile"), Command::Text(":) smile".into()));
    }

    #[test]
    fn blank_line_translates() {
        assert_eq!(parse(""), Command::Translate);
        assert_eq!(parse("   \r\n"), Command::Translate);
        assert_eq!(parse(":go"), Command::Translate);
    }

    #[test]
    fn language_commands_keep_multi_word_names() {
        assert_eq!(
            parse(":to  Chinese (Simplified) "),
            Command::To("Chinese (Simplified)".into())
        );
        assert_eq!(parse(":FROM auto"), Command::From("auto".into()));
        assert_eq!(parse(":langs kur"), Command::Languages(Some("kur".into())));
        assert_eq!(parse(":langs"), Command::Languages(None));
    }

    #[test]
    fn malformed_commands_are_unknown() {
        assert_eq!(parse(":to"), Command::Unknown(":to".into()));
        assert_eq!(parse(":swap now"), Command::Unknown(":swap now".into()));
        assert_eq!(parse(":dance"), Command::Unknown(":dance".into()));
    }
}
