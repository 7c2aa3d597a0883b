//! Line commands for the interactive driver.
//!
//! Lines starting with `:` drive the session directly; anything else is
//! treated as a spoken transcript.

use shared::domain::Screen;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Line {
    Transcript(String),
    Go(Screen),
    Back,
    Login(Option<String>),
    Logout,
    ToggleLanguage,
    State,
    Help,
    Quit,
    Invalid(String),
}

pub fn parse_line(line: &str) -> Line {
    let line = line.trim();
    let Some(command) = line.strip_prefix(':') else {
        return Line::Transcript(line.to_string());
    };

    let (verb, rest) = command
        .split_once(char::is_whitespace)
        .map(|(verb, rest)| (verb, rest.trim()))
        .unwrap_or((command, ""));

    match verb {
        "go" => match rest.parse::<Screen>() {
            Ok(screen) => Line::Go(screen),
            Err(err) => Line::Invalid(err.to_string()),
        },
        "back" => Line::Back,
        "login" => Line::Login((!rest.is_empty()).then(|| rest.to_string())),
        "logout" => Line::Logout,
        "lang" => Line::ToggleLanguage,
        "state" => Line::State,
        "help" => Line::Help,
        "quit" | "q" => Line::Quit,
        other => Line::Invalid(format!("unknown command ':{other}'")),
    }
}

pub const HELP: &str = "\
:go <screen>    navigate to a screen (e.g. :go calendar-view)
:back           go back one screen
:login [name]   sign in
:logout         sign out
:lang           switch between English and Arabic
:state          print the navigation state as JSON
:quit           exit
anything else   handled as a voice command";
