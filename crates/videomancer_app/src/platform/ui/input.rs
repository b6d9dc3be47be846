//! Parses one line of stdin into user events.

use thiserror::Error;
use videomancer_core::{Msg, ParseStyleError, RecordId, Style};

pub const HELP: &str = "\
Commands:
  scenario <text>     set the scenario description
  style <id>          cinematic | clips | timelapse | explainer
  generate [text]     submit the draft (optionally replacing its text first)
  cancel              abort the running generation
  select <id>         show a video from history
  sidebar             show or hide the history sidebar
  show                redraw the screen
  help                this text
  quit                exit";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Messages to feed into the update loop, in order.
    Send(Vec<Msg>),
    Show,
    Help,
    Quit,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InputError {
    #[error("unknown command `{0}` (type `help`)")]
    Unknown(String),
    #[error("`{0}` needs an argument")]
    MissingArgument(&'static str),
    #[error("`{0}` is not a history id")]
    InvalidId(String),
    #[error(transparent)]
    Style(#[from] ParseStyleError),
}

pub fn parse_command(line: &str) -> Result<Command, InputError> {
    let line = line.trim();
    let (word, rest) = match line.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest.trim()),
        None => (line, ""),
    };

    let command = match word.to_ascii_lowercase().as_str() {
        "" | "show" => Command::Show,
        "help" | "?" => Command::Help,
        "quit" | "exit" => Command::Quit,
        "scenario" | "text" => Command::Send(vec![Msg::ScenarioChanged(rest.to_string())]),
        "style" => {
            if rest.is_empty() {
                return Err(InputError::MissingArgument("style"));
            }
            Command::Send(vec![Msg::StyleSelected(rest.parse::<Style>()?)])
        }
        "generate" | "submit" => {
            let mut msgs = Vec::with_capacity(2);
            if !rest.is_empty() {
                msgs.push(Msg::ScenarioChanged(rest.to_string()));
            }
            msgs.push(Msg::SubmitClicked);
            Command::Send(msgs)
        }
        "cancel" => Command::Send(vec![Msg::CancelClicked]),
        "select" => {
            if rest.is_empty() {
                return Err(InputError::MissingArgument("select"));
            }
            let id = rest
                .trim_start_matches('#')
                .parse::<RecordId>()
                .map_err(|_| InputError::InvalidId(rest.to_string()))?;
            Command::Send(vec![Msg::HistorySelected(id)])
        }
        "sidebar" => Command::Send(vec![Msg::SidebarToggled]),
        other => return Err(InputError::Unknown(other.to_string())),
    };
    Ok(command)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generate_with_text_sets_draft_first() {
        assert_eq!(
            parse_command("generate  Attack the northern ridge at dawn "),
            Ok(Command::Send(vec![
                Msg::ScenarioChanged("Attack the northern ridge at dawn".to_string()),
                Msg::SubmitClicked,
            ]))
        );
        assert_eq!(
            parse_command("submit"),
            Ok(Command::Send(vec![Msg::SubmitClicked]))
        );
    }

    #[test]
    fn style_and_select_arguments_are_validated() {
        assert_eq!(
            parse_command("style Clips"),
            Ok(Command::Send(vec![Msg::StyleSelected(Style::Clips)]))
        );
        assert!(matches!(parse_command("style noir"), Err(InputError::Style(_))));
        assert_eq!(
            parse_command("select #3"),
            Ok(Command::Send(vec![Msg::HistorySelected(3)]))
        );
        assert_eq!(
            parse_command("select three"),
            Err(InputError::InvalidId("three".to_string()))
        );
        assert_eq!(
            parse_command("select"),
            Err(InputError::MissingArgument("select"))
        );
    }

    #[test]
    fn simple_commands() {
        assert_eq!(parse_command(""), Ok(Command::Show));
        assert_eq!(parse_command("HELP"), Ok(Command::Help));
        assert_eq!(parse_command("exit"), Ok(Command::Quit));
        assert_eq!(
            parse_command("cancel"),
            Ok(Command::Send(vec![Msg::CancelClicked]))
        );
        assert_eq!(
            parse_command("sidebar"),
            Ok(Command::Send(vec![Msg::SidebarToggled]))
        );
        assert_eq!(
            parse_command("dance"),
            Err(InputError::Unknown("dance".to_string()))
        );
    }
}
