use std::str::FromStr;

use thiserror::Error;

pub const HELP: &str = "\
commands:
  add <name>      put a participant on the wheel
  remove <name>   take a participant off the wheel
  spin            spin the roulette and draw a pair
  reset           put everyone back on the wheel
  wait            wait for the wheel to stop
  show            print the current state
  help            print this message
  quit            leave";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Add(String),
    Remove(String),
    Spin,
    Reset,
    Wait,
    Show,
    Help,
    Quit,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseError {
    #[error("unknown command `{0}`, type `help`")]
    Unknown(String),

    #[error("`{0}` needs a name")]
    MissingName(&'static str),

    #[error("`{0}` takes no arguments")]
    UnexpectedArgument(&'static str),
}

impl FromStr for Command {
    type Err = ParseError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let line = line.trim();
        let (word, rest) = match line.split_once(char::is_whitespace) {
            Some((word, rest)) => (word, rest.trim()),
            None => (line, ""),
        };

        let bare = |command: Command, name: &'static str| {
            if rest.is_empty() {
                Ok(command)
            } else {
                Err(ParseError::UnexpectedArgument(name))
            }
        };

        match word.to_ascii_lowercase().as_str() {
            "add" | "a" if rest.is_empty() => Err(ParseError::MissingName("add")),
            "add" | "a" => Ok(Command::Add(rest.to_string())),
            "remove" | "rm" if rest.is_empty() => Err(ParseError::MissingName("remove")),
            "remove" | "rm" => Ok(Command::Remove(rest.to_string())),
            "spin" | "s" => bare(Command::Spin, "spin"),
            "reset" => bare(Command::Reset, "reset"),
            "wait" | "w" => bare(Command::Wait, "wait"),
            "show" | "" => bare(Command::Show, "show"),
            "help" | "?" => bare(Command::Help, "help"),
            "quit" | "exit" | "q" => bare(Command::Quit, "quit"),
            _ => Err(ParseError::Unknown(word.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_keep_inner_spaces() {
        assert_eq!(
            "add   Ana Maria  ".parse(),
            Ok(Command::Add("Ana Maria".to_string()))
        );
        assert_eq!("rm Bob".parse(), Ok(Command::Remove("Bob".to_string())));
    }

    #[test]
    fn keywords_are_case_insensitive() {
        assert_eq!("SPIN".parse(), Ok(Command::Spin));
        assert_eq!(" Reset ".parse(), Ok(Command::Reset));
        assert_eq!("".parse(), Ok(Command::Show));
        assert_eq!("exit".parse(), Ok(Command::Quit));
        assert_eq!("wait".parse(), Ok(Command::Wait));
    }

    #[test]
    fn rejects_bad_input() {
        assert_eq!("add".parse::<Command>(), Err(ParseError::MissingName("add")));
        assert_eq!(
            "remove  ".parse::<Command>(),
            Err(ParseError::MissingName("remove"))
        );
        assert_eq!(
            "spin now".parse::<Command>(),
            Err(ParseError::UnexpectedArgument("spin"))
        );
        assert_eq!(
            "dance".parse::<Command>(),
            Err(ParseError::Unknown("dance".to_string()))
        );
    }
}
