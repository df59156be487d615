use crate::locale::Locale;
use crate::scene::{Input, ItemId};
use orbitkit::{Bounds, Point};
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq)]
pub enum AppEvent {
    Input(Input),
    ConfigReload,
    Unmount,
}

impl From<Input> for AppEvent {
    fn from(input: Input) -> Self {
        AppEvent::Input(input)
    }
}

#[derive(Debug, Error, PartialEq)]
pub enum EventParseError {
    #[error("empty command")]
    Empty,
    #[error("unknown command '{0}'")]
    Unknown(String),
    #[error("'{command}' expects {expected}")]
    Arguments {
        command: &'static str,
        expected: &'static str,
    },
}

fn pair(command: &'static str, args: &[&str]) -> Result<(f64, f64), EventParseError> {
    let bad = || EventParseError::Arguments {
        command,
        expected: "two numbers",
    };
    match args {
        [a, b] => Ok((a.parse().map_err(|_| bad())?, b.parse().map_err(|_| bad())?)),
        _ => Err(bad()),
    }
}

fn single<'a>(command: &'static str, args: &[&'a str]) -> Result<&'a str, EventParseError> {
    match args {
        [value] => Ok(*value),
        _ => Err(EventParseError::Arguments {
            command,
            expected: "one argument",
        }),
    }
}

/// One line of the control socket protocol, e.g. `move 120 80` or `hover react`.
impl FromStr for AppEvent {
    type Err = EventParseError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let mut words = line.split_whitespace();
        let command = words.next().ok_or(EventParseError::Empty)?;
        let args: Vec<&str> = words.collect();

        let input = match command.to_ascii_lowercase().as_str() {
            "enter" => Input::PointerEnter,
            "leave" => Input::PointerLeave,
            "move" => {
                let (x, y) = pair("move", &args)?;
                Input::PointerMove(Point::new(x, y))
            }
            "resize" => {
                let (w, h) = pair("resize", &args)?;
                Input::Resize(Bounds::new(w, h))
            }
            "hover" => Input::NodeEnter(ItemId::from(single("hover", &args)?)),
            "unhover" => Input::NodeLeave(ItemId::from(single("unhover", &args)?)),
            "locale" => {
                let tag = single("locale", &args)?;
                Input::Locale(Locale::from_str(tag).map_err(|_| EventParseError::Arguments {
                    command: "locale",
                    expected: "en or jp",
                })?)
            }
            "reload" => return Ok(AppEvent::ConfigReload),
            "stop" => return Ok(AppEvent::Unmount),
            _ => return Err(EventParseError::Unknown(command.to_string())),
        };

        Ok(AppEvent::Input(input))
    }
}
