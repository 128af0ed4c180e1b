use color_print::cprintln;
use std::error::Error as _;

use crate::error::Error;

#[derive(Debug)]
pub enum Msg {
    Error(String),
    Warn(String),
    Note(String),
}

impl Msg {
    pub fn print(&self) {
        match self {
            Msg::Error(msg) => cprintln!("<red,bold>error</>: {}", msg),
            Msg::Warn(msg) => cprintln!("<yellow,bold>warn</>: {}", msg),
            Msg::Note(msg) => cprintln!("<green,bold>note</>: {}", msg),
        }
    }
}

impl From<&Error> for Msg {
    fn from(err: &Error) -> Self {
        // Fold the io/yaml cause into the line so one diagnostic says it all.
        let text = match err.source() {
            Some(cause) => format!("{err}: {cause}"),
            None => err.to_string(),
        };
        match err {
            Error::MissingInput(_) => Msg::Note(text),
            Error::FileRead(..) | Error::DirRead(..) => Msg::Warn(text),
            _ => Msg::Error(text),
        }
    }
}
