//! Commands carried by the control key

use std::fmt;

/// One of the three recognized control values
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Command {
    /// Record the value as the new baseline
    Save,
    /// Compare the value against the baseline
    Assert,
    /// Delete every baseline
    Clear,
}

impl Command {
    /// Parse a control value. Matching is exact: `Save` is not `save`.
    pub fn parse(value: &str) -> Option<Command> {
        match value {
            "save" => Some(Command::Save),
            "assert" => Some(Command::Assert),
            "clear" => Some(Command::Clear),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Command::Save => "save",
            Command::Assert => "assert",
            Command::Clear => "clear",
        }
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
