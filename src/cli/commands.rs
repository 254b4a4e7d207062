//! Interactive commands

use std::str::FromStr;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// `a`: record a new game
    Add,
    /// `p`: show the history table
    Print,
    /// `s`: show statistics
    Stats,
    /// `h`: show the command list
    Help,
    /// `q`: save and leave
    Quit,
    /// Blank line
    Noop,
    Unknown(String),
}

impl Command {
    /// Parse one line of input, case-insensitive and trimmed
    pub fn parse(input: &str) -> Self {
        let input = input.trim().to_lowercase();
        match input.as_str() {
            "a" => Command::Add,
            "p" => Command::Print,
            "s" => Command::Stats,
            "h" => Command::Help,
            "q" => Command::Quit,
            "" => Command::Noop,
            _ => Command::Unknown(input),
        }
    }
}

impl FromStr for Command {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Command::parse(s))
    }
}
