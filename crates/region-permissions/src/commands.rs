//! Operator console commands.
//!
//! ```text
//! bypass permissions <true|false>   engage or release the bypass gate
//! force permissions <true|false>    outcome forced while bypassed
//! debug permissions <true|false>    per-check debug logging
//! ```

use serde::{Deserialize, Serialize};

use crate::error::CommandError;

/// A parsed permissions console command.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ConsoleCommand {
    /// Engage or release the bypass gate
    Bypass(bool),
    /// Set the outcome forced while bypassed
    Force(bool),
    /// Toggle per-check debug logging
    Debug(bool),
}

impl ConsoleCommand {
    /// Parse a console line such as `bypass permissions true`.
    ///
    /// The verb and argument are case-insensitive.
    pub fn parse(line: &str) -> Result<Self, CommandError> {
        let words: Vec<&str> = line.split_whitespace().collect();

        let (verb, rest) = match words.as_slice() {
            [verb, noun, rest @ ..] if noun.eq_ignore_ascii_case("permissions") => (verb.to_lowercase(), rest),
            _ => return Err(CommandError::Unknown(line.trim().to_string())),
        };

        let name = format!("{verb} permissions");
        let build: fn(bool) -> ConsoleCommand = match verb.as_str() {
            "bypass" => ConsoleCommand::Bypass,
            "force" => ConsoleCommand::Force,
            "debug" => ConsoleCommand::Debug,
            _ => return Err(CommandError::Unknown(line.trim().to_string())),
        };

        let value = match rest {
            [] => return Err(CommandError::MissingArgument(name)),
            [value] => *value,
            _ => {
                return Err(CommandError::InvalidArgument {
                    command: name,
                    value: rest.join(" "),
                })
            }
        };

        match parse_switch(value) {
            Some(enabled) => Ok(build(enabled)),
            None => Err(CommandError::InvalidArgument {
                command: name,
                value: value.to_string(),
            }),
        }
    }

    /// Get the command name as typed on the console.
    pub fn name(&self) -> &'static str {
        match self {
            ConsoleCommand::Bypass(_) => "bypass permissions",
            ConsoleCommand::Force(_) => "force permissions",
            ConsoleCommand::Debug(_) => "debug permissions",
        }
    }

    /// The boolean argument.
    pub fn value(&self) -> bool {
        match self {
            ConsoleCommand::Bypass(v) | ConsoleCommand::Force(v) | ConsoleCommand::Debug(v) => *v,
        }
    }
}

fn parse_switch(value: &str) -> Option<bool> {
    if value.eq_ignore_ascii_case("true") {
        Some(true)
    } else if value.eq_ignore_ascii_case("false") {
        Some(false)
    } else {
        None
    }
}

/// What a console command did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandOutcome {
    /// The new configuration is in effect
    Applied,
    /// The console is addressing a different scene
    Ignored,
    /// The command was refused; the reason is shown to the operator
    Rejected(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_commands() {
        assert_eq!(ConsoleCommand::parse("bypass permissions true"), Ok(ConsoleCommand::Bypass(true)));
        assert_eq!(ConsoleCommand::parse("force permissions FALSE"), Ok(ConsoleCommand::Force(false)));
        assert_eq!(ConsoleCommand::parse("  Debug Permissions True "), Ok(ConsoleCommand::Debug(true)));
    }

    #[test]
    fn test_parse_errors() {
        let err = ConsoleCommand::parse("bypass permissions").unwrap_err();
        assert_eq!(err, CommandError::MissingArgument("bypass permissions".to_string()));

        let err = ConsoleCommand::parse("debug permissions maybe").unwrap_err();
        assert_eq!(err.error_code(), "INVALID_ARGUMENT");

        let err = ConsoleCommand::parse("force permissions true now").unwrap_err();
        assert_eq!(
            err,
            CommandError::InvalidArgument {
                command: "force permissions".to_string(),
                value: "true now".to_string(),
            }
        );

        assert!(matches!(ConsoleCommand::parse("show regions"), Err(CommandError::Unknown(_))));
        assert!(matches!(ConsoleCommand::parse("grant permissions true"), Err(CommandError::Unknown(_))));
        assert!(matches!(ConsoleCommand::parse(""), Err(CommandError::Unknown(_))));
    }

    #[test]
    fn test_command_accessors() {
        let cmd = ConsoleCommand::Force(true);
        assert_eq!(cmd.name(), "force permissions");
        assert!(cmd.value());
    }
}
