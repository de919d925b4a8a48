//! Console line parsing: a tiny marker-prefixed command parser.
//!
//! A line is a command only when it starts with the configured marker
//! character (default `!`). Everything else is either [`ParsedLine::Empty`]
//! (whitespace only, no action) or [`ParsedLine::Ignored`] (plain text; the
//! loop prints a hint but takes no action). The parser never fails: malformed
//! input degrades to one of the sentinels.

use log::trace;

use crate::logutil::escape_log;

#[derive(Debug, PartialEq, Eq)]
pub enum ParsedLine {
    /// Blank line, or the bare marker with nothing after it.
    Empty,
    /// Non-blank line without the command marker.
    Ignored,
    Command(ParsedCommand),
}

/// One tokenized command line. `name` is lower-cased; `args` keep their
/// original casing and order.
#[derive(Debug, PartialEq, Eq)]
pub struct ParsedCommand {
    pub name: String,
    pub args: Vec<String>,
}

impl ParsedCommand {
    /// Arguments re-joined with single spaces, the form item names and
    /// identities are passed around in.
    pub fn arg_text(&self) -> String {
        self.args.join(" ")
    }
}

pub struct CommandParser {
    marker: char,
}

impl CommandParser {
    pub fn new(marker: char) -> Self {
        Self { marker }
    }

    pub fn marker(&self) -> char {
        self.marker
    }

    pub fn parse(&self, raw: &str) -> ParsedLine {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return ParsedLine::Empty;
        }
        let Some(body) = trimmed.strip_prefix(self.marker) else {
            return ParsedLine::Ignored;
        };

        let mut tokens = body.split_whitespace();
        let Some(first) = tokens.next() else {
            // Marker followed by nothing (or only whitespace).
            return ParsedLine::Empty;
        };

        let name = first.to_lowercase();
        let args: Vec<String> = tokens.map(|t| t.to_string()).collect();
        trace!("parsed command '{}' from '{}'", name, escape_log(trimmed));
        ParsedLine::Command(ParsedCommand { name, args })
    }
}

impl Default for CommandParser {
    fn default() -> Self {
        Self::new('!')
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_lines_are_empty() {
        let parser = CommandParser::default();
        assert_eq!(parser.parse(""), ParsedLine::Empty);
        assert_eq!(parser.parse("   "), ParsedLine::Empty);
        assert_eq!(parser.parse("\t"), ParsedLine::Empty);
    }

    #[test]
    fn bare_marker_is_empty() {
        let parser = CommandParser::default();
        assert_eq!(parser.parse("!"), ParsedLine::Empty);
        assert_eq!(parser.parse("!   "), ParsedLine::Empty);
    }

    #[test]
    fn plain_text_is_ignored() {
        let parser = CommandParser::default();
        assert_eq!(parser.parse("hello there"), ParsedLine::Ignored);
    }

    #[test]
    fn name_is_lowercased_and_args_joined() {
        let parser = CommandParser::default();
        match parser.parse("!OUTFIT Renegade   Raider") {
            ParsedLine::Command(cmd) => {
                assert_eq!(cmd.name, "outfit");
                assert_eq!(cmd.args, vec!["Renegade", "Raider"]);
                assert_eq!(cmd.arg_text(), "Renegade Raider");
            }
            other => panic!("expected command, got {:?}", other),
        }
    }

    #[test]
    fn alternate_marker() {
        let parser = CommandParser::new('^');
        assert!(matches!(parser.parse("^help"), ParsedLine::Command(_)));
        assert_eq!(parser.parse("!help"), ParsedLine::Ignored);
    }
}
