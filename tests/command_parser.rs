use partybot::bot::command::{CommandParser, ParsedLine};

#[test]
fn whitespace_only_line_is_empty() {
    let parser = CommandParser::new('!');
    assert_eq!(parser.parse("   "), ParsedLine::Empty);
}

#[test]
fn plain_chatter_is_ignored_not_an_error() {
    let parser = CommandParser::new('!');
    assert_eq!(parser.parse("what does this bot do"), ParsedLine::Ignored);
}

#[test]
fn marker_and_whitespace_only_is_empty() {
    let parser = CommandParser::new('!');
    assert_eq!(parser.parse("!  \t "), ParsedLine::Empty);
}

#[test]
fn surrounding_whitespace_is_trimmed_before_the_marker_check() {
    let parser = CommandParser::new('!');
    match parser.parse("   !leave   ") {
        ParsedLine::Command(cmd) => {
            assert_eq!(cmd.name, "leave");
            assert!(cmd.args.is_empty());
        }
        other => panic!("expected command, got {:?}", other),
    }
}

#[test]
fn multi_word_argument_joins_with_single_spaces() {
    let parser = CommandParser::new('!');
    match parser.parse("!outfit  Renegade \t Raider") {
        ParsedLine::Command(cmd) => {
            assert_eq!(cmd.name, "outfit");
            assert_eq!(cmd.arg_text(), "Renegade Raider");
        }
        other => panic!("expected command, got {:?}", other),
    }
}

#[test]
fn command_casing_is_normalized_argument_casing_preserved() {
    let parser = CommandParser::new('!');
    match parser.parse("!JOIN SomeUser") {
        ParsedLine::Command(cmd) => {
            assert_eq!(cmd.name, "join");
            assert_eq!(cmd.arg_text(), "SomeUser");
        }
        other => panic!("expected command, got {:?}", other),
    }
}

#[test]
fn configured_marker_replaces_the_default() {
    let parser = CommandParser::new('^');
    assert!(matches!(parser.parse("^exit"), ParsedLine::Command(_)));
    assert_eq!(parser.parse("!exit"), ParsedLine::Ignored);
}
