//! Edge case tests for chatstats
//!
//! These tests cover the awkward corners of real exports: stray lines,
//! rejected headers with bodies that span lines, odd names and encodings.

use chatstats::ChatstatsError;
use chatstats::config::AnalysisConfig;
use chatstats::parser::{LineMachine, ParseState, TranscriptParser};
use chatstats::stats::{MentionMatcher, StatsAggregator};
use std::fs;
use std::io::Cursor;
use tempfile::tempdir;

fn parse(lines: &[&str]) -> Vec<chatstats::Record> {
    let config = AnalysisConfig::default();
    TranscriptParser::new(&config).parse_lines(lines)
}

// =========================================================================
// Continuation handling
// =========================================================================

#[test]
fn test_continuation_before_any_header_is_dropped() {
    let records = parse(&["texto suelto", "01/01/24, 10:00 - Ana: hola"]);
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].text, "hola");
}

#[test]
fn test_filtered_header_does_not_adopt_continuations() {
    let records = parse(&[
        "01/01/24, 10:00 - Ana: primero",
        "01/01/24, 10:01 - Meta AI: respuesta larga",
        "que sigue aqui",
        "01/01/24, 10:02 - Pablo: segundo",
    ]);

    assert_eq!(records.len(), 2);
    assert_eq!(records[0].text, "primero");
    assert_eq!(records[1].text, "segundo");
}

#[test]
fn test_bad_timestamp_drops_message_and_continuation() {
    let records = parse(&[
        "01/01/24, 10:00 - Ana: primero",
        "31/02/24, 10:00 - Pablo: fecha imposible",
        "segunda linea",
    ]);

    assert_eq!(records.len(), 1);
    assert_eq!(records[0].text, "primero");
}

#[test]
fn test_system_event_with_colon_is_filtered() {
    let records = parse(&[
        "01/01/24, 10:00 - Ana: Ana añadió a Quique",
        "01/01/24, 10:01 - Ana: bienvenido",
    ]);
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].text, "bienvenido");
}

#[test]
fn test_machine_states() {
    let config = AnalysisConfig::default();
    let mut machine = LineMachine::new(&config);
    assert_eq!(machine.state(), &ParseState::Idle);

    assert!(machine.feed("01/01/24, 10:00 - Ana: hola").is_none());
    assert!(matches!(machine.state(), ParseState::Open(_)));

    let closed = machine.feed("01/01/24, 10:01 - +34 600 111 222: spam");
    assert_eq!(closed.unwrap().participant, "Ana");
    assert_eq!(machine.state(), &ParseState::Suppressed);

    assert!(machine.feed("mas spam").is_none());
    assert!(machine.finish().is_none());
    assert_eq!(machine.summary().dropped_lines, 1);
}

// =========================================================================
// Header variants
// =========================================================================

#[test]
fn test_four_digit_year() {
    let records = parse(&["01/01/2024, 10:00 - Ana: hola"]);
    assert_eq!(records[0].timestamp.to_string(), "2024-01-01 10:00:00");
}

#[test]
fn test_day_first_dates() {
    let records = parse(&["13/02/24, 7:05 - Ana: hola"]);
    assert_eq!(records[0].timestamp.to_string(), "2024-02-13 07:05:00");
}

#[test]
fn test_direction_marks_around_author() {
    let records = parse(&["\u{200E}01/01/24, 10:00 - \u{200E}Ana\u{200E}: hola"]);
    assert_eq!(records[0].participant, "Ana");
}

#[test]
fn test_byte_order_mark_keeps_first_message() {
    let config = AnalysisConfig::default();
    let input = "\u{FEFF}01/01/24, 9:05 - Ana: hola\n01/01/24, 9:06 - Pablo: hey";

    let records = TranscriptParser::new(&config).parse_str(input);
    assert_eq!(records.len(), 2);
    assert_eq!(records[0].participant, "Ana");
    assert_eq!(records[0].text, "hola");

    let streamed = TranscriptParser::new(&config)
        .parse_reader(Cursor::new(input))
        .unwrap();
    assert_eq!(streamed, records);
}

#[test]
fn test_colon_inside_body_is_kept() {
    let records = parse(&["01/01/24, 10:00 - Ana: nota: 10:30 en la puerta"]);
    assert_eq!(records[0].participant, "Ana");
    assert_eq!(records[0].text, "nota: 10:30 en la puerta");
}

#[test]
fn test_crlf_input() {
    let config = AnalysisConfig::default();
    let input = "01/01/24, 10:00 - Ana: hola\r\nsigue\r\n01/01/24, 10:01 - Pablo: adios\r\n";
    let records = TranscriptParser::new(&config)
        .parse_reader(Cursor::new(input))
        .unwrap();

    assert_eq!(records.len(), 2);
    assert_eq!(records[0].text, "hola\nsigue");
    assert_eq!(records[1].text, "adios");
}

#[test]
fn test_unicode_author_names() {
    let records = parse(&[
        "01/01/24, 10:00 - José María 🌻: hola",
        "01/01/24, 10:01 - Иван: привет",
    ]);
    assert_eq!(records[0].participant, "José María 🌻");
    assert_eq!(records[1].participant, "Иван");
}

#[test]
fn test_invalid_utf8_is_fatal() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("roto.txt");
    fs::write(&path, b"01/01/24, 10:00 - Ana: \xff\xfe\n").unwrap();

    let config = AnalysisConfig::default();
    let err = TranscriptParser::new(&config).parse_path(&path).unwrap_err();
    assert!(err.is_utf8());
    assert!(err.to_string().contains("roto.txt"));
}

#[test]
fn test_missing_transcript_is_io_error() {
    let config = AnalysisConfig::default();
    let err = TranscriptParser::new(&config)
        .parse_path(std::path::Path::new("/no/such/chat.txt"))
        .unwrap_err();
    assert!(matches!(err, ChatstatsError::Io(_)));
}

// =========================================================================
// Mentions
// =========================================================================

#[test]
fn test_mentions_are_whole_word_and_case_insensitive() {
    let matcher = MentionMatcher::new(["Ana", "Pablo"]);
    assert_eq!(matcher.mentioned_in("ANA y pablo!"), ["Ana", "Pablo"]);
    assert!(matcher.mentioned_in("Anabel y Pablito").is_empty());
}

#[test]
fn test_repeated_name_counts_once_per_message() {
    let config = AnalysisConfig::default();
    let records = parse(&[
        "01/01/24, 10:00 - Pablo: hola",
        "01/01/24, 10:01 - Ana: Pablo Pablo PABLO",
    ]);
    let report = StatsAggregator::new(&config).analyze(&records);
    assert_eq!(report.mentions.inbound("Pablo"), 1);
}

#[test]
fn test_short_identities_are_never_mentioned() {
    let config = AnalysisConfig::default();
    let records = parse(&[
        "01/01/24, 10:00 - Al: hola",
        "01/01/24, 10:01 - Ana: al final vino Al",
    ]);
    let report = StatsAggregator::new(&config).analyze(&records);
    assert!(report.mentions.edges.is_empty());
}

#[test]
fn test_identity_with_regex_metacharacters() {
    let matcher = MentionMatcher::new(["C++ Dev", "Ana"]);
    assert_eq!(matcher.len(), 2);
    assert_eq!(matcher.mentioned_in("el c++ dev llegó tarde"), ["C++ Dev"]);
    assert!(matcher.mentioned_in("el ccc dev llegó").is_empty());
}

#[test]
fn test_alias_applies_to_mention_targets() {
    let config = AnalysisConfig::default().with_alias("Galletita Ginger", "Pablo");
    let records = TranscriptParser::new(&config).parse_lines([
        "01/01/24, 10:00 - Galletita Ginger: hola",
        "01/01/24, 10:01 - Ana: que tal Pablo",
    ]);
    let report = StatsAggregator::new(&config).analyze(&records);
    assert_eq!(report.mentions.inbound("Pablo"), 1);
    assert_eq!(report.mentions.inbound("Galletita Ginger"), 0);
}

// =========================================================================
// Tie-breaking and text measures
// =========================================================================

#[test]
fn test_favorite_hour_tie_goes_to_first_seen_hour() {
    let config = AnalysisConfig::default();
    let records = parse(&[
        "01/01/24, 22:00 - Ana: tarde",
        "02/01/24, 08:00 - Ana: pronto",
    ]);
    let report = StatsAggregator::new(&config).analyze(&records);
    assert_eq!(report.participant("Ana").unwrap().favorite_hour, Some(22));
}

#[test]
fn test_top_words_tie_goes_to_first_seen_word() {
    let config = AnalysisConfig::default();
    let records = parse(&["01/01/24, 10:00 - Ana: zapato barco zapato barco"]);
    let report = StatsAggregator::new(&config).analyze(&records);
    assert_eq!(
        report.participant("Ana").unwrap().top_words_summary(),
        "zapato (2), barco (2)"
    );
}

#[test]
fn test_top_words_respects_limit() {
    let config = AnalysisConfig::default().with_top_words(2);
    let records = parse(&["01/01/24, 10:00 - Ana: uno dos tres cuatro"]);
    let report = StatsAggregator::new(&config).analyze(&records);
    assert_eq!(report.participant("Ana").unwrap().top_words.len(), 2);
}

#[test]
fn test_numeric_tokens_are_not_words() {
    let config = AnalysisConfig::default();
    let records = parse(&["01/01/24, 10:00 - Ana: mesa 42 mesa2 mesa"]);
    let report = StatsAggregator::new(&config).analyze(&records);
    let ana = report.participant("Ana").unwrap();
    assert_eq!(ana.top_words_summary(), "mesa (2)");
    assert_eq!(ana.word_count, 4);
}

#[test]
fn test_media_must_match_exactly() {
    let config = AnalysisConfig::default();
    let records = parse(&[
        "01/01/24, 10:00 - Ana: <Multimedia omitido>",
        "01/01/24, 10:01 - Ana: <Multimedia omitido> jaja",
    ]);
    let report = StatsAggregator::new(&config).analyze(&records);
    assert_eq!(report.participant("Ana").unwrap().media_count, 1);
}

#[test]
fn test_question_detection_ignores_inner_marks() {
    let config = AnalysisConfig::default();
    let records = parse(&[
        "01/01/24, 10:00 - Ana: ¿vienes?",
        "01/01/24, 10:01 - Ana: ¿vienes? dime",
    ]);
    let report = StatsAggregator::new(&config).analyze(&records);
    assert_eq!(report.participant("Ana").unwrap().question_count, 1);
}

// =========================================================================
// Resources
// =========================================================================

#[test]
fn test_missing_resources_fall_back_to_defaults() {
    let config = AnalysisConfig::from_files(
        Some(std::path::Path::new("/no/aliases.json")),
        Some(std::path::Path::new("/no/stopwords.txt")),
    )
    .unwrap();

    assert!(config.aliases.is_empty());
    assert_eq!(config.exclusions, AnalysisConfig::default().exclusions);
}

#[test]
fn test_malformed_alias_file_is_fatal() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("aliases.json");
    fs::write(&path, "[\"no es un objeto\"]").unwrap();

    let err = AnalysisConfig::from_files(Some(path.as_path()), None).unwrap_err();
    assert!(err.is_invalid_resource());
}
