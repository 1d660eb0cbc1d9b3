//! Integration tests for chord diagram generation
//!
//! Tests the full pipeline from instrument and chord names to LilyPond source.

use chord_diagram::{generate, generate_with_table, DiagramError, InstrumentTable};

fn fretboards_block(source: &str) -> &str {
    let start = source.find("\\new FretBoards").expect("fretboards block");
    &source[start..]
}

#[test]
fn test_guitar_single_chord() {
    let source = generate("guitar", &["C"], 60).unwrap();
    assert!(source.contains("chord = \\chordmode {\n  c1\n}"));
    assert!(source.contains("\\include \"predefined-guitar-fretboards.ly\""));

    let fretboards = fretboards_block(&source);
    assert!(fretboards.contains("\\set Staff.stringTunings = #guitar-tuning"));
    assert!(!source.contains("\\transpose"));
}

#[test]
fn test_cajun_is_transposed_mandolin() {
    let source = generate("cajun", &["Am"], 60).unwrap();
    assert!(source.contains("  a1:m\n"));

    let fretboards = fretboards_block(&source);
    assert!(fretboards.contains("\\set Staff.stringTunings = #mandolin-tuning"));
    assert!(fretboards.contains("\\transpose f g \\chord"));
}

#[test]
fn test_every_instrument_generates() {
    let table = InstrumentTable::builtin().unwrap();
    let names: Vec<String> = table.names().map(String::from).collect();
    for name in names {
        let source = generate_with_table(&table, &name, &["G7", "Dsus2"], 60).unwrap();
        assert!(source.contains("g1:7 d1:sus2"), "{}", name);
        assert_eq!(source.matches("\\include").count(), 1, "{}", name);
    }
}

#[test]
fn test_chords_keep_input_order() {
    let source = generate("ukulele", &["Bb", "D#sus2", "C", "Am", "G7"], 60).unwrap();
    assert!(source.contains("  bes1 dis1:sus2 c1 a1:m g1:7\n"));
}

#[test]
fn test_staff_size_in_preamble() {
    let source = generate("mandolin", &["G"], 32).unwrap();
    assert!(source.starts_with("\\version \"2.22.1\"\n\n#(set-global-staff-size 32)\n"));
    assert!(source.contains("#(ly:set-option 'crop #t)"));
}

#[test]
fn test_unknown_instrument() {
    let result = generate("banjo", &["C"], 60);
    assert!(matches!(result, Err(DiagramError::UnknownInstrument(ref n)) if n == "banjo"));
}

#[test]
fn test_bad_chord_rejected() {
    for chord in ["H", "", "7C"] {
        let result = generate("guitar", &["C", chord], 60);
        assert!(
            matches!(result, Err(DiagramError::InvalidChordToken(ref c)) if c == chord),
            "{:?} should be rejected",
            chord
        );
    }
}

#[test]
fn test_instrument_checked_before_chords() {
    let result = generate("banjo", &["H"], 60);
    assert!(matches!(result, Err(DiagramError::UnknownInstrument(_))));
}

#[test]
fn test_invalid_arguments() {
    let empty: [&str; 0] = [];
    assert!(matches!(
        generate("guitar", &empty, 60),
        Err(DiagramError::InvalidArgument(_))
    ));

    let err = generate("guitar", &["C"], 0).unwrap_err();
    assert_eq!(err.to_string(), "Invalid size: 0");
}
