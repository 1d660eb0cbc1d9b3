//! # LilyPond Output
//!
//! Assembles the complete `.ly` source for a chord diagram: a cropped page
//! holding a chord-name line above a line of fretboards.
//!
//! The inputs are already validated, so assembly cannot fail.

use crate::chord::{chords_code, ChordToken};
use crate::instrument::Instrument;

/// LilyPond language version written at the top of every document.
pub const LILYPOND_VERSION: &str = "2.22.1";

/// Global staff size used when none is given.
pub const DEFAULT_STAFF_SIZE: u32 = 60;

/// Everything needed to produce one diagram.
#[derive(Debug, Clone, Copy)]
pub struct DiagramDocument<'a> {
    pub instrument: &'a Instrument,
    pub chords: &'a [ChordToken],
    pub staff_size: u32,
}

impl<'a> DiagramDocument<'a> {
    pub fn new(instrument: &'a Instrument, chords: &'a [ChordToken], staff_size: u32) -> Self {
        DiagramDocument {
            instrument,
            chords,
            staff_size,
        }
    }

    pub fn to_lilypond(&self) -> String {
        to_lilypond(self)
    }
}

/// Convert a diagram description to LilyPond source.
pub fn to_lilypond(doc: &DiagramDocument) -> String {
    let family = doc.instrument.family;
    let mut ly = preamble(doc.staff_size);
    ly.push('\n');

    ly.push_str("chord = \\chordmode {\n");
    ly.push_str(&format!("  {}\n", chords_code(doc.chords)));
    ly.push_str("}\n");
    ly.push('\n');

    ly.push_str(family.fretboards_include());
    ly.push('\n');
    ly.push('\n');

    ly.push_str("\\score {\n");
    ly.push_str("  <<\n");
    ly.push_str("  \\new ChordNames {\n");
    ly.push_str("    \\chord\n");
    ly.push_str("  }\n");
    ly.push('\n');
    ly.push_str("  \\new FretBoards {\n");
    ly.push_str(&format!(
        "    \\set Staff.stringTunings = {}\n",
        family.string_tunings()
    ));
    // Only the fretboards are transposed; chord names stay as written.
    ly.push_str(&format!(
        "    {}\\chord\n",
        doc.instrument.transposition_prefix()
    ));
    ly.push_str("  }\n");
    ly.push_str("  >>\n");
    ly.push('\n');
    ly.push_str("  \\layout {}\n");
    ly.push_str("}\n");

    ly
}

fn preamble(staff_size: u32) -> String {
    let mut ly = String::new();
    ly.push_str(&format!("\\version \"{}\"\n", LILYPOND_VERSION));
    ly.push('\n');
    ly.push_str(&format!("#(set-global-staff-size {})\n", staff_size));
    ly.push('\n');
    // Crop the page to the diagram so the PNG has no margins.
    ly.push_str("#(ly:set-option 'crop #t)\n");
    ly
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chord::parse_chords;
    use crate::instrument::InstrumentTable;

    fn render(instrument: &str, chords: &[&str], size: u32) -> String {
        let table = InstrumentTable::builtin().unwrap();
        let instrument = table.resolve(instrument).unwrap();
        let chords = parse_chords(chords).unwrap();
        DiagramDocument::new(instrument, &chords, size).to_lilypond()
    }

    #[test]
    fn test_full_guitar_document() {
        let expected = r#"\version "2.22.1"

#(set-global-staff-size 60)

#(ly:set-option 'crop #t)

chord = \chordmode {
  c1 a1:m g1:7
}

\include "predefined-guitar-fretboards.ly"

\score {
  <<
  \new ChordNames {
    \chord
  }

  \new FretBoards {
    \set Staff.stringTunings = #guitar-tuning
    \chord
  }
  >>

  \layout {}
}
"#;
        assert_eq!(render("guitar", &["C", "Am", "G7"], 60), expected);
    }

    #[test]
    fn test_staff_size() {
        let ly = render("ukulele", &["C"], 24);
        assert!(ly.contains("#(set-global-staff-size 24)"));
    }

    #[test]
    fn test_transposed_fretboards() {
        let ly = render("cajun", &["Am"], DEFAULT_STAFF_SIZE);
        assert!(ly.contains("\\include \"predefined-mandolin-fretboards.ly\""));
        assert!(ly.contains("\\set Staff.stringTunings = #mandolin-tuning"));
        assert!(ly.contains("    \\transpose f g \\chord\n"));
        // The chord-name staff is not transposed.
        assert!(ly.contains("  \\new ChordNames {\n    \\chord\n"));
    }

    #[test]
    fn test_baritone_uses_ukulele_tables() {
        let ly = render("baritone", &["G"], DEFAULT_STAFF_SIZE);
        assert!(ly.contains("predefined-ukulele-fretboards.ly"));
        assert!(ly.contains("#ukulele-tuning"));
        assert!(ly.contains("\\transpose c' f \\chord"));
    }
}
