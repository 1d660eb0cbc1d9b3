//! # Chord Names
//!
//! Validates user-facing chord names (`C`, `Am`, `G7`, `Bbmaj7`, `D#sus2`) and
//! translates them into LilyPond chord-mode entries.
//!
//! ## Accepted Syntax
//! - A root letter `A`-`G`, either case
//! - An optional accidental `#` or `b`
//! - An optional suffix of ASCII letters and digits, passed through untouched
//!
//! The check is purely syntactic. `Gsus99` is accepted and left for LilyPond
//! to interpret.
//!
//! ## Translation
//! | Chord | LilyPond |
//! |-------|----------|
//! | `C` | `c1` |
//! | `G7` | `g1:7` |
//! | `Bb` | `bes1` |
//! | `D#sus2` | `dis1:sus2` |
//!
//! ```rust
//! use chord_diagram::chord::{chords_code, ChordToken};
//!
//! let chords = vec![ChordToken::parse("C")?, ChordToken::parse("Am")?];
//! assert_eq!(chords_code(&chords), "c1 a1:m");
//! # Ok::<(), chord_diagram::DiagramError>(())
//! ```

use crate::error::DiagramError;
use once_cell::sync::Lazy;
use regex::Regex;
use std::fmt;
use std::str::FromStr;

// Case-insensitive like the root letter; ASCII only so byte offsets are char offsets.
static CHORD_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i-u)^[A-G][#b]?[A-Za-z0-9]*$").expect("chord pattern is a valid regex")
});

/// Every chord is entered as a whole note.
const CHORD_DURATION: &str = "1";

/// Separates the root from the chord quality in chord mode.
const QUALITY_SEPARATOR: char = ':';

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Accidental {
    Sharp,
    Flat,
}

impl Accidental {
    fn from_char(c: char) -> Option<Accidental> {
        match c {
            '#' => Some(Accidental::Sharp),
            'b' => Some(Accidental::Flat),
            _ => None,
        }
    }

    /// The Dutch note-name suffix LilyPond uses for this accidental.
    pub fn lilypond_suffix(self) -> &'static str {
        match self {
            Accidental::Sharp => "is",
            Accidental::Flat => "es",
        }
    }
}

/// A chord name that passed validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChordToken(String);

impl ChordToken {
    /// Validate a raw chord argument.
    pub fn parse(raw: &str) -> Result<ChordToken, DiagramError> {
        if CHORD_PATTERN.is_match(raw) {
            Ok(ChordToken(raw.to_string()))
        } else {
            Err(DiagramError::InvalidChordToken(raw.to_string()))
        }
    }

    /// The chord exactly as the user typed it.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn root(&self) -> char {
        // The pattern guarantees a leading ASCII letter.
        self.0.as_bytes()[0] as char
    }

    /// Only a lowercase `b` counts as a flat; `B` belongs to the suffix.
    pub fn accidental(&self) -> Option<Accidental> {
        self.0.as_bytes().get(1).and_then(|&b| Accidental::from_char(b as char))
    }

    /// Everything after the root and accidental, possibly empty.
    pub fn suffix(&self) -> &str {
        let start = if self.accidental().is_some() { 2 } else { 1 };
        &self.0[start..]
    }

    /// The chord-mode entry for this chord.
    pub fn fragment(&self) -> NotationFragment<'_> {
        NotationFragment {
            root: self.root().to_ascii_lowercase(),
            accidental: self.accidental(),
            suffix: self.suffix(),
        }
    }
}

impl FromStr for ChordToken {
    type Err = DiagramError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ChordToken::parse(s)
    }
}

impl fmt::Display for ChordToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// One chord in LilyPond chord-mode syntax, borrowed from its [`ChordToken`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NotationFragment<'a> {
    pub root: char,
    pub accidental: Option<Accidental>,
    pub suffix: &'a str,
}

impl fmt::Display for NotationFragment<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.root)?;
        if let Some(accidental) = self.accidental {
            f.write_str(accidental.lilypond_suffix())?;
        }
        f.write_str(CHORD_DURATION)?;
        if !self.suffix.is_empty() {
            write!(f, "{}{}", QUALITY_SEPARATOR, self.suffix)?;
        }
        Ok(())
    }
}

/// Convert a chord name to its LilyPond code.
pub fn chord_code(chord: &ChordToken) -> String {
    chord.fragment().to_string()
}

/// Convert chord names to a space-separated chord-mode sequence, in order.
pub fn chords_code(chords: &[ChordToken]) -> String {
    chords.iter().map(chord_code).collect::<Vec<_>>().join(" ")
}

/// Validate every chord argument, stopping at the first bad one.
pub fn parse_chords<S: AsRef<str>>(raw: &[S]) -> Result<Vec<ChordToken>, DiagramError> {
    raw.iter().map(|c| ChordToken::parse(c.as_ref())).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn code(raw: &str) -> String {
        chord_code(&ChordToken::parse(raw).unwrap())
    }

    #[test]
    fn test_plain_major() {
        assert_eq!(code("C"), "c1");
    }

    #[test]
    fn test_suffix_without_accidental() {
        assert_eq!(code("G7"), "g1:7");
        assert_eq!(code("Am"), "a1:m");
    }

    #[test]
    fn test_flat() {
        assert_eq!(code("Bb"), "bes1");
        assert_eq!(code("Bbmaj7"), "bes1:maj7");
    }

    #[test]
    fn test_sharp_with_suffix() {
        assert_eq!(code("D#sus2"), "dis1:sus2");
        assert_eq!(code("F#m7"), "fis1:m7");
    }

    #[test]
    fn test_lowercase_root_accepted() {
        assert_eq!(code("e"), "e1");
        assert_eq!(code("ebm"), "ees1:m");
    }

    #[test]
    fn test_suffix_case_preserved() {
        assert_eq!(code("CM7"), "c1:M7");
    }

    #[test]
    fn test_uppercase_b_is_not_a_flat() {
        // The pattern is case-insensitive, but only `b` is read as a flat.
        let chord = ChordToken::parse("CB7").unwrap();
        assert_eq!(chord.accidental(), None);
        assert_eq!(chord.suffix(), "B7");
        assert_eq!(chord_code(&chord), "c1:B7");
    }

    #[test]
    fn test_nonsense_suffix_accepted() {
        assert_eq!(code("Gsus99"), "g1:sus99");
    }

    #[test]
    fn test_fragment_parts() {
        let chord = ChordToken::parse("Ebdim").unwrap();
        let fragment = chord.fragment();
        assert_eq!(fragment.root, 'e');
        assert_eq!(fragment.accidental, Some(Accidental::Flat));
        assert_eq!(fragment.suffix, "dim");
    }

    #[test]
    fn test_rejects_malformed_chords() {
        for raw in ["", "H", "7C", "C#&", "C-7", "C/G", "Cmaj7 ", "Cé", "##"] {
            match ChordToken::parse(raw) {
                Err(DiagramError::InvalidChordToken(s)) => assert_eq!(s, raw),
                other => panic!("expected {:?} to be rejected, got {:?}", raw, other),
            }
        }
    }

    #[test]
    fn test_chords_code_keeps_order() {
        let chords = parse_chords(&["C", "Am", "G7"]).unwrap();
        assert_eq!(chords_code(&chords), "c1 a1:m g1:7");
    }

    #[test]
    fn test_parse_chords_stops_at_first_error() {
        let err = parse_chords(&["C", "X", "Y"]).unwrap_err();
        assert!(matches!(err, DiagramError::InvalidChordToken(ref s) if s == "X"));
    }

    #[test]
    fn test_from_str() {
        let chord: ChordToken = "Dsus2".parse().unwrap();
        assert_eq!(chord.to_string(), "Dsus2");
        assert_eq!(chord.as_str(), "Dsus2");
    }
}
