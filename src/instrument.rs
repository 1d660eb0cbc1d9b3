//! # Instruments and Tunings
//!
//! Maps an instrument name to the LilyPond tuning preset, the predefined
//! fretboard include and the transposition used to draw its diagrams.
//!
//! LilyPond ships fretboard tables for three tuning families only. Other
//! instruments reuse one of them and shift the fretboard staff with
//! `\transpose`, so a mandola is drawn as a mandolin a fifth up.
//!
//! | Instrument | Family | Transposition |
//! |------------|--------|---------------|
//! | guitar | guitar | |
//! | guitalele | guitar | `\transpose c' g'` |
//! | ukulele | ukulele | |
//! | baritone | ukulele | `\transpose c' f` |
//! | mandolin | mandolin | |
//! | cajun | mandolin | `\transpose f g` |
//! | mandola | mandolin | `\transpose c' g` |
//!
//! The table lives in `data/instruments.yaml` and is compiled into the
//! binary. Load it once with [`InstrumentTable::builtin`] and pass it to
//! whatever needs it.

use crate::error::DiagramError;
use serde::Deserialize;
use std::collections::HashSet;
use tracing::debug;

const BUILTIN_TABLE: &str = include_str!("../data/instruments.yaml");

/// A tuning preset with a matching set of predefined fretboards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TuningFamily {
    Guitar,
    Ukulele,
    Mandolin,
}

impl TuningFamily {
    /// Value for `\set Staff.stringTunings`.
    pub fn string_tunings(self) -> &'static str {
        match self {
            TuningFamily::Guitar => "#guitar-tuning",
            TuningFamily::Ukulele => "#ukulele-tuning",
            TuningFamily::Mandolin => "#mandolin-tuning",
        }
    }

    /// The `\include` line that loads the predefined fretboards.
    pub fn fretboards_include(self) -> &'static str {
        match self {
            TuningFamily::Guitar => "\\include \"predefined-guitar-fretboards.ly\"",
            TuningFamily::Ukulele => "\\include \"predefined-ukulele-fretboards.ly\"",
            TuningFamily::Mandolin => "\\include \"predefined-mandolin-fretboards.ly\"",
        }
    }
}

/// A `\transpose from to` shift, in LilyPond absolute pitch names.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Transposition {
    pub from: String,
    pub to: String,
}

impl Transposition {
    /// The command as it prefixes a music expression, trailing space included.
    pub fn to_lilypond(&self) -> String {
        format!("\\transpose {} {} ", self.from, self.to)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Instrument {
    pub name: String,
    pub family: TuningFamily,
    #[serde(default)]
    pub transposition: Option<Transposition>,
    #[serde(default)]
    file_stem: Option<String>,
    /// Extra line for the usage text.
    #[serde(default)]
    pub note: Option<String>,
}

impl Instrument {
    /// The fretboard staff prefix; empty when the family tuning is used as is.
    pub fn transposition_prefix(&self) -> String {
        self.transposition
            .as_ref()
            .map(Transposition::to_lilypond)
            .unwrap_or_default()
    }

    /// Prefix for default output file names.
    pub fn file_stem(&self) -> &str {
        self.file_stem.as_deref().unwrap_or(&self.name)
    }
}

/// The closed set of supported instruments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstrumentTable {
    instruments: Vec<Instrument>,
}

impl InstrumentTable {
    /// The table compiled into the binary.
    pub fn builtin() -> Result<InstrumentTable, DiagramError> {
        Self::from_yaml(BUILTIN_TABLE)
    }

    pub fn from_yaml(source: &str) -> Result<InstrumentTable, DiagramError> {
        let instruments: Vec<Instrument> = serde_yaml::from_str(source)?;
        if instruments.is_empty() {
            return Err(DiagramError::InstrumentTable("no instruments defined".to_string()));
        }

        let mut seen = HashSet::new();
        for instrument in &instruments {
            if !seen.insert(instrument.name.as_str()) {
                return Err(DiagramError::InstrumentTable(format!(
                    "duplicate instrument: {}",
                    instrument.name
                )));
            }
        }

        Ok(InstrumentTable { instruments })
    }

    /// Look up an instrument by exact, case-sensitive name.
    pub fn resolve(&self, name: &str) -> Result<&Instrument, DiagramError> {
        let instrument = self
            .instruments
            .iter()
            .find(|i| i.name == name)
            .ok_or_else(|| DiagramError::UnknownInstrument(name.to_string()))?;
        let prefix = instrument.transposition_prefix();
        debug!(
            instrument = %instrument.name,
            family = ?instrument.family,
            transposition = %prefix.trim_end(),
            "resolved instrument"
        );
        Ok(instrument)
    }

    /// Instrument names in table order.
    pub fn names(&self) -> impl Iterator<Item = &str> + '_ {
        self.instruments.iter().map(|i| i.name.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = &Instrument> + '_ {
        self.instruments.iter()
    }
}
