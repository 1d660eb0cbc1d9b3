pub mod chord;
pub mod cli;
pub mod error;
pub mod instrument;
pub mod lilypond;
pub mod render;

pub use chord::{chord_code, chords_code, parse_chords, ChordToken};
pub use error::*;
pub use instrument::{Instrument, InstrumentTable, Transposition, TuningFamily};
pub use lilypond::{to_lilypond, DiagramDocument, DEFAULT_STAFF_SIZE};
pub use render::Renderer;

/// Generate LilyPond source for a chord diagram.
/// This is the main entry point for the library.
pub fn generate<S: AsRef<str>>(
    instrument: &str,
    chords: &[S],
    staff_size: u32,
) -> Result<String, DiagramError> {
    let table = InstrumentTable::builtin()?;
    generate_with_table(&table, instrument, chords, staff_size)
}

/// Generate LilyPond source using an already loaded instrument table.
pub fn generate_with_table<S: AsRef<str>>(
    table: &InstrumentTable,
    instrument: &str,
    chords: &[S],
    staff_size: u32,
) -> Result<String, DiagramError> {
    if staff_size == 0 {
        return Err(DiagramError::InvalidArgument(format!(
            "Invalid size: {}",
            staff_size
        )));
    }
    if chords.is_empty() {
        return Err(DiagramError::InvalidArgument("No chord specified".to_string()));
    }

    let instrument = table.resolve(instrument)?;
    let chords = parse_chords(chords)?;
    Ok(DiagramDocument::new(instrument, &chords, staff_size).to_lilypond())
}
