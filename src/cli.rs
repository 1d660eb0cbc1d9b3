//! Command-line surface of the `chord-diagram` binary.

use crate::chord::ChordToken;
use crate::error::DiagramError;
use crate::instrument::{Instrument, InstrumentTable};
use crate::lilypond::DEFAULT_STAFF_SIZE;
use clap::error::{ContextKind, ContextValue, ErrorKind};
use clap::{Arg, ArgAction, CommandFactory, FromArgMatches, Parser};
use std::ffi::OsString;
use std::path::PathBuf;

pub const PROGRAM_NAME: &str = "chord-diagram";

pub const PROGRAM_VERSION: &str = env!("CARGO_PKG_VERSION");

const CHORD_EXAMPLES: [&str; 4] = ["C", "Am", "G7", "Dsus2"];

#[derive(Parser, Debug, Clone, PartialEq, Eq)]
#[command(
    name = PROGRAM_NAME,
    version,
    disable_version_flag = true,
    about = "Draw chord diagrams for fretted string instruments with LilyPond",
    override_usage = "chord-diagram [option] [instrument] [chord] ..."
)]
pub struct Options {
    /// Output file name
    #[arg(short = 'o', long = "output", value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Write LilyPond code instead of a chord diagram (also: -ly)
    #[arg(long = "lilypond")]
    pub lilypond: bool,

    /// Global staff size of the diagram
    #[arg(
        short = 's',
        long = "size",
        value_name = "N",
        default_value_t = DEFAULT_STAFF_SIZE,
        value_parser = parse_size,
        allow_negative_numbers = true
    )]
    pub size: u32,

    #[arg(value_name = "INSTRUMENT")]
    pub instrument: String,

    #[arg(value_name = "CHORD", required = true, num_args = 1..)]
    pub chords: Vec<String>,
}

/// A positive staff size.
fn parse_size(raw: &str) -> Result<u32, String> {
    match raw.parse::<u32>() {
        Ok(size) if size > 0 => Ok(size),
        _ => Err(format!("Invalid size: {}", raw)),
    }
}

/// Instrument list, instrument notes and chord examples shown after `--help`.
pub fn usage_notes(table: &InstrumentTable) -> String {
    let mut text = String::from("Instruments:\n\n");
    for name in table.names() {
        text.push_str(&format!("* {}\n", name));
    }

    let notes: Vec<&str> = table.iter().filter_map(|i| i.note.as_deref()).collect();
    if !notes.is_empty() {
        text.push('\n');
        text.push_str(&notes.join(" "));
        text.push('\n');
    }

    text.push_str("\nChord Examples:\n\n");
    for chord in CHORD_EXAMPLES {
        text.push_str(&format!("* {}\n", chord));
    }
    text.push_str("\nEach chord belongs to one command-line parameter, separated by a space");
    text
}

/// The clap command with `-v/--version` and the instrument notes attached.
pub fn command(table: &InstrumentTable) -> clap::Command {
    Options::command()
        .arg(
            Arg::new("version")
                .short('v')
                .long("version")
                .action(ArgAction::Version)
                .help("Print version"),
        )
        .after_help(usage_notes(table))
}

/// Rewrite the two-letter short flag `-ly`, which clap would read as `-l -y`.
pub fn normalize_args<I, T>(args: I) -> Vec<OsString>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString>,
{
    args.into_iter()
        .map(Into::into)
        .map(|arg| if arg == "-ly" { OsString::from("--lilypond") } else { arg })
        .collect()
}

/// Parse a full argument list, program name first.
pub fn parse_args<I, T>(table: &InstrumentTable, args: I) -> Result<Options, clap::Error>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString>,
{
    let mut command = command(table);
    let matches = command.try_get_matches_from_mut(normalize_args(args))?;
    Options::from_arg_matches(&matches).map_err(|e| e.format(&mut command))
}

fn invalid_arg(err: &clap::Error) -> Option<&str> {
    match err.get(ContextKind::InvalidArg) {
        Some(ContextValue::String(arg)) => Some(arg.as_str()),
        _ => None,
    }
}

/// The tool's own wording for a bad `--output` or `--size` value.
///
/// Returns `None` for every other clap error.
pub fn argument_error(err: &clap::Error) -> Option<DiagramError> {
    let arg = invalid_arg(err)?;
    let message = match err.kind() {
        ErrorKind::InvalidValue if arg.starts_with("--output") => "No file name specified".to_string(),
        ErrorKind::InvalidValue if arg.starts_with("--size") => "No size specified".to_string(),
        ErrorKind::ValueValidation if arg.starts_with("--size") => {
            match err.get(ContextKind::InvalidValue) {
                Some(ContextValue::String(value)) => format!("Invalid size: {}", value),
                _ => return None,
            }
        }
        _ => return None,
    };
    Some(DiagramError::InvalidArgument(message))
}

/// Print the outcome of a failed parse and return the exit status.
///
/// Help and version succeed with 0; every usage error is 1.
pub fn report_parse_error(err: &clap::Error) -> i32 {
    if err.kind() == ErrorKind::DisplayVersion {
        println!("{}", PROGRAM_VERSION);
        return 0;
    }
    if let Some(e) = argument_error(err) {
        eprintln!("{}", e);
        return 1;
    }
    if err.print().is_err() {
        // Nothing reached the terminal, so even help counts as a failure.
        return 1;
    }
    if err.use_stderr() {
        1
    } else {
        0
    }
}

/// `<instrument>-<chord>-<chord>...png`, using the instrument's file stem.
pub fn default_output_name(instrument: &Instrument, chords: &[ChordToken]) -> PathBuf {
    let chords: Vec<&str> = chords.iter().map(ChordToken::as_str).collect();
    PathBuf::from(format!("{}-{}.png", instrument.file_stem(), chords.join("-")))
}
