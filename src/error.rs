//! # Error Types
//!
//! Every failure in the tool is fatal: the binary prints the error on stderr
//! and exits with status 1. Nothing is retried.
//!
//! ## Usage
//! ```rust
//! use chord_diagram::{generate, DiagramError};
//!
//! match generate("banjo", &["C"], 60) {
//!     Ok(source) => println!("{}", source),
//!     Err(DiagramError::UnknownInstrument(name)) => eprintln!("no such instrument: {}", name),
//!     Err(e) => eprintln!("{}", e),
//! }
//! ```

use std::io;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DiagramError {
    /// The renderer executable could not be found on the host.
    #[error("No LilyPond on the system")]
    MissingExternalTool { program: String },

    /// A missing or out-of-range argument.
    ///
    /// # Example
    /// ```
    /// # use chord_diagram::DiagramError;
    /// let err = DiagramError::InvalidArgument("Invalid size: 0".to_string());
    /// assert_eq!(err.to_string(), "Invalid size: 0");
    /// ```
    #[error("{0}")]
    InvalidArgument(String),

    /// The instrument name is not in the instrument table.
    ///
    /// # Example
    /// ```
    /// # use chord_diagram::DiagramError;
    /// let err = DiagramError::UnknownInstrument("banjo".to_string());
    /// assert_eq!(err.to_string(), "Not a valid instrument: banjo");
    /// ```
    #[error("Not a valid instrument: {0}")]
    UnknownInstrument(String),

    /// A chord argument does not look like a chord name.
    ///
    /// # Example
    /// ```
    /// # use chord_diagram::DiagramError;
    /// let err = DiagramError::InvalidChordToken("H7".to_string());
    /// assert_eq!(err.to_string(), "Not a valid chord name: H7");
    /// ```
    #[error("Not a valid chord name: {0}")]
    InvalidChordToken(String),

    /// The renderer exited unsuccessfully. Its stderr is kept verbatim.
    #[error("{stderr}")]
    RenderFailure { status: Option<i32>, stderr: String },

    /// The embedded instrument table is malformed.
    #[error("Invalid instrument table: {0}")]
    InstrumentTable(String),

    #[error("I/O error on '{}': {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl From<serde_yaml::Error> for DiagramError {
    fn from(e: serde_yaml::Error) -> Self {
        DiagramError::InstrumentTable(e.to_string())
    }
}

impl DiagramError {
    /// Attach a path to an I/O error.
    pub fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        DiagramError::Io {
            path: path.into(),
            source,
        }
    }
}
