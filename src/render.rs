//! # Rendering with LilyPond
//!
//! Runs the `lilypond` executable on a generated document and collects the
//! cropped PNG it produces.
//!
//! Each render gets its own temporary directory. The document and every file
//! LilyPond writes next to it (`.pdf`, `.cropped.pdf`, `.cropped.png`) stay
//! inside it, and the directory is removed when the render returns, whether
//! or not LilyPond succeeded.

use crate::error::DiagramError;
use std::env;
use std::ffi::{OsStr, OsString};
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;
use tempfile::TempDir;
use tracing::{debug, warn};

/// Executable searched for on `PATH`.
pub const LILYPOND: &str = "lilypond";

/// Environment variable naming the renderer executable explicitly.
pub const LILYPOND_ENV: &str = "CHORD_DIAGRAM_LILYPOND";

const SCRIPT_STEM: &str = "diagram";

fn executable_name(name: &str) -> String {
    if cfg!(windows) {
        format!("{}.exe", name)
    } else {
        name.to_string()
    }
}

#[cfg(unix)]
fn is_executable(path: &Path) -> bool {
    use std::os::unix::fs::PermissionsExt;
    fs::metadata(path)
        .map(|m| m.is_file() && m.permissions().mode() & 0o111 != 0)
        .unwrap_or(false)
}

#[cfg(not(unix))]
fn is_executable(path: &Path) -> bool {
    path.is_file()
}

/// Find an executable by name in the current directory or on `PATH`.
pub fn find_executable(name: &str) -> Option<PathBuf> {
    find_executable_in(name, Path::new("."), env::var_os("PATH").as_deref())
}

/// A match in `local_dir` keeps its directory so `Command` does not fall
/// back to a `PATH` search for a bare name.
fn find_executable_in(name: &str, local_dir: &Path, path: Option<&OsStr>) -> Option<PathBuf> {
    let file_name = executable_name(name);
    let local = local_dir.join(&file_name);
    if is_executable(&local) {
        return Some(local);
    }

    env::split_paths(path?)
        .map(|dir| dir.join(&file_name))
        .find(|candidate| is_executable(candidate))
}

/// A LilyPond invocation: the program plus any leading arguments.
#[derive(Debug, Clone)]
pub struct Renderer {
    program: PathBuf,
    args: Vec<OsString>,
}

impl Renderer {
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Renderer {
            program: program.into(),
            args: Vec::new(),
        }
    }

    /// Arguments placed before the output directory and document path.
    pub fn with_args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<OsString>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    /// Use `$CHORD_DIAGRAM_LILYPOND` if set, otherwise search `PATH`.
    pub fn locate() -> Result<Renderer, DiagramError> {
        if let Some(program) = env::var_os(LILYPOND_ENV).filter(|p| !p.is_empty()) {
            let program = PathBuf::from(program);
            debug!(program = %program.display(), "renderer from {}", LILYPOND_ENV);
            return Ok(Renderer::new(program));
        }

        let program = find_executable(LILYPOND).ok_or_else(|| DiagramError::MissingExternalTool {
            program: LILYPOND.to_string(),
        })?;
        debug!(program = %program.display(), "renderer found on PATH");
        Ok(Renderer::new(program))
    }

    pub fn program(&self) -> &Path {
        &self.program
    }

    /// Render `source` and copy the cropped PNG to `output`.
    pub fn render_png(&self, source: &str, output: &Path) -> Result<(), DiagramError> {
        let work = WorkArea::create(source)?;

        debug!(
            program = %self.program.display(),
            script = %work.script().display(),
            "running renderer"
        );
        let result = Command::new(&self.program)
            .args(&self.args)
            .arg("-o")
            .arg(work.dir())
            .arg(work.script())
            .output()
            .map_err(|e| DiagramError::io(&self.program, e))?;

        if !result.status.success() {
            warn!(status = ?result.status.code(), "renderer failed");
            return Err(DiagramError::RenderFailure {
                status: result.status.code(),
                stderr: String::from_utf8_lossy(&result.stderr).into_owned(),
            });
        }

        let png = work.cropped_png();
        fs::copy(&png, output).map_err(|e| DiagramError::io(&png, e))?;
        debug!(output = %output.display(), "wrote diagram");
        Ok(())
    }
}

/// A private temporary directory holding one document and its render output.
///
/// Dropping it removes the directory and everything in it.
#[derive(Debug)]
pub struct WorkArea {
    dir: TempDir,
    script: PathBuf,
}

impl WorkArea {
    pub fn create(source: &str) -> Result<WorkArea, DiagramError> {
        let dir = tempfile::Builder::new()
            .prefix("chord-diagram-")
            .tempdir()
            .map_err(|e| DiagramError::io(env::temp_dir(), e))?;
        let script = dir.path().join(format!("{}.ly", SCRIPT_STEM));
        fs::write(&script, source).map_err(|e| DiagramError::io(&script, e))?;
        debug!(dir = %dir.path().display(), "created work area");
        Ok(WorkArea { dir, script })
    }

    pub fn dir(&self) -> &Path {
        self.dir.path()
    }

    pub fn script(&self) -> &Path {
        &self.script
    }

    /// Where LilyPond writes the cropped image when run with `-o dir`.
    pub fn cropped_png(&self) -> PathBuf {
        self.dir().join(format!("{}.cropped.png", SCRIPT_STEM))
    }
}
