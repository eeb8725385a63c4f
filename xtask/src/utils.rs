use std::fmt;
use std::path::{Path, PathBuf};

#[derive(thiserror::Error, Debug)]
pub enum XError {
    #[error("VASM requires {tool} to be installed.")]
    ToolMissing { tool: &'static str },
    #[error("Command already registered: {0}")]
    DuplicateCommand(String),
    #[error("failed to extract from {}: {source}", path.display())]
    Extract {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to list {}: {source}", path.display())]
    ReadDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("walk: {0}")]
    Walk(#[from] walkdir::Error),
    #[error("io: {0}")]
    Io(#[from] std::io::Error),
    #[error("figment: {0}")]
    Figment(#[from] figment::Error),
    #[error("xshell: {0}")]
    Shell(#[from] xshell::Error),
    #[error("Exit")]
    Exit,
}

pub type XResult<T> = Result<T, XError>;

/// Logs at `info` unless `RUST_LOG` says otherwise.
pub fn init_logger() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp(None)
        .init();
}

/// Project root directory
pub fn project_root() -> PathBuf {
    let manifest_dir = Path::new(env!("CARGO_MANIFEST_DIR"));
    manifest_dir
        .parent()
        .unwrap_or(manifest_dir)
        .to_path_buf()
}

/// A single external process call: the program and its arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub program: PathBuf,
    pub args: Vec<String>,
}

impl Invocation {
    pub fn new<I, S>(program: &Path, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Invocation {
            program: program.to_path_buf(),
            args: args.into_iter().map(Into::into).collect(),
        }
    }

    /// Base name of the program, as shown in the echo line.
    pub fn program_name(&self) -> String {
        self.program
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.program.display().to_string())
    }

    /// Runs the process in `dir` with inherited stdio.
    ///
    /// The exit status is reported but never turned into an error, so the
    /// caller moves on to its next step regardless.
    pub fn run(&self, dir: &Path) -> XResult<()> {
        info!("{}", self);
        let output = duct::cmd(self.program.as_path(), &self.args)
            .dir(dir)
            .unchecked()
            .run()?;
        if !output.status.success() {
            warn!("{} exited with {}", self.program_name(), output.status);
        }
        Ok(())
    }
}

impl fmt::Display for Invocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.program_name())?;
        for arg in &self.args {
            write!(f, " {}", arg)?;
        }
        Ok(())
    }
}
