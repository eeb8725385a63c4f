//! Line scanners for documentation comments and TODO markers.
//!
//! Both scans walk a directory tree, read every file with the given
//! extension and print the collected lines grouped by file. Any file that
//! cannot be read ends the scan; unlistable directories are skipped.

use crate::utils::{init_logger, XError, XResult};
use clap::Parser;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Command line shared by the scanner binaries.
#[derive(Parser, Debug)]
pub struct ScanArgs {
    /// Directory to walk
    #[arg(default_value = ".")]
    pub root: PathBuf,
    /// Extension of the files to read, without the dot
    #[arg(long, default_value = "zig")]
    pub extension: String,
}

pub const DOC_MARKER: &str = "///";
pub const TODO_MARKER: &str = "TODO";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Marker {
    /// Lines starting with `///` that carry some text.
    DocComment,
    /// Lines mentioning `TODO` anywhere.
    Todo,
}

impl Marker {
    pub fn matches(self, line: &str) -> bool {
        match self {
            Marker::DocComment => line.starts_with(DOC_MARKER) && line.trim() != DOC_MARKER,
            Marker::Todo => line.contains(TODO_MARKER),
        }
    }

    /// Matching lines, trimmed.
    pub fn extract(self, text: &str) -> Vec<String> {
        text.lines()
            .filter(|line| self.matches(line))
            .map(|line| line.trim().to_string())
            .collect()
    }

    /// Whether a file with nothing to show still gets a heading.
    fn lists_empty_files(self) -> bool {
        matches!(self, Marker::DocComment)
    }
}

pub fn extract_file(path: &Path, marker: Marker) -> XResult<Vec<String>> {
    let text = fs::read_to_string(path).map_err(|source| XError::Extract {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(marker.extract(&text))
}

/// Walks `root` and writes one block per file ending in `.{extension}`.
///
/// Returns the number of blocks written.
pub fn scan(root: &Path, extension: &str, marker: Marker, out: &mut dyn Write) -> XResult<usize> {
    let mut blocks = 0;

    for path in candidates(root, extension) {
        let lines = extract_file(&path, marker)?;
        debug!("{}: {} line(s)", path.display(), lines.len());
        if lines.is_empty() && !marker.lists_empty_files() {
            continue;
        }

        writeln!(out, "documentation in {}", path.display())?;
        for line in &lines {
            writeln!(out, "  {}", line)?;
        }
        blocks += 1;
    }

    Ok(blocks)
}

/// Entry point of the scanner binaries: prints to stdout, exits 1 on error.
pub fn run_cli(marker: Marker) {
    init_logger();
    let args = ScanArgs::parse();

    let stdout = io::stdout();
    if let Err(e) = scan(&args.root, &args.extension, marker, &mut stdout.lock()) {
        error!("failed to extract documentation because of error: {}", e);
        std::process::exit(1);
    }
}

/// Files under `root` a scan would read, in visiting order.
///
/// Directories that cannot be listed, `root` included, are skipped.
pub fn candidates(root: &Path, extension: &str) -> Vec<PathBuf> {
    let suffix = format!(".{}", extension);
    let mut files = Vec::new();
    for entry in WalkDir::new(root).sort_by_file_name() {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                warn!("skipping {}", e);
                continue;
            }
        };
        if entry.file_type().is_file() && entry.file_name().to_string_lossy().ends_with(&suffix) {
            files.push(entry.into_path());
        }
    }
    files
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn doc_comments_skip_bare_markers_and_code() {
        let text = "/// does X\n///\ncode();\n";
        assert_eq!(Marker::DocComment.extract(text), vec!["/// does X"]);
    }

    #[test]
    fn doc_comments_must_start_the_line() {
        let text = "    /// indented\n//// four slashes\n///   \n/// trailing   \r\n";
        assert_eq!(
            Marker::DocComment.extract(text),
            vec!["//// four slashes", "/// trailing"]
        );
    }

    #[test]
    fn todos_match_anywhere_and_are_trimmed() {
        let text = "x = 1 // TODO fix this\n  // TODO: later  \nconst y = 2;\ntodo lowercase\n";
        assert_eq!(
            Marker::Todo.extract(text),
            vec!["x = 1 // TODO fix this", "// TODO: later"]
        );
    }

    #[test]
    fn no_markers_no_lines() {
        assert!(Marker::Todo.extract("const a = 1;\n").is_empty());
        assert!(Marker::DocComment.extract("").is_empty());
    }

    #[test]
    fn default_arguments_scan_zig_files_here() {
        let args = ScanArgs::try_parse_from(["extract-docs"]).unwrap();
        assert_eq!(args.root, PathBuf::from("."));
        assert_eq!(args.extension, "zig");

        let args = ScanArgs::try_parse_from(["extract-todos", "src", "--extension", "c"]).unwrap();
        assert_eq!(args.root, PathBuf::from("src"));
        assert_eq!(args.extension, "c");
    }

    #[test]
    fn unreadable_file_names_the_path() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("gone.zig");
        match extract_file(&missing, Marker::Todo) {
            Err(XError::Extract { path, .. }) => assert_eq!(path, missing),
            other => panic!("unexpected result: {:?}", other),
        }
    }
}
