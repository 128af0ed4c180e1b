use layout::{Category, Definition, Definitions, Provenance};
use once_cell::sync::Lazy;
use regex::Regex;
use std::fs;
use std::path::{Path, PathBuf};

use super::first_line_with;
use crate::{config::Paths, error::Error, outcome::Outcome};

static HEX_DEFINE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"#define\s+(\w+)\s+(0x[0-9a-fA-F]+)").unwrap());

/// Collect hex `#define`s from every header under the drivers tree.
///
/// Files are visited depth-first with directory entries sorted by name.
/// Unreadable files and directories are skipped and reported as issues.
pub fn scan_headers(paths: &Paths, extension: &str) -> Outcome<Definitions> {
    let mut value = Definitions::new();
    let mut issues = vec![];

    if !paths.drivers.is_dir() {
        issues.push(Error::MissingInput(paths.drivers.display().to_string()));
        return Outcome { value, issues };
    }

    let mut files = vec![];
    walk(&paths.drivers, extension, &mut files, &mut issues);

    for file in files {
        let content = match fs::read_to_string(&file) {
            Ok(content) => content,
            Err(e) => {
                issues.push(Error::FileRead(file.display().to_string(), e));
                continue;
            }
        };
        for def in definitions_in(&content, &paths.relative(&file)) {
            value.push(Category::HardwareIo, def);
        }
    }

    Outcome { value, issues }
}

fn walk(dir: &Path, extension: &str, files: &mut Vec<PathBuf>, issues: &mut Vec<Error>) {
    let entries = match fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(e) => {
            issues.push(Error::DirRead(dir.display().to_string(), e));
            return;
        }
    };

    let mut entries: Vec<_> = entries.filter_map(Result::ok).collect();
    entries.sort_by_key(|entry| entry.file_name());

    for entry in entries {
        // Dotfiles and dot-directories are not part of the source tree.
        if entry.file_name().to_string_lossy().starts_with('.') {
            continue;
        }
        let path = entry.path();
        match entry.file_type() {
            Ok(ty) if ty.is_dir() => walk(&path, extension, files, issues),
            Ok(_) if path.extension().is_some_and(|ext| ext == extension) => files.push(path),
            Ok(_) => {}
            Err(e) => issues.push(Error::FileRead(path.display().to_string(), e)),
        }
    }
}

/// Hex `#define`s in one file, in match order.
///
/// The reported line is the first line containing `#define NAME`, which
/// for a redefined macro is its earliest spelling, not the matched one.
pub fn definitions_in(content: &str, path: &str) -> Vec<Definition> {
    HEX_DEFINE
        .captures_iter(content)
        .map(|caps| {
            let name = caps[1].to_string();
            let line = first_line_with(content, &format!("#define {name}"));
            Definition {
                value: caps[2].to_string(),
                at: Provenance::new(path, line),
                name,
            }
        })
        .collect()
}
