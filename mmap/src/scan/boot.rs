use layout::{AssemblyConstants, Located, Provenance};
use once_cell::sync::Lazy;
use regex::Regex;
use std::fs;
use std::path::Path;

use super::line_at;
use crate::{config::Paths, error::Error, outcome::Outcome};

// stack_bottom:
//     resb 4096 * 4
static STACK_RESERVE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"stack_bottom:\s*resb\s+(\d+)\s*\*\s*(\d+)").unwrap());

static DATA_DWORD: Lazy<Regex> = Lazy::new(|| Regex::new(r"dd\s+(0x[0-9a-fA-F]+)").unwrap());

/// Read the boot stack size and multiboot header magics.
///
/// Absent files leave the matching constants unset and add a note.
pub fn scan_boot(paths: &Paths) -> Outcome<AssemblyConstants> {
    let mut value = AssemblyConstants::default();
    let mut issues = vec![];

    match read(&paths.boot_source) {
        Ok(content) => value.stack_size = stack_size(&content, &paths.relative(&paths.boot_source)),
        Err(err) => issues.push(err),
    }
    match read(&paths.boot_header) {
        Ok(content) => {
            value.multiboot_magics =
                multiboot_magics(&content, &paths.relative(&paths.boot_header))
        }
        Err(err) => issues.push(err),
    }

    Outcome { value, issues }
}

fn read(path: &Path) -> Result<String, Error> {
    if !path.exists() {
        return Err(Error::MissingInput(path.display().to_string()));
    }
    fs::read_to_string(path).map_err(|e| Error::FileRead(path.display().to_string(), e))
}

/// `N * M` from the first `stack_bottom: resb N * M`.
pub fn stack_size(content: &str, path: &str) -> Option<Located<u64>> {
    let caps = STACK_RESERVE.captures(content)?;
    let count: u64 = caps[1].parse().ok()?;
    let unit: u64 = caps[2].parse().ok()?;
    let start = caps.get(0)?.start();
    Some(Located {
        value: count.checked_mul(unit)?,
        at: Provenance::new(path, line_at(content, start)),
    })
}

/// Every `dd 0x...` literal, verbatim and in order of appearance.
pub fn multiboot_magics(content: &str, path: &str) -> Vec<Located<String>> {
    DATA_DWORD
        .captures_iter(content)
        .filter_map(|caps| {
            let literal = caps.get(1)?;
            Some(Located {
                value: literal.as_str().to_string(),
                at: Provenance::new(path, line_at(content, literal.start())),
            })
        })
        .collect()
}
