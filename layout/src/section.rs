use indexmap::IndexMap;
use serde::Serialize;

use crate::{Addr, Tally};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SectionInfo {
    pub name: String,
    pub size: Addr,
    pub vma: Addr,
    pub lma: Addr,
}

impl SectionInfo {
    /// Size as a `0x`-prefixed upper-case literal, ready for a report column.
    pub fn size_hex(&self) -> String {
        self.size.to_string()
    }

    /// Parse one row of `objdump -h` output.
    ///
    /// A row is `<index> <name> <size> <vma> <lma> <file-off> ...`; anything
    /// else (headers, flag lines, bad hex) yields `None`.
    pub fn parse_row(line: &str) -> Option<SectionInfo> {
        let words: Vec<&str> = line.split_whitespace().collect();
        if words.len() < 6 {
            return None;
        }
        if !words[0].bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        Some(SectionInfo {
            name: words[1].to_string(),
            size: Addr::parse(words[2])?,
            vma: Addr::parse(words[3])?,
            lma: Addr::parse(words[4])?,
        })
    }
}

/// Section name to placement, in the order the dump listed them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct SectionMap(IndexMap<String, SectionInfo>);

impl SectionMap {
    pub fn new() -> Self {
        SectionMap(IndexMap::new())
    }

    pub fn parse(text: &str) -> Self {
        let mut map = SectionMap::new();
        for info in text.lines().filter_map(SectionInfo::parse_row) {
            map.insert(info);
        }
        map
    }

    pub fn insert(&mut self, info: SectionInfo) -> Option<SectionInfo> {
        self.0.insert(info.name.clone(), info)
    }

    pub fn get(&self, name: &str) -> Option<&SectionInfo> {
        self.0.get(name)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &SectionInfo> {
        self.0.values()
    }
}

impl Tally for SectionMap {
    fn tally(&self) -> usize {
        self.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const OBJDUMP: &str = "
build/kernel/kernel.elf:     file format elf64-x86-64

Sections:
Idx Name          Size      VMA               LMA               File off  Algn
  0 .boot         00000018  0000000000100000  0000000000100000  00001000  2**0
                  CONTENTS, ALLOC, LOAD, READONLY, DATA
  1 .text         00003a2f  0000000000101000  0000000000101000  00002000  2**4
                  CONTENTS, ALLOC, LOAD, READONLY, CODE
  2 .bss          00006000  0000000000105000  0000000000105000  00006000  2**12
                  ALLOC
  3 .comment      0000002b  0000000000000000  0000000000000000  00006000  2**0
                  CONTENTS, READONLY
";

    #[test]
    fn parse_objdump_rows() {
        let map = SectionMap::parse(OBJDUMP);
        assert_eq!(map.len(), 4);

        let text = map.get(".text").unwrap();
        assert_eq!(text.size, Addr(0x3a2f));
        assert_eq!(text.vma, Addr(0x101000));
        assert_eq!(text.lma, Addr(0x101000));
        assert_eq!(text.size_hex(), "0x3A2F");

        let names: Vec<_> = map.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec![".boot", ".text", ".bss", ".comment"]);
    }

    #[test]
    fn short_or_bad_rows_are_ignored() {
        assert_eq!(SectionInfo::parse_row("  0 .boot 00000018 00100000"), None);
        assert_eq!(
            SectionInfo::parse_row("  0 .boot nothex 00100000 00100000 00001000 2**0"),
            None
        );
        assert_eq!(
            SectionInfo::parse_row("Idx Name Size VMA LMA File off Algn"),
            None
        );
        assert!(SectionMap::parse("").is_empty());
    }
}
