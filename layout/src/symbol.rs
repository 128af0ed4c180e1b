use indexmap::IndexMap;
use serde::Serialize;

use crate::{Addr, Tally};

/// Symbol name to resolved address, as printed by a symbol-dump tool.
///
/// Built once per run and read-only afterwards. Names keep their first-seen
/// position; a later duplicate replaces the address.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct SymbolTable(IndexMap<String, Addr>);

impl SymbolTable {
    pub fn new() -> Self {
        SymbolTable(IndexMap::new())
    }

    /// Parse `nm`-style output: `<hex-address> <type-char> <name>` per line.
    ///
    /// Lines with fewer than three tokens or an unparseable address are
    /// skipped. Undefined symbols (`U name`) only have two tokens and drop out.
    pub fn parse(text: &str) -> Self {
        let mut table = SymbolTable::new();
        for line in text.lines() {
            let words: Vec<&str> = line.split_whitespace().collect();
            if words.len() < 3 {
                continue;
            }
            if let Some(addr) = Addr::parse(words[0]) {
                table.insert(words[2], addr);
            }
        }
        table
    }

    pub fn insert(&mut self, name: &str, addr: Addr) -> Option<Addr> {
        self.0.insert(name.to_string(), addr)
    }

    pub fn get(&self, name: &str) -> Option<Addr> {
        self.0.get(name).copied()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.0.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, Addr)> {
        self.0.iter().map(|(name, addr)| (name.as_str(), *addr))
    }
}

impl Tally for SymbolTable {
    fn tally(&self) -> usize {
        self.len()
    }
}

impl<'a> FromIterator<(&'a str, u64)> for SymbolTable {
    fn from_iter<I: IntoIterator<Item = (&'a str, u64)>>(iter: I) -> Self {
        let mut table = SymbolTable::new();
        for (name, addr) in iter {
            table.insert(name, Addr(addr));
        }
        table
    }
}
