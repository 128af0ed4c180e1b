use serde::{Serialize, Serializer};
use std::fmt;

/// Address or size as found in the kernel image.
///
/// Always displayed as `0x`-prefixed upper-case hex, e.g. `0xB8000`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Addr(pub u64);

impl Addr {
    /// Parse a hex literal with or without a `0x` prefix.
    pub fn parse(s: &str) -> Option<Addr> {
        let digits = s
            .strip_prefix("0x")
            .or_else(|| s.strip_prefix("0X"))
            .unwrap_or(s);
        if digits.is_empty() {
            return None;
        }
        u64::from_str_radix(digits, 16).ok().map(Addr)
    }

    pub fn value(self) -> u64 {
        self.0
    }

    pub fn offset(self, delta: u64) -> Option<Addr> {
        self.0.checked_add(delta).map(Addr)
    }

    /// Distance from `base` up to `self`, `None` when `self` lies below `base`.
    pub fn since(self, base: Addr) -> Option<u64> {
        self.0.checked_sub(base.0)
    }
}

impl fmt::Display for Addr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Padding flags apply to the whole literal so `{:<15}` aligns columns.
        f.pad(&format!("0x{:X}", self.0))
    }
}

impl From<u64> for Addr {
    fn from(value: u64) -> Self {
        Addr(value)
    }
}

impl Serialize for Addr {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}
