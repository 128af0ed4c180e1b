use serde::Serialize;

use crate::{Provenance, Tally};

/// A scanned value together with the place it came from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Located<T> {
    pub value: T,
    pub at: Provenance,
}

/// Constants mined from the boot assembly.
///
/// Fields stay unset or empty when the pattern was not found; nothing is
/// filled in by default.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct AssemblyConstants {
    /// Bytes reserved under `stack_bottom:` (`resb N * M`).
    pub stack_size: Option<Located<u64>>,
    /// `dd 0x...` literals of the multiboot header, in file order.
    pub multiboot_magics: Vec<Located<String>>,
}

impl Tally for AssemblyConstants {
    fn tally(&self) -> usize {
        usize::from(self.stack_size.is_some()) + self.multiboot_magics.len()
    }
}
