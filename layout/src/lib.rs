pub mod addr;
pub mod constants;
pub mod define;
pub mod section;
pub mod symbol;

pub use addr::Addr;
pub use constants::{AssemblyConstants, Located};
pub use define::{Category, Definition, Definitions, Provenance};
pub use section::{SectionInfo, SectionMap};
pub use symbol::SymbolTable;

/// Number of facts a collection holds, used to tell "found" from "empty".
pub trait Tally {
    fn tally(&self) -> usize;

    fn is_blank(&self) -> bool {
        self.tally() == 0
    }
}
