use layout::{AssemblyConstants, Definitions, SectionMap, SymbolTable};
use serde::Serialize;
use std::path::Path;

use crate::{error::Error, output};

/// Everything extracted in one run, read-only once collected.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Facts {
    pub symbols: SymbolTable,
    pub sections: SectionMap,
    pub constants: AssemblyConstants,
    pub definitions: Definitions,
}

impl Facts {
    pub fn to_yaml(&self) -> Result<String, Error> {
        serde_yaml::to_string(self).map_err(Error::Serialize)
    }

    pub fn write_yaml(&self, path: &Path) -> Result<(), Error> {
        output::write_text(path, &self.to_yaml()?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use layout::{Category, Definition, Provenance};

    #[test]
    fn yaml_uses_hex_addresses_and_category_names() {
        let mut definitions = Definitions::new();
        definitions.push(
            Category::HardwareIo,
            Definition {
                name: "PIC1_COMMAND".to_string(),
                value: "0x20".to_string(),
                at: Provenance::new("drivers/pic/pic.h", 3),
            },
        );
        let facts = Facts {
            symbols: [("stack_top", 0x91000_u64)].into_iter().collect(),
            definitions,
            ..Facts::default()
        };
        let yaml = facts.to_yaml().unwrap();
        assert!(yaml.contains("stack_top: '0x91000'") || yaml.contains("stack_top: 0x91000"));
        assert!(yaml.contains("hardware_io:"));
        assert!(yaml.contains("cpu_registers: []"));
        assert!(yaml.contains("drivers/pic/pic.h:3"));
    }
}
