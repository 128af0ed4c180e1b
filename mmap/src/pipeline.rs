use color_print::cprintln;
use layout::{AssemblyConstants, Definitions, SectionMap, SymbolTable, Tally};

use crate::{
    config::{Config, Paths},
    facts::Facts,
    inspect::{read_sections, read_symbols, Inspector},
    outcome::{Outcome, Status},
    scan::{scan_boot, scan_headers},
};

/// Outcomes of every extraction step, before they are merged.
#[derive(Debug)]
pub struct Collected {
    pub symbols: Outcome<SymbolTable>,
    pub sections: Outcome<SectionMap>,
    pub constants: Outcome<AssemblyConstants>,
    pub definitions: Outcome<Definitions>,
}

/// Run all extractors. None of them can fail the run.
pub fn collect<I: Inspector + ?Sized>(config: &Config, paths: &Paths, inspector: &I) -> Collected {
    Collected {
        symbols: read_symbols(inspector, &paths.binary),
        sections: read_sections(inspector, &paths.binary),
        constants: scan_boot(paths),
        definitions: scan_headers(paths, &config.header_extension),
    }
}

impl Collected {
    /// Print the diagnostics of each source followed by its status.
    pub fn report(&self) {
        status("symbols", &self.symbols);
        status("sections", &self.sections);
        status("constants", &self.constants);
        status("definitions", &self.definitions);
    }

    pub fn into_facts(self) -> Facts {
        Facts {
            symbols: self.symbols.value,
            sections: self.sections.value,
            constants: self.constants.value,
            definitions: self.definitions.value,
        }
    }
}

fn status<T: Tally>(source: &str, outcome: &Outcome<T>) {
    outcome.report();
    match outcome.status() {
        Status::Found(count) => cprintln!("  <green>{:<12}</> {} found", source, count),
        Status::Empty => cprintln!("  <yellow>{:<12}</> none", source),
        Status::Degraded => cprintln!(
            "  <red>{:<12}</> degraded, {} kept",
            source,
            outcome.value.tally()
        ),
    }
}
