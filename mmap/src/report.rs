use color_print::cprintln;
use layout::{Addr, AssemblyConstants, Definition, SectionMap, SymbolTable};

use crate::{config::Config, error::Error, facts::Facts, output};

const RULE_WIDTH: usize = 75;
const LINKER_SCRIPT: &str = "targets/x86_64.ld";

/// Fixed entry point and VGA text buffer of the boot protocol.
const ENTRY_POINT: Addr = Addr(0x100000);
const VGA_BUFFER: Addr = Addr(0xB8000);

const PAGE_TABLES: [&str; 3] = ["page_table_l4", "page_table_l3", "page_table_l2"];
/// Line of `page_table_l4:` in the boot source; each later level sits two
/// lines below the previous one. This is an annotation, not a lookup.
const PAGE_TABLE_FIRST_LINE: usize = 131;

/// Well-known sections: (name, label, description, where it is defined).
const LINKER_SECTIONS: [(&str, &str, &str, &str); 5] = [
    (".boot", "BOOT_SECTION", "Multiboot header", "targets/x86_64.ld:7"),
    (".rodata", "RODATA_SECTION", "Read-only data", "kernel.elf"),
    (".text", "TEXT_SECTION", "Kernel code", "targets/x86_64.ld:12"),
    (".data", "DATA_SECTION", "Initialized data", "kernel.elf"),
    (".bss", "BSS_SECTION", "Uninitialized data", "kernel.elf"),
];

// ----------------------------------------------------------------------------
// Table

/// One titled block of the report. Dropped entirely when it has no rows.
struct Table {
    title: String,
    columns: &'static str,
    rows: Vec<String>,
}

impl Table {
    fn new(title: &str, columns: &'static str) -> Self {
        Table {
            title: title.to_string(),
            columns,
            rows: vec![],
        }
    }

    fn row(&mut self, row: String) {
        self.rows.push(row);
    }

    fn emit(self, lines: &mut Vec<String>) {
        if self.rows.is_empty() {
            return;
        }
        lines.push(self.title.clone());
        lines.push("=".repeat(self.title.len()));
        lines.push(self.columns.to_string());
        lines.push("-".repeat(RULE_WIDTH));
        lines.extend(self.rows);
        lines.push(String::new());
    }
}

// ----------------------------------------------------------------------------
// Report

/// The finished memory map, one entry per output line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Report {
    lines: Vec<String>,
}

impl Report {
    pub fn assemble(config: &Config, facts: &Facts) -> Self {
        let source = config.boot_source.as_str();
        let mut lines = vec![];

        let title = format!("{} PHYSICAL MEMORY MAP", config.kernel_name.to_uppercase());
        lines.push(title.clone());
        lines.push("=".repeat(title.len()));
        lines.push(String::new());

        boot_addresses(&facts.symbols, source).emit(&mut lines);
        stack_layout(&facts.symbols, source).emit(&mut lines);
        boot_constants(&facts.constants).emit(&mut lines);
        page_tables(&facts.symbols, source).emit(&mut lines);
        gdt(&facts.symbols, source).emit(&mut lines);
        linker_sections(&facts.sections).emit(&mut lines);
        hardware_io(facts.definitions.hardware_io()).emit(&mut lines);

        lines.push("NOTES:".to_string());
        lines.push("- All addresses are in hexadecimal format".to_string());
        lines.push("- Generated automatically by mmap".to_string());

        Report { lines }
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn render(&self) -> String {
        let mut text = self.lines.join("\n");
        text.push('\n');
        text
    }

    pub fn write(&self, path: &std::path::Path) -> Result<(), Error> {
        output::write_text(path, &self.render())
    }

    /// Echo to the terminal with titles and rules highlighted.
    pub fn cprint(&self) {
        for (idx, line) in self.lines.iter().enumerate() {
            let underlined = self
                .lines
                .get(idx + 1)
                .is_some_and(|next| next.starts_with('='));
            if underlined || line == "NOTES:" {
                cprintln!("<green,bold>{}</>", line);
            } else if line.starts_with('=') || line.starts_with("---") {
                cprintln!("<blue>{}</>", line);
            } else {
                println!("{}", line);
            }
        }
    }
}

fn boot_addresses(symbols: &SymbolTable, source: &str) -> Table {
    let mut table = Table::new(
        "KERNEL LOADER & BOOT ADDRESSES",
        "Location        Address         Description                             File:Line",
    );
    let mut row = |label: &str, addr: Addr, desc: &str, at: String| {
        table.row(format!("{:<15} {:<15} {:<39} {}", label, addr, desc, at));
    };

    row(
        "ENTRY POINT",
        ENTRY_POINT,
        "Kernel entry point (1MB)",
        format!("{LINKER_SCRIPT}:5"),
    );
    if let Some(addr) = symbols.get("multiboot_magic") {
        row("MULTIBOOT_MAGIC", addr, "Multiboot2 magic storage", format!("{source}:28"));
    }
    if let Some(addr) = symbols.get("multiboot_info") {
        row("MULTIBOOT_INFO", addr, "Multiboot2 info pointer", format!("{source}:30"));
    }
    row("VGA_BUFFER", VGA_BUFFER, "VGA text buffer", format!("{source}:123-125"));
    table
}

fn stack_layout(symbols: &SymbolTable, source: &str) -> Table {
    let mut table = Table::new(
        "STACK MEMORY LAYOUT",
        "Location        Address         Size            Description             File:Line",
    );
    let (Some(bottom), Some(top)) = (symbols.get("stack_bottom"), symbols.get("stack_top")) else {
        return table;
    };
    // An inverted pair means the symbol dump is off; show the rows, not a size.
    let size = top
        .since(bottom)
        .map_or_else(|| "?".to_string(), |bytes| format!("{}KB", bytes / 1024));

    let mut row = |label: &str, addr: Addr, size: &str, desc: &str, line: usize| {
        table.row(format!(
            "{:<15} {:<15} {:<15} {:<23} {}:{}",
            label, addr, size, desc, source, line
        ));
    };
    row("STACK_BOTTOM", bottom, &size, "Boot stack bottom", 137);
    row("STACK_TOP", top, "-", "Boot stack top (ESP)", 139);
    row("BOOT_ESP", top, "-", "Initial ESP value", 11);
    table
}

fn boot_constants(constants: &AssemblyConstants) -> Table {
    let mut table = Table::new(
        "BOOT SOURCE CONSTANTS",
        "Constant        Value           Size            Description             File:Line",
    );
    if let Some(stack) = &constants.stack_size {
        table.row(format!(
            "{:<15} {:<15} {:<15} {:<23} {}",
            "STACK_SIZE",
            Addr(stack.value),
            format!("{}KB", stack.value / 1024),
            "Reserved boot stack",
            stack.at
        ));
    }
    for (idx, magic) in constants.multiboot_magics.iter().enumerate() {
        table.row(format!(
            "{:<15} {:<15} {:<15} {:<23} {}",
            format!("MULTIBOOT_MAGIC_{idx}"),
            magic.value,
            "4B",
            "Multiboot2 header dword",
            magic.at
        ));
    }
    table
}

fn page_tables(symbols: &SymbolTable, source: &str) -> Table {
    let mut table = Table::new(
        "PAGE TABLES (Physical Addresses)",
        "Structure       Address         Size            Description             File:Line",
    );
    for (idx, name) in PAGE_TABLES.iter().enumerate() {
        let Some(addr) = symbols.get(name) else {
            continue;
        };
        let level = 4 - idx;
        let desc = if level == 4 {
            format!("Page Map Level {level}")
        } else {
            format!("Page Directory Level {level}")
        };
        table.row(format!(
            "{:<15} {:<15} {:<15} {:<23} {}:{}",
            name.to_uppercase(),
            addr,
            "4KB",
            desc,
            source,
            PAGE_TABLE_FIRST_LINE + idx * 2
        ));
    }
    table
}

fn gdt(symbols: &SymbolTable, source: &str) -> Table {
    let mut table = Table::new(
        "GLOBAL DESCRIPTOR TABLE (GDT)",
        "Entry           Address         Value           Description             File:Line",
    );
    let Some(base) = symbols.get("gdt64") else {
        return table;
    };
    let mut row = |label: &str, addr: Addr, value: &str, desc: &str, line: usize| {
        table.row(format!(
            "{:<15} {:<15} {:<15} {:<23} {}:{}",
            label, addr, value, desc, source, line
        ));
    };

    row("GDT64_NULL", base, "0x0", "Null descriptor", 143);
    // The code descriptor follows the 8-byte null descriptor.
    if let Some(code) = base.offset(8) {
        row("GDT64_CODE", code, "0x00A09A000...", "Code segment (64-bit)", 145);
    }
    if let Some(ptr) = symbols.get("gdt64.pointer") {
        row("GDT64_PTR", ptr, "gdt64 address", "GDT pointer", 146);
    }
    table
}

fn linker_sections(sections: &SectionMap) -> Table {
    let mut table = Table::new(
        "LINKER MEMORY SECTIONS",
        "Section         Address         Size            Description             File:Line",
    );
    for (name, label, desc, at) in LINKER_SECTIONS {
        if let Some(section) = sections.get(name) {
            table.row(format!(
                "{:<15} {:<15} {:<15} {:<23} {}",
                label,
                section.vma,
                section.size_hex(),
                desc,
                at
            ));
        }
    }
    table
}

fn hardware_io(defs: &[Definition]) -> Table {
    let mut table = Table::new(
        "HARDWARE I/O ADDRESSES",
        "Device          Address         Description                     File:Line",
    );
    for def in defs {
        table.row(format!(
            "{:<15} {:<15} {:<31} {}",
            def.name,
            def.value,
            title_case(&def.name.replace('_', " ")),
            def.at
        ));
    }
    table
}

/// Capitalize the first letter of every run of letters, lower-case the rest.
///
/// `UART_BASE` becomes `Uart Base` once underscores are spaces; a letter after
/// a digit starts a new run, so `8BIT` becomes `8Bit`.
pub fn title_case(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut in_word = false;
    for c in text.chars() {
        if c.is_alphabetic() {
            if in_word {
                out.extend(c.to_lowercase());
            } else {
                out.extend(c.to_uppercase());
            }
            in_word = true;
        } else {
            out.push(c);
            in_word = false;
        }
    }
    out
}
