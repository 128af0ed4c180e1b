use mmap::{collect, Config, Error, Facts, Fixture, Paths, Report, Status, Tools};
use std::fs;
use std::path::{Path, PathBuf};
use std::process;
use std::time::{SystemTime, UNIX_EPOCH};

const NM: &str = "\
0000000000100000 T entry
0000000000090000 B stack_bottom
0000000000091000 B stack_top
";

const OBJDUMP: &str = "
Idx Name          Size      VMA               LMA               File off  Algn
  0 .boot         00000018  0000000000100000  0000000000100000  00001000  2**0
                  CONTENTS, ALLOC, LOAD, READONLY, DATA
  1 .text         00003a2f  0000000000101000  0000000000101000  00002000  2**4
                  CONTENTS, ALLOC, LOAD, READONLY, CODE
";

fn create_temp_dir(label: &str) -> PathBuf {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_nanos();
    let dir = std::env::temp_dir().join(format!("mmap-{label}-{}-{nanos}", process::id()));
    fs::create_dir_all(&dir).expect("Create temp dir");
    dir
}

fn write_file(root: &Path, rel: &str, contents: &str) {
    let path = root.join(rel);
    fs::create_dir_all(path.parent().unwrap()).expect("Create parent dir");
    fs::write(path, contents).expect("Write test file");
}

fn run(root: &Path, fixture: &Fixture) -> (Facts, Report) {
    let config = Config::default();
    let paths = Paths::resolve(root, &config);
    let facts = collect(&config, &paths, fixture).into_facts();
    let report = Report::assemble(&config, &facts);
    (facts, report)
}

fn section_titles(report: &Report) -> Vec<&str> {
    let lines = report.lines();
    lines
        .windows(2)
        .filter(|pair| pair[1].starts_with('='))
        .map(|pair| pair[0].as_str())
        .collect()
}

#[test]
fn symbols_only_tree() {
    let root = create_temp_dir("symbols-only");
    let (facts, report) = run(&root, &Fixture::new(NM, ""));

    assert_eq!(facts.symbols.len(), 3);
    assert!(facts.sections.is_empty());
    assert_eq!(
        section_titles(&report),
        vec![
            "CALADANOS PHYSICAL MEMORY MAP",
            "KERNEL LOADER & BOOT ADDRESSES",
            "STACK MEMORY LAYOUT",
        ]
    );

    let text = report.render();
    assert!(text.contains("ENTRY POINT     0x100000"));
    assert!(text.contains("STACK_BOTTOM    0x90000         4KB "));
    assert!(text.contains("STACK_TOP       0x91000         -   "));
    assert!(text.ends_with(
        "NOTES:\n- All addresses are in hexadecimal format\n- Generated automatically by mmap\n"
    ));

    fs::remove_dir_all(&root).expect("Remove temp dir");
}

#[test]
fn full_tree() {
    let root = create_temp_dir("full-tree");
    write_file(
        &root,
        "boot/src/boot32.asm",
        "section .bss\nstack_bottom:\n    resb 4096 * 4\nstack_top:\n",
    );
    write_file(
        &root,
        "boot/src/header.asm",
        "header_start:\n    dd 0xe85250d6\n    dd 0\n",
    );
    write_file(
        &root,
        "drivers/pit/pit.h",
        "#ifndef PIT_H\n#define PIT_H\n\n#include <stdint.h>\n\n// ports\n#define FOO_REG 0x1000\n",
    );
    write_file(&root, "drivers/ps2/ps2.h", "#define PS2_DATA 0x60\n");
    write_file(&root, "drivers/ps2/ps2.c", "#define NOT_A_HEADER 0x64\n");
    write_file(&root, "drivers/.cache/old.h", "#define HIDDEN 0x1\n");

    let (facts, report) = run(&root, &Fixture::new(NM, OBJDUMP));

    let stack = facts.constants.stack_size.as_ref().unwrap();
    assert_eq!(stack.value, 16384);
    assert_eq!(stack.at.to_string(), "boot/src/boot32.asm:2");
    assert_eq!(facts.constants.multiboot_magics.len(), 1);

    let defs = facts.definitions.hardware_io();
    let names: Vec<_> = defs.iter().map(|d| d.name.as_str()).collect();
    assert_eq!(names, vec!["FOO_REG", "PS2_DATA"]);
    assert_eq!(defs[0].value, "0x1000");
    assert_eq!(defs[0].at.to_string(), "drivers/pit/pit.h:7");

    assert_eq!(
        section_titles(&report),
        vec![
            "CALADANOS PHYSICAL MEMORY MAP",
            "KERNEL LOADER & BOOT ADDRESSES",
            "STACK MEMORY LAYOUT",
            "BOOT SOURCE CONSTANTS",
            "LINKER MEMORY SECTIONS",
            "HARDWARE I/O ADDRESSES",
        ]
    );
    let text = report.render();
    assert!(text.contains("TEXT_SECTION    0x101000        0x3A2F "));
    assert!(text.contains("Ps2 Data"));
    assert!(text.contains("drivers/pit/pit.h:7"));

    fs::remove_dir_all(&root).expect("Remove temp dir");
}

#[test]
fn rerun_is_byte_identical() {
    let root = create_temp_dir("rerun");
    write_file(&root, "drivers/a.h", "#define A_BASE 0xA000\n");
    write_file(&root, "drivers/b/b.h", "#define B_BASE 0xB000\n");
    let fixture = Fixture::new(NM, OBJDUMP);

    let first = root.join("first.txt");
    let second = root.join("second.txt");
    run(&root, &fixture).1.write(&first).unwrap();
    run(&root, &fixture).1.write(&second).unwrap();
    assert_eq!(fs::read(&first).unwrap(), fs::read(&second).unwrap());

    fs::remove_dir_all(&root).expect("Remove temp dir");
}

#[test]
fn missing_binary_and_sources_degrade() {
    let root = create_temp_dir("missing");
    let config = Config::default();
    let paths = Paths::resolve(&root, &config);
    let collected = collect(&config, &paths, &Tools::new(&config));

    assert_eq!(collected.symbols.status(), Status::Degraded);
    assert_eq!(collected.sections.status(), Status::Degraded);
    assert_eq!(collected.constants.status(), Status::Degraded);
    assert_eq!(collected.definitions.status(), Status::Degraded);

    let facts = collected.into_facts();
    assert!(facts.symbols.is_empty());
    assert!(facts.sections.is_empty());

    let report = Report::assemble(&config, &facts);
    assert_eq!(
        section_titles(&report),
        vec![
            "CALADANOS PHYSICAL MEMORY MAP",
            "KERNEL LOADER & BOOT ADDRESSES"
        ]
    );

    fs::remove_dir_all(&root).expect("Remove temp dir");
}

#[test]
fn write_into_missing_directory_fails() {
    let root = create_temp_dir("write-fail");
    let (_, report) = run(&root, &Fixture::default());
    let err = report
        .write(&root.join("no/such/dir/mmap.txt"))
        .unwrap_err();
    assert!(matches!(err, Error::FileCreate(..)));

    fs::remove_dir_all(&root).expect("Remove temp dir");
}
