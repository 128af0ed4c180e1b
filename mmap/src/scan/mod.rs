//! Best-effort scanners over boot sources and driver headers.

pub mod boot;
pub mod header;

pub use boot::scan_boot;
pub use header::scan_headers;

/// 1-based line number of the byte at `offset`.
fn line_at(content: &str, offset: usize) -> usize {
    content[..offset].matches('\n').count() + 1
}

/// 1-based line number of the first line containing `needle`, or 1.
fn first_line_with(content: &str, needle: &str) -> usize {
    content
        .split('\n')
        .position(|line| line.contains(needle))
        .map_or(1, |idx| idx + 1)
}
