//! Generates sample files in `test-fixtures/` for trying the viewer.
//! Run with: `cargo run -p bl-core --example gen_fixtures`

use std::fs;
use std::path::Path;

fn main() {
    let dir = Path::new("test-fixtures");
    fs::create_dir_all(dir).expect("failed to create test-fixtures/");

    gen_tiny(dir);
    gen_byte_ramp(dir);
    gen_stripes(dir);
    gen_zones(dir);
    gen_ascii_text(dir);

    println!("All fixtures generated in {}", dir.display());
}

/// 10 bytes: smaller than one buffer, shows the zero fill after EOF.
fn gen_tiny(dir: &Path) {
    fs::write(dir.join("tiny.bin"), b"0123456789").expect("failed to write tiny.bin");
    println!("  tiny.bin          (10 bytes)");
}

/// Every byte value in order, repeated: diagonal staircases in the bit frames.
fn gen_byte_ramp(dir: &Path) {
    let data: Vec<u8> = (0..64 * 1024).map(|i| (i % 256) as u8).collect();
    fs::write(dir.join("byte_ramp.bin"), &data).expect("failed to write byte_ramp.bin");
    println!("  byte_ramp.bin     ({} bytes)", data.len());
}

/// Alternating 32-byte rows of 0x00 and 0xFF: horizontal bands in the row-major
/// frame, vertical bands in the column-major one.
fn gen_stripes(dir: &Path) {
    let mut data = Vec::with_capacity(32 * 1024);
    for row in 0..1024 {
        let fill = if row % 2 == 0 { 0x00 } else { 0xFF };
        data.extend_from_slice(&[fill; 32]);
    }
    fs::write(dir.join("stripes.bin"), &data).expect("failed to write stripes.bin");
    println!("  stripes.bin       ({} bytes)", data.len());
}

/// 64 KB in four 16 KB zones: zeros, a short repeating cycle, LCG noise, "ABCD".
/// Each zone is larger than one buffer, so paging crosses the boundaries.
fn gen_zones(dir: &Path) {
    const ZONE: usize = 16 * 1024;
    let mut data = Vec::with_capacity(4 * ZONE);

    data.extend(std::iter::repeat(0u8).take(ZONE));

    for i in 0..ZONE {
        data.push((i % 4) as u8);
    }

    let mut state: u32 = 0xDEAD_BEEF;
    for _ in 0..ZONE {
        state = state.wrapping_mul(1664525).wrapping_add(1013904223);
        data.push((state >> 16) as u8);
    }

    for _ in 0..ZONE / 4 {
        data.extend_from_slice(b"ABCD");
    }

    assert_eq!(data.len(), 4 * ZONE);
    fs::write(dir.join("zones.bin"), &data).expect("failed to write zones.bin");
    println!("  zones.bin         ({} bytes, 4 zones)", data.len());
}

/// Plain text with control characters mixed in.
fn gen_ascii_text(dir: &Path) {
    let mut data = Vec::new();
    for i in 0..400 {
        data.extend_from_slice(format!("line {:04}\tstatus=ok\r\n", i).as_bytes());
    }
    fs::write(dir.join("ascii_text.txt"), &data).expect("failed to write ascii_text.txt");
    println!("  ascii_text.txt    ({} bytes)", data.len());
}
