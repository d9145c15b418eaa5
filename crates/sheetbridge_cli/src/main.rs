//! CLI smoke entry point.
//!
//! # Responsibility
//! - Provide a minimal executable to verify `sheetbridge_core` linkage.
//! - Keep output deterministic for quick local sanity checks.

fn main() {
    // A tiny probe validates core crate wiring independently from the host
    // plugin runtime.
    println!("sheetbridge_core ping={}", sheetbridge_core::ping());
    println!("sheetbridge_core version={}", sheetbridge_core::core_version());
}
