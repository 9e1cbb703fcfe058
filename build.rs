//! Build script for the PWM console firmware
//!
//! Handles:
//! - Linker scripts for the Cortex-M target (cortex-m-rt, defmt)

fn main() {
    println!("cargo:rerun-if-changed=build.rs");

    // Host builds (tests) link normally.
    let target = std::env::var("TARGET").unwrap_or_default();
    if target.starts_with("thumb") {
        println!("cargo:rustc-link-arg-bins=--nmagic");
        println!("cargo:rustc-link-arg-bins=-Tlink.x");
        println!("cargo:rustc-link-arg-bins=-Tdefmt.x");
    }
}
