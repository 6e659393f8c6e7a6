//! Purpose: Zero-argument `compile-distros` entry that runs `distrokit compile`.
//! Role: With no args compiles `data/distros` into `data/distributions.json`.
//! Invariants: Exit status is the child's; launch failures print one stderr line and exit 1.
use distrokit::alias::run_alias;

fn main() {
    match run_alias("compile") {
        Ok(code) => std::process::exit(code),
        Err(err) => {
            eprintln!("compile-distros: {}", err.describe());
            std::process::exit(1);
        }
    }
}
