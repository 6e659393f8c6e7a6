//! Purpose: Zero-argument `extract-json` entry that runs `distrokit extract`.
//! Role: Lets the extractor be invoked directly; with no args it reads `./curl_output.txt`.
//! Invariants: Exit status is the child's; launch failures print one stderr line and exit 1.
use distrokit::alias::run_alias;

fn main() {
    match run_alias("extract") {
        Ok(code) => std::process::exit(code),
        Err(err) => {
            eprintln!("extract-json: {}", err.describe());
            std::process::exit(1);
        }
    }
}
