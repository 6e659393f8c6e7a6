//! Purpose: Library crate backing the `distrokit` CLI and its tests.
//! Exports: `core` (errors), `json` (parse boundary), `notice`, `extract`, `compile`, `alias`.
//! Role: Keeps extraction and compilation pure enough to test without spawning binaries.
//! Invariants: Library functions never print; reporting goes through caller-supplied callbacks.
pub mod alias;
pub mod compile;
pub mod core;
pub mod extract;
pub mod json;
pub mod notice;
