//! Purpose: JSON parsing boundary shared by the extractor and the compiler.
//! Exports: `parse` module with decode helpers and failure categorization.
//! Role: Single seam for parser usage so callsites avoid ad hoc decode logic.
//! Invariants: Runtime JSON decoding goes through this module.

pub mod parse;
