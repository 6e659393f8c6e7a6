// Core error modeling shared by the extractor and the compiler.
pub mod error;
