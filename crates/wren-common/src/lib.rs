//! Common utilities for the Wren HTML parser.
//!
//! This crate provides shared infrastructure used by the parser and its tools:
//! - **Warning System** - deduplicated, colored terminal output for approximated
//!   or unsupported parsing features
//! - **Source Positions** - line/column bookkeeping shared by the input stream
//!   and the parse-error channel

pub mod position;
pub mod warning;

pub use position::SourcePosition;
