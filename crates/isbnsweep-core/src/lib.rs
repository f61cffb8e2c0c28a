//! Core logic for the isbnsweep bot
//!
//! Everything in this crate is pure and I/O-free: classifying stored ISBN
//! values against their expected kind, deriving the canonical hyphenated
//! form, and rendering the invalid-ISBN report. Network access lives in
//! the `wikidata-client` crate; orchestration lives in the binary.

pub mod classify;
pub mod report;
pub mod types;

pub use classify::*;
pub use report::*;
pub use types::*;
