//! Network clients for the isbnsweep bot
//!
//! Two thin clients over a shared HTTP wrapper: a WDQS SPARQL client
//! that fetches (entity, value) pairs for a property, and a Wikibase
//! Action API client that reads claims, performs guarded claim
//! overwrites, and reads/writes the report page. Response parsing is
//! exposed as standalone functions over JSON strings so everything but
//! the transport is testable offline.

pub mod error;
pub mod http;
pub mod sparql;
pub mod wikibase;

pub use error::*;
pub use http::*;
pub use sparql::*;
pub use wikibase::*;
