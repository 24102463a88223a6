//! # Shop Search Core
//!
//! The in-memory filtering and ranking engine behind Shop Search:
//! reference data model, geo and tag filters, the popularity-ordered query
//! planner, and the result assembler.
//!
//! This crate performs no filesystem or network I/O. Reference data is
//! parsed from any [`std::io::Read`] source, so the calling application
//! decides where the files come from.
//!
//! ```text
//! ReferenceStore ──▶ { geo, tags } ──▶ search ──▶ assemble
//! ```

pub mod assemble;
pub mod error;
pub mod geo;
pub mod models;
pub mod search;
pub mod store;
pub mod tags;

pub use assemble::{assemble, search_records, ProductRecord};
pub use error::{LoadError, SearchError};
pub use search::{search, SearchFilters, DEFAULT_COUNT};
pub use store::ReferenceStore;
pub use tags::TagIndex;
