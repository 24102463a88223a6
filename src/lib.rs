//! # Shop Search
//!
//! A read-only product search service. Merchant, product and tag reference
//! files are loaded into memory once at startup; HTTP queries are answered
//! by filtering and ranking that data with [`shop_search_core`].
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────┐   ┌────────────────┐   ┌──────────────┐
//! │  CSV files   │──▶│ ReferenceStore │──▶│ search +     │
//! │  data dir    │   │  (immutable)   │   │ assemble     │
//! └──────────────┘   └────────────────┘   └──────┬───────┘
//!                                                │
//!                             ┌──────────────────┤
//!                             ▼                  ▼
//!                        ┌──────────┐      ┌──────────┐
//!                        │   CLI    │      │   HTTP   │
//!                        └──────────┘      └──────────┘
//! ```
//!
//! ## Modules
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`config`] | TOML configuration parsing |
//! | [`data`] | Loading the reference data directory |
//! | [`search`] | Query option coercion and the `search` command |
//! | [`server`] | HTTP server |
//! | [`stats`] | Reference data summary |

pub mod config;
pub mod data;
pub mod search;
pub mod server;
pub mod stats;
