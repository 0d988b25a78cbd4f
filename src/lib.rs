//! Reactive user-record store with asynchronous CRUD against a remote
//! endpoint.
//!
//! The store owns the canonical in-memory collection, tracks per-operation
//! loading/error state, and derives filtered/sorted views and aggregate
//! statistics that stay consistent with the collection. Network round trips
//! go through a swappable [`api::UserApi`] implementation.
//!
//! # Examples
//!
//! In-memory usage with [`core::store::UserStore`]:
//! ```
//! use roster::{
//!     core::store::UserStore,
//!     types::Gender,
//!     user::{QueryPatch, UserRecord},
//! };
//!
//! let mut store = UserStore::new();
//! store.replace_all(vec![UserRecord {
//!     id: 1,
//!     name: "Ann".to_string(),
//!     email: "ann@x.com".to_string(),
//!     age: 30,
//!     gender: Gender::Female,
//!     created_at: None,
//!     updated_at: None,
//!     is_active: Some(true),
//! }]);
//! store.set_query(&QueryPatch {
//!     search: Some(Some("an".to_string())),
//!     ..QueryPatch::default()
//! });
//! assert_eq!(store.filtered().len(), 1);
//! assert_eq!(store.statistics().total, 1);
//! ```
//!
//! Runtime usage against a live endpoint:
//! ```no_run
//! use std::sync::Arc;
//!
//! use roster::{
//!     api::http::HttpUserApi,
//!     config::ApiProfile,
//!     core::store::UserStore,
//!     runtime::handle::{spawn_roster, RuntimeConfig},
//! };
//!
//! # #[tokio::main]
//! # async fn main() {
//! let api = HttpUserApi::new(&ApiProfile::development()).expect("client");
//! let handle = spawn_roster(UserStore::new(), Arc::new(api), RuntimeConfig::default());
//! let count = handle.load().await.expect("load");
//! println!("loaded {count} users");
//! handle.shutdown().await.expect("shutdown");
//! # }
//! ```
#![deny(missing_docs)]

/// Remote endpoint abstraction, HTTP client, and error taxonomy.
pub mod api;
/// Deployment profiles for the remote endpoint.
pub mod config;
/// In-memory authoritative store and operation state.
pub mod core;
/// Pure export transforms for download artifacts.
pub mod export;
/// Single-writer runtime handle and events.
pub mod runtime;
/// Shared identifier aliases and closed enums.
pub mod types;
/// User domain records, drafts, and query parameters.
pub mod user;
/// Field-level validation for user drafts.
pub mod validate;
/// Derived views: filtered/sorted projection and statistics.
pub mod view;
