//! Account Desk Core Library
//!
//! This library provides the client-side layer of the account desk
//! application: a typed view of the accounts the backend manages, a typed
//! bridge to the backend's functions, and the reactive application state that
//! the UI (or the headless driver binary) reads from.
//!
//! # Architecture
//!
//! The library is organized into the following modules:
//! - [`model`] - `AccountItem` and payload parsing
//! - [`bridge`] - `AccountService` trait and the HTTP bridge client
//! - [`router`] - Hash-history router mapping paths to views
//! - [`store`] - `AppStore`, the state-and-orchestration layer

// Clippy lints - strict for library code
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod bridge;
pub mod model;
pub mod router;
pub mod store;

// Re-export commonly used types
pub use bridge::{AccountService, BridgeError, BridgeMethod, DEFAULT_BRIDGE_URL, HttpBridge};
pub use model::{AccountItem, ModelError};
pub use router::{LOGIN_PATH, Location, ROOT_PATH, RouteRecord, Router, RouterError, View};
pub use store::{AppStore, DEFAULT_PAGE, DEFAULT_PAGE_SIZE, StoreError, StoreSnapshot};
