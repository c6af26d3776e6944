//! Furrow Testing Infrastructure
//!
//! Scripted transport doubles and fixtures shared by the workspace's tests.
//!
//! # Usage
//!
//! ```toml
//! [dev-dependencies]
//! furrow-testkit = { path = "../furrow-testkit" }
//! ```
//!
//! ```rust,ignore
//! use furrow_testkit::*;
//!
//! let messenger = MockMessenger::new();
//! let farmer = test_contact(1);
//! messenger.respond_ok(&farmer.node_id, serde_json::json!({ "token": "t" }));
//! ```

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]

pub mod fixtures;
pub mod logging;
pub mod messenger;
pub mod publisher;

pub use fixtures::*;
pub use logging::init_test_tracing;
pub use messenger::{MockMessenger, SentRequest};
pub use publisher::RecordingPublisher;
