//! HTTP API integration tests.
//!
//! Each test starts the full router on an ephemeral port over a freshly
//! seeded in-memory store and talks to it with reqwest.

#![cfg(feature = "http")]

mod support;

mod articles;
mod categories;
mod drafts;
mod prices;
mod protocol;
mod settings;
