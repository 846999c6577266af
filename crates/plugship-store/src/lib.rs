//! Marketplace HTTP client for Plugship.
//!
//! Implements the [`StoreClient`](plugship_core::StoreClient) contract over
//! the store's REST API: token authentication, plugin lookup with expansion,
//! multipart binary upload/update, metadata commit, review submission, and
//! platform-version reference data.

mod client;
mod types;

pub use client::MarketplaceClient;
