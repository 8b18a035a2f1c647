//! Storefront MCP Core - Shared types library.
//!
//! This crate provides the domain types used by the Storefront MCP router:
//! - the static tool descriptor advertised on `/toollist`
//! - the invocation request accepted on `/run` and its validation
//! - the normalized product/variant model and availability derivation
//!
//! # Architecture
//!
//! The core crate contains only types and pure functions - no I/O, no HTTP
//! clients. The server crate owns the Storefront API client and maps the raw
//! GraphQL payload into these types.
//!
//! # Modules
//!
//! - [`types`] - Tool descriptors, invocation arguments, products, availability

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
