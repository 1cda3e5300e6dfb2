//! `forgepos-core`: domain foundation building blocks.
//!
//! This crate contains **pure domain** primitives shared by the session,
//! routing and web layers (no browser or storage concerns).

pub mod error;
pub mod id;

pub use error::DomainError;
pub use id::StoreId;
