//! `forgepos-web`
//!
//! **Responsibility:** Browser front end of the point-of-sale system.
//!
//! This crate provides:
//! - The Leptos shell: navigation bar + outlet driven by `forgepos-router`
//! - Browser backends for the session store (`localStorage`) and history
//! - The login call that raises the login-success signal
//!
//! The browser pieces only build for `wasm32`; configuration and the login
//! wire types are plain Rust and tested on the host.

pub mod config;
pub mod types;

#[cfg(target_arch = "wasm32")]
pub mod frontend;

pub use config::WebConfig;
pub use types::{LoginError, LoginForm, LoginRequest, LoginResponse};
