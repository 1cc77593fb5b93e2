//! Product catalogue client core.
//!
//! - [`domain`]: session lifecycle, access guard, cached repository, and the
//!   ports they depend on.
//! - [`outbound`]: HTTP, file, timer, and navigation adapters.
//! - [`config`]: settings loaded through OrthoConfig.
//! - [`app`]: wiring of adapters into a ready-to-use client.

pub mod app;
pub mod config;
pub mod domain;
pub mod outbound;

#[cfg(any(test, feature = "test-support"))]
pub mod test_support;
