//! Movie discovery core for MovieLand.
//!
//! Movies are loaded once into a [`catalog::MovieCatalog`], grouped into
//! sections by [`discovery`], and browsed through a [`session::Session`]
//! that also runs the two scripted onboarding tours.

pub mod catalog;
pub mod config;
pub mod discovery;
pub mod error;
pub mod onboarding;
pub mod session;
pub mod telemetry;
