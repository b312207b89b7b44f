//! Shared test utilities for the config-bundle workspace.
//!
//! Dev-dependency only, never published.
//!
//! # Modules
//!
//! - [`fixtures`]: canonical content for every bundle file
//! - [`bundle`]: [`bundle::TestBundle`], a bundle laid out in a temp directory
//! - [`gateway`]: [`gateway::FaultyGateway`], a gateway wrapper that injects failures

pub mod bundle;
pub mod fixtures;
pub mod gateway;
