//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate extraction, conversion and payload decoding into one
//!   export entry point.
//! - Keep host/UI layers decoupled from wire and storage details.

pub mod export_service;
