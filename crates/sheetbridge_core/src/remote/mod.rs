//! Remote conversion service client.
//!
//! # Responsibility
//! - Define the wire types and transport seam for matrix-to-workbook
//!   conversion.
//! - Decode the hex-encoded workbook payload.
//!
//! # Invariants
//! - `success: false` surfaces the backend's error string verbatim.
//! - Malformed hex never yields a partial byte buffer.

pub mod convert;
pub mod http;

/// Default backend base URL (an ngrok tunnel in the shipped deployment).
pub const DEFAULT_API_BASE_URL: &str = "https://salvational-unvisible-ligia.ngrok-free.dev";
