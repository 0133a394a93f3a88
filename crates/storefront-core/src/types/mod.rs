//! Core type definitions used across the Storefront workspace.

pub mod response;

pub use response::{ApiResponse, EnvelopeStatus, ErrorDetail, ErrorEnvelope};
