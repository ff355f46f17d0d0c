//! Federated-learning device selection.
//!
//! Filters a table of mobile-device hardware specs against minimum RAM,
//! battery and processor requirements and scores every match with a bounded
//! suitability heuristic. The desktop selector, the `device-api` passthrough
//! and the sample generator are thin binaries over this library.

pub mod api;
pub mod data;
pub mod source;
