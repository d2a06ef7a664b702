//! EPG (Electronic Program Guide) module
//!
//! Contains the XMLTV generator and related types.

mod generator;

// Re-export public types
pub use generator::{XmltvGenerator, XmltvGuide};
