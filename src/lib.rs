//! msx-g4 - MSX2 GRAPHICS 4 exporter
//!
//! Command-line front end for the `graph4` encoder: PNG in, SCREEN 5 files
//! out. This library exposes modules for integration testing.

pub mod error;
pub mod models;
pub mod rendering;
pub mod services;
