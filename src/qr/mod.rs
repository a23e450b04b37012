//! QR code generation
//!
//! Symbol encoding (error correction, module matrix layout) is delegated
//! to the `qrcode` crate; this module rasterizes the matrix, saves the
//! canonical 1080x1080 PNG, and produces the 200x200 on-screen preview.

mod generator;

pub use generator::{generate, load_preview, GeneratedCode};
