//! Easel: a small raster paint application.
//!
//! The library side carries everything testable: the pixel buffer and style
//! state, the raster ops, file handling, and the panel widgets.  The binary
//! in `main.rs` only sets up the window and hands control to
//! [`app::EaselApp`].

pub mod app;
pub mod canvas;
pub mod components;
pub mod io;
pub mod logger;
pub mod ops;
