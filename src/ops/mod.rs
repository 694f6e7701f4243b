// ============================================================================
// OPS MODULE: raster operations over the canvas pixel buffer
// ============================================================================
//
//   strokes.rs   pencil/eraser segments (Bresenham walk + stamped discs)
//   shapes.rs    rectangle/ellipse outlines, two pixels thick
//   fill.rs      iterative 4-connected flood fill
//   filters.rs   whole-canvas grayscale / sepia / invert passes
// ============================================================================

pub mod fill;
pub mod filters;
pub mod shapes;
pub mod strokes;
