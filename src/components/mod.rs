// ============================================================================
// UI COMPONENTS: the side-panel widgets
// ============================================================================
//
//   tools.rs    tool buttons, stroke sizes, shape kinds, opacity, actions
//   colors.rs   palette picker, hex entry, swatch with transparency preview
// ============================================================================

pub mod colors;
pub mod tools;
