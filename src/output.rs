//! CLI output formatting.
//!
//! Pure functions returning lines, so the text can be tested without
//! touching stdout:
//!
//! ```text
//! dawn.png (png, 4000x3000)
//!     Crop: 100,200 1600x900
//!     Saved: photos/dawn-cropped.png
//! ```

use crate::imaging::{CodecRegistry, Croppable, Rect};
use std::path::Path;

/// Header line for a loaded image: file name, format and size.
pub fn loaded_line(handle: &Croppable) -> String {
    let bounds = handle.bounds();
    format!(
        "{}.{} ({}, {}x{})",
        handle.base_name, handle.format, handle.format, bounds.width, bounds.height
    )
}

pub fn crop_line(rect: Rect) -> String {
    format!(
        "    Crop: {},{} {}x{}",
        rect.x, rect.y, rect.width, rect.height
    )
}

pub fn saved_line(path: &Path) -> String {
    format!("    Saved: {}", path.display())
}

/// One line per registered extension.
pub fn format_list(registry: &CodecRegistry) -> Vec<String> {
    registry.extensions().map(str::to_string).collect()
}
