//! Format-preserving image loading and saving.
//!
//! | Step | Module | Entry point |
//! |---|---|---|
//! | Extension → decoder/encoder | [`codec`] | [`CodecRegistry::get`] |
//! | Decoded value → crop capability | [`surface`] | [`Raster::into_surface`] |
//! | File → handle | [`loader`] | [`load_croppable`] |
//! | Image → file | [`saver`] | [`save_image`] |
//!
//! Everything here is synchronous and holds at most one open file per call.
//! The only shared state is the read-only [`CodecRegistry::standard`].

pub mod codec;
pub mod loader;
pub mod saver;
pub mod surface;

pub use codec::{CodecEntry, CodecRegistry, DecodeFn, EncodeFn, ExtensionMatching};
pub use image::math::Rect;
pub use loader::{Croppable, LoadError, load_croppable, load_croppable_with};
pub use saver::{SaveError, save_image};
pub use surface::{CropError, CropSurface, Raster};
