//! # cropkit
//!
//! Load a PNG, GIF or TIFF image, crop it, and save it back in the format it
//! came in.
//!
//! # Pipeline
//!
//! ```text
//! path ─→ load_croppable ─→ Croppable { directory, base_name, format, cropper, encode }
//!                                          │
//!                     cropping algorithm ─→ cropper (CropSurface)
//!                                          │
//! save_image(output_path, image, encode) ←─┘
//! ```
//!
//! The loader picks a codec by file extension, decodes the file, and narrows
//! the decoded value to the [`CropSurface`](imaging::CropSurface) capability.
//! The handle keeps the encode function of the codec that decoded it, so the
//! saved file is always in the original container format.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`naming`] | Splits a path into directory, base name and extension |
//! | [`imaging`] | Codec registry, crop capability, loader and saver |
//! | [`config`] | `cropkit.toml` loading and validation for the CLI |
//! | [`output`] | CLI output formatting |
//!
//! # Design Decisions
//!
//! ## Exact Extension Matching by Default
//!
//! `IMG.PNG` is an unsupported format unless the registry is built with
//! [`ExtensionMatching::IgnoreCase`](imaging::ExtensionMatching::IgnoreCase)
//! (`extension_matching = "ignore-case"` in `cropkit.toml`). The recorded
//! `format` is always the registry key, so saved files get a lowercase
//! extension either way.
//!
//! ## Open Before Validating
//!
//! The loader opens the file before checking its extension. A missing file
//! is always reported as the I/O error, whatever its extension.
//!
//! ## Errors Are Returned, Not Logged
//!
//! Library code emits `tracing` debug events for successful loads and saves
//! only. Every failure goes back to the caller as a typed error.

pub mod config;
pub mod imaging;
pub mod naming;
pub mod output;

#[cfg(test)]
pub(crate) mod test_helpers;
