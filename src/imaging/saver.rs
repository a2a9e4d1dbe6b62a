//! Write an image to disk with a given encode function.
//!
//! The destination is created (or truncated) and wrapped in a `BufWriter`
//! owned by [`save_image`]; it is flushed on success and dropped on every
//! return path, so a failing encoder never leaks the file descriptor.

use super::codec::EncodeFn;
use image::DynamicImage;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SaveError {
    /// Creating or flushing the destination failed. Passed through unchanged.
    #[error(transparent)]
    Io(#[from] std::io::Error),
    /// The encode function failed. Passed through unchanged.
    #[error(transparent)]
    Encode(#[from] image::ImageError),
}

/// Create `path` and write `image` into it with `encode`.
///
/// On failure the file may hold whatever the encoder wrote before erroring.
pub fn save_image(
    path: impl AsRef<Path>,
    image: &DynamicImage,
    encode: EncodeFn,
) -> Result<(), SaveError> {
    let path = path.as_ref();
    let mut writer = BufWriter::new(File::create(path)?);
    encode(image, &mut writer)?;
    writer.flush()?;

    tracing::debug!(
        path = %path.display(),
        width = image.width(),
        height = image.height(),
        "saved image"
    );
    Ok(())
}
