//! Load an image and hand back everything needed to crop and re-save it.
//!
//! [`load_croppable`] runs the whole pipeline:
//!
//! ```text
//! open file ─→ split path ─→ registry lookup ─→ decode ─→ narrow to CropSurface
//!    │               │              │               │               │
//!  io::Error         │      UnsupportedFormat  ImageLoadFailed  ImageUncroppable
//!                    └──── directory / base_name / format kept in the handle
//! ```
//!
//! The file is opened **before** the extension is checked, so a missing file
//! always reports the I/O error even if its extension is unsupported. The
//! file handle lives in a `BufReader` owned by this function and is released
//! when it returns, whichever step failed.

use super::codec::{CodecRegistry, EncodeFn};
use super::saver::{SaveError, save_image};
use super::surface::{CropError, CropSurface, Raster};
use crate::naming::{join_file_name, split_path};
use image::DynamicImage;
use image::math::Rect;
use std::fmt;
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum LoadError {
    /// Opening the file failed. Passed through unchanged.
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error("unsupported format: {format:?}")]
    UnsupportedFormat { format: String },
    #[error("{source}: unable to load image")]
    ImageLoadFailed { source: image::ImageError },
    #[error("image does not support cropping")]
    ImageUncroppable,
}

/// A decoded image ready for cropping, plus what is needed to save it again.
///
/// `encode` is always the encoder registered for `format`, so re-saving
/// keeps the original container format whatever the cropper does to the
/// pixels.
pub struct Croppable {
    /// Parent directory of the source file.
    pub directory: PathBuf,
    /// Source file name without its extension.
    pub base_name: String,
    /// Registry key the source was decoded with, e.g. `png`.
    pub format: String,
    pub cropper: Box<dyn CropSurface>,
    pub encode: EncodeFn,
}

impl fmt::Debug for Croppable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let bounds = self.cropper.bounds();
        f.debug_struct("Croppable")
            .field("directory", &self.directory)
            .field("base_name", &self.base_name)
            .field("format", &self.format)
            .field("bounds", &(bounds.width, bounds.height))
            .finish_non_exhaustive()
    }
}

impl Croppable {
    pub fn bounds(&self) -> Rect {
        self.cropper.bounds()
    }

    /// Crop the held image in place.
    pub fn crop(&mut self, rect: Rect) -> Result<(), CropError> {
        self.cropper.crop(rect)
    }

    /// `<directory>/<base_name><suffix>.<format>`
    pub fn output_path(&self, suffix: &str) -> PathBuf {
        join_file_name(&self.directory, &self.base_name, suffix, &self.format)
    }

    /// Encode the current pixels to `path` in the original format.
    pub fn save_to(&self, path: impl AsRef<Path>) -> Result<(), SaveError> {
        save_image(path, &self.cropper.to_image(), self.encode)
    }

    /// Give up the handle, keeping the pixels and the bound encoder.
    pub fn into_image(self) -> (DynamicImage, EncodeFn) {
        (self.cropper.into_image(), self.encode)
    }
}

/// Load `path` using the process-wide [`CodecRegistry::standard`].
pub fn load_croppable(path: impl AsRef<Path>) -> Result<Croppable, LoadError> {
    load_croppable_with(path, CodecRegistry::standard())
}

/// Load `path`, dispatching on its extension through `registry`.
pub fn load_croppable_with(
    path: impl AsRef<Path>,
    registry: &CodecRegistry,
) -> Result<Croppable, LoadError> {
    let path = path.as_ref();
    let mut reader = BufReader::new(File::open(path)?);

    let parts = split_path(path);
    let (format, codec) = registry
        .get(&parts.extension)
        .ok_or_else(|| LoadError::UnsupportedFormat {
            format: parts.extension.clone(),
        })?;

    let raster =
        (codec.decode)(&mut reader).map_err(|source| LoadError::ImageLoadFailed { source })?;
    let (width, height) = raster.dimensions();
    let cropper = raster.into_surface().ok_or(LoadError::ImageUncroppable)?;

    tracing::debug!(
        path = %path.display(),
        format,
        width,
        height,
        "loaded croppable image"
    );

    Ok(Croppable {
        directory: parts.directory,
        base_name: parts.base_name,
        format: format.to_string(),
        cropper,
        encode: codec.encode,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::imaging::codec::{CodecEntry, ExtensionMatching, ImageSink, ImageSource};
    use crate::test_helpers::*;
    use image::ImageResult;
    use std::error::Error as _;

    struct Procedural;

    impl Raster for Procedural {
        fn dimensions(&self) -> (u32, u32) {
            (4, 4)
        }
    }

    fn decode_procedural(_: &mut dyn ImageSource) -> ImageResult<Box<dyn Raster>> {
        Ok(Box::new(Procedural))
    }

    fn encode_nothing(_: &DynamicImage, _: &mut dyn ImageSink) -> ImageResult<()> {
        Ok(())
    }

    #[test]
    fn loads_png_with_naming_metadata() {
        let tmp = tempfile::TempDir::new().unwrap();
        let path = tmp.path().join("c.image.png");
        write_fixture(&path, 12, 9);

        let handle = load_croppable(&path).unwrap();
        assert_eq!(handle.directory, tmp.path());
        assert_eq!(handle.base_name, "c.image");
        assert_eq!(handle.format, "png");
        assert_eq!((handle.bounds().width, handle.bounds().height), (12, 9));
    }

    #[test]
    fn loads_every_builtin_format() {
        let tmp = tempfile::TempDir::new().unwrap();
        for ext in ["png", "gif", "tiff"] {
            let path = tmp.path().join(format!("sample.{ext}"));
            write_fixture(&path, 5, 3);
            let handle = load_croppable(&path).unwrap();
            assert_eq!(handle.format, ext);
            assert_eq!(handle.bounds().width, 5);
        }
    }

    #[test]
    fn missing_file_surfaces_raw_io_error() {
        let err = load_croppable("/nonexistent/dir/image.png").unwrap_err();
        match err {
            LoadError::Io(io) => assert_eq!(io.kind(), std::io::ErrorKind::NotFound),
            other => panic!("expected Io, got {other:?}"),
        }
    }

    #[test]
    fn missing_file_with_unsupported_extension_reports_io_first() {
        let err = load_croppable("/nonexistent/dir/image.jpg").unwrap_err();
        assert!(matches!(err, LoadError::Io(_)));
    }

    #[test]
    fn unsupported_extension() {
        let tmp = tempfile::TempDir::new().unwrap();
        let path = tmp.path().join("photo.jpg");
        std::fs::write(&path, b"whatever").unwrap();

        let err = load_croppable(&path).unwrap_err();
        assert!(
            matches!(&err, LoadError::UnsupportedFormat { format } if format == "jpg"),
            "got {err:?}"
        );
    }

    #[test]
    fn missing_extension_is_unsupported() {
        let tmp = tempfile::TempDir::new().unwrap();
        let path = tmp.path().join("noext");
        write_fixture_as(&path, 2, 2, image::ImageFormat::Png);

        let err = load_croppable(&path).unwrap_err();
        assert!(matches!(&err, LoadError::UnsupportedFormat { format } if format.is_empty()));
    }

    #[test]
    fn uppercase_extension_rejected_by_default() {
        let tmp = tempfile::TempDir::new().unwrap();
        let path = tmp.path().join("IMG_0001.PNG");
        write_fixture_as(&path, 2, 2, image::ImageFormat::Png);

        let err = load_croppable(&path).unwrap_err();
        assert!(matches!(&err, LoadError::UnsupportedFormat { format } if format == "PNG"));
    }

    #[test]
    fn uppercase_extension_accepted_when_ignoring_case() {
        let tmp = tempfile::TempDir::new().unwrap();
        let path = tmp.path().join("IMG_0001.PNG");
        write_fixture_as(&path, 2, 2, image::ImageFormat::Png);

        let registry = CodecRegistry::builtin().with_matching(ExtensionMatching::IgnoreCase);
        let handle = load_croppable_with(&path, &registry).unwrap();
        assert_eq!(handle.format, "png");
        assert_eq!(handle.base_name, "IMG_0001");
    }

    #[test]
    fn corrupt_png_keeps_decoder_message() {
        let tmp = tempfile::TempDir::new().unwrap();
        let path = tmp.path().join("broken.png");
        std::fs::write(&path, b"\x89PNG\r\n\x1a\nthis is not a real chunk stream").unwrap();

        let err = load_croppable(&path).unwrap_err();
        let LoadError::ImageLoadFailed { source } = &err else {
            panic!("expected ImageLoadFailed, got {err:?}");
        };
        let message = err.to_string();
        assert!(message.ends_with(": unable to load image"), "{message}");
        assert!(message.contains(&source.to_string()), "{message}");
        assert!(err.source().is_some());
    }

    #[test]
    fn raster_without_crop_capability_is_uncroppable() {
        let tmp = tempfile::TempDir::new().unwrap();
        let path = tmp.path().join("pattern.proc");
        std::fs::write(&path, b"").unwrap();

        let registry = CodecRegistry::empty().with_codec(
            "proc",
            CodecEntry {
                decode: decode_procedural,
                encode: encode_nothing,
            },
        );
        let err = load_croppable_with(&path, &registry).unwrap_err();
        assert!(matches!(err, LoadError::ImageUncroppable));
    }

    #[test]
    fn handle_encoder_matches_format() {
        let tmp = tempfile::TempDir::new().unwrap();
        let path = tmp.path().join("source.tiff");
        write_fixture(&path, 4, 4);

        let handle = load_croppable(&path).unwrap();
        let (_, tiff) = CodecRegistry::standard().get("tiff").unwrap();
        assert_eq!(handle.encode as usize, tiff.encode as usize);
    }

    #[test]
    fn crop_then_save_keeps_format() {
        let tmp = tempfile::TempDir::new().unwrap();
        let path = tmp.path().join("dawn.png");
        write_fixture(&path, 10, 8);

        let mut handle = load_croppable(&path).unwrap();
        handle
            .crop(Rect {
                x: 2,
                y: 1,
                width: 4,
                height: 3,
            })
            .unwrap();
        let out = handle.output_path("-cropped");
        assert_eq!(out, tmp.path().join("dawn-cropped.png"));
        handle.save_to(&out).unwrap();

        let reloaded = load_croppable(&out).unwrap();
        assert_eq!(reloaded.format, "png");
        let (image, _) = reloaded.into_image();
        let rgb = image.to_rgb8();
        assert_eq!(rgb.dimensions(), (4, 3));
        assert_eq!(rgb.get_pixel(0, 0), &fixture_pixel(2, 1));
        assert_eq!(rgb.get_pixel(3, 2), &fixture_pixel(5, 3));
    }

    #[test]
    fn debug_output_shows_bounds() {
        let tmp = tempfile::TempDir::new().unwrap();
        let path = tmp.path().join("a.gif");
        write_fixture(&path, 3, 2);
        let handle = load_croppable(&path).unwrap();
        let debug = format!("{handle:?}");
        assert!(debug.contains("bounds: (3, 2)"), "{debug}");
        assert!(debug.contains("format: \"gif\""), "{debug}");
    }
}
