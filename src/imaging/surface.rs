//! Crop capability and the narrowing step that grants it.
//!
//! Decoders produce a [`Raster`]: something with dimensions that may or may
//! not expose its pixels. Cropping needs more than that, namely a
//! [`CropSurface`] that can report its bounds, copy out a sub-rectangle, and
//! shrink itself in place.
//!
//! | Decoded value | Narrows to `CropSurface`? |
//! |---|---|
//! | `DynamicImage` with an 8/16-bit integer or 32-bit float buffer | yes, the buffer itself |
//! | `DynamicImage` variant added by a future `image` release | no |
//! | Any other `Raster` (procedural, proxy, metadata-only) | no, unless it overrides [`Raster::into_surface`] |
//!
//! Narrowing consumes the raster. On failure the loader reports
//! [`LoadError::ImageUncroppable`](super::LoadError::ImageUncroppable).

use image::math::Rect;
use image::{DynamicImage, GenericImageView, ImageBuffer, Pixel, imageops};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CropError {
    #[error("crop rectangle has zero area ({width}x{height})")]
    Empty { width: u32, height: u32 },
    #[error(
        "crop rectangle {x},{y} {width}x{height} exceeds image bounds {bounds_width}x{bounds_height}"
    )]
    OutOfBounds {
        x: u32,
        y: u32,
        width: u32,
        height: u32,
        bounds_width: u32,
        bounds_height: u32,
    },
}

/// The minimal capability a cropping algorithm needs.
///
/// Coordinates are in pixels with the origin at the top-left corner.
pub trait CropSurface: Send {
    /// Full pixel rectangle, always anchored at `(0, 0)`.
    fn bounds(&self) -> Rect;

    /// Copy the pixels inside `rect` into a new image, leaving `self` untouched.
    fn sub_image(&self, rect: Rect) -> Result<DynamicImage, CropError>;

    /// Replace `self` with the pixels inside `rect`.
    fn crop(&mut self, rect: Rect) -> Result<(), CropError>;

    /// Encodable copy of the current pixels.
    fn to_image(&self) -> DynamicImage;

    /// Encodable image, consuming the surface.
    fn into_image(self: Box<Self>) -> DynamicImage;
}

/// A decoded image as returned by a codec's decode function.
pub trait Raster: Send {
    fn dimensions(&self) -> (u32, u32);

    /// Narrow to the crop capability, or `None` if this representation has
    /// no addressable pixel rectangle.
    fn into_surface(self: Box<Self>) -> Option<Box<dyn CropSurface>> {
        None
    }
}

impl Raster for DynamicImage {
    fn dimensions(&self) -> (u32, u32) {
        GenericImageView::dimensions(self)
    }

    fn into_surface(self: Box<Self>) -> Option<Box<dyn CropSurface>> {
        // `DynamicImage` is non-exhaustive: unknown variants stay uncroppable
        // until someone teaches this match about them.
        let surface: Box<dyn CropSurface> = match *self {
            DynamicImage::ImageLuma8(buf) => Box::new(buf),
            DynamicImage::ImageLumaA8(buf) => Box::new(buf),
            DynamicImage::ImageRgb8(buf) => Box::new(buf),
            DynamicImage::ImageRgba8(buf) => Box::new(buf),
            DynamicImage::ImageLuma16(buf) => Box::new(buf),
            DynamicImage::ImageLumaA16(buf) => Box::new(buf),
            DynamicImage::ImageRgb16(buf) => Box::new(buf),
            DynamicImage::ImageRgba16(buf) => Box::new(buf),
            DynamicImage::ImageRgb32F(buf) => Box::new(buf),
            DynamicImage::ImageRgba32F(buf) => Box::new(buf),
            _ => return None,
        };
        Some(surface)
    }
}

impl<P> CropSurface for ImageBuffer<P, Vec<P::Subpixel>>
where
    P: Pixel + Send + 'static,
    P::Subpixel: Send + 'static,
    DynamicImage: From<ImageBuffer<P, Vec<P::Subpixel>>>,
{
    fn bounds(&self) -> Rect {
        Rect {
            x: 0,
            y: 0,
            width: self.width(),
            height: self.height(),
        }
    }

    fn sub_image(&self, rect: Rect) -> Result<DynamicImage, CropError> {
        check_within(rect, self.bounds())?;
        let view = imageops::crop_imm(self, rect.x, rect.y, rect.width, rect.height);
        Ok(DynamicImage::from(view.to_image()))
    }

    fn crop(&mut self, rect: Rect) -> Result<(), CropError> {
        check_within(rect, self.bounds())?;
        let cropped = imageops::crop_imm(self, rect.x, rect.y, rect.width, rect.height).to_image();
        *self = cropped;
        Ok(())
    }

    fn to_image(&self) -> DynamicImage {
        DynamicImage::from(self.clone())
    }

    fn into_image(self: Box<Self>) -> DynamicImage {
        DynamicImage::from(*self)
    }
}

/// Reject rectangles `imageops::crop_imm` would silently clamp.
pub fn check_within(rect: Rect, bounds: Rect) -> Result<(), CropError> {
    if rect.width == 0 || rect.height == 0 {
        return Err(CropError::Empty {
            width: rect.width,
            height: rect.height,
        });
    }
    let fits_x = rect
        .x
        .checked_add(rect.width)
        .is_some_and(|right| right <= bounds.width);
    let fits_y = rect
        .y
        .checked_add(rect.height)
        .is_some_and(|bottom| bottom <= bounds.height);
    if fits_x && fits_y {
        Ok(())
    } else {
        Err(CropError::OutOfBounds {
            x: rect.x,
            y: rect.y,
            width: rect.width,
            height: rect.height,
            bounds_width: bounds.width,
            bounds_height: bounds.height,
        })
    }
}
