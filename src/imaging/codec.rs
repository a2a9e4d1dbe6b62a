//! Extension-keyed codec registry.
//!
//! Each supported container format maps to a [`CodecEntry`]: the decode
//! function that produced an image and the encode function that writes it
//! back out in the same format.
//!
//! | Extension | Decode | Encode |
//! |---|---|---|
//! | `png` | `image` PNG decoder | `image` PNG encoder, default settings |
//! | `gif` | `image` GIF decoder (first frame) | `GifEncoder`, single frame, no per-frame options |
//! | `tiff` | `image` TIFF decoder | `image` TIFF encoder, no compression options |
//!
//! The table is built once per process ([`CodecRegistry::standard`]) and
//! never mutated afterwards, so lookups are side-effect free and safe from
//! any thread. Extra formats are added by building a new registry with
//! [`CodecRegistry::with_codec`], not by branching in the loader.

use super::surface::Raster;
use image::codecs::gif::GifEncoder;
use image::{DynamicImage, Frame, ImageFormat, ImageReader, ImageResult};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::io::{BufRead, Seek, Write};
use std::sync::LazyLock;

/// Byte stream a decoder reads from.
pub trait ImageSource: BufRead + Seek {}
impl<T: BufRead + Seek + ?Sized> ImageSource for T {}

/// Byte stream an encoder writes to. TIFF needs to seek back to patch offsets.
pub trait ImageSink: Write + Seek {}
impl<T: Write + Seek + ?Sized> ImageSink for T {}

pub type DecodeFn = fn(&mut dyn ImageSource) -> ImageResult<Box<dyn Raster>>;
pub type EncodeFn = fn(&DynamicImage, &mut dyn ImageSink) -> ImageResult<()>;

/// Decode/encode pair for one container format.
#[derive(Clone, Copy)]
pub struct CodecEntry {
    pub decode: DecodeFn,
    pub encode: EncodeFn,
}

impl fmt::Debug for CodecEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CodecEntry").finish_non_exhaustive()
    }
}

/// How a file extension is compared against registry keys.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ExtensionMatching {
    /// `PNG` does not match `png`.
    #[default]
    Exact,
    /// ASCII case is folded before comparing.
    IgnoreCase,
}

const BUILTIN_CODECS: &[(&str, CodecEntry)] = &[
    (
        "png",
        CodecEntry {
            decode: decode_png,
            encode: encode_png,
        },
    ),
    (
        "gif",
        CodecEntry {
            decode: decode_gif,
            encode: encode_gif,
        },
    ),
    (
        "tiff",
        CodecEntry {
            decode: decode_tiff,
            encode: encode_tiff,
        },
    ),
];

static STANDARD: LazyLock<CodecRegistry> = LazyLock::new(CodecRegistry::builtin);

/// Immutable mapping from file extension to [`CodecEntry`].
#[derive(Debug, Clone)]
pub struct CodecRegistry {
    entries: BTreeMap<String, CodecEntry>,
    matching: ExtensionMatching,
}

impl CodecRegistry {
    /// The process-wide registry: built-in codecs, exact extension matching.
    pub fn standard() -> &'static CodecRegistry {
        &STANDARD
    }

    /// A fresh registry holding the built-in codecs.
    pub fn builtin() -> Self {
        Self::empty().with_codecs(BUILTIN_CODECS.iter().copied())
    }

    pub fn empty() -> Self {
        Self {
            entries: BTreeMap::new(),
            matching: ExtensionMatching::default(),
        }
    }

    /// Add or replace the codec for `extension`.
    pub fn with_codec(mut self, extension: impl Into<String>, entry: CodecEntry) -> Self {
        self.entries.insert(extension.into(), entry);
        self
    }

    fn with_codecs<'a>(self, codecs: impl IntoIterator<Item = (&'a str, CodecEntry)>) -> Self {
        codecs
            .into_iter()
            .fold(self, |registry, (ext, entry)| registry.with_codec(ext, entry))
    }

    pub fn with_matching(mut self, matching: ExtensionMatching) -> Self {
        self.matching = matching;
        self
    }

    pub fn matching(&self) -> ExtensionMatching {
        self.matching
    }

    /// Find the codec for `extension`.
    ///
    /// Returns the registry key that matched alongside the entry, so callers
    /// record the canonical format name even under
    /// [`ExtensionMatching::IgnoreCase`].
    pub fn get(&self, extension: &str) -> Option<(&str, &CodecEntry)> {
        let found = match self.matching {
            ExtensionMatching::Exact => self.entries.get_key_value(extension),
            ExtensionMatching::IgnoreCase => self
                .entries
                .iter()
                .find(|(key, _)| key.eq_ignore_ascii_case(extension)),
        };
        tracing::trace!(extension, found = found.is_some(), "codec lookup");
        found.map(|(key, entry)| (key.as_str(), entry))
    }

    pub fn contains(&self, extension: &str) -> bool {
        self.get(extension).is_some()
    }

    /// Registered extensions in sorted order.
    pub fn extensions(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }
}

impl Default for CodecRegistry {
    fn default() -> Self {
        Self::builtin()
    }
}

fn decode_as(source: &mut dyn ImageSource, format: ImageFormat) -> ImageResult<Box<dyn Raster>> {
    let image = ImageReader::with_format(source, format).decode()?;
    Ok(Box::new(image))
}

fn decode_png(source: &mut dyn ImageSource) -> ImageResult<Box<dyn Raster>> {
    decode_as(source, ImageFormat::Png)
}

fn decode_gif(source: &mut dyn ImageSource) -> ImageResult<Box<dyn Raster>> {
    decode_as(source, ImageFormat::Gif)
}

fn decode_tiff(source: &mut dyn ImageSource) -> ImageResult<Box<dyn Raster>> {
    decode_as(source, ImageFormat::Tiff)
}

fn encode_png(image: &DynamicImage, mut sink: &mut dyn ImageSink) -> ImageResult<()> {
    image.write_to(&mut sink, ImageFormat::Png)
}

fn encode_gif(image: &DynamicImage, sink: &mut dyn ImageSink) -> ImageResult<()> {
    // The trailer is written when the encoder drops at the end of this scope.
    let mut encoder = GifEncoder::new(sink);
    encoder.encode_frame(Frame::new(image.to_rgba8()))
}

fn encode_tiff(image: &DynamicImage, mut sink: &mut dyn ImageSink) -> ImageResult<()> {
    image.write_to(&mut sink, ImageFormat::Tiff)
}
