use std::{path::Path, sync::Arc};

use anyhow::Context;

use crate::{
    assets::decode,
    foundation::{
        error::{PibError, PibResult},
        math::Vector2,
    },
    render::composite,
};

/// Color mode an [`ImageHandle`] can be converted to.
///
/// Pixels are always stored as RGBA8; converting rewrites them so they carry exactly the
/// information the target mode can represent.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ColorMode {
    /// Color plus alpha.
    #[default]
    Rgba,
    /// Color, alpha forced opaque.
    Rgb,
    /// Grayscale, alpha forced opaque.
    Luma,
    /// Grayscale plus alpha.
    LumaAlpha,
}

/// Crop region: either an extent anchored at the origin or an explicit box.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CropRegion {
    /// `(0, 0, width, height)`.
    Extent {
        /// Width of the kept region.
        width: u32,
        /// Height of the kept region.
        height: u32,
    },
    /// `(left, top, right, bottom)`, right/bottom exclusive.
    Rect {
        /// Left edge.
        left: u32,
        /// Top edge.
        top: u32,
        /// Right edge (exclusive).
        right: u32,
        /// Bottom edge (exclusive).
        bottom: u32,
    },
}

impl CropRegion {
    fn bounds(self) -> PibResult<(u32, u32, u32, u32)> {
        match self {
            Self::Extent { width, height } => Ok((0, 0, width, height)),
            Self::Rect {
                left,
                top,
                right,
                bottom,
            } => {
                if right < left || bottom < top {
                    return Err(PibError::invalid_argument(format!(
                        "crop box ({left}, {top}, {right}, {bottom}) is inverted"
                    )));
                }
                Ok((left, top, right, bottom))
            }
        }
    }
}

impl From<(u32, u32)> for CropRegion {
    fn from((width, height): (u32, u32)) -> Self {
        Self::Extent { width, height }
    }
}

impl From<(u32, u32, u32, u32)> for CropRegion {
    fn from((left, top, right, bottom): (u32, u32, u32, u32)) -> Self {
        Self::Rect {
            left,
            top,
            right,
            bottom,
        }
    }
}

impl TryFrom<&[u32]> for CropRegion {
    type Error = PibError;

    fn try_from(v: &[u32]) -> PibResult<Self> {
        match *v {
            [width, height] => Ok(Self::Extent { width, height }),
            [left, top, right, bottom] => Ok(Self::Rect {
                left,
                top,
                right,
                bottom,
            }),
            _ => Err(PibError::invalid_argument(format!(
                "crop expects 2 or 4 values, received {}",
                v.len()
            ))),
        }
    }
}

/// Target size for [`ImageHandle::resize`]; validated when used.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PixelSize {
    /// Width in pixels.
    pub width: i64,
    /// Height in pixels.
    pub height: i64,
}

impl From<Vector2> for PixelSize {
    fn from(v: Vector2) -> Self {
        let (width, height) = v.i();
        Self {
            width: i64::from(width),
            height: i64::from(height),
        }
    }
}

impl From<(i32, i32)> for PixelSize {
    fn from((width, height): (i32, i32)) -> Self {
        Self {
            width: i64::from(width),
            height: i64::from(height),
        }
    }
}

impl From<(u32, u32)> for PixelSize {
    fn from((width, height): (u32, u32)) -> Self {
        Self {
            width: i64::from(width),
            height: i64::from(height),
        }
    }
}

/// Owned decoded bitmap, optionally paired with the encoded bytes it came from.
///
/// The bitmap field is declared first so it is dropped before the encoded buffer. Every
/// constructor either yields a fully decoded bitmap or an error; there is no empty handle.
#[derive(Clone, Debug)]
pub struct ImageHandle {
    bitmap: image::RgbaImage,
    mode: ColorMode,
    encoded: Option<Arc<[u8]>>,
}

impl ImageHandle {
    /// Read and decode an image file.
    pub fn open(path: impl AsRef<Path>) -> PibResult<Self> {
        let path = path.as_ref();
        let bytes = std::fs::read(path)
            .with_context(|| format!("read image '{}'", path.display()))?;
        Self::from_bytes(bytes)
    }

    /// Decode encoded bytes, keeping them alongside the bitmap.
    pub fn from_bytes(bytes: impl Into<Arc<[u8]>>) -> PibResult<Self> {
        let encoded: Arc<[u8]> = bytes.into();
        let bitmap = decode::decode_image(&encoded)?;
        Ok(Self {
            bitmap,
            mode: ColorMode::Rgba,
            encoded: Some(encoded),
        })
    }

    /// Wrap an already decoded bitmap.
    pub fn from_rgba(bitmap: image::RgbaImage) -> Self {
        Self {
            bitmap,
            mode: ColorMode::Rgba,
            encoded: None,
        }
    }

    /// Fully transparent black image.
    pub fn blank(width: u32, height: u32) -> Self {
        Self::from_rgba(image::RgbaImage::new(width, height))
    }

    /// `(width, height)`.
    pub fn dimensions(&self) -> (u32, u32) {
        self.bitmap.dimensions()
    }

    /// Width in pixels.
    pub fn width(&self) -> u32 {
        self.bitmap.width()
    }

    /// Height in pixels.
    pub fn height(&self) -> u32 {
        self.bitmap.height()
    }

    /// Current color mode.
    pub fn mode(&self) -> ColorMode {
        self.mode
    }

    /// Encoded bytes this handle was decoded from, if any.
    pub fn encoded(&self) -> Option<&[u8]> {
        self.encoded.as_deref()
    }

    /// Straight-alpha RGBA8 pixels.
    pub fn as_rgba(&self) -> &image::RgbaImage {
        &self.bitmap
    }

    /// Consume the handle, keeping only the bitmap.
    pub fn into_rgba(self) -> image::RgbaImage {
        self.bitmap
    }

    /// Rewrite pixels for `mode` in place.
    pub fn convert(&mut self, mode: ColorMode) {
        if mode == self.mode {
            return;
        }
        for px in self.bitmap.pixels_mut() {
            let [r, g, b, a] = px.0;
            px.0 = match mode {
                ColorMode::Rgba => [r, g, b, a],
                ColorMode::Rgb => [r, g, b, 255],
                ColorMode::Luma => {
                    let l = luma(r, g, b);
                    [l, l, l, 255]
                }
                ColorMode::LumaAlpha => {
                    let l = luma(r, g, b);
                    [l, l, l, a]
                }
            };
        }
        self.mode = mode;
    }

    /// Cut out `region`; areas outside the bitmap come back transparent.
    pub fn crop(&self, region: impl Into<CropRegion>) -> PibResult<Self> {
        let (left, top, right, bottom) = region.into().bounds()?;
        let mut out = image::RgbaImage::new(right - left, bottom - top);
        image::imageops::replace(
            &mut out,
            &self.bitmap,
            -i64::from(left),
            -i64::from(top),
        );
        Ok(Self {
            bitmap: out,
            mode: self.mode,
            encoded: None,
        })
    }

    /// Resample to `size` with a Lanczos filter.
    pub fn resize(&self, size: impl Into<PixelSize>) -> PibResult<Self> {
        let size = size.into();
        let (Ok(width), Ok(height)) = (u32::try_from(size.width), u32::try_from(size.height))
        else {
            return Err(PibError::invalid_argument(format!(
                "resize target {}x{} is negative",
                size.width, size.height
            )));
        };
        if width == 0 || height == 0 {
            return Err(PibError::invalid_argument(format!(
                "resize target {width}x{height} is empty"
            )));
        }
        if (width, height) == self.dimensions() {
            return Ok(Self {
                bitmap: self.bitmap.clone(),
                mode: self.mode,
                encoded: None,
            });
        }
        let bitmap = image::imageops::resize(
            &self.bitmap,
            width,
            height,
            image::imageops::FilterType::Lanczos3,
        );
        Ok(Self {
            bitmap,
            mode: self.mode,
            encoded: None,
        })
    }

    /// Paste `other` at `offset`, using its alpha as the blend mask.
    pub fn paste(&mut self, other: &ImageHandle, offset: (i32, i32)) {
        composite::blend_region(
            &mut self.bitmap,
            &other.bitmap,
            i64::from(offset.0),
            i64::from(offset.1),
            composite::mask_blend,
        );
    }

    /// Alpha-composite `other` over the region starting at `offset`.
    pub fn composite_at(&mut self, other: &ImageHandle, offset: (i32, i32)) {
        composite::blend_region(
            &mut self.bitmap,
            &other.bitmap,
            i64::from(offset.0),
            i64::from(offset.1),
            composite::over,
        );
    }

    /// New handle holding `layer` alpha-composited over `self`; sizes must match.
    pub fn alpha(&self, layer: &ImageHandle) -> PibResult<Self> {
        Ok(Self::from_rgba(composite::merge_layers(
            &self.bitmap,
            &layer.bitmap,
        )?))
    }

    /// Encode as PNG, honoring the current color mode.
    pub fn to_png(&self) -> PibResult<Vec<u8>> {
        let rgba = image::DynamicImage::ImageRgba8(self.bitmap.clone());
        let img = match self.mode {
            ColorMode::Rgba => rgba,
            ColorMode::Rgb => image::DynamicImage::ImageRgb8(rgba.to_rgb8()),
            ColorMode::Luma => image::DynamicImage::ImageLuma8(rgba.to_luma8()),
            ColorMode::LumaAlpha => image::DynamicImage::ImageLumaA8(rgba.to_luma_alpha8()),
        };
        decode::encode_png(&img)
    }
}

fn luma(r: u8, g: u8, b: u8) -> u8 {
    ((u32::from(r) * 299 + u32::from(g) * 587 + u32::from(b) * 114 + 500) / 1000) as u8
}

#[cfg(test)]
#[path = "../../tests/unit/assets/image.rs"]
mod tests;
