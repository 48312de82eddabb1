//! Cutting a sheet into standalone sub-images.
//!
//! Unlike [`AtlasGrid`](crate::AtlasGrid) this copies pixel blocks, so cells are
//! indexed top-left first without any coordinate flip.

use log::debug;

use crate::assets::atlas::{tile_counts, TilingPolicy};
use crate::error::{Result, SheetError};

/// Raw, tightly packed sheet pixels (row 0 is the top of the image).
#[derive(Debug, Clone)]
pub struct SheetPixels {
    /// Identifier used for sub-image names and diagnostics.
    pub name: Option<String>,
    pub width: u32,
    pub height: u32,
    /// Bytes per pixel (1 = gray, 2 = gray+alpha, 3 = RGB, 4 = RGBA).
    pub channels: u8,
    pub data: Vec<u8>,
}

impl SheetPixels {
    pub fn new(name: Option<String>, width: u32, height: u32, channels: u8, data: Vec<u8>) -> Result<Self> {
        let expected = width as usize * height as usize * channels as usize;
        if data.len() != expected {
            return Err(SheetError::PixelBufferSize {
                expected,
                actual: data.len(),
            });
        }
        Ok(Self {
            name,
            width,
            height,
            channels,
            data,
        })
    }

    /// Wrap an RGBA image.
    #[cfg(feature = "image")]
    pub fn from_rgba(image: &image::RgbaImage, name: Option<String>) -> Self {
        Self {
            name,
            width: image.width(),
            height: image.height(),
            channels: 4,
            data: image.as_raw().clone(),
        }
    }

    fn label(&self) -> &str {
        self.name.as_deref().unwrap_or("sprite")
    }
}

/// One cell cut out of a sheet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubImage {
    /// `{sheet}_{index}`, or `sprite_{index}` for unnamed sheets.
    pub name: String,
    pub width: u32,
    pub height: u32,
    pub channels: u8,
    pub data: Vec<u8>,
}

impl SubImage {
    /// Convert to an RGBA image. Returns None unless the sub-image has 4 channels.
    #[cfg(feature = "image")]
    pub fn to_rgba(&self) -> Option<image::RgbaImage> {
        if self.channels != 4 {
            return None;
        }
        image::RgbaImage::from_raw(self.width, self.height, self.data.clone())
    }
}

/// Cut `sheet` into `cell` sized sub-images, row-major from the top-left cell.
///
/// Only the pixel layout matters here; pass [`TilingPolicy::PowerOfTwo`] when the
/// destination texture storage pads to powers of two.
pub fn slice(sheet: &SheetPixels, cell: [u32; 2], policy: TilingPolicy) -> Result<Vec<SubImage>> {
    let label = sheet.label();
    let (columns, rows) = tile_counts(label, [sheet.width, sheet.height], cell, policy)?;

    let channels = sheet.channels as usize;
    let expected = sheet.width as usize * sheet.height as usize * channels;
    if sheet.data.len() != expected {
        return Err(SheetError::PixelBufferSize {
            expected,
            actual: sheet.data.len(),
        });
    }

    let sheet_stride = sheet.width as usize * channels;
    let cell_stride = cell[0] as usize * channels;

    let mut images = Vec::with_capacity((columns * rows) as usize);
    for row in 0..rows {
        for col in 0..columns {
            let mut data = Vec::with_capacity(cell_stride * cell[1] as usize);
            let x = col as usize * cell_stride;
            for y in 0..cell[1] as usize {
                let start = (row as usize * cell[1] as usize + y) * sheet_stride + x;
                data.extend_from_slice(&sheet.data[start..start + cell_stride]);
            }
            images.push(SubImage {
                name: format!("{label}_{}", images.len()),
                width: cell[0],
                height: cell[1],
                channels: sheet.channels,
                data,
            });
        }
    }

    debug!("{label}: cut into {} sub-images of {}x{}", images.len(), cell[0], cell[1]);
    Ok(images)
}

#[cfg(test)]
mod tests {
    use super::*;

    /// 4x2 gray sheet where each pixel stores its own index.
    fn numbered_sheet(name: Option<&str>) -> SheetPixels {
        SheetPixels::new(name.map(String::from), 4, 2, 1, (0..8).collect()).unwrap()
    }

    #[test]
    fn cuts_row_major_from_top_left() {
        let images = slice(&numbered_sheet(Some("tiles")), [2, 1], TilingPolicy::Exact).unwrap();
        assert_eq!(images.len(), 4);
        assert_eq!(images[0].data, vec![0, 1]);
        assert_eq!(images[1].data, vec![2, 3]);
        assert_eq!(images[2].data, vec![4, 5]);
        assert_eq!(images[3].data, vec![6, 7]);
    }

    #[test]
    fn multi_row_cells_copy_every_line() {
        let images = slice(&numbered_sheet(None), [2, 2], TilingPolicy::Exact).unwrap();
        assert_eq!(images.len(), 2);
        assert_eq!(images[0].data, vec![0, 1, 4, 5]);
        assert_eq!(images[1].data, vec![2, 3, 6, 7]);
    }

    #[test]
    fn names_follow_sheet() {
        let named = slice(&numbered_sheet(Some("tiles")), [2, 2], TilingPolicy::Exact).unwrap();
        assert_eq!(named[1].name, "tiles_1");
        let unnamed = slice(&numbered_sheet(None), [2, 2], TilingPolicy::Exact).unwrap();
        assert_eq!(unnamed[0].name, "sprite_0");
    }

    #[test]
    fn keeps_channel_count() {
        let sheet = SheetPixels::new(None, 2, 2, 4, vec![9; 16]).unwrap();
        let images = slice(&sheet, [1, 1], TilingPolicy::Exact).unwrap();
        assert_eq!(images.len(), 4);
        assert!(images.iter().all(|img| img.channels == 4 && img.data.len() == 4));
    }

    #[test]
    fn rejects_partial_cells() {
        let err = slice(&numbered_sheet(None), [3, 1], TilingPolicy::Exact).unwrap_err();
        assert!(matches!(err, SheetError::InvalidSpriteSize { .. }));
    }

    #[test]
    fn power_of_two_is_optional() {
        let sheet = SheetPixels::new(None, 3, 1, 1, vec![1, 2, 3]).unwrap();
        assert_eq!(slice(&sheet, [1, 1], TilingPolicy::Exact).unwrap().len(), 3);
        assert!(slice(&sheet, [1, 1], TilingPolicy::PowerOfTwo).is_err());
    }

    #[test]
    fn buffer_size_is_checked() {
        let err = SheetPixels::new(None, 2, 2, 4, vec![0; 15]).unwrap_err();
        assert!(matches!(err, SheetError::PixelBufferSize { expected: 16, actual: 15 }));
    }

    #[cfg(feature = "image")]
    #[test]
    fn rgba_round_trip() {
        let mut img = image::RgbaImage::new(4, 4);
        img.put_pixel(2, 0, image::Rgba([1, 2, 3, 4]));
        let sheet = SheetPixels::from_rgba(&img, Some("icons".into()));
        let cells = slice(&sheet, [2, 2], TilingPolicy::Exact).unwrap();
        let top_right = cells[1].to_rgba().unwrap();
        assert_eq!(top_right.get_pixel(0, 0), &image::Rgba([1, 2, 3, 4]));
    }
}
