//! Single-page document export.
//!
//! The captured bitmap is embedded as a base64 data URL in a wrapper SVG
//! whose physical size is the page size, which `svg2pdf` then converts.

use base64::{Engine as _, prelude::BASE64_STANDARD};
use log::debug;
use svg::{Document, node::element as svg_element};

use super::raster::RasterImage;
use crate::error::ExportError;

const FALLBACK_PAGE_WIDTH_MM: f32 = 297.0;

/// Physical page size in millimetres.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageSize {
    width_mm: f32,
    height_mm: f32,
}

impl PageSize {
    /// A page `width_mm` wide with the aspect ratio of a
    /// `pixel_width × pixel_height` bitmap.
    pub fn for_bitmap(width_mm: f32, pixel_width: u32, pixel_height: u32) -> Self {
        let width_mm = if width_mm.is_finite() && width_mm > 0.0 {
            width_mm
        } else {
            FALLBACK_PAGE_WIDTH_MM
        };
        let height_mm = width_mm * pixel_height.max(1) as f32 / pixel_width.max(1) as f32;
        Self {
            width_mm,
            height_mm,
        }
    }

    pub fn width_mm(&self) -> f32 {
        self.width_mm
    }

    pub fn height_mm(&self) -> f32 {
        self.height_mm
    }
}

/// Builds the wrapper SVG placing `image` over the whole page.
pub fn page_document(image: &RasterImage, page: PageSize) -> Document {
    let data_url = format!("data:image/png;base64,{}", BASE64_STANDARD.encode(image.png()));
    let bitmap = svg_element::Image::new()
        .set("x", 0)
        .set("y", 0)
        .set("width", image.width())
        .set("height", image.height())
        .set("preserveAspectRatio", "none")
        .set("xlink:href", data_url);

    Document::new()
        .set("xmlns:xlink", "http://www.w3.org/1999/xlink")
        .set("width", format!("{}mm", page.width_mm()))
        .set("height", format!("{}mm", page.height_mm()))
        .set("viewBox", format!("0 0 {} {}", image.width(), image.height()))
        .add(bitmap)
}

/// Wraps a captured bitmap into a one-page PDF `page_width_mm` wide.
///
/// # Errors
///
/// Returns [`ExportError::Scene`] if the wrapper cannot be parsed and
/// [`ExportError::Encode`] if the PDF conversion fails.
pub fn png_to_pdf(image: &RasterImage, page_width_mm: f32) -> Result<Vec<u8>, ExportError> {
    let page = PageSize::for_bitmap(page_width_mm, image.width(), image.height());
    let wrapper = page_document(image, page).to_string();

    let options = svg2pdf::usvg::Options::default();
    let tree = svg2pdf::usvg::Tree::from_str(&wrapper, &options)
        .map_err(|err| ExportError::Scene(err.to_string()))?;

    let pdf = svg2pdf::to_pdf(
        &tree,
        svg2pdf::ConversionOptions::default(),
        svg2pdf::PageOptions::default(),
    )
    .map_err(|err| ExportError::Encode(err.to_string()))?;

    debug!(
        width_mm = page.width_mm(),
        height_mm = page.height_mm(),
        bytes = pdf.len();
        "Document page built"
    );
    Ok(pdf)
}

#[cfg(test)]
mod tests {
    use float_cmp::assert_approx_eq;

    use super::*;

    #[test]
    fn test_page_follows_bitmap_aspect() {
        let page = PageSize::for_bitmap(297.0, 2048, 1536);
        assert_approx_eq!(f32, page.width_mm(), 297.0);
        assert_approx_eq!(f32, page.height_mm(), 222.75);
    }

    #[test]
    fn test_invalid_page_width_falls_back() {
        let page = PageSize::for_bitmap(-1.0, 100, 100);
        assert_approx_eq!(f32, page.width_mm(), 297.0);
        assert_approx_eq!(f32, page.height_mm(), 297.0);
    }

    #[test]
    fn test_wrapper_embeds_data_url() {
        let image = RasterImage::new(vec![1, 2, 3], 4, 3);
        let svg = page_document(&image, PageSize::for_bitmap(297.0, 4, 3)).to_string();
        assert!(svg.contains("data:image/png;base64,AQID"));
        assert!(svg.contains("width=\"297mm\""));
        assert!(svg.contains("viewBox=\"0 0 4 3\""));
    }
}
