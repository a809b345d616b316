//! PDF rasterization.
//!
//! One uploaded document becomes one [`RasterPage`] per source page, in page
//! order, at a fixed resolution. Pages render individually: a corrupt page
//! leaves a `None` slot and the batch continues, so output length always
//! equals the source page count.

pub mod error;

#[cfg(test)]
mod tests;

pub use error::RasterError;

use image::DynamicImage;
use pdf2image::{DPI, PDF, Pages, RenderOptionsBuilder};
use tracing::{debug, warn};

use crate::constants::RENDER_DPI;

/// A single rasterized page slot. `image` is `None` when rendering that page
/// failed.
#[derive(Debug, Clone)]
pub struct RasterPage {
    /// Zero-based page index, contiguous and matching source page order.
    pub index: usize,
    pub image: Option<DynamicImage>,
}

impl RasterPage {
    /// Returns `true` if this page rendered successfully.
    pub fn is_rendered(&self) -> bool {
        self.image.is_some()
    }
}

/// Renders document pages to bitmaps at a fixed magnification.
#[derive(Debug, Clone)]
pub struct PageRasterizer {
    dpi: u32,
}

impl Default for PageRasterizer {
    fn default() -> Self {
        Self { dpi: RENDER_DPI }
    }
}

impl PageRasterizer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rasterizes every page of `bytes`.
    ///
    /// Fails only when the document itself is unreadable (no page count).
    /// Individual page failures are logged and surface as `None` slots.
    pub fn rasterize(&self, bytes: &[u8]) -> Result<Vec<RasterPage>, RasterError> {
        let pdf =
            PDF::from_bytes(bytes.to_vec()).map_err(|e| RasterError::DocumentUnreadable {
                reason: e.to_string(),
            })?;

        let page_count = pdf.page_count();
        debug!(page_count, dpi = self.dpi, "Rasterizing document");

        let mut pages = Vec::with_capacity(page_count as usize);
        for page_no in 1..=page_count {
            pages.push(RasterPage {
                index: (page_no - 1) as usize,
                image: self.render_page(&pdf, page_no),
            });
        }

        Ok(pages)
    }

    fn render_page(&self, pdf: &PDF, page_no: u32) -> Option<DynamicImage> {
        let options = match RenderOptionsBuilder::default()
            .resolution(DPI::Uniform(self.dpi))
            .build()
        {
            Ok(options) => options,
            Err(e) => {
                warn!(page = page_no, error = %e, "Render options invalid, skipping page");
                return None;
            }
        };

        match pdf.render(Pages::Range(page_no..=page_no), options) {
            Ok(mut images) if !images.is_empty() => Some(images.remove(0)),
            Ok(_) => {
                warn!(page = page_no, "Renderer produced no image for page");
                None
            }
            Err(e) => {
                warn!(page = page_no, error = %e, "Page render failed, continuing");
                None
            }
        }
    }
}
