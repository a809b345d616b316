//! Mean structural similarity over local windows.

use image::GrayImage;

use super::error::ImagingError;

/// Local window edge. 8px windows over the 500x500 canonical frame give a
/// stable estimate without the cost of per-pixel Gaussian weighting.
const WINDOW: u32 = 8;

/// SSIM stabilization constants for 8-bit dynamic range (K1=0.01, K2=0.03,
/// L=255).
const C1: f64 = (0.01 * 255.0) * (0.01 * 255.0);
const C2: f64 = (0.03 * 255.0) * (0.03 * 255.0);

/// Computes the mean SSIM index between two equal-sized grayscale images.
///
/// Returns a value in `[0, 1]` (negative local covariances are clamped at
/// aggregate level). Identical inputs score exactly `1.0`.
pub fn structural_similarity(a: &GrayImage, b: &GrayImage) -> Result<f64, ImagingError> {
    let (width, height) = a.dimensions();
    let (width_b, height_b) = b.dimensions();

    if width != width_b || height != height_b {
        return Err(ImagingError::DimensionMismatch {
            width_a: width,
            height_a: height,
            width_b,
            height_b,
        });
    }
    if width == 0 || height == 0 {
        return Err(ImagingError::EmptyImage);
    }

    let mut total = 0.0;
    let mut windows = 0u64;

    let mut y = 0;
    while y < height {
        let wy = WINDOW.min(height - y);
        let mut x = 0;
        while x < width {
            let wx = WINDOW.min(width - x);
            total += window_ssim(a, b, x, y, wx, wy);
            windows += 1;
            x += WINDOW;
        }
        y += WINDOW;
    }

    Ok((total / windows as f64).clamp(0.0, 1.0))
}

fn window_ssim(a: &GrayImage, b: &GrayImage, x0: u32, y0: u32, wx: u32, wy: u32) -> f64 {
    let n = (wx * wy) as f64;

    let mut sum_a = 0.0;
    let mut sum_b = 0.0;
    for y in y0..y0 + wy {
        for x in x0..x0 + wx {
            sum_a += a.get_pixel(x, y).0[0] as f64;
            sum_b += b.get_pixel(x, y).0[0] as f64;
        }
    }
    let mean_a = sum_a / n;
    let mean_b = sum_b / n;

    let mut var_a = 0.0;
    let mut var_b = 0.0;
    let mut covar = 0.0;
    for y in y0..y0 + wy {
        for x in x0..x0 + wx {
            let da = a.get_pixel(x, y).0[0] as f64 - mean_a;
            let db = b.get_pixel(x, y).0[0] as f64 - mean_b;
            var_a += da * da;
            var_b += db * db;
            covar += da * db;
        }
    }
    var_a /= n;
    var_b /= n;
    covar /= n;

    ((2.0 * mean_a * mean_b + C1) * (2.0 * covar + C2))
        / ((mean_a * mean_a + mean_b * mean_b + C1) * (var_a + var_b + C2))
}
