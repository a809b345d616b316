//! Handwriting cleanup applied before vision OCR.

use image::{DynamicImage, GrayImage, imageops};

/// Window edge for the adaptive mean threshold.
const THRESHOLD_WINDOW: u32 = 15;

/// Constant subtracted from the local mean before thresholding.
const THRESHOLD_C: f64 = 4.0;

/// Sigma matching a 3x3 Gaussian kernel.
const BLUR_SIGMA: f32 = 0.8;

/// Denoises and binarizes a scanned handwriting page.
///
/// Grayscale, light Gaussian blur, then an inverted adaptive mean threshold:
/// pixels darker than their 15x15 neighborhood mean (minus a small constant)
/// become white ink on black. Handwriting strokes survive; paper texture and
/// uneven lighting do not.
pub fn clean_for_handwriting(image: &DynamicImage) -> GrayImage {
    let gray = image.to_luma8();
    let blurred = imageops::blur(&gray, BLUR_SIGMA);
    adaptive_threshold_inv(&blurred, THRESHOLD_WINDOW, THRESHOLD_C)
}

/// Inverted binary threshold against the local mean of a `window`-sized
/// neighborhood, computed with an integral image so the cost is independent
/// of window size.
fn adaptive_threshold_inv(gray: &GrayImage, window: u32, c: f64) -> GrayImage {
    let (width, height) = gray.dimensions();
    if width == 0 || height == 0 {
        return gray.clone();
    }

    let integral = integral_image(gray);
    let w = width as i64;
    let h = height as i64;
    let half = (window / 2) as i64;

    let mut out = GrayImage::new(width, height);
    for y in 0..h {
        for x in 0..w {
            let x0 = (x - half).max(0);
            let y0 = (y - half).max(0);
            let x1 = (x + half + 1).min(w);
            let y1 = (y + half + 1).min(h);

            let area = ((x1 - x0) * (y1 - y0)) as f64;
            let sum = window_sum(&integral, w as usize, x0, y0, x1, y1);
            let mean = sum as f64 / area;

            let px = gray.get_pixel(x as u32, y as u32).0[0] as f64;
            let value = if px > mean - c { 0u8 } else { 255u8 };
            out.put_pixel(x as u32, y as u32, image::Luma([value]));
        }
    }
    out
}

/// Summed-area table with one extra row/column of zeros.
fn integral_image(gray: &GrayImage) -> Vec<u64> {
    let (width, height) = gray.dimensions();
    let w = width as usize + 1;
    let h = height as usize + 1;
    let mut integral = vec![0u64; w * h];

    for y in 1..h {
        let mut row_sum = 0u64;
        for x in 1..w {
            row_sum += gray.get_pixel(x as u32 - 1, y as u32 - 1).0[0] as u64;
            integral[y * w + x] = integral[(y - 1) * w + x] + row_sum;
        }
    }
    integral
}

fn window_sum(integral: &[u64], width: usize, x0: i64, y0: i64, x1: i64, y1: i64) -> u64 {
    let w = width + 1;
    let (x0, y0, x1, y1) = (x0 as usize, y0 as usize, x1 as usize, y1 as usize);
    integral[y1 * w + x1] + integral[y0 * w + x0] - integral[y0 * w + x1] - integral[y1 * w + x0]
}
