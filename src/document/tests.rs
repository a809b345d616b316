use super::*;

#[test]
fn test_rasterize_rejects_garbage_bytes() {
    let rasterizer = PageRasterizer::new();
    let result = rasterizer.rasterize(b"this is not a paginated document");
    assert!(matches!(
        result,
        Err(RasterError::DocumentUnreadable { .. })
    ));
}

#[test]
fn test_rasterize_rejects_empty_input() {
    let rasterizer = PageRasterizer::new();
    assert!(rasterizer.rasterize(&[]).is_err());
}

#[test]
fn test_raster_page_rendered_flag() {
    let rendered = RasterPage {
        index: 0,
        image: Some(image::DynamicImage::ImageRgb8(image::RgbImage::new(2, 2))),
    };
    let failed = RasterPage {
        index: 1,
        image: None,
    };
    assert!(rendered.is_rendered());
    assert!(!failed.is_rendered());
}
