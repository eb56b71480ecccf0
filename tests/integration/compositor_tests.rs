//! Template compositing through the public API

#[cfg(test)]
mod tests {
    use crate::common::TemplateAssertions;
    use crate::common::assertions::{assert_covered, assert_transparent};
    use crate::common::fixtures::{jpeg_bytes, png_bytes, png_source};
    use outpaint_rs::core::compositor::DEFAULT_DECODE_TIMEOUT;
    use outpaint_rs::{Compositor, CompositorError, SourceImage, TemplateLayout};
    use std::io::Write;

    #[test]
    fn test_wide_source_is_letterboxed() {
        let template = Compositor::default().compose(&png_source(2000, 1000)).unwrap();
        let canvas = template.assert_canvas();

        // 1280x640 drawn at y=40
        assert_transparent(&canvas, 640, 10);
        assert_covered(&canvas, 640, 360);
        assert_covered(&canvas, 0, 360);
        assert_transparent(&canvas, 640, 710);
    }

    #[test]
    fn test_tall_source_is_pillarboxed() {
        let template = Compositor::default().compose(&png_source(800, 1600)).unwrap();
        let canvas = template.assert_canvas();

        // 360x720 drawn at x=460
        assert_transparent(&canvas, 200, 360);
        assert_covered(&canvas, 640, 0);
        assert_covered(&canvas, 640, 719);
        assert_transparent(&canvas, 1100, 360);
    }

    #[test]
    fn test_exact_ratio_fills_canvas() {
        let layout = TemplateLayout::fit(1920, 1080).unwrap();
        assert!(layout.fills_canvas());

        let canvas = Compositor::default()
            .compose(&png_source(1920, 1080))
            .unwrap()
            .assert_canvas();
        for (x, y) in [(0, 0), (1279, 0), (0, 719), (1279, 719)] {
            assert_covered(&canvas, x, y);
        }
    }

    #[test]
    fn test_small_source_is_upscaled() {
        let canvas = Compositor::default()
            .compose(&png_source(16, 9))
            .unwrap()
            .assert_canvas();
        assert_covered(&canvas, 0, 0);
        assert_covered(&canvas, 1279, 719);
    }

    #[test]
    fn test_jpeg_source() {
        let source = SourceImage::from_bytes("photo.jpg", jpeg_bytes(300, 300), None).unwrap();
        assert_eq!(source.payload.mime_type, "image/jpeg");

        let canvas = Compositor::default().compose(&source).unwrap().assert_canvas();
        // 720x720 drawn at x=280
        assert_transparent(&canvas, 100, 360);
        assert_covered(&canvas, 640, 360);
        assert_transparent(&canvas, 1180, 360);
    }

    #[test]
    fn test_output_is_deterministic() {
        let source = png_source(333, 777);
        let compositor = Compositor::default();
        let first = compositor.compose(&source).unwrap();
        let second = compositor.compose(&source).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_undecodable_source_rejected() {
        let err = SourceImage::from_bytes("notes.txt", b"definitely not an image".to_vec(), None)
            .unwrap_err();
        assert!(matches!(err, CompositorError::Decode(_)));

        let mut truncated = png_source(64, 64);
        truncated.payload.bytes.truncate(40);
        let err = Compositor::default().compose(&truncated).unwrap_err();
        assert!(matches!(err, CompositorError::Decode(_)));
    }

    #[tokio::test]
    async fn test_compose_from_file() {
        let mut file = tempfile::Builder::new().suffix(".png").tempfile().unwrap();
        file.write_all(&png_bytes(500, 250)).unwrap();

        let source = SourceImage::from_file(file.path()).await.unwrap();
        assert_eq!((source.width, source.height), (500, 250));

        let compositor = Compositor::new(DEFAULT_DECODE_TIMEOUT);
        let template = compositor.compose_async(source).await.unwrap();
        template.assert_canvas();
    }
}
