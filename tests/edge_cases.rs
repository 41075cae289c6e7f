// tests/edge_cases.rs
//
// Edge case tests for collage-engine
// Tests boundary values, invalid inputs, and error handling

use collage_engine::engine::{
    decode_image, inspect, plan, CanvasSize, ComposeConfig, Composer, InputLimits, LayoutConfig,
    OverlayConfig, MAX_DIMENSION,
};
use collage_engine::{
    canvas_from_preset, CollageError, OverlayAspect, PatternSelector, PatternStyle, Template,
    TemplateSelector,
};
use image::{DynamicImage, GenericImageView, ImageFormat, Rgb, RgbImage};
use std::io::Cursor;

fn solid(width: u32, height: u32, c: [u8; 3]) -> DynamicImage {
    DynamicImage::ImageRgb8(RgbImage::from_pixel(width, height, Rgb(c)))
}

fn pixel(img: &DynamicImage, x: u32, y: u32) -> [u8; 3] {
    let p = img.get_pixel(x, y);
    [p[0], p[1], p[2]]
}

fn close(actual: [u8; 3], expected: [u8; 3]) -> bool {
    actual
        .iter()
        .zip(expected.iter())
        .all(|(a, e)| (*a as i16 - *e as i16).abs() <= 2)
}

fn png_bytes(width: u32, height: u32) -> Vec<u8> {
    let mut buf = Vec::new();
    solid(width, height, [10, 20, 30])
        .write_to(&mut Cursor::new(&mut buf), ImageFormat::Png)
        .unwrap();
    buf
}

fn collage(template: Template, width: u32, height: u32) -> ComposeConfig {
    ComposeConfig::collage(
        TemplateSelector::Explicit(template),
        CanvasSize::new(width, height).unwrap(),
    )
}

mod canvas_tests {
    use super::*;

    #[test]
    fn zero_sized_canvas_is_rejected() {
        assert!(matches!(
            CanvasSize::new(0, 10),
            Err(CollageError::InvalidCanvasSize { .. })
        ));
        assert!(matches!(
            CanvasSize::new(10, 0),
            Err(CollageError::InvalidCanvasSize { .. })
        ));
    }

    #[test]
    fn canvas_too_small_for_padding_is_invalid_geometry() {
        let err = Composer::with_seed(1)
            .compose(&[solid(10, 10, [1, 1, 1])], &collage(Template::Grid, 20, 20))
            .unwrap_err();
        assert!(matches!(err, CollageError::InvalidGeometry { .. }));
    }

    #[test]
    fn one_pixel_canvas_fails_every_template() {
        let canvas = CanvasSize::new(1, 1).unwrap();
        for template in Template::COLLAGE {
            assert!(plan(template, 4, canvas, &LayoutConfig::default()).is_err());
        }
    }

    #[test]
    fn zero_padding_uses_the_whole_canvas() {
        let layout = LayoutConfig {
            padding: 0,
            spacing: 0,
            ..LayoutConfig::default()
        };
        let placements = plan(Template::Split, 2, CanvasSize::new(100, 50).unwrap(), &layout).unwrap();
        assert_eq!(placements[0].rect.x, 0);
        assert_eq!(placements[1].rect.right(), 100);
        assert_eq!(placements[1].rect.bottom(), 50);
    }

    #[test]
    fn unknown_preset_labels_fall_back() {
        assert_eq!(canvas_from_preset(Some("7:5"), Some("huge")), CanvasSize::new(1024, 576).unwrap());
        assert_eq!(canvas_from_preset(None, None), CanvasSize::new(1024, 576).unwrap());
        assert_eq!(canvas_from_preset(Some("3:1"), Some("sm")), CanvasSize::new(800, 266).unwrap());
    }
}

mod image_count_tests {
    use super::*;

    #[test]
    fn extra_images_are_ignored() {
        let images: Vec<_> = (0..7u8).map(|i| solid(32, 32, [i * 30, 0, 0])).collect();
        let out = Composer::with_seed(1)
            .compose(&images, &collage(Template::Grid, 400, 300))
            .unwrap();
        assert_eq!((out.width, out.height), (400, 300));
        // the fourth cell holds the fourth image
        assert!(close(pixel(&out.image, 300, 200), [90, 0, 0]));
    }

    #[test]
    fn single_image_fills_only_first_masonry_cell() {
        let out = Composer::with_seed(1)
            .compose(&[solid(32, 32, [0, 0, 200])], &collage(Template::Masonry, 1024, 768))
            .unwrap();
        assert!(close(pixel(&out.image, 100, 100), [0, 0, 200]));
        // center column is empty
        assert_eq!(pixel(&out.image, 500, 384), [255, 255, 255]);
    }

    #[test]
    fn collect_rejects_more_than_six_sources() {
        let limits = InputLimits::default();
        assert!(limits.enforce_image_count(6).is_ok());
        assert!(matches!(
            limits.enforce_image_count(7),
            Err(CollageError::TooManyImages { count: 7, max: 6 })
        ));
    }
}

mod overlay_edge_tests {
    use super::*;

    #[test]
    fn hero_index_out_of_range_uses_first_image() {
        let images = vec![solid(600, 200, [200, 30, 30]), solid(50, 50, [30, 180, 60])];
        let config = ComposeConfig::overlay(
            OverlayAspect::ThreeByOne,
            9,
            PatternSelector::Explicit(PatternStyle::Dots),
        );
        let out = Composer::with_seed(1).compose(&images, &config).unwrap();
        // image 1 becomes the only small photo, bottom-right
        assert!(close(pixel(&out.image, 1570, 489), [30, 180, 60]));
    }

    #[test]
    fn hero_only_renders_without_smalls() {
        let config = ComposeConfig::overlay(
            OverlayAspect::TwoByOne,
            0,
            PatternSelector::Explicit(PatternStyle::Geometric),
        );
        let out = Composer::with_seed(1)
            .compose(&[solid(40, 40, [90, 90, 200])], &config)
            .unwrap();
        assert_eq!((out.width, out.height), (1600, 800));
    }

    #[test]
    fn at_most_four_smalls() {
        let colors = [
            [200, 30, 30],
            [30, 180, 60],
            [40, 60, 210],
            [230, 200, 20],
            [20, 200, 200],
            [200, 20, 200],
        ];
        let images: Vec<_> = colors.iter().map(|&c| solid(120, 120, c)).collect();
        let config = ComposeConfig::overlay(
            OverlayAspect::ThreeByOne,
            0,
            PatternSelector::Explicit(PatternStyle::Wave),
        );
        let out = Composer::with_seed(1).compose(&images, &config).unwrap();
        // order: top-right, bottom-right, top-left, bottom-left
        assert!(close(pixel(&out.image, 1570, 127), colors[1]));
        assert!(close(pixel(&out.image, 1570, 489), colors[2]));
        assert!(close(pixel(&out.image, 246, 127), colors[3]));
        assert!(close(pixel(&out.image, 246, 489), colors[4]));
    }

    #[test]
    fn frame_wider_than_small_photo_is_invalid() {
        let mut config = ComposeConfig::overlay(
            OverlayAspect::ThreeByOne,
            0,
            PatternSelector::Explicit(PatternStyle::Dots),
        );
        config.layout.overlay = OverlayConfig {
            frame_width: 100,
            ..OverlayConfig::default()
        };
        let err = Composer::with_seed(1)
            .compose(&[solid(8, 8, [1, 1, 1]), solid(8, 8, [2, 2, 2])], &config)
            .unwrap_err();
        assert!(matches!(err, CollageError::InvalidGeometry { .. }));
    }

    #[test]
    fn overlay_ignores_canvas_clamp() {
        let mut config = ComposeConfig::overlay(
            OverlayAspect::ThreeByOne,
            0,
            PatternSelector::Explicit(PatternStyle::Dots),
        );
        config.max_dimension = Some(512);
        let out = Composer::with_seed(1)
            .compose(&[solid(8, 8, [1, 1, 1])], &config)
            .unwrap();
        assert_eq!((out.width, out.height), (1800, 600));
    }
}

mod extreme_aspect_tests {
    use super::*;

    #[test]
    fn very_wide_and_very_tall_sources() {
        let images = vec![
            solid(4000, 3, [250, 0, 0]),
            solid(3, 4000, [0, 0, 250]),
        ];
        let out = Composer::with_seed(1)
            .compose(&images, &collage(Template::Split, 400, 300))
            .unwrap();
        assert!(close(pixel(&out.image, 100, 150), [250, 0, 0]));
        assert!(close(pixel(&out.image, 300, 150), [0, 0, 250]));
    }

    #[test]
    fn one_pixel_source_is_upscaled() {
        let out = Composer::with_seed(1)
            .compose(&[solid(1, 1, [7, 77, 177])], &collage(Template::HeroGrid, 640, 480))
            .unwrap();
        assert!(close(pixel(&out.image, 100, 100), [7, 77, 177]));
    }

    #[test]
    fn grayscale_and_alpha_sources_are_accepted() {
        let gray = DynamicImage::ImageLuma8(image::GrayImage::from_pixel(20, 20, image::Luma([128])));
        let rgba = DynamicImage::ImageRgba8(image::RgbaImage::from_pixel(
            20,
            20,
            image::Rgba([10, 200, 10, 255]),
        ));
        let out = Composer::with_seed(1)
            .compose(&[gray, rgba], &collage(Template::Split, 400, 300))
            .unwrap();
        assert!(close(pixel(&out.image, 100, 150), [128, 128, 128]));
        assert!(close(pixel(&out.image, 300, 150), [10, 200, 10]));
    }
}

mod decode_tests {
    use super::*;

    #[test]
    fn empty_buffer_fails() {
        assert!(decode_image(&[], &InputLimits::default()).is_err());
    }

    #[test]
    fn truncated_png_fails_to_decode() {
        let noisy = DynamicImage::ImageRgb8(RgbImage::from_fn(64, 64, |x, y| {
            Rgb([(x * 37 + y * 11) as u8, (x * y) as u8, (x ^ y) as u8])
        }));
        let mut bytes = Vec::new();
        noisy
            .write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)
            .unwrap();
        // header survives, half of the pixel data does not
        let truncated = &bytes[..bytes.len() / 2];
        assert_eq!(inspect(truncated).unwrap().width, 64);
        assert!(decode_image(truncated, &InputLimits::default()).is_err());
    }

    #[test]
    fn pixel_budget_is_enforced() {
        let limits = InputLimits {
            max_pixels: Some(100),
            ..InputLimits::default()
        };
        assert!(matches!(
            decode_image(&png_bytes(11, 10), &limits),
            Err(CollageError::PixelCountExceedsLimit { .. })
        ));
        assert!(decode_image(&png_bytes(10, 10), &limits).is_ok());
    }

    #[test]
    fn byte_budget_is_enforced() {
        let bytes = png_bytes(16, 16);
        let limits = InputLimits {
            max_bytes: Some(bytes.len() as u64 - 1),
            ..InputLimits::default()
        };
        assert!(matches!(
            decode_image(&bytes, &limits),
            Err(CollageError::InputTooLarge { .. })
        ));
    }

    #[test]
    fn dimension_limit_constant() {
        assert_eq!(MAX_DIMENSION, 32768);
    }
}
