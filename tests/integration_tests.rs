// tests/integration_tests.rs
//
// End-to-end composition: bytes or decoded images in, finished picture out.

use collage_engine::engine::{
    collect_images, compose_batch, BatchJob, CanvasSize, ComposeConfig, Composer, DecodingFetcher,
    InputLimits, LayoutConfig,
};
use collage_engine::{
    CollageError, DesignFormat, ErrorCategory, OutputFormat, OverlayAspect, PatternSelector,
    PatternStyle, Style, StyleSelector, Template, TemplateSelector,
};
use image::{DynamicImage, GenericImageView, ImageFormat, Rgb, RgbImage};
use std::io::Cursor;

const RED: [u8; 3] = [200, 30, 30];
const GREEN: [u8; 3] = [30, 180, 60];
const BLUE: [u8; 3] = [40, 60, 210];
const YELLOW: [u8; 3] = [230, 200, 20];

fn solid(width: u32, height: u32, c: [u8; 3]) -> DynamicImage {
    DynamicImage::ImageRgb8(RgbImage::from_pixel(width, height, Rgb(c)))
}

fn four_solids() -> Vec<DynamicImage> {
    vec![
        solid(500, 500, RED),
        solid(500, 500, GREEN),
        solid(500, 500, BLUE),
        solid(500, 500, YELLOW),
    ]
}

fn close(actual: [u8; 3], expected: [u8; 3]) -> bool {
    actual
        .iter()
        .zip(expected.iter())
        .all(|(a, e)| (*a as i16 - *e as i16).abs() <= 2)
}

fn pixel(img: &DynamicImage, x: u32, y: u32) -> [u8; 3] {
    let p = img.get_pixel(x, y);
    [p[0], p[1], p[2]]
}

fn png_bytes(img: &DynamicImage) -> Vec<u8> {
    let mut buf = Vec::new();
    img.write_to(&mut Cursor::new(&mut buf), ImageFormat::Png)
        .expect("encode test fixture");
    buf
}

mod collage_tests {
    use super::*;

    #[test]
    fn grid_places_four_cells() {
        let config = ComposeConfig::collage(
            TemplateSelector::Explicit(Template::Grid),
            CanvasSize::new(1024, 768).unwrap(),
        );
        let out = Composer::with_seed(7).compose(&four_solids(), &config).unwrap();

        assert_eq!((out.width, out.height), (1024, 768));
        assert_eq!(out.label, "grid");
        assert_eq!(out.template, Some(Template::Grid));

        // cells are 496x368 at (12,12), (516,12), (12,388), (516,388)
        assert!(close(pixel(&out.image, 12, 12), RED));
        assert!(close(pixel(&out.image, 507, 379), RED));
        assert!(close(pixel(&out.image, 516, 12), GREEN));
        assert!(close(pixel(&out.image, 1011, 379), GREEN));
        assert!(close(pixel(&out.image, 12, 388), BLUE));
        assert!(close(pixel(&out.image, 516, 388), YELLOW));
        assert!(close(pixel(&out.image, 1011, 755), YELLOW));

        // padding and spacing show the background
        assert_eq!(pixel(&out.image, 5, 5), [255, 255, 255]);
        assert_eq!(pixel(&out.image, 511, 200), [255, 255, 255]);
        assert_eq!(pixel(&out.image, 200, 383), [255, 255, 255]);
        assert_eq!(pixel(&out.image, 1020, 760), [255, 255, 255]);
    }

    #[test]
    fn grid_with_one_image_leaves_other_cells_blank() {
        let config = ComposeConfig::collage(
            TemplateSelector::Explicit(Template::Grid),
            CanvasSize::new(1024, 768).unwrap(),
        );
        let out = Composer::with_seed(7)
            .compose(&[solid(300, 300, BLUE)], &config)
            .unwrap();
        assert!(close(pixel(&out.image, 100, 100), BLUE));
        assert_eq!(pixel(&out.image, 700, 100), [255, 255, 255]);
        assert_eq!(pixel(&out.image, 700, 600), [255, 255, 255]);
    }

    #[test]
    fn custom_background_fills_gaps() {
        let config = ComposeConfig {
            layout: LayoutConfig {
                background: [20, 20, 20].into(),
                ..LayoutConfig::default()
            },
            ..ComposeConfig::collage(
                TemplateSelector::Explicit(Template::Split),
                CanvasSize::new(1024, 768).unwrap(),
            )
        };
        let out = Composer::with_seed(1)
            .compose(&[solid(64, 64, RED), solid(64, 64, GREEN)], &config)
            .unwrap();
        assert_eq!(pixel(&out.image, 3, 3), [20, 20, 20]);
        assert!(close(pixel(&out.image, 100, 100), RED));
        assert!(close(pixel(&out.image, 900, 100), GREEN));
    }

    #[test]
    fn explicit_template_is_deterministic() {
        let images = vec![
            DynamicImage::ImageRgb8(RgbImage::from_fn(320, 200, |x, y| {
                Rgb([(x % 256) as u8, (y % 256) as u8, ((x + y) % 256) as u8])
            })),
            solid(120, 400, GREEN),
            solid(400, 120, BLUE),
        ];
        for template in Template::COLLAGE {
            let config = ComposeConfig::collage(
                TemplateSelector::Explicit(template),
                CanvasSize::new(640, 480).unwrap(),
            );
            let a = Composer::with_seed(1).compose(&images, &config).unwrap();
            let b = Composer::with_seed(99).compose(&images, &config).unwrap();
            assert_eq!(a.image, b.image, "{}", template.name());
        }
    }

    #[test]
    fn seeded_auto_selection_is_reproducible() {
        let images = four_solids();
        let config = ComposeConfig::collage(TemplateSelector::Auto, CanvasSize::new(400, 300).unwrap());
        for seed in 0..8 {
            let a = Composer::with_seed(seed).compose(&images, &config).unwrap();
            let b = Composer::with_seed(seed).compose(&images, &config).unwrap();
            assert_eq!(a.template, b.template);
            assert_eq!(a.image, b.image);
            // four images choose between hero_grid and grid
            assert!(matches!(a.template, Some(Template::HeroGrid | Template::Grid)));
        }
    }

    #[test]
    fn auto_selection_follows_image_count() {
        let config = ComposeConfig::collage(TemplateSelector::Auto, CanvasSize::new(400, 300).unwrap());
        let mut composer = Composer::with_seed(5);

        let two = composer
            .compose(&[solid(8, 8, RED), solid(8, 8, GREEN)], &config)
            .unwrap();
        assert_eq!(two.template, Some(Template::Split));

        let five: Vec<_> = (0..5).map(|_| solid(8, 8, BLUE)).collect();
        let out = composer.compose(&five, &config).unwrap();
        assert_eq!(out.template, Some(Template::Masonry));
    }

    #[test]
    fn empty_input_is_rejected() {
        let err = Composer::with_seed(1)
            .compose(&[], &ComposeConfig::default())
            .unwrap_err();
        assert!(matches!(err, CollageError::NoValidImages));
        assert_eq!(err.category(), ErrorCategory::UserError);
    }
}

mod overlay_tests {
    use super::*;

    #[test]
    fn three_by_one_places_smalls_in_corners() {
        let images = vec![
            solid(900, 300, RED),
            solid(200, 200, GREEN),
            solid(200, 200, BLUE),
            solid(200, 200, YELLOW),
        ];
        let config = ComposeConfig::overlay(
            OverlayAspect::ThreeByOne,
            0,
            PatternSelector::Explicit(PatternStyle::Geometric),
        );
        let out = Composer::with_seed(3).compose(&images, &config).unwrap();
        assert_eq!((out.width, out.height), (1800, 600));
        assert_eq!(out.pattern, Some(PatternStyle::Geometric));

        // framed smalls are 396x158 (photo 388x150 inside a 4px white frame)
        // top-right at (1372,48), bottom-right at (1372,410), bottom-left at (48,410)
        assert_eq!(pixel(&out.image, 1373, 100), [255, 255, 255]);
        assert!(close(pixel(&out.image, 1570, 127), GREEN));
        assert!(close(pixel(&out.image, 1570, 489), BLUE));
        assert!(close(pixel(&out.image, 246, 489), YELLOW));

        // top-left stays hero
        let hero_area = pixel(&out.image, 246, 127);
        assert!(!close(hero_area, GREEN) && !close(hero_area, BLUE) && !close(hero_area, YELLOW));
    }

    #[test]
    fn hero_index_picks_background() {
        let images = vec![solid(200, 200, GREEN), solid(900, 300, RED)];
        let config = ComposeConfig::overlay(
            OverlayAspect::ThreeByOne,
            1,
            PatternSelector::Explicit(PatternStyle::Wave),
        );
        let out = Composer::with_seed(3).compose(&images, &config).unwrap();
        // the single remaining image sits bottom-right
        assert!(close(pixel(&out.image, 1570, 489), GREEN));
    }

    #[test]
    fn small_photos_cast_a_shadow() {
        let mut config = ComposeConfig::overlay(
            OverlayAspect::ThreeByOne,
            0,
            PatternSelector::Explicit(PatternStyle::Geometric),
        );
        let images = vec![solid(900, 300, RED), solid(200, 200, GREEN)];
        let shadowed = Composer::with_seed(3).compose(&images, &config).unwrap();
        let hero_only = Composer::with_seed(3)
            .compose(&images[..1], &config)
            .unwrap();
        config.layout.overlay.shadow.alpha = 0;
        let unshadowed = Composer::with_seed(3).compose(&images, &config).unwrap();

        // bottom-right frame spans (1372,410)..(1768,568)
        let sum = |p: [u8; 3]| p.iter().map(|&c| c as u32).sum::<u32>();
        for (x, y) in [(1768, 489), (1773, 489), (1570, 568), (1570, 573)] {
            let bare = pixel(&hero_only.image, x, y);
            assert!(sum(pixel(&shadowed.image, x, y)) < sum(bare), "({x},{y})");
            assert_eq!(pixel(&unshadowed.image, x, y), bare, "({x},{y})");
        }
    }

    #[test]
    fn explicit_dots_overlay_is_deterministic() {
        let images = vec![solid(900, 300, RED), solid(200, 200, GREEN), solid(200, 200, BLUE)];
        let config = ComposeConfig::overlay(
            OverlayAspect::ThreeByOne,
            0,
            PatternSelector::Explicit(PatternStyle::Dots),
        );
        let a = Composer::with_seed(1).compose(&images, &config).unwrap();
        let b = Composer::with_seed(99).compose(&images, &config).unwrap();
        assert_eq!(a.pattern, Some(PatternStyle::Dots));
        assert_eq!(a.image, b.image);
    }

    #[test]
    fn auto_pattern_is_recorded() {
        let config = ComposeConfig::overlay(OverlayAspect::TwoByOne, 0, PatternSelector::Auto);
        let out = Composer::with_seed(11)
            .compose(&[solid(64, 64, RED)], &config)
            .unwrap();
        assert_eq!((out.width, out.height), (1600, 800));
        assert!(out.pattern.is_some());
    }
}

mod design_tests {
    use super::*;

    #[test]
    fn every_style_renders_at_format_size() {
        let images = four_solids();
        for style in Style::ALL {
            let config = ComposeConfig::design(StyleSelector::Explicit(style), DesignFormat::FacebookPost);
            let out = Composer::with_seed(2).compose(&images, &config).unwrap();
            assert_eq!((out.width, out.height), (1200, 630), "{}", style.name());
            assert_eq!(out.style, Some(style));
            assert_eq!(out.template, None);
        }
    }

    #[test]
    fn explicit_style_is_deterministic() {
        let images = four_solids();
        for style in Style::ALL {
            let config = ComposeConfig::design(StyleSelector::Explicit(style), DesignFormat::FacebookPost);
            let a = Composer::with_seed(1).compose(&images, &config).unwrap();
            let b = Composer::with_seed(99).compose(&images, &config).unwrap();
            assert_eq!(a.image, b.image, "{}", style.name());
        }
    }

    #[test]
    fn auto_style_is_one_of_the_presets() {
        let config = ComposeConfig::design(StyleSelector::Auto, DesignFormat::InstagramFeed);
        let out = Composer::with_seed(4)
            .compose(&[solid(64, 64, RED)], &config)
            .unwrap();
        let style = out.style.unwrap();
        assert!(Style::ALL.contains(&style));
        assert_eq!(out.label, style.name());
    }
}

mod pipeline_tests {
    use super::*;

    #[test]
    fn decode_compose_encode() {
        let fixtures = vec![
            ("a.png", png_bytes(&solid(120, 80, RED))),
            ("b.png", png_bytes(&solid(80, 120, GREEN))),
        ];
        let loader = |url: &str| -> collage_engine::Result<Vec<u8>> {
            fixtures
                .iter()
                .find(|(name, _)| *name == url)
                .map(|(_, bytes)| bytes.clone())
                .ok_or_else(|| CollageError::fetch_failed(url.to_string(), "404"))
        };
        let limits = InputLimits::default();
        let fetcher = DecodingFetcher::new(loader, limits.clone());
        let urls: Vec<String> = ["a.png", "missing.png", "b.png"]
            .iter()
            .map(|s| s.to_string())
            .collect();

        let images = collect_images(&fetcher, &urls, &limits).unwrap();
        assert_eq!(images.len(), 2);

        let config = ComposeConfig::collage(
            TemplateSelector::Explicit(Template::Split),
            CanvasSize::new(600, 400).unwrap(),
        );
        let out = Composer::with_seed(1).compose(&images, &config).unwrap();

        let png = out.encode(&OutputFormat::Png).unwrap();
        let back = image::load_from_memory(&png).unwrap();
        assert_eq!(back.dimensions(), (600, 400));
        assert_eq!(back.to_rgb8(), out.image.to_rgb8());

        let jpeg = out.encode(&OutputFormat::from_str("jpg", Some(90)).unwrap()).unwrap();
        assert_eq!(&jpeg[..2], &[0xFF, 0xD8]);
    }

    #[test]
    fn batch_runs_independent_jobs() {
        let jobs: Vec<BatchJob> = Template::COLLAGE
            .iter()
            .map(|&template| BatchJob {
                images: four_solids(),
                config: ComposeConfig::collage(
                    TemplateSelector::Explicit(template),
                    CanvasSize::new(320, 240).unwrap(),
                ),
                seed: Some(1),
            })
            .collect();
        let results = compose_batch(&jobs);
        assert_eq!(results.len(), 4);
        for (result, template) in results.iter().zip(Template::COLLAGE) {
            let out = result.as_ref().unwrap();
            assert_eq!(out.template, Some(template));
            assert_eq!((out.width, out.height), (320, 240));
        }
    }
}
