#![no_main]

use arbitrary::Arbitrary;
use collage_engine::engine::{plan, CanvasSize, ComposeConfig, Composer, LayoutConfig};
use collage_engine::{Template, TemplateSelector};
use image::{DynamicImage, Rgb, RgbImage};
use libfuzzer_sys::fuzz_target;

#[derive(Debug, Arbitrary)]
struct LayoutInput {
    template: u8,
    image_sizes: Vec<(u8, u8)>,
    canvas_w: u16,
    canvas_h: u16,
    padding: u8,
    spacing: u8,
    seed: u64,
}

fuzz_target!(|input: LayoutInput| {
    let template = Template::COLLAGE[input.template as usize % Template::COLLAGE.len()];
    let Ok(canvas) = CanvasSize::new(input.canvas_w as u32 % 1025, input.canvas_h as u32 % 1025) else {
        return;
    };
    let layout = LayoutConfig {
        padding: input.padding as u32,
        spacing: input.spacing as u32,
        ..LayoutConfig::default()
    };

    // plan output must never leave the canvas
    if let Ok(placements) = plan(template, input.image_sizes.len(), canvas, &layout) {
        for p in &placements {
            assert!(p.rect.x >= 0 && p.rect.y >= 0);
            assert!(p.rect.right() <= canvas.width() as i64);
            assert!(p.rect.bottom() <= canvas.height() as i64);
        }
    }

    let images: Vec<DynamicImage> = input
        .image_sizes
        .iter()
        .take(6)
        .map(|&(w, h)| {
            DynamicImage::ImageRgb8(RgbImage::from_pixel(
                (w as u32).max(1),
                (h as u32).max(1),
                Rgb([w, h, w ^ h]),
            ))
        })
        .collect();
    let config = ComposeConfig {
        layout,
        ..ComposeConfig::collage(TemplateSelector::Explicit(template), canvas)
    };
    if let Ok(out) = Composer::with_seed(input.seed).compose(&images, &config) {
        assert!(out.width <= 1024 && out.height <= 1024);
    }
});
