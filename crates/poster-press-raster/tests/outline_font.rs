use std::path::{Path, PathBuf};

use ab_glyph::{Font, FontArc, PxScale, ScaleFont};
use poster_press::{CanvasSize, Rgb};
use poster_press_raster::{paint_plan, Face, FaceSource, FontConfig, TypefaceResolver};
use poster_press_render::{
    DrawCommand, GradientCommand, HeaderProbe, PosterPlan, Rect, StrikeMode, TextCommand,
    TextMeasurer,
};

const WIDTH: u32 = 400;
const HEIGHT: u32 = 120;
const SIZE_PX: i32 = 40;

fn font_fixture_paths() -> Vec<PathBuf> {
    vec![
        Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/fonts/DejaVuSans.ttf"),
        PathBuf::from("/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf"),
        PathBuf::from("/usr/share/fonts/TTF/DejaVuSans.ttf"),
    ]
}

fn font_fixture() -> Option<PathBuf> {
    let found = font_fixture_paths().into_iter().find(|path| path.is_file());
    if found.is_none() {
        eprintln!("outline font test skipped: no DejaVuSans.ttf fixture found");
    }
    found
}

fn outline_resolver(path: &Path) -> TypefaceResolver {
    TypefaceResolver::new(FontConfig::builtin_only().with_candidate(path))
}

/// Pen advance of `text` at one em = `size_px`, kerning included.
fn pen_advance(path: &Path, text: &str, size_px: i32) -> f32 {
    let bytes = std::fs::read(path).expect("read font fixture");
    let font = FontArc::try_from_vec(bytes).expect("parse font fixture");
    let units = font.units_per_em().expect("units per em");
    let scaled = font.as_scaled(PxScale::from(
        size_px as f32 * font.height_unscaled() / units,
    ));
    let mut advance = 0.0;
    let mut previous = None;
    for ch in text.chars() {
        let id = scaled.glyph_id(ch);
        if let Some(prev) = previous {
            advance += scaled.kern(prev, id);
        }
        advance += scaled.h_advance(id);
        previous = Some(id);
    }
    advance
}

fn text_plan(x: i32, y: i32, text: &str) -> PosterPlan {
    PosterPlan {
        canvas: CanvasSize::new(WIDTH, HEIGHT),
        header: HeaderProbe {
            category_lines: 1,
            category_size_px: SIZE_PX,
            header_height: 0,
        },
        footer_height: 0,
        container: Rect::new(0, 0, WIDTH as i32, HEIGHT as i32),
        cells: Vec::new(),
        commands: vec![
            DrawCommand::Gradient(GradientCommand {
                rect: Rect::new(0, 0, WIDTH as i32, HEIGHT as i32),
                top: Rgb::WHITE,
                bottom: Rgb::WHITE,
            }),
            DrawCommand::Text(TextCommand {
                x,
                y,
                text: text.to_string(),
                size_px: SIZE_PX,
                color: Rgb(0, 0, 0),
                strike: StrikeMode::Single,
            }),
        ],
    }
}

#[test]
fn candidate_font_is_used_for_outline_faces() {
    let Some(path) = font_fixture() else {
        return;
    };
    let resolver = outline_resolver(&path);
    let face = resolver.face(SIZE_PX);
    assert!(!face.is_builtin());
    assert!(matches!(face, Face::Outline { size_px: SIZE_PX, .. }));
    assert_eq!(resolver.source(), FaceSource::Candidate(path));
}

#[test]
fn outline_measurement_is_deterministic() {
    let Some(path) = font_fixture() else {
        return;
    };
    let first = outline_resolver(&path);
    let second = outline_resolver(&path);
    for text in ["HIH", "13800138000", "Hello, World"] {
        let a = first.measure(text, &first.face(SIZE_PX));
        let b = first.measure(text, &first.face(SIZE_PX));
        let c = second.measure(text, &second.face(SIZE_PX));
        assert_eq!(a, b, "{}", text);
        assert_eq!(a, c, "{}", text);
        assert!(a.width > 0 && a.height > 0, "{}", text);
    }
}

#[test]
fn ink_width_never_exceeds_pen_advance() {
    let Some(path) = font_fixture() else {
        return;
    };
    let resolver = outline_resolver(&path);
    let face = resolver.face(SIZE_PX);
    for text in ["HIH", "13800138000", "MMMM"] {
        let extent = resolver.measure(text, &face);
        let advance = pen_advance(&path, text, SIZE_PX);
        assert!(
            extent.width as f32 <= advance.ceil(),
            "{}: ink {} > advance {}",
            text,
            extent.width,
            advance
        );
    }
}

#[test]
fn larger_sizes_measure_wider() {
    let Some(path) = font_fixture() else {
        return;
    };
    let resolver = outline_resolver(&path);
    let small = resolver.measure("13800138000", &resolver.face(20));
    let large = resolver.measure("13800138000", &resolver.face(40));
    assert!(large.width > small.width);
    assert!(large.height > small.height);
}

#[test]
fn whitespace_measures_pen_advance_without_ink() {
    let Some(path) = font_fixture() else {
        return;
    };
    let resolver = outline_resolver(&path);
    let extent = resolver.measure("    ", &resolver.face(SIZE_PX));
    assert_eq!(extent.height, 0);
    assert_eq!(
        extent.width,
        pen_advance(&path, "    ", SIZE_PX).round() as i32
    );
}

#[test]
fn drawn_ink_stays_inside_measured_box() {
    let Some(path) = font_fixture() else {
        return;
    };
    let resolver = outline_resolver(&path);
    let face = resolver.face(SIZE_PX);
    let (x, y, text) = (30, 20, "Hg138");
    let extent = resolver.measure(text, &face);
    let image = paint_plan(&text_plan(x, y, text), &resolver).expect("paint");

    let inked: Vec<(u32, u32)> = image
        .enumerate_pixels()
        .filter(|(_, _, px)| px.0 != [255, 255, 255])
        .map(|(px, py, _)| (px, py))
        .collect();
    assert!(!inked.is_empty());
    let left = inked.iter().map(|p| p.0).min().unwrap_or(0) as i32;
    let right = inked.iter().map(|p| p.0).max().unwrap_or(0) as i32;
    let top = inked.iter().map(|p| p.1).min().unwrap_or(0) as i32;
    let bottom = inked.iter().map(|p| p.1).max().unwrap_or(0) as i32;

    // Glyphs hang from the ascent line, so ink starts at or below `y`.
    assert!(left >= x, "ink starts left of the box at {}", left);
    assert!(top >= y, "ink starts above the box at {}", top);
    assert!(right - left <= extent.width);
    assert!(bottom - top <= extent.height);
    let advance = pen_advance(&path, text, SIZE_PX);
    assert!(right < x + advance.ceil() as i32 + 1);
}
