//! Typeface resolution and measurement.
//!
//! Candidate font files are tried in order, then a list of well-known system
//! fonts, then the built-in `embedded-graphics` mono fonts. The first outline
//! font that parses is kept for the lifetime of the resolver, so one render
//! pays for parsing once no matter how many sizes it asks for.

use ab_glyph::{point, Font, FontArc, Glyph, GlyphId, PxScale, ScaleFont};
use core::fmt;
use embedded_graphics::mono_font::ascii::{
    FONT_10X20, FONT_4X6, FONT_5X8, FONT_6X10, FONT_6X13, FONT_7X14, FONT_8X13, FONT_9X15,
    FONT_9X18,
};
use embedded_graphics::mono_font::MonoFont;
use poster_press_render::{TextExtent, TextMeasurer};
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

/// Built-in mono fonts, ascending by glyph height.
fn builtin_fonts() -> [&'static MonoFont<'static>; 9] {
    [
        &FONT_4X6,
        &FONT_5X8,
        &FONT_6X10,
        &FONT_6X13,
        &FONT_8X13,
        &FONT_7X14,
        &FONT_9X15,
        &FONT_9X18,
        &FONT_10X20,
    ]
}

/// Font search order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FontConfig {
    /// Caller-preferred font files, tried first.
    pub candidates: Vec<PathBuf>,
    /// Fallback system fonts, tried when no candidate loads.
    pub system_defaults: Vec<PathBuf>,
}

impl FontConfig {
    pub fn new(candidates: Vec<PathBuf>) -> Self {
        Self {
            candidates,
            ..Self::default()
        }
    }

    /// No outline fonts at all; always draws with the built-in mono fonts.
    pub fn builtin_only() -> Self {
        Self {
            candidates: Vec::new(),
            system_defaults: Vec::new(),
        }
    }

    pub fn with_candidate(mut self, path: impl Into<PathBuf>) -> Self {
        self.candidates.push(path.into());
        self
    }
}

impl Default for FontConfig {
    fn default() -> Self {
        let system_defaults = [
            "C:/Windows/Fonts/msyh.ttc",
            "C:/Windows/Fonts/msyh.ttf",
            "/System/Library/Fonts/PingFang.ttc",
            "/usr/share/fonts/opentype/noto/NotoSansCJK-Regular.ttc",
            "/usr/share/fonts/noto-cjk/NotoSansCJK-Regular.ttc",
            "/usr/share/fonts/truetype/wqy/wqy-microhei.ttc",
            "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
            "/usr/share/fonts/TTF/DejaVuSans.ttf",
            "C:/Windows/Fonts/arial.ttf",
        ];
        Self {
            candidates: vec![
                PathBuf::from("msyh.ttc"),
                PathBuf::from("msyh.ttf"),
                PathBuf::from("arial.ttf"),
            ],
            system_defaults: system_defaults.iter().map(PathBuf::from).collect(),
        }
    }
}

/// Where the resolver's outline font came from.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FaceSource {
    Candidate(PathBuf),
    SystemDefault(PathBuf),
    Builtin,
}

/// A face at one pixel size.
#[derive(Clone)]
pub enum Face {
    Outline {
        font: FontArc,
        size_px: i32,
        scale: PxScale,
    },
    Builtin {
        font: &'static MonoFont<'static>,
        size_px: i32,
    },
}

impl Face {
    /// Requested size, which may differ from a built-in font's glyph height.
    pub fn size_px(&self) -> i32 {
        match self {
            Self::Outline { size_px, .. } | Self::Builtin { size_px, .. } => *size_px,
        }
    }

    pub fn is_builtin(&self) -> bool {
        matches!(self, Self::Builtin { .. })
    }
}

impl fmt::Debug for Face {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Outline { size_px, scale, .. } => f
                .debug_struct("Outline")
                .field("size_px", size_px)
                .field("scale", &scale.y)
                .finish(),
            Self::Builtin { font, size_px } => f
                .debug_struct("Builtin")
                .field("size_px", size_px)
                .field("glyph_height", &font.character_size.height)
                .finish(),
        }
    }
}

#[derive(Debug)]
enum LoadError {
    Io(std::io::Error),
    Invalid,
}

impl fmt::Display for LoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(err) => write!(f, "{}", err),
            Self::Invalid => f.write_str("not a usable font"),
        }
    }
}

fn load_font_file(path: &Path) -> Result<FontArc, LoadError> {
    let bytes = std::fs::read(path).map_err(LoadError::Io)?;
    FontArc::try_from_vec(bytes).map_err(|_| LoadError::Invalid)
}

/// Resolves faces for one render and measures text with them.
pub struct TypefaceResolver {
    config: FontConfig,
    loaded: OnceLock<Option<(FontArc, FaceSource)>>,
}

impl TypefaceResolver {
    pub fn new(config: FontConfig) -> Self {
        Self {
            config,
            loaded: OnceLock::new(),
        }
    }

    pub fn config(&self) -> &FontConfig {
        &self.config
    }

    /// Source of the faces this resolver hands out.
    pub fn source(&self) -> FaceSource {
        match self.outline() {
            Some((_, source)) => source.clone(),
            None => FaceSource::Builtin,
        }
    }

    fn outline(&self) -> Option<&(FontArc, FaceSource)> {
        self.loaded.get_or_init(|| self.load()).as_ref()
    }

    fn load(&self) -> Option<(FontArc, FaceSource)> {
        for path in &self.config.candidates {
            match load_font_file(path) {
                Ok(font) => {
                    log::debug!("font: using candidate {}", path.display());
                    return Some((font, FaceSource::Candidate(path.clone())));
                }
                Err(err) => log::debug!("font: candidate {} skipped: {}", path.display(), err),
            }
        }
        for path in &self.config.system_defaults {
            if let Ok(font) = load_font_file(path) {
                if !self.config.candidates.is_empty() {
                    log::warn!(
                        "font: no candidate loaded, falling back to {}",
                        path.display()
                    );
                }
                return Some((font, FaceSource::SystemDefault(path.clone())));
            }
        }
        if !self.config.candidates.is_empty() || !self.config.system_defaults.is_empty() {
            log::warn!("font: no outline font loaded, using built-in mono fonts");
        }
        None
    }
}

impl fmt::Debug for TypefaceResolver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TypefaceResolver")
            .field("config", &self.config)
            .field("loaded", &self.loaded.get().map(|l| l.as_ref().map(|l| &l.1)))
            .finish()
    }
}

/// Largest built-in font whose glyph height fits `size_px`, else the smallest.
pub(crate) fn builtin_for_size(size_px: i32) -> &'static MonoFont<'static> {
    let fonts = builtin_fonts();
    let mut chosen = fonts[0];
    for font in fonts {
        if i64::from(font.character_size.height) <= i64::from(size_px) {
            chosen = font;
        }
    }
    chosen
}

/// Scale at which one em spans `size_px` pixels.
fn em_scale(font: &FontArc, size_px: i32) -> PxScale {
    let size = size_px as f32;
    match font.units_per_em() {
        Some(units) if units > 0.0 => PxScale::from(size * font.height_unscaled() / units),
        _ => PxScale::from(size),
    }
}

/// Glyphs of `text` laid out on one line from `(x, baseline)`, plus the pen advance.
pub(crate) fn layout_glyphs(
    font: &FontArc,
    scale: PxScale,
    text: &str,
    x: f32,
    baseline: f32,
) -> (Vec<Glyph>, f32) {
    let scaled = font.as_scaled(scale);
    let mut glyphs = Vec::with_capacity(text.len());
    let mut caret = x;
    let mut previous: Option<GlyphId> = None;
    for ch in text.chars() {
        if ch.is_control() {
            continue;
        }
        let id = scaled.glyph_id(ch);
        if let Some(prev) = previous {
            caret += scaled.kern(prev, id);
        }
        glyphs.push(id.with_scale_and_position(scale, point(caret, baseline)));
        caret += scaled.h_advance(id);
        previous = Some(id);
    }
    (glyphs, caret - x)
}

fn measure_builtin(font: &MonoFont<'_>, text: &str) -> TextExtent {
    let count = text.chars().filter(|ch| !ch.is_control()).count() as i32;
    if count == 0 {
        return TextExtent::default();
    }
    let glyph = font.character_size.width as i32;
    let spacing = font.character_spacing as i32;
    TextExtent::new(
        count * glyph + (count - 1) * spacing,
        font.character_size.height as i32,
    )
}

fn measure_outline(font: &FontArc, scale: PxScale, text: &str) -> TextExtent {
    let ascent = font.as_scaled(scale).ascent();
    let (glyphs, advance) = layout_glyphs(font, scale, text, 0.0, ascent);
    let mut bounds: Option<(f32, f32, f32, f32)> = None;
    for glyph in glyphs {
        let Some(outlined) = font.outline_glyph(glyph) else {
            continue;
        };
        let px = outlined.px_bounds();
        bounds = Some(match bounds {
            None => (px.min.x, px.min.y, px.max.x, px.max.y),
            Some((x0, y0, x1, y1)) => (
                x0.min(px.min.x),
                y0.min(px.min.y),
                x1.max(px.max.x),
                y1.max(px.max.y),
            ),
        });
    }
    match bounds {
        Some((x0, y0, x1, y1)) => TextExtent::new((x1 - x0) as i32, (y1 - y0) as i32),
        // Whitespace only: no ink, but keep the pen advance so wrapping sees it.
        None => TextExtent::new(advance.round() as i32, 0),
    }
}

impl TextMeasurer for TypefaceResolver {
    type Face = Face;

    fn face(&self, size_px: i32) -> Face {
        let size_px = size_px.max(1);
        match self.outline() {
            Some((font, _)) => Face::Outline {
                font: font.clone(),
                size_px,
                scale: em_scale(font, size_px),
            },
            None => Face::Builtin {
                font: builtin_for_size(size_px),
                size_px,
            },
        }
    }

    fn measure(&self, text: &str, face: &Face) -> TextExtent {
        if text.is_empty() {
            return TextExtent::default();
        }
        match face {
            Face::Outline { font, scale, .. } => measure_outline(font, *scale, text),
            Face::Builtin { font, .. } => measure_builtin(font, text),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn missing(label: &str) -> PathBuf {
        std::env::temp_dir().join(format!(
            "poster-press-missing-font-{label}-{}.ttf",
            std::process::id()
        ))
    }

    #[test]
    fn unloadable_candidates_fall_back_to_builtin() {
        let config = FontConfig {
            candidates: vec![missing("a"), missing("b")],
            system_defaults: vec![missing("c")],
        };
        let resolver = TypefaceResolver::new(config);
        let face = resolver.face(48);
        assert!(face.is_builtin());
        assert_eq!(face.size_px(), 48);
        assert_eq!(resolver.source(), FaceSource::Builtin);
    }

    #[test]
    fn garbage_font_file_is_skipped() {
        let path = std::env::temp_dir().join(format!(
            "poster-press-garbage-font-{}.ttf",
            std::process::id()
        ));
        std::fs::write(&path, b"definitely not a font").unwrap();
        let resolver = TypefaceResolver::new(FontConfig {
            candidates: vec![path.clone()],
            system_defaults: Vec::new(),
        });
        assert!(resolver.face(20).is_builtin());
        let _ = std::fs::remove_file(path);
    }

    #[test]
    fn builtin_picks_largest_font_that_fits() {
        assert_eq!(builtin_for_size(1).character_size.height, 6);
        assert_eq!(builtin_for_size(14).character_size.height, 14);
        assert_eq!(builtin_for_size(17).character_size.height, 15);
        assert_eq!(builtin_for_size(200).character_size.height, 20);
    }

    #[test]
    fn builtin_measurement_is_stable_and_counts_chars() {
        let resolver = TypefaceResolver::new(FontConfig::builtin_only());
        let face = resolver.face(20);
        let first = resolver.measure("138 0013 8000", &face);
        let second = resolver.measure("138 0013 8000", &face);
        assert_eq!(first, second);
        assert_eq!(first, TextExtent::new(13 * 10, 20));
        assert_eq!(resolver.measure("", &face), TextExtent::default());
        assert_eq!(resolver.width("国庆", &face), 20);
    }

    #[test]
    fn em_scale_spans_one_em_per_size_px() {
        let fixture = Path::new(env!("CARGO_MANIFEST_DIR"))
            .join("tests/fixtures/fonts/DejaVuSans.ttf");
        let Ok(font) = load_font_file(&fixture) else {
            eprintln!("em scale test skipped: {} not loadable", fixture.display());
            return;
        };
        let units = font.units_per_em().unwrap();
        for size_px in [1, 16, 48, 120] {
            let scaled = font.as_scaled(em_scale(&font, size_px));
            let em = scaled.h_scale_factor() * units;
            assert!((em - size_px as f32).abs() < 1e-3, "{} -> {}", size_px, em);
            assert!((scaled.v_scale_factor() * units - size_px as f32).abs() < 1e-3);
        }
    }

    #[test]
    fn zero_size_clamps_to_one() {
        let resolver = TypefaceResolver::new(FontConfig::builtin_only());
        assert_eq!(resolver.face(0).size_px(), 1);
    }
}
