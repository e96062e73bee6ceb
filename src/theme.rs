//! Theme palettes and the built-in palette table.
//!
//! Palettes are plain data. Deciding which one to use (calendar, weather,
//! holidays) belongs to the caller.

use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::error::RequestError;

/// 8-bit RGB triple. Serialized as `[r, g, b]`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    pub const WHITE: Self = Self(255, 255, 255);

    /// Linear interpolation toward `other`, `t` in `[0, 255]`.
    pub fn mix(self, other: Self, t: u8) -> Self {
        let lerp = |a: u8, b: u8| -> u8 {
            let t = u16::from(t);
            ((u16::from(a) * (255 - t) + u16::from(b) * t + 127) / 255) as u8
        };
        Self(
            lerp(self.0, other.0),
            lerp(self.1, other.1),
            lerp(self.2, other.2),
        )
    }
}

/// Named, immutable color set applied uniformly across one poster.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThemePalette {
    /// Display name.
    pub name: String,
    /// Canvas background gradient, top edge.
    pub bg_top: Rgb,
    /// Canvas background gradient, bottom edge.
    pub bg_bottom: Rgb,
    /// Header band gradient, top edge.
    pub header_top: Rgb,
    /// Header band gradient, bottom edge.
    pub header_bottom: Rgb,
    /// Footer band gradient, top edge.
    pub footer_top: Rgb,
    /// Footer band gradient, bottom edge.
    pub footer_bottom: Rgb,
    #[serde(default = "default_title_color")]
    pub title_color: Rgb,
    #[serde(default = "default_subtitle_color")]
    pub subtitle_color: Rgb,
    #[serde(default = "default_tagline_color")]
    pub tagline_color: Rgb,
    /// Item card fill.
    #[serde(default = "default_card_fill")]
    pub card_fill: Rgb,
    /// Item card and content-card outline.
    #[serde(default = "default_card_border")]
    pub card_border: Rgb,
}

fn default_title_color() -> Rgb {
    Rgb::WHITE
}

fn default_subtitle_color() -> Rgb {
    Rgb(230, 242, 255)
}

fn default_tagline_color() -> Rgb {
    Rgb::WHITE
}

fn default_card_fill() -> Rgb {
    Rgb(250, 252, 255)
}

fn default_card_border() -> Rgb {
    Rgb(230, 235, 245)
}

impl ThemePalette {
    /// Palette where header and footer share one gradient, with default card
    /// and tagline colors.
    fn banded(
        name: &str,
        bg: (Rgb, Rgb),
        band: (Rgb, Rgb),
        title_color: Rgb,
        subtitle_color: Rgb,
    ) -> Self {
        Self {
            name: name.to_string(),
            bg_top: bg.0,
            bg_bottom: bg.1,
            header_top: band.0,
            header_bottom: band.1,
            footer_top: band.0,
            footer_bottom: band.1,
            title_color,
            subtitle_color,
            tagline_color: default_tagline_color(),
            card_fill: default_card_fill(),
            card_border: default_card_border(),
        }
    }
}

impl Default for ThemePalette {
    fn default() -> Self {
        ThemeId::DefaultBlue.palette()
    }
}

/// Identifier for each built-in palette.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ThemeId {
    Morning,
    Noon,
    Evening,
    Night,
    Sunny,
    Rainy,
    Snowy,
    SpringFestival,
    Valentine,
    Qingming,
    LabourDay,
    DragonBoat,
    MidAutumn,
    NationalDay,
    NewYear,
    DefaultBlue,
}

impl ThemeId {
    /// Every built-in theme in table order.
    pub const ALL: [ThemeId; 16] = [
        Self::Morning,
        Self::Noon,
        Self::Evening,
        Self::Night,
        Self::Sunny,
        Self::Rainy,
        Self::Snowy,
        Self::SpringFestival,
        Self::Valentine,
        Self::Qingming,
        Self::LabourDay,
        Self::DragonBoat,
        Self::MidAutumn,
        Self::NationalDay,
        Self::NewYear,
        Self::DefaultBlue,
    ];

    /// Display name used on posters and preview file names.
    pub fn name(self) -> &'static str {
        match self {
            Self::Morning => "早晨清新",
            Self::Noon => "午间活力",
            Self::Evening => "傍晚温暖",
            Self::Night => "夜晚神秘",
            Self::Sunny => "晴天明亮",
            Self::Rainy => "雨天温馨",
            Self::Snowy => "雪天浪漫",
            Self::SpringFestival => "春节喜庆",
            Self::Valentine => "情人节浪漫",
            Self::Qingming => "清明素雅",
            Self::LabourDay => "劳动节活力",
            Self::DragonBoat => "端午传统",
            Self::MidAutumn => "中秋团圆",
            Self::NationalDay => "国庆爱国",
            Self::NewYear => "元旦新年",
            Self::DefaultBlue => "默认蓝调",
        }
    }

    /// Look up a built-in theme by display name.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|id| id.name() == name)
    }

    /// Build this theme's palette.
    pub fn palette(self) -> ThemePalette {
        let name = self.name();
        let white = Rgb::WHITE;
        match self {
            Self::Morning => ThemePalette::banded(
                name,
                (Rgb(255, 250, 240), Rgb(255, 245, 230)),
                (Rgb(255, 183, 77), Rgb(255, 213, 128)),
                white,
                Rgb(255, 248, 235),
            ),
            Self::Noon => ThemePalette::banded(
                name,
                (Rgb(255, 248, 240), Rgb(255, 243, 224)),
                (Rgb(255, 87, 34), Rgb(255, 138, 101)),
                white,
                Rgb(255, 235, 215),
            ),
            Self::Evening => ThemePalette::banded(
                name,
                (Rgb(255, 245, 238), Rgb(255, 238, 220)),
                (Rgb(255, 112, 67), Rgb(255, 152, 107)),
                white,
                Rgb(255, 228, 210),
            ),
            Self::Night => ThemePalette::banded(
                name,
                (Rgb(240, 242, 250), Rgb(230, 232, 245)),
                (Rgb(63, 81, 181), Rgb(92, 107, 192)),
                white,
                Rgb(220, 230, 255),
            ),
            Self::Sunny => ThemePalette::banded(
                name,
                (Rgb(255, 251, 230), Rgb(255, 245, 210)),
                (Rgb(255, 193, 7), Rgb(255, 213, 79)),
                white,
                Rgb(255, 248, 220),
            ),
            Self::Rainy => ThemePalette::banded(
                name,
                (Rgb(240, 245, 250), Rgb(230, 240, 250)),
                (Rgb(66, 165, 245), Rgb(100, 181, 246)),
                white,
                Rgb(225, 245, 254),
            ),
            Self::Snowy => ThemePalette::banded(
                name,
                (Rgb(250, 250, 255), Rgb(245, 248, 255)),
                (Rgb(158, 158, 158), Rgb(189, 189, 189)),
                white,
                Rgb(240, 240, 255),
            ),
            Self::SpringFestival => ThemePalette::banded(
                name,
                (Rgb(255, 245, 235), Rgb(255, 238, 220)),
                (Rgb(211, 47, 47), Rgb(239, 83, 80)),
                Rgb(255, 235, 59),
                Rgb(255, 245, 220),
            ),
            Self::Valentine => ThemePalette::banded(
                name,
                (Rgb(255, 240, 245), Rgb(255, 228, 240)),
                (Rgb(233, 30, 99), Rgb(244, 67, 54)),
                white,
                Rgb(255, 235, 245),
            ),
            Self::Qingming => ThemePalette::banded(
                name,
                (Rgb(245, 248, 250), Rgb(238, 243, 248)),
                (Rgb(96, 125, 139), Rgb(120, 144, 156)),
                white,
                Rgb(236, 239, 241),
            ),
            Self::LabourDay => ThemePalette::banded(
                name,
                (Rgb(255, 243, 224), Rgb(255, 236, 179)),
                (Rgb(255, 152, 0), Rgb(255, 183, 77)),
                white,
                Rgb(255, 245, 225),
            ),
            Self::DragonBoat => ThemePalette::banded(
                name,
                (Rgb(240, 248, 240), Rgb(232, 245, 233)),
                (Rgb(56, 142, 60), Rgb(76, 175, 80)),
                white,
                Rgb(232, 245, 233),
            ),
            Self::MidAutumn => ThemePalette::banded(
                name,
                (Rgb(255, 248, 225), Rgb(255, 243, 205)),
                (Rgb(255, 143, 0), Rgb(255, 167, 38)),
                white,
                Rgb(255, 245, 220),
            ),
            Self::NationalDay => ThemePalette::banded(
                name,
                (Rgb(255, 245, 238), Rgb(255, 235, 220)),
                (Rgb(198, 40, 40), Rgb(229, 57, 53)),
                Rgb(255, 235, 59),
                Rgb(255, 243, 224),
            ),
            Self::NewYear => ThemePalette::banded(
                name,
                (Rgb(250, 245, 255), Rgb(243, 238, 255)),
                (Rgb(123, 31, 162), Rgb(156, 39, 176)),
                white,
                Rgb(237, 231, 246),
            ),
            Self::DefaultBlue => ThemePalette::banded(
                name,
                (Rgb(246, 249, 255), Rgb(234, 239, 250)),
                (Rgb(55, 120, 240), Rgb(95, 160, 255)),
                white,
                Rgb(230, 242, 255),
            ),
        }
    }
}

/// Immutable palette table, built once and shared by reference.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ThemeTable {
    palettes: Vec<Arc<ThemePalette>>,
}

impl ThemeTable {
    /// Table of every built-in palette, in [`ThemeId::ALL`] order.
    pub fn builtin() -> Self {
        Self {
            palettes: ThemeId::ALL
                .into_iter()
                .map(|id| Arc::new(id.palette()))
                .collect(),
        }
    }

    /// Table of caller-provided palettes.
    ///
    /// Name lookups return the first palette carrying that name.
    pub fn from_palettes(palettes: Vec<ThemePalette>) -> Result<Self, RequestError> {
        if palettes.is_empty() {
            return Err(RequestError::EmptyThemeTable);
        }
        Ok(Self {
            palettes: palettes.into_iter().map(Arc::new).collect(),
        })
    }

    /// Decode a JSON array of palettes.
    pub fn from_json_str(json: &str) -> Result<Self, RequestError> {
        let palettes: Vec<ThemePalette> = serde_json::from_str(json)?;
        log::debug!("decoded {} theme palette(s)", palettes.len());
        Self::from_palettes(palettes)
    }

    /// Built-in palette for `id`.
    ///
    /// Tables decoded from JSON may not contain every id; those fall back to
    /// the first palette.
    pub fn get(&self, id: ThemeId) -> Arc<ThemePalette> {
        match self.by_name(id.name()) {
            Some(palette) => palette,
            None => {
                log::warn!("theme {} not in table, using {}", id.name(), self.first().name);
                self.first()
            }
        }
    }

    /// Palette with the given display name.
    pub fn by_name(&self, name: &str) -> Option<Arc<ThemePalette>> {
        self.palettes.iter().find(|p| p.name == name).cloned()
    }

    /// The default palette ("默认蓝调" when present).
    pub fn default_palette(&self) -> Arc<ThemePalette> {
        self.get(ThemeId::DefaultBlue)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Arc<ThemePalette>> {
        self.palettes.iter()
    }

    pub fn len(&self) -> usize {
        self.palettes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.palettes.is_empty()
    }

    fn first(&self) -> Arc<ThemePalette> {
        match self.palettes.first() {
            Some(palette) => Arc::clone(palette),
            None => Arc::new(ThemePalette::default()),
        }
    }
}

impl Default for ThemeTable {
    fn default() -> Self {
        Self::builtin()
    }
}
