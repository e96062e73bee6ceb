//! One sample poster per palette, for eyeballing a theme table.

use poster_press::{Item, PosterRequest, ThemePalette, ThemeTable};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::{PosterRenderer, RasterError};

/// Result of rendering one palette's preview.
#[derive(Debug)]
pub struct PreviewOutcome {
    pub theme: String,
    pub result: Result<PathBuf, RasterError>,
}

/// Sample request rendered for each palette preview.
pub fn preview_request(palette: Arc<ThemePalette>, output_path: PathBuf) -> PosterRequest {
    let items = [
        ("13800138000", 1000.0, 58.0),
        ("13900139001", 800.0, 38.0),
        ("13700137002", 600.0, 28.0),
        ("13600136003", 500.0, 28.0),
        ("13500135004", 1200.0, 68.0),
        ("13400134005", 900.0, 48.0),
        ("13300133006", 700.0, 38.0),
        ("13200132007", 600.0, 28.0),
        ("13100131008", 500.0, 28.0),
    ]
    .into_iter()
    .map(|(code, primary, secondary)| Item::new(code, Some(primary), Some(secondary)))
    .collect();
    let subtitle = format!("2025年10月20日 {}｜示例专场", palette.name);
    PosterRequest::new(
        output_path,
        "吉祥号码精选",
        subtitle,
        "主题预览 - 幸运好号，限时抢购，心动不如行动！",
        items,
    )
    .with_palette(palette)
    .with_branding("南昌县移动专供")
    .with_contact(Some("南昌".to_string()), Some("13507094669".to_string()))
}

/// Render a preview for every palette in `table` into `out_dir`.
///
/// One palette failing does not stop the batch; each outcome is reported.
pub fn render_theme_previews(
    renderer: &PosterRenderer,
    table: &ThemeTable,
    out_dir: &Path,
) -> Vec<PreviewOutcome> {
    table
        .iter()
        .map(|palette| {
            let path = out_dir.join(format!("主题预览_{}.jpg", palette.name));
            let request = preview_request(Arc::clone(palette), path);
            let result = renderer.render(&request).map(|output| output.path);
            if let Err(err) = &result {
                log::warn!("theme preview {} failed: {}", palette.name, err);
            }
            PreviewOutcome {
                theme: palette.name.clone(),
                result,
            }
        })
        .collect()
}
