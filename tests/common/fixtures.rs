use poster_press::{Item, PosterRequest, ThemeId};
use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};

static NEXT_DIR_ID: AtomicUsize = AtomicUsize::new(0);

/// Fresh per-test output directory under the system temp dir.
pub fn temp_output_dir(label: &str) -> PathBuf {
    let nonce = NEXT_DIR_ID.fetch_add(1, Ordering::Relaxed);
    std::env::temp_dir().join(format!(
        "poster-press-{label}-{}-{nonce}",
        std::process::id()
    ))
}

pub fn sample_items(count: usize) -> Vec<Item> {
    const CODES: [(&str, f64, f64); 9] = [
        ("13800138000", 1000.0, 58.0),
        ("13900139001", 800.0, 38.0),
        ("13700137002", 600.0, 28.0),
        ("13600136003", 500.0, 28.0),
        ("13500135004", 1200.0, 68.0),
        ("13400134005", 900.0, 48.0),
        ("13300133006", 700.0, 38.0),
        ("13200132007", 600.0, 28.0),
        ("13100131008", 500.0, 28.0),
    ];
    CODES
        .iter()
        .cycle()
        .take(count)
        .map(|(code, primary, secondary)| Item::new(*code, Some(*primary), Some(*secondary)))
        .collect()
}

/// The National Day poster: full 3x3 grid, branding, contact line.
pub fn national_day_request(output_path: PathBuf) -> PosterRequest {
    PosterRequest::new(
        output_path,
        "吉祥号码",
        "2025年10月1日｜国庆专场",
        "限时抢购",
        sample_items(9),
    )
    .with_palette(ThemeId::NationalDay.palette().into())
    .with_branding("南昌移动")
    .with_contact(Some("南昌".to_string()), Some("13507094669".to_string()))
}

pub const PATRIOTIC_TAGLINE: &str =
    "国庆七天乐，好号免费选，尾号双重惊喜不断，预存越多返得越多，低消轻松无压力，到店还有精美礼品相送哦，心动不如马上行动吧！";

/// The patriotic special: long title and tagline, codes of uneven length.
pub fn patriotic_special_request(output_path: PathBuf) -> PosterRequest {
    let items = vec![
        Item::new("13800138000", Some(1000.0), Some(58.0)),
        Item::new("8888", Some(200.0), None),
        Item::new("1390013900188886", Some(3000.0), Some(3000.0)),
        Item::new("666", None, Some(18.0)),
        Item::new("18679112345", Some(88.8), Some(38.0)),
        Item::new("95555", None, None),
        Item::new("1", Some(0.5), Some(8.0)),
        Item::new(" 1370013700213 ", Some(1200.0), Some(68.0)),
        Item::new("AB-88888888-CD", Some(666.0), Some(28.0)),
    ];
    PosterRequest::new(
        output_path,
        "早安好号·国庆爱国专场",
        "2025年10月01日 国庆爱国｜尾号双重专场",
        PATRIOTIC_TAGLINE,
        items,
    )
    .with_palette(ThemeId::NationalDay.palette().into())
}
