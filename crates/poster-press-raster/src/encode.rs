use image::codecs::jpeg::JpegEncoder;
use image::RgbImage;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::RasterError;

/// JPEG quality used for posters.
pub const DEFAULT_JPEG_QUALITY: u8 = 92;

/// Output encoding knobs.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct EncodeOptions {
    /// JPEG quality, `1..=100`.
    pub quality: u8,
    /// Create missing parent directories before writing.
    pub create_parent_dirs: bool,
}

impl Default for EncodeOptions {
    fn default() -> Self {
        Self {
            quality: DEFAULT_JPEG_QUALITY,
            create_parent_dirs: true,
        }
    }
}

/// Encode `image` as baseline JPEG at `path`, returning the bytes written.
///
/// The encoder samples chroma at full resolution, so small colored text keeps
/// its edges.
pub fn write_jpeg(image: &RgbImage, path: &Path, options: EncodeOptions) -> Result<u64, RasterError> {
    if options.create_parent_dirs {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|source| RasterError::CreateDir {
                path: parent.to_path_buf(),
                source,
            })?;
        }
    }
    let write_err = |source| RasterError::Write {
        path: path.to_path_buf(),
        source,
    };
    let file = File::create(path).map_err(write_err)?;
    let mut writer = BufWriter::new(file);
    let quality = options.quality.clamp(1, 100);
    JpegEncoder::new_with_quality(&mut writer, quality).encode_image(image)?;
    writer.flush().map_err(write_err)?;
    let bytes = fs::metadata(path).map_err(write_err)?.len();
    log::debug!(
        "wrote {} ({}x{}, q{}, {} bytes)",
        path.display(),
        image.width(),
        image.height(),
        quality,
        bytes
    );
    Ok(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    static NEXT_DIR_ID: AtomicUsize = AtomicUsize::new(0);

    fn temp_dir(label: &str) -> std::path::PathBuf {
        let nonce = NEXT_DIR_ID.fetch_add(1, Ordering::Relaxed);
        std::env::temp_dir().join(format!(
            "poster-press-encode-{label}-{}-{nonce}",
            std::process::id()
        ))
    }

    #[test]
    fn creates_missing_parents_and_writes_decodable_jpeg() {
        let dir = temp_dir("parents");
        let path = dir.join("nested").join("out.jpg");
        let image = RgbImage::from_pixel(16, 8, image::Rgb([200, 40, 40]));
        let bytes = write_jpeg(&image, &path, EncodeOptions::default()).unwrap();
        assert!(bytes > 0);
        let decoded = image::open(&path).unwrap();
        assert_eq!((decoded.width(), decoded.height()), (16, 8));
        let _ = fs::remove_dir_all(dir);
    }

    #[test]
    fn missing_parent_without_creation_is_a_write_error() {
        let dir = temp_dir("noparents");
        let path = dir.join("out.jpg");
        let options = EncodeOptions {
            create_parent_dirs: false,
            ..EncodeOptions::default()
        };
        let image = RgbImage::new(2, 2);
        assert!(matches!(
            write_jpeg(&image, &path, options),
            Err(RasterError::Write { .. })
        ));
    }

    #[test]
    fn parent_that_is_a_file_is_a_create_dir_error() {
        let dir = temp_dir("fileparent");
        fs::create_dir_all(&dir).unwrap();
        let blocker = dir.join("blocker");
        fs::write(&blocker, b"x").unwrap();
        let image = RgbImage::new(2, 2);
        let result = write_jpeg(&image, &blocker.join("out.jpg"), EncodeOptions::default());
        assert!(matches!(result, Err(RasterError::CreateDir { .. })));
        let _ = fs::remove_dir_all(dir);
    }
}
