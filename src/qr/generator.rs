use image::imageops::FilterType;
use image::{DynamicImage, Luma, RgbaImage};
use qrcode::{EcLevel, QrCode};
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::error::{Error, Result};

/// Side length of the saved artifact, in pixels
const OUTPUT_SIZE: u32 = 1080;

/// Side length of the on-screen preview, in pixels
const PREVIEW_SIZE: u32 = 200;

/// Pixels per QR module before the final resize
const MODULE_PIXELS: u32 = 10;

/// A freshly generated QR code: the saved file plus its display preview
#[derive(Debug, Clone)]
pub struct GeneratedCode {
    /// Where the 1080x1080 PNG was written
    pub saved_path: PathBuf,
    /// 200x200 copy for the preview pane; never persisted
    pub preview: RgbaImage,
}

/// Encode `text` and save it as `<output_dir>/<base_name>.png`.
///
/// The artifact is always a black-on-white 1080x1080 PNG. Error correction
/// level L keeps data capacity as high as possible for long URLs. The
/// output directory is not created here; writing into a missing or
/// unwritable directory fails with an image/I-O error.
pub fn generate(text: &str, output_dir: &Path, base_name: &str) -> Result<GeneratedCode> {
    let code = QrCode::with_error_correction_level(text, EcLevel::L)
        .map_err(|e| Error::Encode(e.to_string()))?;

    // 10px modules surrounded by the standard 4-module quiet zone
    let matrix = code
        .render::<Luma<u8>>()
        .module_dimensions(MODULE_PIXELS, MODULE_PIXELS)
        .quiet_zone(true)
        .build();

    let artifact = DynamicImage::ImageLuma8(matrix).resize_exact(
        OUTPUT_SIZE,
        OUTPUT_SIZE,
        FilterType::Lanczos3,
    );

    let saved_path = output_dir.join(format!("{base_name}.png"));
    artifact.save(&saved_path)?;
    debug!(path = %saved_path.display(), "saved QR code artifact");

    Ok(GeneratedCode {
        preview: display_copy(&artifact),
        saved_path,
    })
}

/// Load a previously saved image from disk, resized for the preview pane
pub fn load_preview(path: &Path) -> Result<RgbaImage> {
    let img = image::open(path)?;
    Ok(display_copy(&img))
}

fn display_copy(img: &DynamicImage) -> RgbaImage {
    img.resize_exact(PREVIEW_SIZE, PREVIEW_SIZE, FilterType::Lanczos3)
        .to_rgba8()
}
