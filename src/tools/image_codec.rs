use crate::error::{IoOperation, PipelineError, PipelineResult};
use image::imageops::FilterType;
use image::{DynamicImage, ImageReader, RgbImage};
use std::path::Path;

/// 讀取圖片，以內容判斷格式而非只看副檔名
pub fn read_image(path: &Path) -> PipelineResult<DynamicImage> {
    let reader = ImageReader::open(path)
        .map_err(|e| PipelineError::io(IoOperation::ReadImage, path, e))?
        .with_guessed_format()
        .map_err(|e| PipelineError::io(IoOperation::ReadImage, path, e))?;

    reader
        .decode()
        .map_err(|e| PipelineError::io(IoOperation::ReadImage, path, e))
}

/// 依副檔名決定格式寫出圖片
pub fn write_image(path: &Path, image: &DynamicImage) -> PipelineResult<()> {
    image
        .save(path)
        .map_err(|e| PipelineError::io(IoOperation::WriteImage, path, e))
}

/// 不保持比例，直接拉伸到指定尺寸（雙線性）
#[must_use]
pub fn resize_exact(image: &DynamicImage, width: u32, height: u32) -> RgbImage {
    image
        .resize_exact(width, height, FilterType::Triangle)
        .to_rgb8()
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgb;
    use tempfile::TempDir;

    #[test]
    fn test_write_then_read_png() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("frame_0000.png");
        let img = DynamicImage::ImageRgb8(RgbImage::from_pixel(8, 4, Rgb([10, 20, 30])));

        write_image(&path, &img).unwrap();
        let loaded = read_image(&path).unwrap();

        assert_eq!((loaded.width(), loaded.height()), (8, 4));
        assert_eq!(loaded.to_rgb8().get_pixel(3, 2), &Rgb([10, 20, 30]));
    }

    #[test]
    fn test_read_corrupt_image_is_io_failure() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("broken.png");
        std::fs::write(&path, b"definitely not a png").unwrap();

        let err = read_image(&path).unwrap_err();
        assert!(matches!(
            err,
            PipelineError::IoFailure {
                operation: IoOperation::ReadImage,
                ..
            }
        ));
    }

    #[test]
    fn test_resize_exact_stretches() {
        let img = DynamicImage::new_rgb8(1920, 1080);
        let thumb = resize_exact(&img, 160, 90);
        assert_eq!(thumb.dimensions(), (160, 90));

        let tall = DynamicImage::new_rgb8(100, 400);
        assert_eq!(resize_exact(&tall, 160, 90).dimensions(), (160, 90));
    }
}
