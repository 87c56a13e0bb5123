use crate::error::PipelineResult;
use crate::tools::read_image;
use image::{DynamicImage, RgbImage};
use std::path::Path;

/// 計算單張圖片的清晰度分數
pub trait SharpnessMeter {
    fn score(&self, path: &Path) -> PipelineResult<f64>;
}

/// 以 Laplacian 變異數作為清晰度分數
#[derive(Debug, Default, Clone, Copy)]
pub struct LaplacianMeter;

impl SharpnessMeter for LaplacianMeter {
    fn score(&self, path: &Path) -> PipelineResult<f64> {
        let image = read_image(path)?;
        Ok(calculate_sharpness(&image))
    }
}

#[must_use]
pub fn calculate_sharpness(image: &DynamicImage) -> f64 {
    laplacian_variance(&image.to_rgb8())
}

/// reflect-101 邊界：-1 對應 1，n 對應 n-2
const fn reflect_101(index: i64, len: i64) -> usize {
    if len == 1 {
        return 0;
    }
    let reflected = if index < 0 {
        -index
    } else if index >= len {
        2 * len - index - 2
    } else {
        index
    };
    reflected as usize
}

/// 各色版分別套用 3x3 Laplacian kernel，對全部響應值取母體變異數
///
/// ```text
/// [ 0  1  0 ]
/// [ 1 -4  1 ]
/// [ 0  1  0 ]
/// ```
#[must_use]
pub fn laplacian_variance(image: &RgbImage) -> f64 {
    let (width, height) = image.dimensions();
    if width == 0 || height == 0 {
        return 0.0;
    }

    let w = i64::from(width);
    let h = i64::from(height);
    let sample = |x: i64, y: i64, channel: usize| -> f64 {
        let px = reflect_101(x, w) as u32;
        let py = reflect_101(y, h) as u32;
        f64::from(image.get_pixel(px, py)[channel])
    };

    // 單趟累加 sum 與 sum of squares
    let mut sum = 0.0;
    let mut sum_sq = 0.0;

    for y in 0..h {
        for x in 0..w {
            for channel in 0..3 {
                let response = sample(x, y - 1, channel)
                    + sample(x, y + 1, channel)
                    + sample(x - 1, y, channel)
                    + sample(x + 1, y, channel)
                    - 4.0 * sample(x, y, channel);
                sum += response;
                sum_sq += response * response;
            }
        }
    }

    let count = (w * h * 3) as f64;
    let mean = sum / count;
    (sum_sq / count - mean * mean).max(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgb, imageops};

    fn checkerboard(size: u32, cell: u32) -> RgbImage {
        RgbImage::from_fn(size, size, |x, y| {
            if (x / cell + y / cell) % 2 == 0 {
                Rgb([255, 255, 255])
            } else {
                Rgb([0, 0, 0])
            }
        })
    }

    #[test]
    fn test_flat_image_has_zero_variance() {
        let flat = RgbImage::from_pixel(32, 32, Rgb([128, 64, 200]));
        assert!(laplacian_variance(&flat).abs() < 1e-9);
    }

    #[test]
    fn test_sharp_image_scores_higher_than_blurred() {
        let sharp = checkerboard(64, 4);
        let blurred = imageops::blur(&sharp, 3.0);

        let sharp_score = laplacian_variance(&sharp);
        let blurred_score = laplacian_variance(&blurred);

        assert!(sharp_score > 0.0);
        assert!(sharp_score > blurred_score * 2.0);
    }

    #[test]
    fn test_score_is_deterministic() {
        let img = DynamicImage::ImageRgb8(checkerboard(40, 3));
        assert_eq!(calculate_sharpness(&img), calculate_sharpness(&img));
    }

    #[test]
    fn test_single_pixel_image() {
        let img = RgbImage::from_pixel(1, 1, Rgb([9, 9, 9]));
        assert_eq!(laplacian_variance(&img), 0.0);
    }

    #[test]
    fn test_single_bright_pixel_known_variance() {
        // 中心響應 -1020；邊中點經反射後兩個鄰點都是中心，響應 510；角落為 0
        let mut img = RgbImage::from_pixel(3, 3, Rgb([0, 0, 0]));
        img.put_pixel(1, 1, Rgb([255, 255, 255]));

        let responses = [-1020.0, 510.0, 510.0, 510.0, 510.0, 0.0, 0.0, 0.0, 0.0];
        let mean = responses.iter().sum::<f64>() / 9.0;
        let expected = responses.iter().map(|r| (r - mean).powi(2)).sum::<f64>() / 9.0;

        assert!((laplacian_variance(&img) - expected).abs() < 1e-6);
    }

    #[test]
    fn test_reflect_101() {
        assert_eq!(reflect_101(-1, 5), 1);
        assert_eq!(reflect_101(5, 5), 3);
        assert_eq!(reflect_101(2, 5), 2);
        assert_eq!(reflect_101(-1, 1), 0);
    }
}
