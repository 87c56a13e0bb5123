use super::video_decoder::{FfmpegDecoder, VideoDecoder};
use crate::error::{Completed, PipelineError, PipelineResult};
use crate::tools::{ensure_directory_exists, write_image};
use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// 擷取參數
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractOptions {
    /// 要擷取的幀數
    pub target_count: u64,
    /// 取樣間隔的倍數，1 代表平均分布於整部影片
    pub skip: u64,
}

impl Default for ExtractOptions {
    fn default() -> Self {
        Self {
            target_count: 100,
            skip: 1,
        }
    }
}

/// 擷取結果
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractionResult {
    pub requested: u64,
    pub frames_written: u64,
    pub frames_skipped: u64,
    pub frame_interval: u64,
}

/// 由總幀數與目標張數換算出的取樣位置
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SamplingPlan {
    pub frame_interval: u64,
    pub skip: u64,
    pub target_count: u64,
}

impl SamplingPlan {
    /// `frame_interval = floor(total / target)`，間隔為 0 時拒絕，避免重複擷取同一幀
    pub fn new(total_frame_count: u64, target_count: u64, skip: u64) -> PipelineResult<Self> {
        if target_count == 0 {
            return Err(PipelineError::configuration("擷取張數必須大於 0"));
        }
        if skip == 0 {
            return Err(PipelineError::configuration("skip 必須大於 0"));
        }

        let frame_interval = total_frame_count / target_count;
        if frame_interval == 0 {
            return Err(PipelineError::configuration(format!(
                "要求擷取 {target_count} 張，但影片只有 {total_frame_count} 幀"
            )));
        }

        // 最後一個位置不可溢位
        (target_count - 1)
            .checked_mul(frame_interval)
            .and_then(|p| p.checked_mul(skip))
            .ok_or_else(|| PipelineError::configuration("取樣位置超出範圍"))?;

        Ok(Self {
            frame_interval,
            skip,
            target_count,
        })
    }

    #[must_use]
    pub const fn position(&self, index: u64) -> u64 {
        index * self.frame_interval * self.skip
    }

    pub fn positions(&self) -> impl Iterator<Item = (u64, u64)> + '_ {
        (0..self.target_count).map(move |i| (i, self.position(i)))
    }
}

/// 擷取幀的檔名，索引補零至 4 位
#[must_use]
pub fn frame_file_name(index: u64) -> String {
    format!("frame_{index:04}.png")
}

/// 依取樣計畫逐幀定位、解碼並寫出圖片
///
/// 單幀解碼失敗只會略過該索引（不補位），其他錯誤則中止，
/// 並以 `Incomplete` 回報中止前已寫出的幀數。
pub fn extract_frames<D: VideoDecoder + ?Sized>(
    decoder: &mut D,
    output_dir: &Path,
    options: &ExtractOptions,
) -> PipelineResult<ExtractionResult> {
    let plan = SamplingPlan::new(
        decoder.total_frame_count(),
        options.target_count,
        options.skip,
    )?;

    ensure_directory_exists(output_dir)?;

    info!(
        "開始擷取 {} 張: 總幀數 {}, {:.3} fps, 間隔 {} 幀, skip {}",
        plan.target_count,
        decoder.total_frame_count(),
        decoder.frames_per_second(),
        plan.frame_interval,
        plan.skip
    );

    let mut frames_written = 0;
    let mut frames_skipped = 0;

    for (index, position) in plan.positions() {
        decoder.seek_to_frame(position);

        let frame = match decoder.read_frame() {
            Ok(frame) => frame,
            Err(e) if e.is_recoverable() => {
                warn!("略過索引 {index}: {e}");
                frames_skipped += 1;
                continue;
            }
            Err(e) => {
                return Err(PipelineError::incomplete(
                    Completed::FramesWritten(frames_written),
                    e,
                ));
            }
        };

        let frame_path = output_dir.join(frame_file_name(index));
        write_image(&frame_path, &frame).map_err(|e| {
            PipelineError::incomplete(Completed::FramesWritten(frames_written), e)
        })?;
        debug!("寫出 {} (位置 {position})", frame_path.display());
        frames_written += 1;
    }

    info!("擷取完成 - 寫出: {frames_written}, 略過: {frames_skipped}");

    Ok(ExtractionResult {
        requested: plan.target_count,
        frames_written,
        frames_skipped,
        frame_interval: plan.frame_interval,
    })
}

/// 以 ffmpeg 開啟影片並擷取幀
pub fn extract_video(
    video_path: &Path,
    output_dir: &Path,
    options: &ExtractOptions,
) -> PipelineResult<ExtractionResult> {
    let mut decoder = FfmpegDecoder::open(video_path)?;
    extract_frames(&mut decoder, output_dir, options)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{DynamicImage, Rgb, RgbImage};
    use std::collections::HashSet;
    use tempfile::TempDir;

    /// 記錄 seek 位置、可指定哪些位置解碼失敗的假解碼器
    struct ScriptedDecoder {
        total: u64,
        position: u64,
        seeks: Vec<u64>,
        broken: HashSet<u64>,
        lost_at: Option<u64>,
    }

    impl ScriptedDecoder {
        fn new(total: u64) -> Self {
            Self {
                total,
                position: 0,
                seeks: Vec::new(),
                broken: HashSet::new(),
                lost_at: None,
            }
        }
    }

    impl VideoDecoder for ScriptedDecoder {
        fn total_frame_count(&self) -> u64 {
            self.total
        }

        fn frames_per_second(&self) -> f64 {
            25.0
        }

        fn seek_to_frame(&mut self, position: u64) {
            self.position = position;
            self.seeks.push(position);
        }

        fn read_frame(&mut self) -> PipelineResult<DynamicImage> {
            if self.lost_at == Some(self.position) {
                return Err(PipelineError::SourceUnavailable {
                    path: "scripted.mp4".into(),
                    reason: "device removed".to_string(),
                });
            }
            if self.broken.contains(&self.position) || self.position >= self.total {
                return Err(PipelineError::FrameDecodeFailure {
                    position: self.position,
                    reason: "scripted".to_string(),
                });
            }
            let shade = (self.position % 256) as u8;
            Ok(DynamicImage::ImageRgb8(RgbImage::from_pixel(
                4,
                4,
                Rgb([shade, shade, shade]),
            )))
        }
    }

    fn file_names(dir: &Path) -> Vec<String> {
        let mut names: Vec<_> = std::fs::read_dir(dir)
            .unwrap()
            .map(|e| e.unwrap().file_name().to_string_lossy().to_string())
            .collect();
        names.sort();
        names
    }

    #[test]
    fn test_plan_even_spacing() {
        let plan = SamplingPlan::new(100, 10, 1).unwrap();
        assert_eq!(plan.frame_interval, 10);
        let positions: Vec<_> = plan.positions().map(|(_, p)| p).collect();
        assert_eq!(positions, [0, 10, 20, 30, 40, 50, 60, 70, 80, 90]);
    }

    #[test]
    fn test_plan_floors_interval_and_applies_skip() {
        let plan = SamplingPlan::new(105, 10, 2).unwrap();
        assert_eq!(plan.frame_interval, 10);
        assert_eq!(plan.position(3), 60);
    }

    #[test]
    fn test_plan_rejects_degenerate_interval() {
        let err = SamplingPlan::new(5, 10, 1).unwrap_err();
        assert!(matches!(err, PipelineError::Configuration(_)));
    }

    #[test]
    fn test_plan_rejects_zero_target_and_skip() {
        assert!(matches!(
            SamplingPlan::new(100, 0, 1),
            Err(PipelineError::Configuration(_))
        ));
        assert!(matches!(
            SamplingPlan::new(100, 10, 0),
            Err(PipelineError::Configuration(_))
        ));
    }

    #[test]
    fn test_frame_file_name_zero_padded() {
        assert_eq!(frame_file_name(0), "frame_0000.png");
        assert_eq!(frame_file_name(42), "frame_0042.png");
        assert_eq!(frame_file_name(12345), "frame_12345.png");
    }

    #[test]
    fn test_extract_writes_every_frame() {
        let temp_dir = TempDir::new().unwrap();
        let output_dir = temp_dir.path().join("frames");
        let mut decoder = ScriptedDecoder::new(100);

        let result = extract_frames(
            &mut decoder,
            &output_dir,
            &ExtractOptions {
                target_count: 10,
                skip: 1,
            },
        )
        .unwrap();

        assert_eq!(decoder.seeks, [0, 10, 20, 30, 40, 50, 60, 70, 80, 90]);
        assert_eq!(result.frames_written, 10);
        assert_eq!(result.frames_skipped, 0);
        let expected: Vec<_> = (0..10).map(frame_file_name).collect();
        assert_eq!(file_names(&output_dir), expected);
    }

    #[test]
    fn test_extract_leaves_gaps_for_failed_frames() {
        let temp_dir = TempDir::new().unwrap();
        let mut decoder = ScriptedDecoder::new(100);
        decoder.broken.insert(20);
        decoder.broken.insert(70);

        let result = extract_frames(
            &mut decoder,
            temp_dir.path(),
            &ExtractOptions {
                target_count: 10,
                skip: 1,
            },
        )
        .unwrap();

        assert_eq!(result.frames_written, 8);
        assert_eq!(result.frames_skipped, 2);
        let names = file_names(temp_dir.path());
        assert!(!names.contains(&"frame_0002.png".to_string()));
        assert!(!names.contains(&"frame_0007.png".to_string()));
        assert!(names.contains(&"frame_0009.png".to_string()));
    }

    #[test]
    fn test_extract_skip_past_end_is_skipped() {
        let temp_dir = TempDir::new().unwrap();
        let mut decoder = ScriptedDecoder::new(100);

        let result = extract_frames(
            &mut decoder,
            temp_dir.path(),
            &ExtractOptions {
                target_count: 10,
                skip: 2,
            },
        )
        .unwrap();

        // 位置 0,20,...,80 可解碼，100 以後超出結尾
        assert_eq!(result.frames_written, 5);
        assert_eq!(result.frames_skipped, 5);
        assert!(file_names(temp_dir.path()).len() <= 10);
    }

    #[test]
    fn test_extract_degenerate_request_writes_nothing() {
        let temp_dir = TempDir::new().unwrap();
        let output_dir = temp_dir.path().join("frames");
        let mut decoder = ScriptedDecoder::new(3);

        let err = extract_frames(
            &mut decoder,
            &output_dir,
            &ExtractOptions {
                target_count: 10,
                skip: 1,
            },
        )
        .unwrap_err();

        assert!(matches!(err, PipelineError::Configuration(_)));
        assert!(decoder.seeks.is_empty());
        assert!(!output_dir.exists());
    }

    #[test]
    fn test_fatal_error_reports_frames_already_written() {
        let temp_dir = TempDir::new().unwrap();
        let mut decoder = ScriptedDecoder::new(100);
        decoder.broken.insert(10);
        decoder.lost_at = Some(40);

        let err = extract_frames(
            &mut decoder,
            temp_dir.path(),
            &ExtractOptions {
                target_count: 10,
                skip: 1,
            },
        )
        .unwrap_err();

        // 位置 0,20,30 已寫出，10 被略過，40 中止
        assert_eq!(err.completed(), Some(Completed::FramesWritten(3)));
        assert!(matches!(
            err.root_cause(),
            PipelineError::SourceUnavailable { .. }
        ));
        assert_eq!(
            file_names(temp_dir.path()),
            ["frame_0000.png", "frame_0002.png", "frame_0003.png"]
        );
        assert_eq!(decoder.seeks.last(), Some(&40));
    }
}
