use crate::error::{PipelineError, PipelineResult};
use crate::tools::{VideoInfo, get_video_info};
use image::{DynamicImage, ImageFormat};
use log::debug;
use std::path::{Path, PathBuf};
use std::process::Command;

/// 兩段式 seek 的前置緩衝時間（秒）
const SEEK_MARGIN: f64 = 2.0;

/// 可定位到指定幀並解碼的影片來源
///
/// 解碼資源在值被 drop 時釋放。
pub trait VideoDecoder {
    fn total_frame_count(&self) -> u64;

    fn frames_per_second(&self) -> f64;

    /// 設定下一次 `read_frame` 要讀取的幀位置
    fn seek_to_frame(&mut self, position: u64);

    /// 解碼目前位置的幀，失敗時回傳 `FrameDecodeFailure`
    fn read_frame(&mut self) -> PipelineResult<DynamicImage>;
}

/// 以 ffprobe 取得影片資訊、以 ffmpeg 逐幀擷取的解碼器
pub struct FfmpegDecoder {
    video_path: PathBuf,
    info: VideoInfo,
    position: u64,
}

impl FfmpegDecoder {
    /// 開啟影片，無法讀取資訊時回傳 `SourceUnavailable`
    pub fn open(video_path: &Path) -> PipelineResult<Self> {
        let info = get_video_info(video_path)?;

        debug!(
            "開啟影片 {}: {} 幀, {:.3} fps, {}x{}",
            video_path.display(),
            info.total_frame_count,
            info.frames_per_second,
            info.width,
            info.height
        );

        Ok(Self {
            video_path: video_path.to_path_buf(),
            info,
            position: 0,
        })
    }

    fn position_to_seconds(&self) -> f64 {
        self.position as f64 / self.info.frames_per_second
    }

    fn decode_failure(&self, reason: impl Into<String>) -> PipelineError {
        PipelineError::FrameDecodeFailure {
            position: self.position,
            reason: reason.into(),
        }
    }
}

/// 兩段式 seek：`-i` 前快速跳到關鍵幀，`-i` 後精準解碼到目標時間
fn build_seek_args(video_path: &Path, timestamp: f64) -> Vec<String> {
    let t0 = (timestamp - SEEK_MARGIN).max(0.0);
    let delta = timestamp - t0;

    let mut args = vec![
        "-hide_banner".to_string(),
        "-nostdin".to_string(),
        "-loglevel".to_string(),
        "error".to_string(),
    ];

    if t0 > 0.0 {
        args.push("-ss".to_string());
        args.push(format!("{t0:.6}"));
    }

    args.push("-i".to_string());
    args.push(video_path.to_string_lossy().to_string());

    if delta > 0.0 {
        args.push("-ss".to_string());
        args.push(format!("{delta:.6}"));
    }

    args.extend(
        [
            "-frames:v",
            "1",
            "-an",
            "-sn",
            "-dn",
            "-f",
            "image2pipe",
            "-c:v",
            "png",
            "-",
        ]
        .map(String::from),
    );

    args
}

impl VideoDecoder for FfmpegDecoder {
    fn total_frame_count(&self) -> u64 {
        self.info.total_frame_count
    }

    fn frames_per_second(&self) -> f64 {
        self.info.frames_per_second
    }

    fn seek_to_frame(&mut self, position: u64) {
        self.position = position;
    }

    fn read_frame(&mut self) -> PipelineResult<DynamicImage> {
        let args = build_seek_args(&self.video_path, self.position_to_seconds());

        let output = Command::new("ffmpeg")
            .args(&args)
            .output()
            .map_err(|e| self.decode_failure(format!("無法執行 ffmpeg: {e}")))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(self.decode_failure(stderr.trim().to_string()));
        }

        // 超出影片結尾時 ffmpeg 正常結束但沒有輸出
        if output.stdout.is_empty() {
            return Err(self.decode_failure("沒有可解碼的畫面"));
        }

        image::load_from_memory_with_format(&output.stdout, ImageFormat::Png)
            .map_err(|e| self.decode_failure(e.to_string()))
    }
}
