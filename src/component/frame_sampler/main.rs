use super::sampler::{ExtractOptions, ExtractionResult, extract_video};
use crate::component::prompts::{prompt_number, prompt_path, prompt_text, with_spinner};
use crate::config::Config;
use crate::config::save::{add_recent_path, save_settings};
use crate::tools::validate_file_exists;
use anyhow::{Context, Result};
use console::style;
use log::{info, warn};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

/// 影片抽幀元件
pub struct FrameSampler {
    config: Config,
    shutdown_signal: Arc<AtomicBool>,
}

impl FrameSampler {
    pub const fn new(config: Config, shutdown_signal: Arc<AtomicBool>) -> Self {
        Self {
            config,
            shutdown_signal,
        }
    }

    pub fn run(&self) -> Result<()> {
        println!("{}", style("=== 影片抽幀 ===").cyan().bold());

        let Some(video_path) = prompt_path(
            "請輸入影片路徑",
            self.config.path_defaults.video_path.as_deref(),
            &self.config.settings.recent_paths,
        )?
        else {
            return Ok(());
        };
        let video_path = PathBuf::from(&video_path);
        validate_file_exists(&video_path)?;

        let output_dir = PathBuf::from(prompt_text(
            "請輸入輸出資料夾路徑",
            self.config.path_defaults.output_folder.as_deref(),
        )?);

        let defaults = self.config.settings.extract.options();
        let options = ExtractOptions {
            target_count: prompt_number("要擷取的張數", defaults.target_count)?,
            skip: defaults.skip,
        };

        self.remember_path(&video_path);

        if self.shutdown_signal.load(Ordering::SeqCst) {
            warn!("收到中斷訊號，停止處理");
            return Ok(());
        }

        let result = self.execute(&video_path, &output_dir, &options)?;
        Self::print_summary(&result, &output_dir);

        Ok(())
    }

    /// 不經互動直接擷取，供完整流程使用
    pub fn execute(
        &self,
        video_path: &Path,
        output_dir: &Path,
        options: &ExtractOptions,
    ) -> Result<ExtractionResult> {
        with_spinner("擷取畫面中...", || {
            extract_video(video_path, output_dir, options)
        })
        .with_context(|| format!("擷取失敗: {}", video_path.display()))
    }

    fn remember_path(&self, video_path: &Path) {
        let mut settings = self.config.settings.clone();
        add_recent_path(&mut settings, &video_path.to_string_lossy());
        if let Err(e) = save_settings(&settings) {
            warn!("無法儲存路徑歷史: {e}");
        }
    }

    pub fn print_summary(result: &ExtractionResult, output_dir: &Path) {
        println!();
        println!("{}", style("=== 抽幀結果 ===").cyan().bold());
        println!("  取樣間隔: 每 {} 幀", result.frame_interval);
        println!(
            "  寫出: {} / {} 張",
            style(result.frames_written).green(),
            result.requested
        );

        if result.frames_skipped > 0 {
            println!("  解碼失敗略過: {} 張", style(result.frames_skipped).yellow());
        }

        println!("  輸出位置: {}", output_dir.display());

        info!(
            "抽幀完成 - 寫出: {}, 略過: {}",
            result.frames_written, result.frames_skipped
        );
    }
}
