use super::composer::{ComposeResult, compose_collages};
use crate::component::prompts::{prompt_path, prompt_text, with_spinner};
use crate::config::Config;
use crate::config::save::{add_recent_path, save_settings};
use crate::tools::validate_directory_exists;
use anyhow::{Context, Result};
use console::style;
use log::{info, warn};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

/// 拼貼圖產生元件
pub struct CollageComposer {
    config: Config,
    shutdown_signal: Arc<AtomicBool>,
}

impl CollageComposer {
    pub const fn new(config: Config, shutdown_signal: Arc<AtomicBool>) -> Self {
        Self {
            config,
            shutdown_signal,
        }
    }

    pub fn run(&self) -> Result<()> {
        println!("{}", style("=== 產生拼貼圖 ===").cyan().bold());

        let Some(frames) = prompt_path(
            "請輸入圖片資料夾",
            self.config.path_defaults.frames_folder.as_deref(),
            &self.config.settings.recent_paths,
        )?
        else {
            return Ok(());
        };
        let frames_dir = PathBuf::from(&frames);
        validate_directory_exists(&frames_dir)?;

        let collage_dir = PathBuf::from(prompt_text(
            "請輸入拼貼圖輸出資料夾",
            self.config.path_defaults.collage_folder.as_deref(),
        )?);

        {
            let mut settings = self.config.settings.clone();
            add_recent_path(&mut settings, &frames);
            if let Err(e) = save_settings(&settings) {
                warn!("無法儲存路徑歷史: {e}");
            }
        }

        if self.shutdown_signal.load(Ordering::SeqCst) {
            warn!("收到中斷訊號，停止處理");
            return Ok(());
        }

        let result = self.execute(&frames_dir, &collage_dir)?;
        Self::print_summary(&result, &collage_dir);

        Ok(())
    }

    /// 不經互動直接產生，供完整流程使用
    pub fn execute(&self, frames_dir: &Path, collage_dir: &Path) -> Result<ComposeResult> {
        let frames_per_sheet = self.config.settings.collage.frames_per_sheet;
        with_spinner("產生拼貼圖中...", || {
            compose_collages(frames_dir, collage_dir, frames_per_sheet)
        })
        .with_context(|| format!("拼貼圖產生失敗: {}", frames_dir.display()))
    }

    pub fn print_summary(result: &ComposeResult, collage_dir: &Path) {
        println!();
        println!("{}", style("=== 拼貼圖結果 ===").cyan().bold());
        println!("  使用圖片: {} 張", result.frames_used);
        println!("  產生拼貼圖: {} 張", style(result.sheets_written).green());
        println!("  輸出位置: {}", collage_dir.display());

        info!(
            "拼貼圖完成 - 圖片: {}, 拼貼圖: {}",
            result.frames_used, result.sheets_written
        );
    }
}
