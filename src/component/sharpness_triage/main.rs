use super::triage::{ThresholdPolicy, TriageResult, triage_images};
use crate::component::prompts::{prompt_path, prompt_text, with_spinner};
use crate::config::Config;
use crate::config::save::{add_recent_path, save_settings};
use crate::tools::validate_directory_exists;
use anyhow::{Context, Result};
use console::style;
use dialoguer::Confirm;
use log::{info, warn};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

/// 清晰度篩選元件
pub struct SharpnessTriage {
    config: Config,
    shutdown_signal: Arc<AtomicBool>,
}

impl SharpnessTriage {
    pub const fn new(config: Config, shutdown_signal: Arc<AtomicBool>) -> Self {
        Self {
            config,
            shutdown_signal,
        }
    }

    pub fn run(&self) -> Result<()> {
        println!("{}", style("=== 清晰度篩選 ===").cyan().bold());

        let Some(source) = prompt_path(
            "請輸入待篩選圖片資料夾",
            self.config.path_defaults.source_folder.as_deref(),
            &self.config.settings.recent_paths,
        )?
        else {
            return Ok(());
        };
        let source_dir = PathBuf::from(&source);
        validate_directory_exists(&source_dir)?;

        let target_dir = PathBuf::from(prompt_text(
            "請輸入清晰圖片的目標資料夾",
            self.config.path_defaults.sharp_images_folder.as_deref(),
        )?);

        let policy = self.config.settings.triage.policy();
        println!("  使用{policy}");

        let confirmed = Confirm::new()
            .with_prompt("清晰的圖片會被移動（不是複製），確定執行嗎？")
            .default(true)
            .interact()?;
        if !confirmed {
            println!("{}", style("操作已取消").yellow());
            return Ok(());
        }

        {
            let mut settings = self.config.settings.clone();
            add_recent_path(&mut settings, &source);
            if let Err(e) = save_settings(&settings) {
                warn!("無法儲存路徑歷史: {e}");
            }
        }

        if self.shutdown_signal.load(Ordering::SeqCst) {
            warn!("收到中斷訊號，停止處理");
            return Ok(());
        }

        let result = self.execute(&source_dir, &target_dir, policy)?;
        Self::print_summary(&result, &target_dir);

        Ok(())
    }

    /// 不經互動直接篩選，供完整流程使用
    pub fn execute(
        &self,
        source_dir: &Path,
        target_dir: &Path,
        policy: ThresholdPolicy,
    ) -> Result<TriageResult> {
        with_spinner("計算清晰度中...", || {
            triage_images(source_dir, target_dir, policy)
        })
        .with_context(|| format!("篩選失敗: {}", source_dir.display()))
    }

    pub fn print_summary(result: &TriageResult, target_dir: &Path) {
        println!();
        println!("{}", style("=== 篩選結果 ===").cyan().bold());
        println!("  門檻: {:.2}", result.threshold);
        println!(
            "  清晰（已移動）: {} 張",
            style(result.sharp).green()
        );
        println!("  模糊（保留）: {} 張", style(result.unsharp).yellow());
        println!("  目標資料夾: {}", target_dir.display());

        info!(
            "篩選完成 - 清晰: {}, 模糊: {}",
            result.sharp, result.unsharp
        );
    }
}
