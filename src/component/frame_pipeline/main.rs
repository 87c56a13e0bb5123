use crate::component::collage_composer::CollageComposer;
use crate::component::frame_sampler::FrameSampler;
use crate::component::prompts::{prompt_path, prompt_text};
use crate::component::sharpness_triage::SharpnessTriage;
use crate::config::Config;
use crate::tools::validate_file_exists;
use anyhow::Result;
use console::style;
use dialoguer::Confirm;
use log::{info, warn};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

/// 工作資料夾下各階段的子資料夾
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelineLayout {
    pub frames_dir: PathBuf,
    pub sharp_dir: PathBuf,
    pub collage_dir: PathBuf,
}

impl PipelineLayout {
    #[must_use]
    pub fn new(work_dir: &Path) -> Self {
        Self {
            frames_dir: work_dir.join("frames"),
            sharp_dir: work_dir.join("sharp"),
            collage_dir: work_dir.join("collages"),
        }
    }

    /// 拼貼圖的來源：有篩選時只拼清晰的圖片
    #[must_use]
    pub fn collage_source(&self, with_triage: bool) -> &Path {
        if with_triage {
            &self.sharp_dir
        } else {
            &self.frames_dir
        }
    }
}

/// 抽幀 → 篩選 → 拼貼 的完整流程
///
/// 各階段之間檢查中斷訊號；階段內的處理不可中斷。
pub struct FramePipeline {
    config: Config,
    shutdown_signal: Arc<AtomicBool>,
}

impl FramePipeline {
    pub const fn new(config: Config, shutdown_signal: Arc<AtomicBool>) -> Self {
        Self {
            config,
            shutdown_signal,
        }
    }

    pub fn run(&self) -> Result<()> {
        println!("{}", style("=== 完整流程 ===").cyan().bold());

        let Some(video) = prompt_path(
            "請輸入影片路徑",
            self.config.path_defaults.video_path.as_deref(),
            &self.config.settings.recent_paths,
        )?
        else {
            return Ok(());
        };
        let video_path = PathBuf::from(video);
        validate_file_exists(&video_path)?;

        let work_dir = PathBuf::from(prompt_text(
            "請輸入工作資料夾",
            self.config.path_defaults.output_folder.as_deref(),
        )?);
        let layout = PipelineLayout::new(&work_dir);

        let with_triage = Confirm::new()
            .with_prompt(format!(
                "是否先篩選清晰圖片（{}）？",
                self.config.settings.triage.policy()
            ))
            .default(true)
            .interact()?;

        let sampler = FrameSampler::new(self.config.clone(), Arc::clone(&self.shutdown_signal));
        let extraction = sampler.execute(
            &video_path,
            &layout.frames_dir,
            &self.config.settings.extract.options(),
        )?;
        FrameSampler::print_summary(&extraction, &layout.frames_dir);

        if with_triage {
            if self.interrupted() {
                return Ok(());
            }
            let triage = SharpnessTriage::new(self.config.clone(), Arc::clone(&self.shutdown_signal));
            let result = triage.execute(
                &layout.frames_dir,
                &layout.sharp_dir,
                self.config.settings.triage.policy(),
            )?;
            SharpnessTriage::print_summary(&result, &layout.sharp_dir);
        }

        if self.interrupted() {
            return Ok(());
        }
        let composer = CollageComposer::new(self.config.clone(), Arc::clone(&self.shutdown_signal));
        let result = composer.execute(layout.collage_source(with_triage), &layout.collage_dir)?;
        CollageComposer::print_summary(&result, &layout.collage_dir);

        info!("完整流程結束: {}", work_dir.display());
        Ok(())
    }

    fn interrupted(&self) -> bool {
        let interrupted = self.shutdown_signal.load(Ordering::SeqCst);
        if interrupted {
            warn!("收到中斷訊號，停止後續階段");
            println!("{}", style("已中斷，後續階段未執行").yellow());
        }
        interrupted
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layout_subdirectories() {
        let layout = PipelineLayout::new(Path::new("/work"));
        assert_eq!(layout.frames_dir, PathBuf::from("/work/frames"));
        assert_eq!(layout.sharp_dir, PathBuf::from("/work/sharp"));
        assert_eq!(layout.collage_dir, PathBuf::from("/work/collages"));
    }

    #[test]
    fn test_collage_source_follows_triage_choice() {
        let layout = PipelineLayout::new(Path::new("/work"));
        assert_eq!(layout.collage_source(true), Path::new("/work/sharp"));
        assert_eq!(layout.collage_source(false), Path::new("/work/frames"));
    }
}
