use crate::component::{CollageComposer, FramePipeline, FrameSampler, SharpnessTriage};
use crate::config::Config;
use crate::pause;
use anyhow::Result;
use console::{Term, style};
use log::warn;
use std::sync::Arc;
use std::sync::atomic::AtomicBool;

fn report(result: Result<()>) {
    if let Err(e) = result {
        eprintln!("{} {:#}", style("錯誤:").red().bold(), e);
    }
}

/// 元件會把最近使用的路徑寫回 settings.json，重新載入以同步
fn refresh(config: &mut Config) {
    match Config::new() {
        Ok(fresh) => *config = fresh,
        Err(e) => warn!("無法重新載入設定: {e}"),
    }
}

pub fn run_frame_sampler(
    term: &Term,
    shutdown_signal: &Arc<AtomicBool>,
    config: &mut Config,
) -> Result<()> {
    let sampler = FrameSampler::new(config.clone(), Arc::clone(shutdown_signal));
    report(sampler.run());
    refresh(config);
    pause(term)
}

pub fn run_sharpness_triage(
    term: &Term,
    shutdown_signal: &Arc<AtomicBool>,
    config: &mut Config,
) -> Result<()> {
    let triage = SharpnessTriage::new(config.clone(), Arc::clone(shutdown_signal));
    report(triage.run());
    refresh(config);
    pause(term)
}

pub fn run_collage_composer(
    term: &Term,
    shutdown_signal: &Arc<AtomicBool>,
    config: &mut Config,
) -> Result<()> {
    let composer = CollageComposer::new(config.clone(), Arc::clone(shutdown_signal));
    report(composer.run());
    refresh(config);
    pause(term)
}

pub fn run_frame_pipeline(
    term: &Term,
    shutdown_signal: &Arc<AtomicBool>,
    config: &mut Config,
) -> Result<()> {
    let pipeline = FramePipeline::new(config.clone(), Arc::clone(shutdown_signal));
    report(pipeline.run());
    refresh(config);
    pause(term)
}
