use crate::component::collage_composer::MAX_FRAMES_PER_SHEET;
use crate::config::Config;
use crate::config::save::save_settings;
use crate::menu::handlers::{
    run_collage_composer, run_frame_pipeline, run_frame_sampler, run_sharpness_triage,
};
use anyhow::Result;
use console::{Term, style};
use dialoguer::theme::ColorfulTheme;
use dialoguer::{Input, Select};
use std::sync::Arc;
use std::sync::atomic::AtomicBool;

pub fn show_main_menu(
    term: &Term,
    shutdown_signal: &Arc<AtomicBool>,
    config: &mut Config,
) -> Result<bool> {
    term.clear_screen()?;

    println!("{}", style("=== 影片畫面篩選工具 ===").cyan().bold());
    println!("{}", style("(按 ESC 離開)").dim());

    let options = [
        "影片抽幀",
        "清晰度篩選",
        "產生拼貼圖",
        "完整流程（抽幀 → 篩選 → 拼貼）",
        "設定",
        "離開",
    ];

    let selection = Select::with_theme(&ColorfulTheme::default())
        .with_prompt("請選擇功能")
        .items(&options)
        .default(0)
        .interact_on_opt(term)?;

    match selection {
        Some(0) => {
            run_frame_sampler(term, shutdown_signal, config)?;
            Ok(true)
        }
        Some(1) => {
            run_sharpness_triage(term, shutdown_signal, config)?;
            Ok(true)
        }
        Some(2) => {
            run_collage_composer(term, shutdown_signal, config)?;
            Ok(true)
        }
        Some(3) => {
            run_frame_pipeline(term, shutdown_signal, config)?;
            Ok(true)
        }
        Some(4) => {
            show_settings_menu(term, config)?;
            Ok(true)
        }
        Some(5) | None => Ok(false),
        _ => unreachable!(),
    }
}

/// 設定選單
fn show_settings_menu(term: &Term, config: &mut Config) -> Result<()> {
    loop {
        term.clear_screen()?;

        println!("{}", style("=== 設定 ===").cyan().bold());
        println!("{}", style("(按 ESC 返回)").dim());

        let settings = &config.settings;
        let options = [
            format!(
                "抽幀: {} 張, skip {}",
                settings.extract.target_count, settings.extract.skip
            ),
            format!("篩選: {}", settings.triage.policy()),
            format!("拼貼: 每張 {} 格", settings.collage.frames_per_sheet),
            "返回".to_string(),
        ];

        let selection = Select::with_theme(&ColorfulTheme::default())
            .with_prompt("請選擇要修改的項目")
            .items(&options)
            .default(0)
            .interact_on_opt(term)?;

        match selection {
            Some(0) => edit_extract_settings(config)?,
            Some(1) => edit_triage_settings(term, config)?,
            Some(2) => edit_collage_settings(config)?,
            Some(3) | None => break,
            _ => unreachable!(),
        }
    }

    Ok(())
}

fn edit_extract_settings(config: &mut Config) -> Result<()> {
    let extract = &mut config.settings.extract;

    extract.target_count = Input::new()
        .with_prompt("要擷取的張數")
        .default(extract.target_count)
        .validate_with(|n: &u64| if *n > 0 { Ok(()) } else { Err("必須大於 0") })
        .interact_text()?;
    extract.skip = Input::new()
        .with_prompt("skip（取樣間隔倍數）")
        .default(extract.skip)
        .validate_with(|n: &u64| if *n > 0 { Ok(()) } else { Err("必須大於 0") })
        .interact_text()?;

    save_and_notify(config)
}

fn edit_triage_settings(term: &Term, config: &mut Config) -> Result<()> {
    let modes = ["固定門檻", "動態門檻（平均值 + 偏移）"];
    let triage = &mut config.settings.triage;

    let Some(mode) = Select::with_theme(&ColorfulTheme::default())
        .with_prompt("門檻模式")
        .items(&modes)
        .default(usize::from(triage.dynamic))
        .interact_on_opt(term)?
    else {
        return Ok(());
    };

    triage.dynamic = mode == 1;
    if triage.dynamic {
        triage.sharp_if = Input::new()
            .with_prompt("偏移量")
            .default(triage.sharp_if)
            .interact_text()?;
    } else {
        triage.threshold = Input::new()
            .with_prompt("門檻")
            .default(triage.threshold)
            .validate_with(|t: &f64| if *t >= 0.0 { Ok(()) } else { Err("不可為負數") })
            .interact_text()?;
    }

    save_and_notify(config)
}

fn edit_collage_settings(config: &mut Config) -> Result<()> {
    let collage = &mut config.settings.collage;

    collage.frames_per_sheet = Input::new()
        .with_prompt(format!("每張拼貼圖的格數（1-{MAX_FRAMES_PER_SHEET}）"))
        .default(collage.frames_per_sheet)
        .validate_with(|n: &usize| {
            if (1..=MAX_FRAMES_PER_SHEET).contains(n) {
                Ok(())
            } else {
                Err("超出網格容量")
            }
        })
        .interact_text()?;

    save_and_notify(config)
}

fn save_and_notify(config: &Config) -> Result<()> {
    save_settings(&config.settings)?;
    println!("\n{}", style("設定已儲存").green());
    std::thread::sleep(std::time::Duration::from_secs(1));
    Ok(())
}
