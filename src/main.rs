use anyhow::Result;
use console::{Term, style};
use frame_triage::config::Config;
use frame_triage::init;
use frame_triage::menu::show_main_menu;
use frame_triage::signal::{is_shutdown_requested, setup_shutdown_signal};
use log::{info, warn};

fn main() -> Result<()> {
    init::init();
    let term = Term::stdout();
    let shutdown_signal = setup_shutdown_signal();

    let mut config = Config::new()?;

    loop {
        match show_main_menu(&term, &shutdown_signal, &mut config) {
            Ok(true) if is_shutdown_requested(&shutdown_signal) => {
                info!("收到中斷信號，結束程式");
                break;
            }
            Ok(true) => {}
            Ok(false) => {
                term.clear_screen()?;
                println!("\n{}", style("再見！").green().bold());
                info!("程式正常結束");
                break;
            }
            Err(e) => {
                warn!("程式錯誤: {e}");
                eprintln!("{} {}", style("錯誤:").red().bold(), e);
                break;
            }
        }
    }

    Ok(())
}
