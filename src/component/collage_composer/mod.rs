//! 拼貼圖元件
//!
//! 依檔名排序讀取圖片，縮成 160x90 後以 10 欄網格排進固定尺寸的畫布，
//! 每格標註全域序號與縮圖尺寸，輸出為 `collage_N.png`。

mod composer;
mod layout;
mod main;

pub use composer::{ComposeResult, compose_collages};
pub use layout::{
    CELL_HEIGHT, CELL_WIDTH, CellPlacement, DEFAULT_FRAMES_PER_SHEET, GRID_COLS, GRID_ROWS,
    MAX_FRAMES_PER_SHEET, SHEET_HEIGHT, SHEET_WIDTH, collage_file_name, frame_label, plan_sheets,
};
pub use main::CollageComposer;
