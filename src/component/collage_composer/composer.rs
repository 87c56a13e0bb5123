use super::layout::{
    CELL_HEIGHT, CELL_WIDTH, CellPlacement, SHEET_HEIGHT, SHEET_WIDTH, collage_file_name,
    frame_label, plan_sheets,
};
use crate::error::{Completed, PipelineError, PipelineResult};
use crate::tools::{
    draw_text, ensure_directory_exists, read_image, resize_exact, scan_image_files, write_image,
};
use image::{DynamicImage, Rgb, RgbImage, imageops};
use log::{debug, info};
use std::path::{Path, PathBuf};

const LABEL_COLOR: Rgb<u8> = Rgb([255, 255, 255]);

/// 拼貼結果
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComposeResult {
    pub sheets_written: usize,
    pub frames_used: usize,
}

/// 讀取資料夾內的圖片（依檔名排序），每 `frames_per_sheet` 張組成一張拼貼圖
///
/// 圖片清單在開始時取得一次，寫進同一資料夾的拼貼圖不會被當成輸入。
/// 中途失敗時以 `Incomplete` 回報已寫出的拼貼圖數量。
pub fn compose_collages(
    frames_dir: &Path,
    collage_dir: &Path,
    frames_per_sheet: usize,
) -> PipelineResult<ComposeResult> {
    let frames = scan_image_files(frames_dir)?;
    let sheets = plan_sheets(frames.len(), frames_per_sheet)?;

    ensure_directory_exists(collage_dir)?;

    info!(
        "開始產生拼貼圖: {} 張圖片, 每張 {frames_per_sheet} 格, 共 {} 張",
        frames.len(),
        sheets.len()
    );

    for (sheet_index, cells) in sheets.iter().enumerate() {
        let sheet_path = collage_dir.join(collage_file_name(sheet_index));
        render_sheet(&frames, cells)
            .and_then(|canvas| write_image(&sheet_path, &DynamicImage::ImageRgb8(canvas)))
            .map_err(|e| PipelineError::incomplete(Completed::SheetsWritten(sheet_index), e))?;
        debug!("寫出 {} ({} 格)", sheet_path.display(), cells.len());
    }

    info!("拼貼圖完成 - {} 張", sheets.len());

    Ok(ComposeResult {
        sheets_written: sheets.len(),
        frames_used: frames.len(),
    })
}

fn render_sheet(frames: &[PathBuf], cells: &[CellPlacement]) -> PipelineResult<RgbImage> {
    let mut canvas = RgbImage::new(SHEET_WIDTH, SHEET_HEIGHT);

    for cell in cells {
        let frame = read_image(&frames[cell.global_index])?;
        let thumbnail = resize_exact(&frame, CELL_WIDTH, CELL_HEIGHT);
        imageops::replace(&mut canvas, &thumbnail, i64::from(cell.x), i64::from(cell.y));

        let label = frame_label(cell.global_index, thumbnail.width(), thumbnail.height());
        let (label_x, label_y) = cell.label_origin();
        draw_text(&mut canvas, &label, label_x, label_y, LABEL_COLOR);
    }

    Ok(canvas)
}
