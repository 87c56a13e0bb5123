use crate::error::{PipelineError, PipelineResult};

/// 每格縮圖尺寸
pub const CELL_WIDTH: u32 = 160;
pub const CELL_HEIGHT: u32 = 90;

pub const GRID_COLS: usize = 10;
pub const GRID_ROWS: usize = 8;

/// 拼貼圖畫布尺寸
///
/// 寬度刻意從 1280 改為 1600：10 欄 160px 的縮圖需要 1600px，1280 只放得下 8 欄。
pub const SHEET_WIDTH: u32 = GRID_COLS as u32 * CELL_WIDTH;
pub const SHEET_HEIGHT: u32 = 720;

/// 一張拼貼圖最多可放的縮圖數：10 x 8 = 80
pub const MAX_FRAMES_PER_SHEET: usize = GRID_COLS * GRID_ROWS;
pub const DEFAULT_FRAMES_PER_SHEET: usize = 50;

/// 標籤相對於格子左上角的位置（基線）
pub const LABEL_OFFSET_X: u32 = 5;
pub const LABEL_OFFSET_Y: u32 = 20;

/// 單一縮圖在畫布上的位置
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellPlacement {
    /// 在整批排序後的位置（從 0 起算）
    pub global_index: usize,
    pub x: u32,
    pub y: u32,
}

impl CellPlacement {
    #[must_use]
    pub const fn label_origin(&self) -> (u32, u32) {
        (self.x + LABEL_OFFSET_X, self.y + LABEL_OFFSET_Y)
    }
}

pub fn validate_frames_per_sheet(frames_per_sheet: usize) -> PipelineResult<()> {
    if frames_per_sheet == 0 {
        return Err(PipelineError::configuration("每張拼貼圖的張數必須大於 0"));
    }
    if frames_per_sheet > MAX_FRAMES_PER_SHEET {
        return Err(PipelineError::configuration(format!(
            "每張拼貼圖最多 {MAX_FRAMES_PER_SHEET} 張，收到 {frames_per_sheet}"
        )));
    }
    Ok(())
}

/// 以列優先順序計算格子位置
#[must_use]
pub const fn cell_origin(local_index: usize) -> (u32, u32) {
    let row = local_index / GRID_COLS;
    let col = local_index % GRID_COLS;
    (col as u32 * CELL_WIDTH, row as u32 * CELL_HEIGHT)
}

/// 把 `total` 張圖依序切成多張拼貼圖，回傳每張圖的格子配置
pub fn plan_sheets(
    total: usize,
    frames_per_sheet: usize,
) -> PipelineResult<Vec<Vec<CellPlacement>>> {
    validate_frames_per_sheet(frames_per_sheet)?;

    let sheets = (0..total)
        .step_by(frames_per_sheet)
        .map(|start| {
            let end = (start + frames_per_sheet).min(total);
            (start..end)
                .map(|global_index| {
                    let (x, y) = cell_origin(global_index - start);
                    CellPlacement { global_index, x, y }
                })
                .collect()
        })
        .collect();

    Ok(sheets)
}

/// 格子標籤，例如 `Frame 51 - 160x90`
#[must_use]
pub fn frame_label(global_index: usize, width: u32, height: u32) -> String {
    format!("Frame {} - {width}x{height}", global_index + 1)
}

/// 拼貼圖檔名
#[must_use]
pub fn collage_file_name(index: usize) -> String {
    format!("collage_{index}.png")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grid_capacity() {
        assert_eq!(MAX_FRAMES_PER_SHEET, 80);
        assert_eq!(GRID_ROWS as u32 * CELL_HEIGHT, SHEET_HEIGHT);
        assert_eq!((SHEET_WIDTH, SHEET_HEIGHT), (1600, 720));
    }

    #[test]
    fn test_cell_origin_row_major() {
        assert_eq!(cell_origin(0), (0, 0));
        assert_eq!(cell_origin(9), (1440, 0));
        assert_eq!(cell_origin(10), (0, 90));
        assert_eq!(cell_origin(49), (1440, 360));
        assert_eq!(cell_origin(79), (1440, 630));
    }

    #[test]
    fn test_plan_sheets_chunk_sizes() {
        let sheets = plan_sheets(120, 50).unwrap();
        let sizes: Vec<_> = sheets.iter().map(Vec::len).collect();
        assert_eq!(sizes, [50, 50, 20]);

        let first_of_second = sheets[1][0];
        assert_eq!(first_of_second.global_index, 50);
        assert_eq!((first_of_second.x, first_of_second.y), (0, 0));
        assert_eq!(
            frame_label(first_of_second.global_index, CELL_WIDTH, CELL_HEIGHT),
            "Frame 51 - 160x90"
        );
    }

    #[test]
    fn test_plan_sheets_every_cell_inside_canvas() {
        for sheet in plan_sheets(200, MAX_FRAMES_PER_SHEET).unwrap() {
            for cell in sheet {
                assert!(cell.x + CELL_WIDTH <= SHEET_WIDTH);
                assert!(cell.y + CELL_HEIGHT <= SHEET_HEIGHT);
            }
        }
    }

    #[test]
    fn test_plan_sheets_empty() {
        assert!(plan_sheets(0, 50).unwrap().is_empty());
    }

    #[test]
    fn test_plan_sheets_rejects_over_capacity() {
        assert!(matches!(
            plan_sheets(10, 81),
            Err(PipelineError::Configuration(_))
        ));
        assert!(matches!(
            plan_sheets(10, 0),
            Err(PipelineError::Configuration(_))
        ));
        assert!(plan_sheets(10, 80).is_ok());
    }

    #[test]
    fn test_collage_file_name() {
        assert_eq!(collage_file_name(0), "collage_0.png");
        assert_eq!(collage_file_name(12), "collage_12.png");
    }
}
