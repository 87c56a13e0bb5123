use crate::error::{IoOperation, PipelineError, PipelineResult};
use log::debug;
use std::fs;
use std::path::{Path, PathBuf};

/// 將檔案移動到目標資料夾，保留原檔名
///
/// rename 失敗時（可能是跨檔案系統）改用複製後刪除。
pub fn move_file_into(source: &Path, target_dir: &Path) -> PipelineResult<PathBuf> {
    let file_name = source.file_name().ok_or_else(|| {
        PipelineError::io(
            IoOperation::MoveFile,
            source,
            std::io::Error::new(std::io::ErrorKind::InvalidInput, "缺少檔名"),
        )
    })?;
    let target_path = target_dir.join(file_name);

    if fs::rename(source, &target_path).is_err() {
        copy_and_delete(source, &target_path)?;
    }

    debug!("移動檔案: {} -> {}", source.display(), target_path.display());
    Ok(target_path)
}

fn copy_and_delete(source: &Path, target: &Path) -> PipelineResult<()> {
    fs::copy(source, target).map_err(|e| PipelineError::io(IoOperation::MoveFile, source, e))?;
    fs::remove_file(source).map_err(|e| PipelineError::io(IoOperation::MoveFile, source, e))?;
    Ok(())
}
