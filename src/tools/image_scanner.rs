use crate::error::{IoOperation, PipelineError, PipelineResult};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// 可處理的圖片副檔名（不分大小寫）
pub const IMAGE_EXTENSIONS: [&str; 3] = ["jpg", "jpeg", "png"];

#[must_use]
pub fn is_supported_image(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| {
            IMAGE_EXTENSIONS
                .iter()
                .any(|supported| ext.eq_ignore_ascii_case(supported))
        })
}

/// 掃描資料夾第一層的圖片，依檔名排序
///
/// 回傳值是呼叫當下的快照，之後寫入同一資料夾的檔案不會出現在結果中。
pub fn scan_image_files(directory: &Path) -> PipelineResult<Vec<PathBuf>> {
    let mut images = Vec::new();

    for entry in WalkDir::new(directory)
        .min_depth(1)
        .max_depth(1)
        .follow_links(false)
        .sort_by_file_name()
    {
        let entry = entry.map_err(|e| {
            PipelineError::io(IoOperation::ListDirectory, directory, std::io::Error::from(e))
        })?;

        // 指向檔案的符號連結也算圖片；斷掉的連結略過
        if entry.path().is_file() && is_supported_image(entry.path()) {
            images.push(entry.into_path());
        }
    }

    Ok(images)
}
