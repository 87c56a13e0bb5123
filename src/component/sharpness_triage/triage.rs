use super::sharpness::{LaplacianMeter, SharpnessMeter};
use crate::error::{Completed, PipelineError, PipelineResult};
use crate::tools::{ensure_directory_exists, move_file_into, scan_image_files};
use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};

/// 清晰度門檻策略
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum ThresholdPolicy {
    /// 直接指定門檻
    Static(f64),
    /// 以整批圖片的平均分數加上偏移量作為門檻
    Dynamic(f64),
}

impl fmt::Display for ThresholdPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Static(threshold) => write!(f, "固定門檻 {threshold}"),
            Self::Dynamic(offset) => write!(f, "動態門檻（平均 {offset:+}）"),
        }
    }
}

impl ThresholdPolicy {
    /// 對整批分數解析出單一門檻值
    pub fn resolve(&self, scores: &[f64]) -> PipelineResult<f64> {
        match *self {
            Self::Static(threshold) => Ok(threshold),
            Self::Dynamic(offset) => {
                if scores.is_empty() {
                    return Err(PipelineError::configuration(
                        "沒有可計算平均的圖片，無法使用動態門檻",
                    ));
                }
                let mean = scores.iter().sum::<f64>() / scores.len() as f64;
                Ok(mean + offset)
            }
        }
    }
}

/// 已計算分數的圖片
#[derive(Debug, Clone, PartialEq)]
pub struct ScoredImage {
    pub path: PathBuf,
    pub score: f64,
}

impl ScoredImage {
    /// 分數等於門檻也算清晰
    #[must_use]
    pub fn is_sharp(&self, threshold: f64) -> bool {
        self.score >= threshold
    }
}

/// 篩選結果
#[derive(Debug, Clone, PartialEq)]
pub struct TriageResult {
    pub sharp: usize,
    pub unsharp: usize,
    /// 實際使用的門檻；沒有圖片且為固定門檻時仍會回報
    pub threshold: f64,
}

/// 以 Laplacian 變異數篩選清晰圖片並移到目標資料夾
pub fn triage_images(
    source_dir: &Path,
    target_dir: &Path,
    policy: ThresholdPolicy,
) -> PipelineResult<TriageResult> {
    triage_images_with(&LaplacianMeter, source_dir, target_dir, policy)
}

/// 先對快照中每張圖片評分一次，再以同一組分數解析門檻與分類
///
/// 評分全部完成後才開始移動；移動途中失敗不會還原已移動的檔案，
/// 錯誤會以 `Incomplete` 附上已移動的數量。
pub fn triage_images_with<M: SharpnessMeter + ?Sized>(
    meter: &M,
    source_dir: &Path,
    target_dir: &Path,
    policy: ThresholdPolicy,
) -> PipelineResult<TriageResult> {
    let images = scan_image_files(source_dir)?;
    info!(
        "開始篩選 {}: {} 張圖片, {policy}",
        source_dir.display(),
        images.len()
    );

    let scored = score_images(meter, images)?;
    let scores: Vec<f64> = scored.iter().map(|image| image.score).collect();
    let threshold = policy.resolve(&scores)?;

    let (sharp, unsharp): (Vec<_>, Vec<_>) =
        scored.into_iter().partition(|image| image.is_sharp(threshold));

    ensure_directory_exists(target_dir)?;
    for (moved, image) in sharp.iter().enumerate() {
        move_file_into(&image.path, target_dir)
            .map_err(|e| PipelineError::incomplete(Completed::FilesMoved(moved), e))?;
    }

    info!(
        "篩選完成 - 門檻: {threshold:.2}, 清晰: {}, 模糊: {}",
        sharp.len(),
        unsharp.len()
    );

    Ok(TriageResult {
        sharp: sharp.len(),
        unsharp: unsharp.len(),
        threshold,
    })
}

fn score_images<M: SharpnessMeter + ?Sized>(
    meter: &M,
    images: Vec<PathBuf>,
) -> PipelineResult<Vec<ScoredImage>> {
    images
        .into_iter()
        .map(|path| {
            let score = meter.score(&path)?;
            debug!("{}: {score:.2}", path.display());
            Ok(ScoredImage { path, score })
        })
        .collect()
}
