//! 清晰度篩選元件
//!
//! 對資料夾內的圖片計算 Laplacian 變異數，依固定或動態門檻
//! 把清晰的圖片移到目標資料夾，模糊的留在原處。

mod main;
mod sharpness;
mod triage;

pub use main::SharpnessTriage;
pub use sharpness::{LaplacianMeter, SharpnessMeter, calculate_sharpness, laplacian_variance};
pub use triage::{
    ScoredImage, ThresholdPolicy, TriageResult, triage_images, triage_images_with,
};
