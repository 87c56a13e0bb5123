//! 串接三個元件的完整流程
//!
//! 各元件之間只以資料夾路徑交接。

mod main;

pub use main::{FramePipeline, PipelineLayout};
