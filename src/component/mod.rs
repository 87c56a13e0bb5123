//! 功能元件模組
//!
//! 每個子模組實現一個獨立的功能，包含主要邏輯和專用工具

pub mod collage_composer;
pub mod frame_pipeline;
pub mod frame_sampler;
mod prompts;
pub mod sharpness_triage;

pub use collage_composer::CollageComposer;
pub use frame_pipeline::FramePipeline;
pub use frame_sampler::FrameSampler;
pub use sharpness_triage::SharpnessTriage;
