//! 影片取樣元件
//!
//! 依目標張數換算取樣間隔，逐一定位並擷取畫面為 `frame_XXXX.png`。

mod main;
mod sampler;
mod video_decoder;

pub use main::FrameSampler;
pub use sampler::{
    ExtractOptions, ExtractionResult, SamplingPlan, extract_frames, extract_video,
    frame_file_name,
};
pub use video_decoder::{FfmpegDecoder, VideoDecoder};
