mod bitmap_font;
mod ffprobe_info;
mod file_mover;
mod image_codec;
mod image_scanner;
mod path_validator;

pub use bitmap_font::draw_text;
pub use ffprobe_info::{VideoInfo, get_video_info};
pub use file_mover::move_file_into;
pub use image_codec::{read_image, resize_exact, write_image};
pub use image_scanner::{IMAGE_EXTENSIONS, is_supported_image, scan_image_files};
pub use path_validator::{
    ensure_directory_exists, validate_directory_exists, validate_file_exists,
};
