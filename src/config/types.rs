use crate::component::collage_composer::DEFAULT_FRAMES_PER_SHEET;
use crate::component::frame_sampler::ExtractOptions;
use crate::component::sharpness_triage::ThresholdPolicy;
use serde::{Deserialize, Serialize};

pub const MAX_RECENT_PATHS: usize = 5;

/// 影片擷取設定
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractSettings {
    pub target_count: u64,
    pub skip: u64,
}

impl Default for ExtractSettings {
    fn default() -> Self {
        let options = ExtractOptions::default();
        Self {
            target_count: options.target_count,
            skip: options.skip,
        }
    }
}

impl ExtractSettings {
    #[must_use]
    pub const fn options(&self) -> ExtractOptions {
        ExtractOptions {
            target_count: self.target_count,
            skip: self.skip,
        }
    }
}

/// 清晰度篩選設定
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TriageSettings {
    /// 固定門檻
    pub threshold: f64,
    /// 是否改用動態門檻
    pub dynamic: bool,
    /// 動態門檻時加在平均值上的偏移量
    pub sharp_if: f64,
}

impl Default for TriageSettings {
    fn default() -> Self {
        Self {
            threshold: 100.0,
            dynamic: false,
            sharp_if: 10.0,
        }
    }
}

impl TriageSettings {
    #[must_use]
    pub const fn policy(&self) -> ThresholdPolicy {
        if self.dynamic {
            ThresholdPolicy::Dynamic(self.sharp_if)
        } else {
            ThresholdPolicy::Static(self.threshold)
        }
    }
}

/// 拼貼圖設定
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CollageSettings {
    pub frames_per_sheet: usize,
}

impl Default for CollageSettings {
    fn default() -> Self {
        Self {
            frames_per_sheet: DEFAULT_FRAMES_PER_SHEET,
        }
    }
}

/// 儲存在 settings.json 的使用者設定
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UserSettings {
    pub extract: ExtractSettings,
    pub triage: TriageSettings,
    pub collage: CollageSettings,
    pub recent_paths: Vec<String>,
}

/// 由環境變數提供的預設路徑，只用來預填輸入提示
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PathDefaults {
    pub video_path: Option<String>,
    pub output_folder: Option<String>,
    pub source_folder: Option<String>,
    pub sharp_images_folder: Option<String>,
    pub frames_folder: Option<String>,
    pub collage_folder: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct Config {
    pub settings: UserSettings,
    pub path_defaults: PathDefaults,
}
