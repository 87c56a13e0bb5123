//! 核心流程的錯誤分類
//!
//! 擷取、篩選與拼貼三個元件只會回傳這些錯誤，
//! 呼叫端可以據此區分可恢復（單幀解碼失敗）與致命錯誤。
//! 已有結果寫到磁碟後才失敗時，錯誤會包在 `Incomplete` 裡並附上完成數量。

use std::fmt;
use std::path::{Path, PathBuf};
use thiserror::Error;

pub type PipelineResult<T> = std::result::Result<T, PipelineError>;

#[derive(Debug, Error)]
pub enum PipelineError {
    /// 影片無法開啟
    #[error("無法開啟影片來源 {}: {reason}", path.display())]
    SourceUnavailable { path: PathBuf, reason: String },

    /// 單一幀解碼失敗（擷取流程會略過該索引）
    #[error("第 {position} 幀解碼失敗: {reason}")]
    FrameDecodeFailure { position: u64, reason: String },

    /// 圖片讀寫或檔案移動失敗
    #[error("{operation}失敗 {}: {source}", path.display())]
    IoFailure {
        operation: IoOperation,
        path: PathBuf,
        #[source]
        source: IoCause,
    },

    /// 參數不合法
    #[error("設定錯誤: {0}")]
    Configuration(String),

    /// 部分輸出已完成後才發生的致命錯誤
    #[error("中途失敗，{completed}")]
    Incomplete {
        completed: Completed,
        #[source]
        source: Box<PipelineError>,
    },
}

/// 失敗前已完成的工作量
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Completed {
    FramesWritten(u64),
    FilesMoved(usize),
    SheetsWritten(usize),
}

impl fmt::Display for Completed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::FramesWritten(n) => write!(f, "已寫出 {n} 幀"),
            Self::FilesMoved(n) => write!(f, "已移動 {n} 個檔案"),
            Self::SheetsWritten(n) => write!(f, "已寫出 {n} 張拼貼圖"),
        }
    }
}

/// 發生 I/O 錯誤時正在進行的動作
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IoOperation {
    ListDirectory,
    CreateDirectory,
    ReadImage,
    WriteImage,
    MoveFile,
}

impl fmt::Display for IoOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::ListDirectory => "讀取資料夾",
            Self::CreateDirectory => "建立資料夾",
            Self::ReadImage => "讀取圖片",
            Self::WriteImage => "寫入圖片",
            Self::MoveFile => "移動檔案",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Error)]
pub enum IoCause {
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Image(#[from] image::ImageError),
}

impl PipelineError {
    pub fn io(operation: IoOperation, path: &Path, source: impl Into<IoCause>) -> Self {
        Self::IoFailure {
            operation,
            path: path.to_path_buf(),
            source: source.into(),
        }
    }

    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration(message.into())
    }

    pub fn incomplete(completed: Completed, error: Self) -> Self {
        Self::Incomplete {
            completed,
            source: Box::new(error),
        }
    }

    /// 失敗前已完成的數量；在產生任何輸出前就失敗時為 `None`
    #[must_use]
    pub const fn completed(&self) -> Option<Completed> {
        match self {
            Self::Incomplete { completed, .. } => Some(*completed),
            _ => None,
        }
    }

    /// 去掉 `Incomplete` 包裝後的實際錯誤
    #[must_use]
    pub fn root_cause(&self) -> &Self {
        match self {
            Self::Incomplete { source, .. } => source.root_cause(),
            other => other,
        }
    }

    /// 是否為可略過、不需中止整個流程的錯誤
    #[must_use]
    pub const fn is_recoverable(&self) -> bool {
        matches!(self, Self::FrameDecodeFailure { .. })
    }
}
