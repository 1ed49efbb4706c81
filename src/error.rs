use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ScorerError {
    #[error("設定エラー: {0}")]
    Config(String),

    #[error("ファイルが見つかりません: {0}")]
    FileNotFound(String),

    #[error("採点フィールド設定に教育機関がありません: {0}")]
    UnknownSchool(String),

    #[error("採点フィールド「{field}」が講義データに存在しません: {path}")]
    UnknownField { field: String, path: String },

    #[error("JSON解析エラー ({path}): {source}")]
    InvalidJson {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("講義データが不正: {0}")]
    InvalidCatalog(String),

    #[error("パターンファイルが不正: {0}")]
    InvalidTaxonomy(String),

    #[error("JSON解析エラー: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("IOエラー: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Common(#[from] course_scorer_common::Error),
}

impl ScorerError {
    pub fn invalid_json(path: &Path, source: serde_json::Error) -> Self {
        ScorerError::InvalidJson {
            path: path.display().to_string(),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, ScorerError>;
