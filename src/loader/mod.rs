//! 入力データの読み込み
//!
//! - fields: 教育機関ごとの採点フィールド設定
//! - courses: 講義データ（文字クリーニング + 言語解決）
//! - taxonomy: タクソノミーパターン（正規化 + コンパイル）
//!
//! 入力の欠損・構造不正はいずれも致命的エラーとして呼び出し元へ返す。

pub mod fields;
pub mod courses;
pub mod taxonomy;

pub use fields::{load_scoring_fields, ScoringFields};
pub use courses::{clean_text, load_courses};
pub use taxonomy::load_taxonomy;

use crate::error::{Result, ScorerError};
use serde::de::DeserializeOwned;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

/// JSONファイルを読み込む（エラーにはファイルパスを含める）
pub(crate) fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    if !path.exists() {
        return Err(ScorerError::FileNotFound(path.display().to_string()));
    }

    let file = File::open(path)?;
    let reader = BufReader::new(file);
    serde_json::from_reader(reader).map_err(|e| ScorerError::invalid_json(path, e))
}
