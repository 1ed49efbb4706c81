//! 採点処理の型定義
//!
//! - AcceptedLanguages: 言語判定・パターン言語を絞り込む受理言語集合
//! - PatternId: タクソノミー項目のID（整数または文字列）
//! - Course / CourseField: 言語解決済みの講義レコード
//! - MatchRecord: 最終出力（1件のサブパターン一致）

use serde::{Deserialize, Serialize};
use std::fmt;

/// 既定の受理言語
pub const DEFAULT_ACCEPTED_LANGUAGES: &[&str] = &["en", "fr", "nl"];

/// 受理言語集合
///
/// 順序は優先順位として扱う（申告言語フォールバック時の並び順）。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AcceptedLanguages(Vec<String>);

impl AcceptedLanguages {
    /// 重複を除いて順序を保ったまま生成
    pub fn new<I, S>(codes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut languages: Vec<String> = Vec::new();
        for code in codes {
            let code: String = code.into();
            let code = code.trim().to_lowercase();
            if !code.is_empty() && !languages.contains(&code) {
                languages.push(code);
            }
        }
        Self(languages)
    }

    pub fn contains(&self, code: &str) -> bool {
        self.0.iter().any(|l| l == code)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Default for AcceptedLanguages {
    fn default() -> Self {
        Self::new(DEFAULT_ACCEPTED_LANGUAGES.iter().copied())
    }
}

/// タクソノミー項目のID
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PatternId {
    Int(i64),
    Text(String),
}

impl fmt::Display for PatternId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PatternId::Int(id) => f.pad(&id.to_string()),
            PatternId::Text(id) => f.pad(id),
        }
    }
}

impl From<i64> for PatternId {
    fn from(id: i64) -> Self {
        PatternId::Int(id)
    }
}

impl From<&str> for PatternId {
    fn from(id: &str) -> Self {
        PatternId::Text(id.to_string())
    }
}

/// 講義レコードの1フィールド
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CourseField {
    pub name: String,
    /// クリーニング済みテキスト（欠損時はNone）
    pub text: Option<String>,
    /// 照合に使う言語（先頭が主言語）。識別フィールドと評価不能フィールドはNone
    pub languages: Option<Vec<String>>,
}

/// 講義レコード
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Course {
    pub id: String,
    /// データソースが申告した言語
    pub declared_languages: Vec<String>,
    /// 設定順のフィールド（先頭は識別フィールド）
    pub fields: Vec<CourseField>,
}

impl Course {
    pub fn field(&self, name: &str) -> Option<&CourseField> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// 主言語（解決済み言語リストの先頭）
    pub fn primary_language(&self, name: &str) -> Option<&str> {
        self.field(name)?
            .languages
            .as_ref()?
            .first()
            .map(String::as_str)
    }
}

/// 照合結果レコード
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchRecord {
    /// 講義ID
    pub id: String,
    /// フィールド名
    pub field: String,
    /// タクソノミー項目ID
    pub pattern: PatternId,
    /// 一致したサブパターン（正規化済み）
    pub sub_pattern: String,
    /// 一致開始位置（文字単位）
    pub start: usize,
    /// 一致終了位置（文字単位、排他的）
    pub end: usize,
    /// 前後の抜粋
    pub extract: String,
}
