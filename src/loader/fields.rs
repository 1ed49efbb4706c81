//! 採点フィールド設定
//!
//! `{教育機関: [フィールド名, ...]}` の先頭は識別フィールド（照合しない）、
//! 残りが採点対象フィールド。

use super::read_json;
use crate::error::{Result, ScorerError};
use std::collections::HashMap;
use std::path::Path;

/// 教育機関の採点フィールド
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScoringFields {
    /// 識別フィールド
    pub identifying: String,
    /// 採点対象フィールド（設定順）
    pub scorable: Vec<String>,
}

impl ScoringFields {
    /// 設定順のフィールド名リストから生成
    pub fn from_list(school: &str, fields: Vec<String>) -> Result<Self> {
        let mut fields = fields.into_iter();
        let identifying = fields.next().ok_or_else(|| {
            ScorerError::Config(format!("教育機関「{}」の採点フィールドが空です", school))
        })?;

        Ok(Self {
            identifying,
            scorable: fields.collect(),
        })
    }

    /// 識別フィールドを含む全フィールド（設定順）
    pub fn all(&self) -> impl Iterator<Item = &str> {
        std::iter::once(self.identifying.as_str()).chain(self.scorable.iter().map(String::as_str))
    }
}

pub fn load_scoring_fields(path: &Path, school: &str) -> Result<ScoringFields> {
    let mut mapping: HashMap<String, Vec<String>> = read_json(path)?;
    let fields = mapping
        .remove(school)
        .ok_or_else(|| ScorerError::UnknownSchool(school.to_string()))?;

    ScoringFields::from_list(school, fields)
}
