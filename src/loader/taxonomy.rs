//! タクソノミーパターンの読み込み
//!
//! 各項目は `pattern_id` と言語ごとの `pattern_<言語コード>` を持つ。
//! 受理言語のキーだけを読み、その他のメタデータは無視する。

use super::read_json;
use crate::error::{Result, ScorerError};
use course_scorer_common::{AcceptedLanguages, PatternId, TaxonomyEntry};
use serde::Deserialize;
use serde_json::{Map, Value};
use std::collections::HashSet;
use std::path::Path;

#[derive(Debug, Deserialize)]
struct RawTaxonomyEntry {
    pattern_id: PatternId,
    #[serde(flatten)]
    fields: Map<String, Value>,
}

impl RawTaxonomyEntry {
    fn pattern(&self, language: &str) -> Result<Option<String>> {
        let key = format!("pattern_{}", language);
        match self.fields.get(&key) {
            None | Some(Value::Null) => Ok(None),
            Some(Value::String(pattern)) => Ok(Some(pattern.clone())),
            Some(other) => Err(ScorerError::InvalidTaxonomy(format!(
                "id={} の {} が文字列ではありません: {}",
                self.pattern_id, key, other
            ))),
        }
    }
}

/// パターンを読み込み、受理言語ごとにコンパイルする
pub fn load_taxonomy(path: &Path, accepted: &AcceptedLanguages) -> Result<Vec<TaxonomyEntry>> {
    let raw: Vec<RawTaxonomyEntry> = read_json(path)?;
    let mut seen = HashSet::new();
    let mut entries = Vec::with_capacity(raw.len());

    for item in raw {
        if !seen.insert(item.pattern_id.clone()) {
            return Err(ScorerError::InvalidTaxonomy(format!(
                "pattern_id が重複しています: {}",
                item.pattern_id
            )));
        }

        let patterns = accepted
            .iter()
            .map(|lang| Ok((lang.to_string(), item.pattern(lang)?)))
            .collect::<Result<Vec<_>>>()?;

        entries.push(TaxonomyEntry::compile(item.pattern_id, patterns)?);
    }

    log::debug!("{}件のパターンをコンパイル: {}", entries.len(), path.display());
    Ok(entries)
}
