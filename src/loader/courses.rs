//! 講義データの読み込み
//!
//! 1. 文字化け・特殊空白のクリーニング（全フィールド）
//! 2. 採点対象フィールドごとに照合言語を解決（識別フィールドは対象外）
//!
//! 言語は読み込み時に一度だけ解決し、照合中に再計算しない。

use super::read_json;
use super::fields::ScoringFields;
use crate::error::{Result, ScorerError};
use course_scorer_common::{resolve_languages, AcceptedLanguages, Course, CourseField, LanguageDetector};
use serde_json::{Map, Value};
use std::path::Path;

/// クリーニング対象の文字列と置換先
const CHARACTER_FIXES: &[(&str, &str)] = &[
    ("\u{a0}", " "),  // NO-BREAK SPACE
    ("â€™", "'"),     // UTF-8の ’ をCP1252で読んだ文字化け
];

/// 講義テキストをクリーニングする
pub fn clean_text(text: &str) -> String {
    CHARACTER_FIXES
        .iter()
        .fold(text.to_string(), |acc, (from, to)| acc.replace(from, to))
}

/// 講義データを読み込み、採点対象フィールドの言語を解決する
pub fn load_courses(
    path: &Path,
    fields: &ScoringFields,
    accepted: &AcceptedLanguages,
    detector: &dyn LanguageDetector,
) -> Result<Vec<Course>> {
    let records: Vec<Map<String, Value>> = read_json(path)?;

    // どのレコードにも無いフィールドは設定ミス
    if !records.is_empty() {
        for field in fields.all() {
            if !records.iter().any(|r| r.contains_key(field)) {
                return Err(ScorerError::UnknownField {
                    field: field.to_string(),
                    path: path.display().to_string(),
                });
            }
        }
    }

    let courses = records
        .iter()
        .enumerate()
        .map(|(index, record)| build_course(index, record, fields, accepted, detector))
        .collect::<Result<Vec<_>>>()?;

    log::debug!("{}件の講義を読み込み: {}", courses.len(), path.display());
    Ok(courses)
}

fn build_course(
    index: usize,
    record: &Map<String, Value>,
    fields: &ScoringFields,
    accepted: &AcceptedLanguages,
    detector: &dyn LanguageDetector,
) -> Result<Course> {
    let id = match record.get("id") {
        Some(Value::String(id)) => id.clone(),
        Some(Value::Number(id)) => id.to_string(),
        _ => {
            return Err(ScorerError::InvalidCatalog(format!(
                "{}件目のレコードに id がありません",
                index + 1
            )))
        }
    };

    let declared_languages = match record.get("languages") {
        None | Some(Value::Null) => Vec::new(),
        Some(Value::String(lang)) => vec![lang.clone()],
        Some(Value::Array(langs)) => langs
            .iter()
            .filter_map(|l| l.as_str().map(str::to_string))
            .collect(),
        Some(other) => {
            return Err(ScorerError::InvalidCatalog(format!(
                "講義 {} の languages が不正: {}",
                id, other
            )))
        }
    };

    let fields = fields
        .all()
        .enumerate()
        .map(|(position, name)| {
            let text = field_text(record.get(name)).map(|t| clean_text(&t));
            let languages = if position == 0 {
                None
            } else {
                resolve_languages(text.as_deref(), &declared_languages, accepted, detector)
            };
            log::trace!("{} / {}: {:?}", id, name, languages);

            CourseField {
                name: name.to_string(),
                text,
                languages,
            }
        })
        .collect();

    Ok(Course {
        id,
        declared_languages,
        fields,
    })
}

/// フィールド値を文字列として取り出す（null・配列・オブジェクトは欠損扱い）
fn field_text(value: Option<&Value>) -> Option<String> {
    match value? {
        Value::String(text) => Some(text.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}
