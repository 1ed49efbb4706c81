//! パターン正規化・コンパイル
//!
//! タクソノミー担当者が書いたパターンは単語区切りに半角スペースを使う。
//! 実データの改行・タブ・連続空白にも一致するよう厳密な正規表現へ書き換え、
//! `#` 区切りのサブパターン列（チェーン）としてコンパイルする。
//!
//! ## 書き換え規則（この順序で適用）
//! 1. `[- ]` → `[\-\s]`
//! 2. `[^ ]` → `[^\s]`
//! 3. 残りの半角スペース → `\s+`

use crate::error::{Error, Result};
use crate::types::PatternId;
use regex::{Regex, RegexBuilder};
use std::collections::BTreeMap;

/// サブパターン区切り文字
pub const SUB_PATTERN_DELIMITER: char = '#';

/// パターン文字列を正規化する
pub fn normalize_pattern(raw: &str) -> String {
    raw.replace("[- ]", r"[\-\s]")
        .replace("[^ ]", r"[^\s]")
        .replace(' ', r"\s+")
}

/// パターン未設定（None）はそのまま通す
pub fn normalize_optional(raw: Option<&str>) -> Option<String> {
    raw.map(normalize_pattern)
}

/// 1言語分のサブパターン列
///
/// 保存順に評価され、全サブパターンが一致して初めて「検出」となる。
#[derive(Debug, Clone, Default)]
pub struct PatternChain {
    sub_patterns: Vec<Regex>,
}

impl PatternChain {
    /// 正規化済みパターンを `#` で分割し、大文字小文字を区別せずコンパイル
    ///
    /// 空のセグメントはあらゆる位置に空一致するため除外する。
    pub fn compile(normalized: Option<&str>) -> std::result::Result<Self, regex::Error> {
        let Some(pattern) = normalized else {
            return Ok(Self::default());
        };

        let sub_patterns = pattern
            .split(SUB_PATTERN_DELIMITER)
            .filter(|segment| !segment.is_empty())
            .map(|segment| RegexBuilder::new(segment).case_insensitive(true).build())
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(Self { sub_patterns })
    }

    pub fn is_empty(&self) -> bool {
        self.sub_patterns.is_empty()
    }

    pub fn len(&self) -> usize {
        self.sub_patterns.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Regex> {
        self.sub_patterns.iter()
    }

    /// サブパターン文字列（正規化済み）
    pub fn sources(&self) -> Vec<&str> {
        self.sub_patterns.iter().map(Regex::as_str).collect()
    }
}

/// コンパイル済みタクソノミー項目
#[derive(Debug, Clone)]
pub struct TaxonomyEntry {
    pub id: PatternId,
    chains: BTreeMap<String, PatternChain>,
}

impl TaxonomyEntry {
    /// 言語ごとの生パターンを正規化・コンパイルする
    ///
    /// コンパイル失敗は項目IDと言語を添えて返す（実行全体を中断すべき致命的エラー）。
    pub fn compile<I, L>(id: PatternId, raw_patterns: I) -> Result<Self>
    where
        I: IntoIterator<Item = (L, Option<String>)>,
        L: Into<String>,
    {
        let mut chains = BTreeMap::new();

        for (language, raw) in raw_patterns {
            let language = language.into();
            let normalized = normalize_optional(raw.as_deref());
            let chain = PatternChain::compile(normalized.as_deref()).map_err(|source| {
                Error::Pattern {
                    entry: id.to_string(),
                    language: language.clone(),
                    source,
                }
            })?;
            chains.insert(language, chain);
        }

        Ok(Self { id, chains })
    }

    /// 指定言語のチェーン（パターン未設定の言語は空チェーン）
    pub fn chain(&self, language: &str) -> Option<&PatternChain> {
        self.chains.get(language)
    }

    /// 言語コードとチェーンの一覧（言語コード順）
    pub fn chains(&self) -> impl Iterator<Item = (&str, &PatternChain)> {
        self.chains.iter().map(|(lang, chain)| (lang.as_str(), chain))
    }
}
