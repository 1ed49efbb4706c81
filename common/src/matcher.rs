//! チェーン照合エンジン
//!
//! (講義, タクソノミー項目, フィールド) の組ごとに、主言語のサブパターン列を
//! 保存順に評価する。
//!
//! ## 照合規則
//! 1. 各サブパターンについて全ての非重複一致を探す
//! 2. 一致が0件のサブパターンがあれば即中断し、その組は0件（途中までの一致も捨てる）
//! 3. 全サブパターンが1件以上一致した場合のみ、蓄積したレコードを確定する

use crate::pattern::TaxonomyEntry;
use crate::types::{Course, MatchRecord};

/// 抜粋の前後文字数
pub const EXCERPT_RADIUS: usize = 20;

/// 抜粋範囲の設定
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExcerptWindow {
    /// 一致範囲の前後に含める文字数
    pub radius: usize,
    /// 上端をテキスト末尾の1文字手前で打ち切る（既存出力との互換用）
    pub exclude_final_char: bool,
}

impl Default for ExcerptWindow {
    fn default() -> Self {
        Self {
            radius: EXCERPT_RADIUS,
            exclude_final_char: true,
        }
    }
}

/// バイト位置と文字位置の対応表
struct CharOffsets {
    /// 各文字の先頭バイト位置
    starts: Vec<usize>,
    byte_len: usize,
}

impl CharOffsets {
    fn new(text: &str) -> Self {
        Self {
            starts: text.char_indices().map(|(i, _)| i).collect(),
            byte_len: text.len(),
        }
    }

    fn char_len(&self) -> usize {
        self.starts.len()
    }

    fn to_char(&self, byte: usize) -> usize {
        match self.starts.binary_search(&byte) {
            Ok(i) | Err(i) => i,
        }
    }

    fn to_byte(&self, ch: usize) -> usize {
        self.starts.get(ch).copied().unwrap_or(self.byte_len)
    }
}

impl ExcerptWindow {
    /// 文字位置 `[start, end)` の前後を切り出す
    pub fn extract(&self, text: &str, start: usize, end: usize) -> String {
        self.extract_with(text, &CharOffsets::new(text), start, end)
    }

    fn extract_with(&self, text: &str, offsets: &CharOffsets, start: usize, end: usize) -> String {
        let len = offsets.char_len();
        let upper = if self.exclude_final_char {
            len.saturating_sub(1)
        } else {
            len
        };

        let lo = start.saturating_sub(self.radius);
        let hi = end.saturating_add(self.radius).min(upper);
        if hi <= lo {
            return String::new();
        }

        text[offsets.to_byte(lo)..offsets.to_byte(hi)].to_string()
    }
}

/// 照合エンジン
#[derive(Debug, Clone, Default)]
pub struct MatchEngine {
    window: ExcerptWindow,
}

impl MatchEngine {
    pub fn new(window: ExcerptWindow) -> Self {
        Self { window }
    }

    pub fn window(&self) -> &ExcerptWindow {
        &self.window
    }

    /// 1フィールド×1項目の照合
    ///
    /// テキスト欠損・言語未解決・チェーン空・サブパターン不一致はいずれも
    /// エラーではなく0件を返す。
    pub fn match_field(&self, course: &Course, field: &str, entry: &TaxonomyEntry) -> Vec<MatchRecord> {
        let Some(course_field) = course.field(field) else {
            return Vec::new();
        };
        let Some(text) = course_field.text.as_deref().filter(|t| !t.is_empty()) else {
            return Vec::new();
        };
        let Some(language) = course_field.languages.as_ref().and_then(|l| l.first()) else {
            return Vec::new();
        };
        let Some(chain) = entry.chain(language).filter(|c| !c.is_empty()) else {
            return Vec::new();
        };

        // 対応表は最初の一致が見つかった時点で作る
        let mut offsets: Option<CharOffsets> = None;
        let mut pending = Vec::new();

        for sub_pattern in chain.iter() {
            let mut found = false;

            for m in sub_pattern.find_iter(text) {
                found = true;
                let offsets = offsets.get_or_insert_with(|| CharOffsets::new(text));
                let start = offsets.to_char(m.start());
                let end = offsets.to_char(m.end());

                pending.push(MatchRecord {
                    id: course.id.clone(),
                    field: field.to_string(),
                    pattern: entry.id.clone(),
                    sub_pattern: sub_pattern.as_str().to_string(),
                    start,
                    end,
                    extract: self.window.extract_with(text, offsets, start, end),
                });
            }

            if !found {
                return Vec::new();
            }
        }

        pending
    }
}
