//! 照合言語の解決
//!
//! 自動言語判定を優先し、判定できない・受理言語が得られない場合は
//! データソースの申告言語にフォールバックする。

use crate::types::AcceptedLanguages;
use thiserror::Error;

/// 言語判定の候補
#[derive(Debug, Clone, PartialEq)]
pub struct LanguageGuess {
    /// ISO 639-1 言語コード
    pub lang: String,
    pub confidence: f64,
}

/// 言語判定の失敗（短すぎる・言語的でないテキスト）
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DetectionError {
    #[error("language could not be determined")]
    Undetermined,
}

/// 自動言語判定器
pub trait LanguageDetector {
    /// 確信度の高い順に候補を返す
    fn detect(&self, text: &str) -> Result<Vec<LanguageGuess>, DetectionError>;
}

/// フィールドの照合言語を解決する
///
/// # Returns
/// * `None` - テキストが無い（評価不能、黙ってスキップ）
/// * `Some(list)` - 受理言語のみのリスト（空もあり得る）。先頭が主言語
pub fn resolve_languages(
    text: Option<&str>,
    declared: &[String],
    accepted: &AcceptedLanguages,
    detector: &dyn LanguageDetector,
) -> Option<Vec<String>> {
    let text = text?;

    // 判定失敗は「判定結果なし」として扱う
    let detected: Vec<String> = detector
        .detect(text)
        .unwrap_or_default()
        .into_iter()
        .map(|guess| guess.lang)
        .filter(|lang| accepted.contains(lang))
        .fold(Vec::new(), |mut acc, lang| {
            if !acc.contains(&lang) {
                acc.push(lang);
            }
            acc
        });

    if !detected.is_empty() {
        return Some(detected);
    }

    // 申告言語 ∩ 受理言語（受理言語の順序で確定させる）
    let fallback = accepted
        .iter()
        .filter(|lang| declared.iter().any(|d| d.eq_ignore_ascii_case(lang)))
        .map(str::to_string)
        .collect();

    Some(fallback)
}

#[cfg(test)]
mod tests {
    use super::*;

    /// 固定結果を返す判定器
    struct FixedDetector(Result<Vec<LanguageGuess>, DetectionError>);

    impl LanguageDetector for FixedDetector {
        fn detect(&self, _text: &str) -> Result<Vec<LanguageGuess>, DetectionError> {
            self.0.clone()
        }
    }

    fn guesses(langs: &[(&str, f64)]) -> FixedDetector {
        FixedDetector(Ok(langs
            .iter()
            .map(|(lang, confidence)| LanguageGuess {
                lang: lang.to_string(),
                confidence: *confidence,
            })
            .collect()))
    }

    fn declared(langs: &[&str]) -> Vec<String> {
        langs.iter().map(|l| l.to_string()).collect()
    }

    #[test]
    fn test_absent_text_is_none() {
        let detector = guesses(&[("en", 0.99)]);
        let accepted = AcceptedLanguages::default();
        assert_eq!(resolve_languages(None, &declared(&["en"]), &accepted, &detector), None);
    }

    #[test]
    fn test_detection_wins_over_declared() {
        let detector = guesses(&[("en", 0.99)]);
        let accepted = AcceptedLanguages::default();
        let result = resolve_languages(Some("An English sentence"), &declared(&["fr"]), &accepted, &detector);
        assert_eq!(result, Some(vec!["en".to_string()]));
    }

    #[test]
    fn test_detection_filtered_and_ordered() {
        let detector = guesses(&[("de", 0.6), ("nl", 0.3), ("en", 0.1)]);
        let accepted = AcceptedLanguages::default();
        let result = resolve_languages(Some("tekst"), &[], &accepted, &detector);
        assert_eq!(result, Some(vec!["nl".to_string(), "en".to_string()]));
    }

    #[test]
    fn test_failure_falls_back_to_declared() {
        let detector = FixedDetector(Err(DetectionError::Undetermined));
        let accepted = AcceptedLanguages::default();
        let result = resolve_languages(Some("duurzaamheid"), &declared(&["nl"]), &accepted, &detector);
        assert_eq!(result, Some(vec!["nl".to_string()]));
    }

    #[test]
    fn test_unaccepted_detection_falls_back() {
        let detector = guesses(&[("de", 0.99)]);
        let accepted = AcceptedLanguages::default();
        let result = resolve_languages(Some("Nachhaltigkeit"), &declared(&["de", "fr"]), &accepted, &detector);
        assert_eq!(result, Some(vec!["fr".to_string()]));
    }

    #[test]
    fn test_fallback_order_is_deterministic() {
        let detector = FixedDetector(Err(DetectionError::Undetermined));
        let accepted = AcceptedLanguages::default();
        let a = resolve_languages(Some("x"), &declared(&["nl", "en", "fr"]), &accepted, &detector);
        let b = resolve_languages(Some("x"), &declared(&["fr", "nl", "en"]), &accepted, &detector);
        assert_eq!(a, b);
        assert_eq!(a, Some(declared(&["en", "fr", "nl"])));
    }

    #[test]
    fn test_nothing_usable_is_empty_list() {
        let detector = FixedDetector(Err(DetectionError::Undetermined));
        let accepted = AcceptedLanguages::default();
        let result = resolve_languages(Some("x"), &declared(&["es"]), &accepted, &detector);
        assert_eq!(result, Some(vec![]));
    }
}
