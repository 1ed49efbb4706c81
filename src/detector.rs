//! whatlang による言語判定
//!
//! whatlang は ISO 639-3 を返すため、講義データ・パターンで使う
//! ISO 639-1 に変換する。判定候補は受理言語に限定する
//! （蘭語が Afrikaans と判定されて捨てられるのを防ぐ）。

use course_scorer_common::{AcceptedLanguages, DetectionError, LanguageDetector, LanguageGuess};
use regex::Regex;
use whatlang::{Detector, Lang};

/// 判定に必要な最小単語数（これ未満は判定不能として申告言語に任せる）
pub const MIN_WORDS: usize = 3;

/// whatlang バックエンドの言語判定器
pub struct WhatlangDetector {
    detector: Detector,
}

impl WhatlangDetector {
    /// 受理言語のみを候補とする判定器
    ///
    /// whatlang が扱えない言語コードは無視する。1つも残らない場合は全言語を候補にする
    /// （受理外の判定結果は解決時に除外される）。
    pub fn new(accepted: &AcceptedLanguages) -> Self {
        let allowlist: Vec<Lang> = accepted.iter().filter_map(from_iso639_1).collect();
        let detector = if allowlist.is_empty() {
            Detector::new()
        } else {
            Detector::with_allowlist(allowlist)
        };
        Self { detector }
    }
}

impl Default for WhatlangDetector {
    fn default() -> Self {
        Self::new(&AcceptedLanguages::default())
    }
}

impl LanguageDetector for WhatlangDetector {
    fn detect(&self, text: &str) -> Result<Vec<LanguageGuess>, DetectionError> {
        lazy_static::lazy_static! {
            static ref WORD_RE: Regex = Regex::new(r"\p{L}+").unwrap();
        }

        if WORD_RE.find_iter(text).count() < MIN_WORDS {
            return Err(DetectionError::Undetermined);
        }

        let info = self.detector.detect(text).ok_or(DetectionError::Undetermined)?;

        Ok(vec![LanguageGuess {
            lang: iso639_1(info.lang()),
            confidence: info.confidence(),
        }])
    }
}

/// ISO 639-1 コードとの対応表
const ISO639_1: &[(Lang, &str)] = &[
    (Lang::Eng, "en"),
    (Lang::Fra, "fr"),
    (Lang::Nld, "nl"),
    (Lang::Deu, "de"),
    (Lang::Spa, "es"),
    (Lang::Ita, "it"),
    (Lang::Por, "pt"),
    (Lang::Dan, "da"),
    (Lang::Swe, "sv"),
    (Lang::Nob, "nb"),
    (Lang::Fin, "fi"),
    (Lang::Pol, "pl"),
    (Lang::Ces, "cs"),
    (Lang::Ron, "ro"),
    (Lang::Hun, "hu"),
    (Lang::Tur, "tr"),
    (Lang::Rus, "ru"),
    (Lang::Ukr, "uk"),
    (Lang::Ell, "el"),
    (Lang::Cmn, "zh"),
    (Lang::Jpn, "ja"),
    (Lang::Kor, "ko"),
    (Lang::Ara, "ar"),
];

/// ISO 639-1 コードへ変換（対応表にない言語は639-3のまま）
fn iso639_1(lang: Lang) -> String {
    ISO639_1
        .iter()
        .find(|(l, _)| *l == lang)
        .map(|(_, code)| *code)
        .unwrap_or_else(|| lang.code())
        .to_string()
}

/// ISO 639-1（または639-3）コードから whatlang の言語へ
fn from_iso639_1(code: &str) -> Option<Lang> {
    ISO639_1
        .iter()
        .find(|(_, c)| *c == code)
        .map(|(lang, _)| *lang)
        .or_else(|| Lang::from_code(code))
}

#[cfg(test)]
mod tests {
    use super::*;
    use course_scorer_common::resolve_languages;

    const ENGLISH: &str = "This course introduces students to the fundamental principles of \
        sustainable development. We discuss the management of natural resources, the \
        economics of climate policy and the social responsibility of companies, and the \
        students write a report about their own research project.";

    fn primary(text: &str, declared: &str) -> Option<String> {
        let accepted = AcceptedLanguages::default();
        resolve_languages(
            Some(text),
            &[declared.to_string()],
            &accepted,
            &WhatlangDetector::new(&accepted),
        )
        .and_then(|languages| languages.into_iter().next())
    }

    #[test]
    fn test_iso_mapping() {
        assert_eq!(iso639_1(Lang::Eng), "en");
        assert_eq!(iso639_1(Lang::Fra), "fr");
        assert_eq!(iso639_1(Lang::Nld), "nl");
        assert_eq!(from_iso639_1("nl"), Some(Lang::Nld));
        assert_eq!(from_iso639_1("deu"), Some(Lang::Deu));
        assert_eq!(from_iso639_1("xx"), None);
    }

    #[test]
    fn test_no_letters_is_undetermined() {
        let detector = WhatlangDetector::default();
        assert_eq!(detector.detect("2023 - 15 / 30"), Err(DetectionError::Undetermined));
        assert_eq!(detector.detect(""), Err(DetectionError::Undetermined));
    }

    #[test]
    fn test_detects_english_paragraph() {
        let guesses = WhatlangDetector::default().detect(ENGLISH).unwrap();
        assert_eq!(guesses[0].lang, "en");
    }

    #[test]
    fn test_detection_precedes_declared_language() {
        assert_eq!(primary(ENGLISH, "fr").as_deref(), Some("en"));
    }

    #[test]
    fn test_one_sentence_english_over_declared_french() {
        for text in [
            "Introduction to climate change and sustainable development.",
            "Students learn the basics of environmental economics.",
            "The course covers renewable energy systems.",
        ] {
            assert_eq!(primary(text, "fr").as_deref(), Some("en"), "{}", text);
        }
    }

    #[test]
    fn test_short_dutch_sentence_is_dutch() {
        assert_eq!(
            primary("Energie en water in het landbouwbeleid van de Europese Unie.", "en").as_deref(),
            Some("nl")
        );
        assert_eq!(primary("Het vak behandelt hernieuwbare energie.", "fr").as_deref(), Some("nl"));
    }

    #[test]
    fn test_single_word_falls_back_to_declared() {
        assert_eq!(
            WhatlangDetector::default().detect("Duurzaamheid"),
            Err(DetectionError::Undetermined)
        );
        assert_eq!(primary("Duurzaamheid", "nl").as_deref(), Some("nl"));
        assert_eq!(primary("Stage", "nl").as_deref(), Some("nl"));
    }

    #[test]
    fn test_detection_limited_to_accepted_languages() {
        let accepted = AcceptedLanguages::new(["en", "nl"]);
        let guesses = WhatlangDetector::new(&accepted)
            .detect("Energie en water in het landbouwbeleid van de Europese Unie.")
            .unwrap();
        assert!(guesses.iter().all(|g| accepted.contains(&g.lang)));
    }
}
