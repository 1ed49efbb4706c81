//! Course Scorer Common Library
//!
//! 講義テキストへのテーマ別パターン照合（ファイルI/Oを含まない中核部分）

pub mod types;
pub mod error;
pub mod pattern;
pub mod language;
pub mod matcher;
pub mod sink;

pub use types::{AcceptedLanguages, Course, CourseField, MatchRecord, PatternId, DEFAULT_ACCEPTED_LANGUAGES};
pub use error::{Error, Result};
pub use pattern::{normalize_pattern, normalize_optional, PatternChain, TaxonomyEntry, SUB_PATTERN_DELIMITER};
pub use language::{resolve_languages, DetectionError, LanguageDetector, LanguageGuess};
pub use matcher::{ExcerptWindow, MatchEngine, EXCERPT_RADIUS};
pub use sink::{MemorySink, RecordSink};
