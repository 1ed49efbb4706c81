//! 講義シラバスのテーマ別パターン照合
//!
//! 中核ロジックは `course_scorer_common`、本クレートは入出力・CLI・並列実行を担う。

pub mod cli;
pub mod config;
pub mod error;
pub mod detector;
pub mod loader;
pub mod pipeline;
pub mod export;
