//! 採点パイプライン
//!
//! 講義 × タクソノミー項目 × 採点対象フィールドの全組み合わせを照合し、
//! 結果を蓄積先へ追記する。
//!
//! 並列実行時は講義単位でワーカーごとの個別バッファに集め、
//! 講義順に蓄積先へ追記する（逐次実行と同一の出力になる）。

use course_scorer_common::{Course, MatchEngine, MatchRecord, RecordSink, TaxonomyEntry};
use indicatif::{ProgressBar, ProgressStyle};
use rayon::prelude::*;
use std::sync::atomic::{AtomicU64, Ordering};

/// パイプラインの実行オプション
#[derive(Debug, Clone)]
pub struct PipelineOptions {
    pub parallel: bool,
    pub show_progress: bool,
    /// 進捗ログの出力間隔（照合回数、0で無効）
    pub progress_interval: u64,
}

impl Default for PipelineOptions {
    fn default() -> Self {
        Self {
            parallel: false,
            show_progress: true,
            progress_interval: 100_000,
        }
    }
}

/// 実行統計
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunStats {
    pub courses: usize,
    pub entries: usize,
    pub fields: usize,
    /// 照合回数（講義 × 項目 × フィールド）
    pub work_units: u64,
    pub records: usize,
}

/// 進捗表示（進捗バー + 一定間隔のログ）
struct Progress {
    bar: ProgressBar,
    total: u64,
    interval: u64,
    courses: usize,
    done: AtomicU64,
}

impl Progress {
    fn new(total: u64, courses: usize, options: &PipelineOptions) -> Self {
        let bar = if options.show_progress {
            let bar = ProgressBar::new(total);
            let style = ProgressStyle::default_bar()
                .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({eta})")
                .unwrap_or_else(|_| ProgressStyle::default_bar())
                .progress_chars("#>-");
            bar.set_style(style);
            bar
        } else {
            ProgressBar::hidden()
        };

        Self {
            bar,
            total,
            interval: options.progress_interval,
            courses,
            done: AtomicU64::new(0),
        }
    }

    fn advance(&self, units: u64, course: usize) {
        let before = self.done.fetch_add(units, Ordering::Relaxed);
        let after = before + units;
        self.bar.inc(units);

        if self.interval > 0 && before / self.interval != after / self.interval {
            log::info!(
                "step {} - course {}/{} - progress {:.2}%",
                after,
                course,
                self.courses,
                after as f64 * 100.0 / self.total.max(1) as f64
            );
        }
    }

    fn finish(&self) {
        self.bar.finish_and_clear();
    }
}

/// 採点パイプライン
pub struct Pipeline<'a> {
    courses: &'a [Course],
    entries: &'a [TaxonomyEntry],
    fields: &'a [String],
    engine: MatchEngine,
    options: PipelineOptions,
}

impl<'a> Pipeline<'a> {
    /// `fields` は採点対象フィールド（識別フィールドを除く）
    pub fn new(
        courses: &'a [Course],
        entries: &'a [TaxonomyEntry],
        fields: &'a [String],
        engine: MatchEngine,
        options: PipelineOptions,
    ) -> Self {
        Self {
            courses,
            entries,
            fields,
            engine,
            options,
        }
    }

    /// 総照合回数
    pub fn work_units(&self) -> u64 {
        self.courses.len() as u64 * self.units_per_course()
    }

    fn units_per_course(&self) -> u64 {
        self.entries.len() as u64 * self.fields.len() as u64
    }

    /// 全組み合わせを照合して蓄積先へ追記する
    pub fn run<S: RecordSink>(&self, sink: &mut S) -> RunStats {
        let before = sink.len();
        let progress = Progress::new(self.work_units(), self.courses.len(), &self.options);

        if self.options.parallel {
            self.run_parallel(sink, &progress);
        } else {
            self.run_sequential(sink, &progress);
        }
        progress.finish();

        RunStats {
            courses: self.courses.len(),
            entries: self.entries.len(),
            fields: self.fields.len(),
            work_units: self.work_units(),
            records: sink.len() - before,
        }
    }

    fn run_sequential<S: RecordSink>(&self, sink: &mut S, progress: &Progress) {
        for (index, course) in self.courses.iter().enumerate() {
            for entry in self.entries {
                for field in self.fields {
                    let records = self.engine.match_field(course, field, entry);
                    if !records.is_empty() {
                        sink.append(records);
                    }
                    progress.advance(1, index + 1);
                }
            }
        }
    }

    fn run_parallel<S: RecordSink>(&self, sink: &mut S, progress: &Progress) {
        let units = self.units_per_course();
        let buffers: Vec<Vec<MatchRecord>> = self
            .courses
            .par_iter()
            .enumerate()
            .map(|(index, course)| {
                let buffer = self.score_course(course);
                progress.advance(units, index + 1);
                buffer
            })
            .collect();

        for buffer in buffers {
            if !buffer.is_empty() {
                sink.append(buffer);
            }
        }
    }

    /// 1講義分の照合結果（項目順・フィールド順）
    fn score_course(&self, course: &Course) -> Vec<MatchRecord> {
        let mut buffer = Vec::new();
        for entry in self.entries {
            for field in self.fields {
                buffer.extend(self.engine.match_field(course, field, entry));
            }
        }
        buffer
    }
}
