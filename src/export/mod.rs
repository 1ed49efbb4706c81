pub mod json;

use crate::error::Result;
use course_scorer_common::MatchRecord;
use std::path::{Path, PathBuf};

/// 出力結果の概要
#[derive(Debug, Clone)]
pub struct ExportSummary {
    pub path: PathBuf,
    pub records: usize,
    pub digest: String,
}

/// 照合結果をJSONファイルへ出力する
pub fn export_results(records: &[MatchRecord], output: &Path) -> Result<ExportSummary> {
    let bytes = json::render_records(records)?;
    json::write_atomically(output, &bytes)?;
    log::debug!("{} bytes 書き込み: {}", bytes.len(), output.display());

    Ok(ExportSummary {
        path: output.to_path_buf(),
        records: records.len(),
        digest: json::digest(&bytes),
    })
}
