//! 照合結果のJSON出力
//!
//! レコード配列を5スペースインデントで書き出す（既存の採点出力と同じ体裁）。

use crate::error::Result;
use course_scorer_common::MatchRecord;
use serde::Serialize;
use serde_json::ser::{PrettyFormatter, Serializer};
use sha2::{Digest, Sha256};
use std::path::Path;

const INDENT: &[u8] = b"     ";

/// レコード配列をJSONバイト列に変換
pub fn render_records(records: &[MatchRecord]) -> Result<Vec<u8>> {
    let mut buffer = Vec::new();
    let formatter = PrettyFormatter::with_indent(INDENT);
    let mut serializer = Serializer::with_formatter(&mut buffer, formatter);
    records.serialize(&mut serializer)?;
    Ok(buffer)
}

/// 出力内容のSHA-256（再実行時の同一性確認用）
pub fn digest(bytes: &[u8]) -> String {
    hex::encode(Sha256::digest(bytes))
}

/// 一時ファイルに書いてから置き換える
pub fn write_atomically(path: &Path, bytes: &[u8]) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }

    let partial = path.with_extension("json.partial");
    std::fs::write(&partial, bytes)?;
    std::fs::rename(&partial, path)?;
    Ok(())
}
