//! 照合レコードの蓄積先

use crate::types::MatchRecord;

/// 追記専用のレコード蓄積先
///
/// 追記順を保持し、実行終了時に全件を読み出せること。
pub trait RecordSink {
    /// 1フィールド×1項目分のレコードをまとめて追記
    fn append(&mut self, records: Vec<MatchRecord>);

    /// 追記順の全レコード
    fn records(&self) -> &[MatchRecord];

    fn len(&self) -> usize {
        self.records().len()
    }

    fn is_empty(&self) -> bool {
        self.records().is_empty()
    }
}

/// メモリ上の蓄積先
#[derive(Debug, Clone, Default)]
pub struct MemorySink {
    records: Vec<MatchRecord>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn into_records(self) -> Vec<MatchRecord> {
        self.records
    }
}

impl RecordSink for MemorySink {
    fn append(&mut self, mut records: Vec<MatchRecord>) {
        self.records.append(&mut records);
    }

    fn records(&self) -> &[MatchRecord] {
        &self.records
    }
}
