use crate::error::{Result, ScorerError};
use course_scorer_common::{AcceptedLanguages, ExcerptWindow, DEFAULT_ACCEPTED_LANGUAGES, EXCERPT_RADIUS};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// データルート（data/ を含むディレクトリ）
    pub root: PathBuf,
    pub accepted_languages: Vec<String>,
    pub excerpt_radius: usize,
    /// 抜粋の上端からテキスト末尾の1文字を除く
    pub exclude_final_char: bool,
    /// 進捗ログの出力間隔（照合回数）
    pub progress_interval: u64,
    pub default_school: String,
    pub default_year: String,
}

impl Default for Config {
    fn default() -> Self {
        Self::default_config()
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        Self::load_at(&Self::config_path()?)
    }

    /// 設定ファイルが無ければ既定値。壊れている場合はパスと修復方法を添えて返す
    fn load_at(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default_config());
        }

        Self::load_from(path).map_err(|e| {
            ScorerError::Config(format!(
                "{} を読み込めません: {}。`course-scorer config --set-root <DIR>` で作り直せます",
                path.display(),
                e
            ))
        })
    }

    /// 読み込みに失敗した場合は警告を出して既定値を使う（設定の修復用）
    pub fn load_or_default() -> Self {
        Self::config_path()
            .map(|path| Self::load_or_default_at(&path))
            .unwrap_or_else(|e| {
                log::warn!("{}", e);
                Self::default_config()
            })
    }

    fn load_or_default_at(path: &Path) -> Self {
        Self::load_at(path).unwrap_or_else(|e| {
            log::warn!("{}", e);
            eprintln!("⚠ {}", e);
            Self::default_config()
        })
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config =
            serde_json::from_str(&content).map_err(|e| ScorerError::invalid_json(path, e))?;
        Ok(config)
    }

    pub fn save(&self) -> Result<()> {
        let config_path = Self::config_path()?;

        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(&config_path, content)?;
        Ok(())
    }

    pub fn config_path() -> Result<PathBuf> {
        let home = dirs::home_dir()
            .ok_or_else(|| ScorerError::Config("ホームディレクトリが見つかりません".into()))?;
        Ok(home.join(".config").join("course-scorer").join("config.json"))
    }

    fn default_config() -> Self {
        Self {
            root: PathBuf::from("."),
            accepted_languages: DEFAULT_ACCEPTED_LANGUAGES.iter().map(|l| l.to_string()).collect(),
            excerpt_radius: EXCERPT_RADIUS,
            exclude_final_char: true,
            progress_interval: 100_000,
            default_school: "uclouvain".into(),
            default_year: "2023".into(),
        }
    }

    pub fn set_root(&mut self, root: PathBuf) -> Result<()> {
        self.root = root;
        self.save()
    }

    /// 受理言語集合（空の場合は設定エラー）
    pub fn accepted_languages(&self) -> Result<AcceptedLanguages> {
        let accepted = AcceptedLanguages::new(self.accepted_languages.iter().cloned());
        if accepted.is_empty() {
            return Err(ScorerError::Config("accepted_languages が空です".into()));
        }
        Ok(accepted)
    }

    pub fn excerpt_window(&self) -> ExcerptWindow {
        ExcerptWindow {
            radius: self.excerpt_radius,
            exclude_final_char: self.exclude_final_char,
        }
    }

    pub fn layout(&self) -> DataLayout {
        DataLayout::new(&self.root)
    }
}

/// データディレクトリ構成
#[derive(Debug, Clone)]
pub struct DataLayout {
    data: PathBuf,
}

impl DataLayout {
    pub fn new(root: &Path) -> Self {
        Self {
            data: root.join("data"),
        }
    }

    /// 教育機関 → フィールド名リスト
    pub fn scoring_fields(&self) -> PathBuf {
        self.data.join("scoring_fields.json")
    }

    pub fn courses(&self, school: &str, year: &str) -> PathBuf {
        self.data
            .join("crawling-output")
            .join(format!("{}_courses_{}.json", school, year))
    }

    pub fn patterns(&self) -> PathBuf {
        self.data.join("patterns").join("patterns.json")
    }

    pub fn output(&self, school: &str, year: &str) -> PathBuf {
        self.data
            .join("scorer-output")
            .join(format!("{}_{}.json", school, year))
    }
}
