use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "course-scorer")]
#[command(about = "講義シラバスのテーマ別パターン照合ツール", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// 詳細ログを出力
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// 講義データをパターン照合してJSONを出力
    Score {
        /// 教育機関コード（デフォルト: 設定の default_school）
        #[arg(short, long)]
        school: Option<String>,

        /// 学年度（デフォルト: 設定の default_year）
        #[arg(short, long)]
        year: Option<String>,

        /// データルート（data/ を含むディレクトリ）
        #[arg(long)]
        root: Option<PathBuf>,

        /// 出力JSONファイル（デフォルト: data/scorer-output/{school}_{year}.json）
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// 講義単位で並列に照合
        #[arg(short, long)]
        parallel: bool,

        /// 進捗バーを表示しない
        #[arg(long)]
        no_progress: bool,
    },

    /// パターンファイルを検証（正規化・コンパイルのみ）
    Patterns {
        /// データルート
        #[arg(long)]
        root: Option<PathBuf>,

        /// 正規化後のサブパターンを一覧表示
        #[arg(long)]
        show: bool,
    },

    /// 設定を表示/編集
    Config {
        /// データルートを設定
        #[arg(long)]
        set_root: Option<PathBuf>,

        /// 設定を表示
        #[arg(long)]
        show: bool,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_score() {
        let cli = Cli::try_parse_from([
            "course-scorer", "score", "-s", "kuleuven", "-y", "2024", "--parallel", "-v",
        ])
        .unwrap();
        assert!(cli.verbose);
        match cli.command {
            Commands::Score { school, year, parallel, no_progress, output, .. } => {
                assert_eq!(school.as_deref(), Some("kuleuven"));
                assert_eq!(year.as_deref(), Some("2024"));
                assert!(parallel);
                assert!(!no_progress);
                assert!(output.is_none());
            }
            _ => panic!("expected score command"),
        }
    }

    #[test]
    fn test_parse_patterns() {
        let cli = Cli::try_parse_from(["course-scorer", "patterns", "--root", "/srv", "--show"]).unwrap();
        match cli.command {
            Commands::Patterns { root, show } => {
                assert_eq!(root, Some(PathBuf::from("/srv")));
                assert!(show);
            }
            _ => panic!("expected patterns command"),
        }
    }
}
