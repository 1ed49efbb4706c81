use chrono::Local;
use clap::Parser;
use course_scorer::{cli, config, detector, error, export, loader, pipeline};
use course_scorer_common::{MatchEngine, MemorySink, RecordSink};
use cli::{Cli, Commands};
use config::Config;
use error::Result;
use pipeline::{Pipeline, PipelineOptions};

fn main() {
    let cli = Cli::parse();
    init_logger(cli.verbose);

    if let Err(err) = run(cli) {
        eprintln!("\n✖ エラー: {}", err);
        std::process::exit(1);
    }
}

fn init_logger(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level)).init();
}

/// 時刻付きの段階表示
fn stage(message: &str) {
    println!("{} - {}", Local::now().format("%Y-%m-%dT%H:%M:%S"), message);
}

fn run(cli: Cli) -> Result<()> {
    // 設定コマンドは壊れた設定ファイルの修復にも使うため、読めなくても既定値で続行する
    let mut config = match cli.command {
        Commands::Config { .. } => Config::load_or_default(),
        _ => Config::load()?,
    };

    match cli.command {
        Commands::Score { school, year, root, output, parallel, no_progress } => {
            if let Some(root) = root {
                config.root = root;
            }
            let school = school.unwrap_or_else(|| config.default_school.clone());
            let year = year.unwrap_or_else(|| config.default_year.clone());
            let accepted = config.accepted_languages()?;
            let layout = config.layout();

            println!("📚 course-scorer - 採点\n");
            println!("  教育機関: {}", school);
            println!("  年度: {}", year);
            println!("  データルート: {}\n", config.root.display());

            // 1. 採点フィールド
            stage("[1/5] 採点フィールドを読み込み中...");
            let fields = loader::load_scoring_fields(&layout.scoring_fields(), &school)?;
            println!("✔ 識別: {} / 採点対象: {}\n", fields.identifying, fields.scorable.join(", "));

            // 2. 講義データ + 言語判定
            stage("[2/5] 講義データを読み込み・言語判定中...");
            let courses = loader::load_courses(
                &layout.courses(&school, &year),
                &fields,
                &accepted,
                &detector::WhatlangDetector::new(&accepted),
            )?;
            println!("✔ {}件の講義\n", courses.len());

            // 3. パターン
            stage("[3/5] パターンを読み込み中...");
            let entries = loader::load_taxonomy(&layout.patterns(), &accepted)?;
            println!("✔ {}件のパターン\n", entries.len());

            // 4. 照合
            stage(&format!("[4/5] 照合中...{}", if parallel { " (並列)" } else { "" }));
            let options = PipelineOptions {
                parallel,
                show_progress: !no_progress,
                progress_interval: config.progress_interval,
            };
            let pipeline = Pipeline::new(
                &courses,
                &entries,
                &fields.scorable,
                MatchEngine::new(config.excerpt_window()),
                options,
            );
            let mut sink = MemorySink::new();
            let stats = pipeline.run(&mut sink);
            println!("✔ {}回の照合で{}件の一致\n", stats.work_units, stats.records);

            // 5. 結果保存
            stage("[5/5] 結果を保存中...");
            let output = output.unwrap_or_else(|| layout.output(&school, &year));
            let summary = export::export_results(sink.records(), &output)?;
            println!("✔ 結果を保存: {}", summary.path.display());
            println!("  件数: {}", summary.records);
            println!("  SHA-256: {}", summary.digest);

            println!("\n✅ 採点完了");
        }

        Commands::Patterns { root, show } => {
            if let Some(root) = root {
                config.root = root;
            }
            let accepted = config.accepted_languages()?;
            let path = config.layout().patterns();

            println!("🔎 course-scorer - パターン検証\n");
            let entries = loader::load_taxonomy(&path, &accepted)?;
            println!("✔ {}件のパターンをコンパイル: {}", entries.len(), path.display());

            for language in accepted.iter() {
                let count = entries
                    .iter()
                    .filter(|e| e.chain(language).is_some_and(|c| !c.is_empty()))
                    .count();
                println!("  {}: {}件", language, count);
            }

            if show {
                println!();
                for entry in &entries {
                    for (language, chain) in entry.chains().filter(|(_, c)| !c.is_empty()) {
                        println!("{:>8} [{}] {}", entry.id, language, chain.sources().join(" # "));
                    }
                }
            }
        }

        Commands::Config { set_root, show } => {
            if let Some(root) = set_root {
                config.set_root(root)?;
                println!("✔ データルートを設定しました");
            }

            if show {
                println!("設定:");
                println!("  データルート: {}", config.root.display());
                println!("  受理言語: {}", config.accepted_languages.join(", "));
                println!("  抜粋幅: ±{}文字", config.excerpt_radius);
                println!("  末尾1文字を除外: {}", config.exclude_final_char);
                println!("  進捗ログ間隔: {}", config.progress_interval);
                println!("  既定の教育機関: {}", config.default_school);
                println!("  既定の年度: {}", config.default_year);
            }
        }
    }

    Ok(())
}
