use chrono::{DateTime, Local};
use clap::Parser;
use dialoguer::{Confirm, Input};
use gohan_log::{category, cli, config, error, filter, photo, record, station, stats, store};

use category::CategoryStore;
use cli::{CategoryAction, Cli, Commands};
use config::Config;
use error::{GohanLogError, Result};
use filter::{DateFilter, FilterSpec};
use record::VisitRecord;
use station::StationChoice;
use stats::{station_averages, station_stats};
use store::{RecordStore, SortOrder};

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = Config::load()?;

    match cli.command {
        Commands::Add {
            shop,
            memo,
            photo,
            revisit,
            no_prompt,
        } => {
            println!("🍚 gohan-log - 記録追加\n");
            let data_dir = config.data_dir()?;
            if cli.verbose {
                println!("データディレクトリ: {}", data_dir.display());
            }

            let categories = CategoryStore::open(&data_dir);
            let mut store = RecordStore::open(&data_dir);
            let record = build_record(
                &data_dir,
                categories.items(),
                shop,
                memo,
                photo,
                revisit,
                no_prompt,
            )?;

            let id = record.id;
            store.upsert(record)?;
            println!("\n✅ 記録を追加しました (id: {})", short_id(&id.to_string()));
        }

        Commands::List {
            search,
            from,
            to,
            year,
            month,
            revisit_only,
        } => {
            let data_dir = config.data_dir()?;
            let store = RecordStore::open(&data_dir);

            let date = match (from, to, year, month) {
                (None, None, None, None) => None,
                (_, _, Some(y), Some(m)) => Some(DateFilter::Month { year: y, month: m }),
                (_, _, Some(y), None) => Some(DateFilter::Year(y)),
                (start, end, _, _) => Some(DateFilter::Range { start, end }),
            };
            let spec = FilterSpec {
                text: search.unwrap_or_default(),
                date,
                revisit_only,
            };

            let records = store.list(SortOrder::Descending);
            let filtered = filter::filter(&records, &spec);

            println!("🍚 gohan-log - 一覧（{}件 / 全{}件）\n", filtered.len(), records.len());
            if filtered.is_empty() {
                println!("条件に合う記録がありません");
            }
            for record in &filtered {
                print_record_row(record);
            }
        }

        Commands::Show { id } => {
            let data_dir = config.data_dir()?;
            let store = RecordStore::open(&data_dir);
            let record = store.find(&id)?;
            print_record_detail(record, &data_dir);
        }

        Commands::Edit { id } => {
            println!("✏️ gohan-log - 記録編集\n");
            let data_dir = config.data_dir()?;
            let categories = CategoryStore::open(&data_dir);
            let mut store = RecordStore::open(&data_dir);
            let mut record = store.find(&id)?.clone();

            edit_record(&mut record, &data_dir, categories.items())?;
            store.upsert(record)?;
            println!("\n✅ 記録を更新しました");
        }

        Commands::Delete { id } => {
            let data_dir = config.data_dir()?;
            let mut store = RecordStore::open(&data_dir);
            let record_id = store.find(&id)?.id;
            store.delete(record_id)?;
            println!("✅ 記録を削除しました (id: {})", short_id(&record_id.to_string()));
        }

        Commands::Stats { top, by_average } => {
            println!("📊 gohan-log - 分析\n");
            let data_dir = config.data_dir()?;
            let store = RecordStore::open(&data_dir);
            let records = store.list(SortOrder::Ascending);

            let years = filter::year_range(&records);
            println!(
                "対象年: {}〜{}（全{}件）\n",
                years.first().copied().unwrap_or_default(),
                years.last().copied().unwrap_or_default(),
                records.len()
            );

            print_monthly_section(&records);
            if by_average {
                print_station_average_section(&records, top);
            } else {
                print_station_stats_section(&records, top);
            }
        }

        Commands::Category { action } => {
            let data_dir = config.data_dir()?;
            let mut categories = CategoryStore::open(&data_dir);

            match action {
                CategoryAction::List => {
                    println!("採点項目:");
                    for (i, name) in categories.items().iter().enumerate() {
                        println!("  [{}] {}", i, name);
                    }
                }
                CategoryAction::Add { name } => {
                    if categories.add(&name)? {
                        println!("✔ 項目を追加しました: {}", name.trim());
                    } else {
                        println!("空または重複のため追加しませんでした");
                    }
                }
                CategoryAction::Rename { index, name } => {
                    match categories.rename(index, &name)? {
                        Some(old) => {
                            let mut store = RecordStore::open(&data_dir);
                            let changed = category::propagate_rename(
                                store.records_mut(),
                                &old,
                                name.trim(),
                            );
                            store.save()?;
                            println!("✔ 「{}」を「{}」に変更しました", old, name.trim());
                            println!("✔ {}件の記録に反映しました", changed);
                        }
                        None => println!("新しい項目名が空のため変更しませんでした"),
                    }
                }
                CategoryAction::Remove { index } => {
                    let removed = categories.remove(index)?;
                    println!("✔ 項目を削除しました: {}（過去の記録の採点はそのまま）", removed);
                }
            }
        }

        Commands::Config { set_data_dir, show } => {
            let mut config = config;

            if let Some(dir) = set_data_dir {
                config.set_data_dir(dir)?;
                println!("✔ データディレクトリを設定しました");
            }

            if show {
                println!("設定:");
                println!("  設定ファイル: {}", Config::config_path()?.display());
                println!("  データディレクトリ: {}", config.data_dir()?.display());
            }
        }
    }

    Ok(())
}

/// 追加フロー: フラグで埋まらなかった項目を対話で埋める
fn build_record(
    data_dir: &std::path::Path,
    categories: &[String],
    shop: Option<String>,
    memo: Option<String>,
    photo_source: Option<std::path::PathBuf>,
    revisit: bool,
    no_prompt: bool,
) -> Result<VisitRecord> {
    let mut record = VisitRecord::new(categories);

    record.shop_name = match shop {
        Some(s) => s,
        None if !no_prompt => prompt_text("店名", "")?,
        None => String::new(),
    };

    if !no_prompt {
        match station::prompt_station(None)? {
            StationChoice::Selected { line, station } => {
                record.station_line = line;
                record.station_name = station;
            }
            StationChoice::Custom(name) => record.station_name = name,
            StationChoice::None => {}
        }
    }

    record.memo = match memo {
        Some(m) => m,
        None if !no_prompt => prompt_text("メモ", "")?,
        None => String::new(),
    };

    if let Some(source) = photo_source {
        let file_name = photo::attach_photo(data_dir, &source)?;
        println!("✔ 写真を取り込みました: {}", file_name);
        record.photo = Some(file_name);
    }

    if !no_prompt {
        println!("\n採点（1〜5）");
        let entries: Vec<(String, u8)> = record
            .rating_entries()
            .into_iter()
            .map(|(name, score)| (name.to_string(), score))
            .collect();
        for (name, current) in entries {
            let score = prompt_score(&name, current)?;
            record.set_rating(&name, score)?;
        }
    }

    record.revisit = if revisit {
        true
    } else if !no_prompt {
        prompt_confirm("再訪あり？", false)?
    } else {
        false
    };

    Ok(record)
}

/// 編集フロー: ID・日付以外を対話で更新する
fn edit_record(
    record: &mut VisitRecord,
    data_dir: &std::path::Path,
    categories: &[String],
) -> Result<()> {
    record.shop_name = prompt_text("店名", &record.shop_name)?;

    let current = if record.station_name.is_empty() {
        None
    } else {
        Some((record.station_line.as_str(), record.station_name.as_str()))
    };
    match station::prompt_station(current)? {
        StationChoice::Selected { line, station } => {
            record.station_line = line;
            record.station_name = station;
        }
        StationChoice::Custom(name) => record.station_name = name,
        StationChoice::None => {
            record.station_name.clear();
        }
    }

    record.memo = prompt_text("メモ", &record.memo)?;

    let photo_input = prompt_text("写真ファイルのパス（変更しないなら空欄）", "")?;
    if !photo_input.is_empty() {
        let file_name = photo::attach_photo(data_dir, std::path::Path::new(&photo_input))?;
        println!("✔ 写真を取り込みました: {}", file_name);
        record.photo = Some(file_name);
    }

    // 採点項目リストに増えた項目は既定値で足してから聞く
    for name in categories {
        if !record.ratings.contains_key(name) {
            record.set_rating(name, record::DEFAULT_SCORE)?;
        }
    }
    println!("\n採点（1〜5）");
    let entries: Vec<(String, u8)> = record
        .rating_entries()
        .into_iter()
        .map(|(name, score)| (name.to_string(), score))
        .collect();
    for (name, current) in entries {
        let score = prompt_score(&name, current)?;
        record.set_rating(&name, score)?;
    }

    record.revisit = prompt_confirm("再訪あり？", record.revisit)?;

    Ok(())
}

fn prompt_text(label: &str, current: &str) -> Result<String> {
    let mut input = Input::new().with_prompt(label).allow_empty(true);
    if !current.is_empty() {
        input = input.with_initial_text(current);
    }
    let value: String = input
        .interact_text()
        .map_err(|e| GohanLogError::Prompt(e.to_string()))?;
    Ok(value.trim().to_string())
}

fn prompt_score(name: &str, current: u8) -> Result<u8> {
    let score: u8 = Input::new()
        .with_prompt(format!("  {}", name))
        .default(current)
        .validate_with(|score: &u8| -> std::result::Result<(), &str> {
            if (1..=5).contains(score) {
                Ok(())
            } else {
                Err("1〜5で入力してください")
            }
        })
        .interact_text()
        .map_err(|e| GohanLogError::Prompt(e.to_string()))?;
    Ok(score)
}

fn prompt_confirm(label: &str, default: bool) -> Result<bool> {
    Confirm::new()
        .with_prompt(label)
        .default(default)
        .interact()
        .map_err(|e| GohanLogError::Prompt(e.to_string()))
}

fn short_id(id: &str) -> String {
    id.chars().take(8).collect()
}

fn format_date(date: &DateTime<Local>) -> String {
    date.format("%Y-%m-%d").to_string()
}

fn rating_badges(record: &VisitRecord) -> String {
    record
        .rating_entries()
        .iter()
        .map(|(name, score)| format!("{}:{}", name, score))
        .collect::<Vec<_>>()
        .join(" ")
}

fn print_record_row(record: &VisitRecord) {
    let date = record
        .date
        .map(|d| format_date(&d))
        .unwrap_or_else(|| "----------".to_string());
    let shop = if record.shop_name.is_empty() {
        "(店名なし)"
    } else {
        &record.shop_name
    };

    let mut header = format!("{}  {}", date, shop);
    if !record.station_name.is_empty() {
        header.push_str(&format!("（{}）", record.station_name));
    }
    if record.revisit {
        header.push_str("  [再訪あり]");
    }
    println!("{}  (id: {})", header, short_id(&record.id.to_string()));

    if !record.ratings.is_empty() {
        println!("    {}", rating_badges(record));
    }
    if !record.memo.is_empty() {
        println!("    メモ: {}", record.memo);
    }
}

fn print_record_detail(record: &VisitRecord, data_dir: &std::path::Path) {
    println!("🍚 記録詳細\n");
    let shop = if record.shop_name.is_empty() {
        "(店名なし)"
    } else {
        &record.shop_name
    };
    println!("店名: {}", shop);
    if let Some(date) = record.date {
        println!("日付: {}", date.format("%Y-%m-%d %H:%M"));
    }
    if !record.station_name.is_empty() {
        if record.station_line.is_empty() {
            println!("駅・地名: {}", record.station_name);
        } else {
            println!("駅・地名: {}（{}）", record.station_name, record.station_line);
        }
    }
    if !record.ratings.is_empty() {
        println!("採点: {}", rating_badges(record));
    }
    println!("再訪: {}", if record.revisit { "あり" } else { "なし" });
    if !record.memo.is_empty() {
        println!("メモ: {}", record.memo);
    }
    match &record.photo {
        Some(name) => {
            let path = photo::photo_path(data_dir, name);
            if path.exists() {
                println!("写真: {}", path.display());
            } else {
                println!("写真: （ファイルが見つかりません: {}）", name);
            }
        }
        None => println!("写真: なし"),
    }
    println!("id: {}", record.id);
}

fn print_monthly_section(records: &[VisitRecord]) {
    let counts = stats::monthly_counts(records);
    println!("月別外食数");
    if counts.is_empty() {
        println!("  （日付のある記録がありません）");
        return;
    }
    let max = counts.iter().map(|c| c.count).max().unwrap_or(1);
    for row in &counts {
        println!("  {}  {} {}", row.month, bar(row.count, max), row.count);
    }
    println!();
}

fn print_station_stats_section(records: &[VisitRecord], top: usize) {
    let stats = station_stats(records);
    println!("駅ごとの記録数・平均点（上位{}駅）", top);
    if stats.is_empty() {
        println!("  （駅名のある記録がありません）");
        return;
    }
    let max = stats.iter().map(|s| s.count).max().unwrap_or(1);
    for row in stats.iter().take(top) {
        println!(
            "  {:<10} {} {}件  平均 {:.2}",
            row.station,
            bar(row.count, max),
            row.count,
            row.average
        );
    }
}

fn print_station_average_section(records: &[VisitRecord], top: usize) {
    let averages = station_averages(records);
    println!("駅ごとの平均点（上位{}駅）", top);
    if averages.is_empty() {
        println!("  （採点のある記録がありません）");
        return;
    }
    for row in averages.iter().take(top) {
        println!("  {:<10} 平均 {:.2}", row.station, row.average);
    }
}

/// 件数を最大20文字の棒に変換
fn bar(count: usize, max: usize) -> String {
    const WIDTH: usize = 20;
    let len = if max == 0 {
        0
    } else {
        (count * WIDTH).div_ceil(max).min(WIDTH)
    };
    "█".repeat(len.max(1))
}
