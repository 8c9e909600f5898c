mod adapter;
mod cli;
mod domain;
mod ports;
#[cfg(test)]
mod tests;
mod usecase;
mod wiring;

use std::collections::BTreeMap;
use std::process;

use common::error::Error;
use common::ports::outbound::{iso8601_from_ms, LogLevel, LogRecord};
use serde_json::Value;

use adapter::DataPaths;
use cli::{parse_args, print_completion, ParseOutcome, RunConfig};
use domain::{
    coerce_value, Command, DetailFormat, FormalityRange, IndexEntry, Item, QueryFilter,
    QueryFormat, QueryRequest,
};
use ports::inbound::UseCaseRunner;
use wiring::{wire_closet, App};

/// Command をディスパッチする Runner（match は main レイヤーに集約）
struct Runner {
    app: App,
}

impl Runner {
    /// 構造化ログを 1 行書く。ログ書き込みの失敗でコマンド自体は失敗させない。
    fn log(&self, level: LogLevel, kind: &str, message: String, fields: BTreeMap<String, Value>) {
        let record = LogRecord {
            ts: iso8601_from_ms(self.app.clock.now_ms()),
            level,
            message,
            layer: Some("cli".to_string()),
            kind: Some(kind.to_string()),
            fields: if fields.is_empty() { None } else { Some(fields) },
        };
        let _ = self.app.logger.log(&record);
    }
}

impl UseCaseRunner for Runner {
    fn run(&self, config: RunConfig) -> Result<i32, Error> {
        match config.command {
            Command::Help => {
                print_help();
                Ok(0)
            }
            Command::Query(req) => self.run_query(&req),
            Command::Show { ids, format } => self.run_show(&ids, format),
            Command::Update { id, field, value } => self.run_update(&id, &field, &value),
            Command::Remove { id } => self.run_remove(&id),
            Command::MarkWorn { ids, date } => self.run_mark_worn(&ids, date.as_deref()),
            Command::Check => self.run_check(),
        }
    }
}

impl Runner {
    fn run_query(&self, req: &QueryRequest) -> Result<i32, Error> {
        // レンジ解析の失敗はフィルタ実行前に弾く（フェイルファスト）
        let filter = build_filter(req)?;
        let entries = self.app.query_use_case.run(&filter)?;
        let exit = if entries.is_empty() { 1 } else { 0 };

        if req.detailed {
            let items = self.app.query_use_case.hydrate(&entries)?;
            match req.format {
                QueryFormat::Json => print_json(&items)?,
                QueryFormat::Summary => print_items_summary(&items),
                QueryFormat::Ids => {
                    for item in &items {
                        println!("{}", item.id);
                    }
                }
            }
        } else {
            match req.format {
                QueryFormat::Json => print_json(&entries)?,
                QueryFormat::Summary => print_entries_summary(&entries),
                QueryFormat::Ids => {
                    for entry in &entries {
                        println!("{}", entry.id);
                    }
                }
            }
        }
        Ok(exit)
    }

    fn run_show(&self, ids: &[String], format: DetailFormat) -> Result<i32, Error> {
        if ids.is_empty() {
            return Err(Error::invalid_argument(
                "show requires at least one item id".to_string(),
            ));
        }
        let (found, missing) = self.app.details_use_case.get(ids)?;

        if !missing.is_empty() {
            eprintln!("Warning: {} item(s) not found:", missing.len());
            for id in &missing {
                eprintln!("  - {}", id);
            }
            eprintln!();
        }
        if found.is_empty() {
            eprintln!("No items found.");
            return Ok(1);
        }

        match format {
            DetailFormat::Json => print_json(&found)?,
            DetailFormat::Summary => print_show_summary(&found),
            DetailFormat::Compact => print_show_compact(&found),
        }
        Ok(0)
    }

    fn run_update(&self, id: &str, field: &str, value: &str) -> Result<i32, Error> {
        // 文字列入力の型推測は CLI 境界のここで行う
        let coerced = coerce_value(value);
        let outcome = self.app.catalog_use_case.update_field(id, field, coerced)?;

        if outcome.index_refreshed {
            println!("Updated index for {}", id);
        }
        println!(
            "Updated {}: {} = {} (was: {})",
            id,
            outcome.field,
            display_value(&outcome.new),
            display_old(&outcome.old)
        );

        let mut fields = BTreeMap::new();
        fields.insert("id".to_string(), Value::String(id.to_string()));
        fields.insert("field".to_string(), Value::String(outcome.field.clone()));
        fields.insert("new".to_string(), outcome.new.clone());
        fields.insert(
            "indexRefreshed".to_string(),
            Value::Bool(outcome.index_refreshed),
        );
        self.log(
            LogLevel::Info,
            "mutation",
            "field updated".to_string(),
            fields,
        );
        Ok(0)
    }

    fn run_remove(&self, id: &str) -> Result<i32, Error> {
        let outcome = self.app.catalog_use_case.remove(id)?;
        println!("Removed item: {} ({})", outcome.item.name, id);

        if !outcome.index_removed {
            // インデックス側の欠けは黙殺せず警告として表面化する
            eprintln!(
                "Warning: no index entry for {} (removed item record only)",
                id
            );
            self.log(
                LogLevel::Warn,
                "warning",
                format!("index entry missing on remove: {}", id),
                BTreeMap::new(),
            );
        }

        let mut fields = BTreeMap::new();
        fields.insert("id".to_string(), Value::String(id.to_string()));
        self.log(LogLevel::Info, "mutation", "item removed".to_string(), fields);
        Ok(0)
    }

    fn run_mark_worn(&self, ids: &[String], date: Option<&str>) -> Result<i32, Error> {
        if ids.is_empty() {
            return Err(Error::invalid_argument(
                "mark-worn requires at least one item id".to_string(),
            ));
        }
        let outcome = self.app.catalog_use_case.mark_worn(ids, date)?;

        for worn in &outcome.updated {
            println!("Marked {} as worn (total: {})", worn.name, worn.wear_count);
        }
        for id in &outcome.missing {
            eprintln!("Warning: item {} not found, skipping", id);
        }
        if outcome.updated.is_empty() {
            return Ok(1);
        }
        println!();
        println!("Updated {} item(s)", outcome.updated.len());

        let mut fields = BTreeMap::new();
        fields.insert(
            "ids".to_string(),
            Value::Array(
                outcome
                    .updated
                    .iter()
                    .map(|w| Value::String(w.id.clone()))
                    .collect(),
            ),
        );
        self.log(
            LogLevel::Info,
            "mutation",
            "items marked worn".to_string(),
            fields,
        );
        Ok(0)
    }

    fn run_check(&self) -> Result<i32, Error> {
        let report = self.app.catalog_use_case.check()?;
        if report.is_clean() {
            println!("OK: item store and index are consistent");
            return Ok(0);
        }
        for id in &report.unindexed_items {
            println!("item without index entry: {}", id);
        }
        for id in &report.orphan_entries {
            println!("index entry without item: {}", id);
        }
        for id in &report.stale_entries {
            println!("index entry out of date: {}", id);
        }
        let total = report.unindexed_items.len()
            + report.orphan_entries.len()
            + report.stale_entries.len();
        self.log(
            LogLevel::Error,
            "error",
            format!("integrity check failed: {} violation(s)", total),
            BTreeMap::new(),
        );
        Err(Error::integrity(format!(
            "{} integrity violation(s) found",
            total
        )))
    }
}

/// QueryRequest からフィルタを組み立てる。--all は全述語を無効にする。
fn build_filter(req: &QueryRequest) -> Result<QueryFilter, Error> {
    if req.all {
        return Ok(QueryFilter::default());
    }
    let formality = match &req.formality {
        Some(raw) => Some(FormalityRange::parse(raw)?),
        None => None,
    };
    Ok(QueryFilter {
        item_type: req.item_type.clone(),
        category: req.category.clone(),
        color: req.color.clone(),
        formality,
        season: req.season.clone(),
        tag: req.tag.clone(),
        ids: if req.ids.is_empty() {
            None
        } else {
            Some(req.ids.clone())
        },
    })
}

fn print_json<T: serde::Serialize>(value: &T) -> Result<(), Error> {
    let s = serde_json::to_string_pretty(value).map_err(|e| Error::Json(e.to_string()))?;
    println!("{}", s);
    Ok(())
}

fn print_entries_summary(entries: &[IndexEntry]) {
    println!();
    println!("{}", "=".repeat(80));
    println!("Found {} items", entries.len());
    println!("{}", "=".repeat(80));
    println!();
    for entry in entries {
        println!("ID: {}", entry.id);
        println!("Name: {}", entry.name);
        println!("Type: {} / {}", entry.item_type, entry.category);
        println!("Color: {}", entry.primary_color);
        println!("Formality: {}", entry.formality);
        println!("{}", "-".repeat(80));
        println!();
    }
}

/// --detailed のクエリ結果。インデックス外の情報（季節・タグ）も出す。
fn print_items_summary(items: &[Item]) {
    println!();
    println!("{}", "=".repeat(80));
    println!("Found {} items", items.len());
    println!("{}", "=".repeat(80));
    println!();
    for item in items {
        println!("ID: {}", item.id);
        println!("Name: {}", item.name);
        println!("Type: {} / {}", item.item_type, item.category);
        println!(
            "Color: {}",
            item.metadata.colors.primary.as_deref().unwrap_or("N/A")
        );
        println!("Formality: {}", formality_or_na(item));
        println!("Seasons: {}", join_or_na(&item.context.seasons));
        if !item.tags.is_empty() {
            println!("Tags: {}", item.tags.join(", "));
        }
        println!("{}", "-".repeat(80));
        println!();
    }
}

fn print_show_summary(items: &[Item]) {
    for item in items {
        println!();
        println!("{}", "=".repeat(80));
        println!("ID: {}", item.id);
        println!("Name: {}", item.name);
        println!("Brand: {}", extra_str_or_na(item, "brand"));
        println!("Type: {} / {}", item.item_type, item.category);
        println!("{}", "=".repeat(80));

        let colors = &item.metadata.colors;
        println!();
        println!("Colors:");
        println!("  Primary: {}", colors.primary.as_deref().unwrap_or("N/A"));
        if !colors.secondary.is_empty() {
            println!("  Secondary: {}", colors.secondary.join(", "));
        }
        if !colors.accent.is_empty() {
            println!("  Accent: {}", colors.accent.join(", "));
        }

        println!();
        println!(
            "Material: {}",
            item.metadata.material.as_deref().unwrap_or("N/A")
        );
        println!("Fit: {}", item.metadata.fit.as_deref().unwrap_or("N/A"));
        println!("Formality: {}/10", formality_or_na(item));
        if !item.metadata.patterns.is_empty() {
            println!("Patterns: {}", item.metadata.patterns.join(", "));
        }
        if !item.metadata.style.is_empty() {
            println!("Style: {}", item.metadata.style.join(", "));
        }

        if !item.context.seasons.is_empty() {
            println!();
            println!("Seasons: {}", item.context.seasons.join(", "));
        }
        if !item.context.occasions.is_empty() {
            println!("Occasions: {}", item.context.occasions.join(", "));
        }

        println!();
        println!("Wear Count: {}", item.tracking.wear_count.unwrap_or(0));
        if let Some(last_worn) = &item.tracking.last_worn {
            println!("Last Worn: {}", last_worn);
        }

        if let Some(image_path) = &item.image_path {
            println!();
            println!("Image: {}", image_path);
        }
        if let Some(notes) = &item.notes {
            println!();
            println!("Notes: {}", notes);
        }
        if !item.tags.is_empty() {
            println!("Tags: {}", item.tags.join(", "));
        }
        println!();
    }
}

fn print_show_compact(items: &[Item]) {
    for item in items {
        println!(
            "{:<25} | {:<50} | {:<20} | {:<15} | F:{}",
            item.id,
            item.name,
            item.category,
            item.metadata.colors.primary.as_deref().unwrap_or("N/A"),
            formality_or_na(item)
        );
    }
}

fn join_or_na(values: &[String]) -> String {
    if values.is_empty() {
        "N/A".to_string()
    } else {
        values.join(", ")
    }
}

fn formality_or_na(item: &Item) -> String {
    match item.metadata.formality {
        Some(f) => f.to_string(),
        None => "N/A".to_string(),
    }
}

fn extra_str_or_na<'a>(item: &'a Item, key: &str) -> &'a str {
    item.extra.get(key).and_then(Value::as_str).unwrap_or("N/A")
}

/// 更新エコー用の値表示（文字列は引用符なし、その他は JSON 表記）
fn display_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn display_old(value: &Option<Value>) -> String {
    match value {
        Some(v) => display_value(v),
        None => "unset".to_string(),
    }
}

fn run() -> Result<i32, Error> {
    match parse_args()? {
        ParseOutcome::GenerateCompletion(shell) => {
            print_completion(shell);
            Ok(0)
        }
        ParseOutcome::Rendered(text) => {
            print!("{}", text);
            Ok(0)
        }
        ParseOutcome::Run(config) => {
            let paths = DataPaths::resolve(config.data_dir.as_deref());
            let app = wire_closet(&paths);
            let runner = Runner { app };
            runner.run(config)
        }
    }
}

fn main() {
    let exit_code = match run() {
        Ok(code) => code,
        Err(e) => {
            if e.is_usage() {
                print_usage();
            }
            eprintln!("closet: {}", e);
            e.exit_code()
        }
    };
    process::exit(exit_code);
}

fn print_usage() {
    eprintln!("Usage: closet [-h] [--data-dir directory] <command> [args...]");
}

fn print_help() {
    println!("Usage: closet [-h] [--data-dir directory] <command> [args...]");
    println!("  -h, --help            Display this help message.");
    println!("  --data-dir            Wardrobe data directory (overrides CLOSET_DATA).");
    println!("  --generate <shell>    Generate shell completion script (bash, zsh, fish).");
    println!();
    println!("Environment:");
    println!("  CLOSET_DATA    Wardrobe data directory. Default: ./data/wardrobe.");
    println!();
    println!("Commands:");
    println!("  query                  Filter items against the index.");
    println!("                         Filters: --type --category --color --formality --season --tag --ids --all");
    println!("                         Output: --format json|summary|ids, --detailed for full records.");
    println!("  show <id> [id...]      Show full details for item(s) (--format json|summary|compact).");
    println!("  update <id> --field <dot.path> --value <v>");
    println!("                         Update one field; index entries refresh automatically.");
    println!("  remove <id>            Remove an item from both stores.");
    println!("  mark-worn <id> [id...] [--date <rfc3339>]");
    println!("                         Increment wearCount and set lastWorn.");
    println!("  check                  Audit item store / index consistency.");
    println!();
    println!("Examples:");
    println!("  closet query --type tops --formality 5-7 --season summer");
    println!("  closet query --category \"button-up shirt\" --color navy --format summary");
    println!("  closet show item_20251004_001 --format compact");
    println!("  closet update item_20251004_001 --field metadata.formality --value 7");
    println!("  closet mark-worn item_20251004_001 item_20251004_002");
}
