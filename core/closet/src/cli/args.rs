//! CLI 引数解析（clap builder）
//!
//! 解析結果はドメインの Command に落とし、ディスパッチは main 側の
//! Runner に集約する。

use clap::builder::ArgAction;
use clap::value_parser;
use clap_complete::Shell;
use common::error::Error;

use crate::domain::{Command, DetailFormat, QueryFormat, QueryRequest};

/// CLI から受け取った実行設定
#[derive(Debug, Clone, PartialEq)]
pub struct RunConfig {
    pub data_dir: Option<String>,
    pub command: Command,
}

/// 解析結果: 実行設定・補完スクリプト生成・clap が描画したヘルプ
#[derive(Debug, Clone)]
pub enum ParseOutcome {
    Run(RunConfig),
    GenerateCompletion(Shell),
    /// サブコマンドの -h など、clap が描画したテキストをそのまま出す
    Rendered(String),
}

fn global_args(cmd: clap::Command) -> clap::Command {
    cmd.disable_help_flag(true)
        .arg(
            clap::Arg::new("help")
                .short('h')
                .long("help")
                .help("Print help")
                .action(ArgAction::SetTrue),
        )
        .arg(
            clap::Arg::new("data-dir")
                .long("data-dir")
                .value_name("directory")
                .help("Wardrobe data directory (default: $CLOSET_DATA or ./data/wardrobe)")
                .num_args(1)
                .global(true),
        )
        .arg(
            clap::Arg::new("generate")
                .long("generate")
                .value_name("shell")
                .help("Generate shell completion script")
                .value_parser(value_parser!(Shell))
                .num_args(1),
        )
}

fn build_query_subcommand() -> clap::Command {
    clap::Command::new("query")
        .about("Filter wardrobe items against the index")
        .arg(
            clap::Arg::new("type")
                .long("type")
                .value_name("type")
                .help("Filter by type (tops, bottoms, shoes, outerwear, accessories)")
                .num_args(1),
        )
        .arg(
            clap::Arg::new("category")
                .long("category")
                .value_name("category")
                .help("Filter by category (e.g. \"button-up shirt\", \"jeans\")")
                .num_args(1),
        )
        .arg(
            clap::Arg::new("color")
                .long("color")
                .value_name("color")
                .help("Filter by primary color (substring match)")
                .num_args(1),
        )
        .arg(
            clap::Arg::new("formality")
                .long("formality")
                .value_name("range")
                .help("Filter by formality range (e.g. \"5-7\" or \"6\")")
                .num_args(1),
        )
        .arg(
            clap::Arg::new("season")
                .long("season")
                .value_name("season")
                .help("Filter by season (spring, summer, fall, winter)")
                .num_args(1),
        )
        .arg(
            clap::Arg::new("tag")
                .long("tag")
                .value_name("tag")
                .help("Filter by tag")
                .num_args(1),
        )
        .arg(
            clap::Arg::new("ids")
                .long("ids")
                .value_name("id")
                .help("Restrict to specific item ID(s)")
                .num_args(1..),
        )
        .arg(
            clap::Arg::new("all")
                .long("all")
                .help("Return all items (no filtering)")
                .action(ArgAction::SetTrue),
        )
        .arg(
            clap::Arg::new("detailed")
                .long("detailed")
                .help("Include full item details (loads the item store)")
                .action(ArgAction::SetTrue),
        )
        .arg(
            clap::Arg::new("format")
                .long("format")
                .value_name("format")
                .help("Output format")
                .value_parser(["json", "summary", "ids"])
                .default_value("json")
                .num_args(1),
        )
}

fn build_show_subcommand() -> clap::Command {
    clap::Command::new("show")
        .about("Show full details for specific item(s)")
        .arg(
            clap::Arg::new("ids")
                .value_name("id")
                .help("Item ID(s) to retrieve")
                .num_args(1..)
                .required(true),
        )
        .arg(
            clap::Arg::new("format")
                .long("format")
                .value_name("format")
                .help("Output format")
                .value_parser(["json", "summary", "compact"])
                .default_value("json")
                .num_args(1),
        )
}

fn build_update_subcommand() -> clap::Command {
    clap::Command::new("update")
        .about("Update a field in an item (dot-notation path)")
        .arg(
            clap::Arg::new("id")
                .value_name("id")
                .help("Item ID to update")
                .num_args(1)
                .required(true),
        )
        .arg(
            clap::Arg::new("field")
                .long("field")
                .value_name("dot.path")
                .help("Field path to update (e.g. metadata.formality)")
                .num_args(1)
                .required(true),
        )
        .arg(
            clap::Arg::new("value")
                .long("value")
                .value_name("value")
                .help("New value (coerced: int, float, bool, else string)")
                .num_args(1)
                .required(true),
        )
}

fn build_clap_command() -> clap::Command {
    global_args(
        clap::Command::new("closet")
            .about("Wardrobe catalog store, index and query tool")
            .subcommand_required(false)
            .disable_help_subcommand(true)
            .subcommand(clap::Command::new("help").about("Display this help message"))
            .subcommand(build_query_subcommand())
            .subcommand(build_show_subcommand())
            .subcommand(build_update_subcommand())
            .subcommand(
                clap::Command::new("remove")
                    .about("Remove an item from both the item store and the index")
                    .arg(
                        clap::Arg::new("id")
                            .value_name("id")
                            .help("Item ID to remove")
                            .num_args(1)
                            .required(true),
                    ),
            )
            .subcommand(
                clap::Command::new("mark-worn")
                    .about("Mark item(s) as worn (increments wearCount, sets lastWorn)")
                    .arg(
                        clap::Arg::new("ids")
                            .value_name("id")
                            .help("Item ID(s) to mark as worn")
                            .num_args(1..)
                            .required(true),
                    )
                    .arg(
                        clap::Arg::new("date")
                            .long("date")
                            .value_name("rfc3339")
                            .help("Wear date (RFC 3339, default: now)")
                            .num_args(1),
                    ),
            )
            .subcommand(
                clap::Command::new("check")
                    .about("Audit item store / index consistency"),
            ),
    )
}

fn query_request(m: &clap::ArgMatches) -> QueryRequest {
    let format = m
        .get_one::<String>("format")
        .and_then(|s| QueryFormat::parse(s))
        .unwrap_or_default();
    QueryRequest {
        item_type: m.get_one::<String>("type").cloned(),
        category: m.get_one::<String>("category").cloned(),
        color: m.get_one::<String>("color").cloned(),
        formality: m.get_one::<String>("formality").cloned(),
        season: m.get_one::<String>("season").cloned(),
        tag: m.get_one::<String>("tag").cloned(),
        ids: m
            .get_many::<String>("ids")
            .map(|v| v.cloned().collect())
            .unwrap_or_default(),
        all: m.get_flag("all"),
        detailed: m.get_flag("detailed"),
        format,
    }
}

fn matches_to_command(matches: &clap::ArgMatches) -> Result<Command, Error> {
    let Some((name, sub)) = matches.subcommand() else {
        return Ok(Command::Help);
    };
    match name {
        "help" => Ok(Command::Help),
        "query" => Ok(Command::Query(query_request(sub))),
        "show" => {
            let ids = sub
                .get_many::<String>("ids")
                .map(|v| v.cloned().collect())
                .unwrap_or_default();
            let format = sub
                .get_one::<String>("format")
                .and_then(|s| DetailFormat::parse(s))
                .unwrap_or_default();
            Ok(Command::Show { ids, format })
        }
        "update" => {
            let id = required_string(sub, "id")?;
            let field = required_string(sub, "field")?;
            let value = required_string(sub, "value")?;
            Ok(Command::Update { id, field, value })
        }
        "remove" => Ok(Command::Remove {
            id: required_string(sub, "id")?,
        }),
        "mark-worn" => {
            let ids = sub
                .get_many::<String>("ids")
                .map(|v| v.cloned().collect())
                .unwrap_or_default();
            Ok(Command::MarkWorn {
                ids,
                date: sub.get_one::<String>("date").cloned(),
            })
        }
        "check" => Ok(Command::Check),
        other => Err(Error::invalid_argument(format!(
            "Command '{}' is not implemented.",
            other
        ))),
    }
}

fn required_string(m: &clap::ArgMatches, name: &str) -> Result<String, Error> {
    m.get_one::<String>(name)
        .cloned()
        .ok_or_else(|| Error::invalid_argument(format!("missing required argument '{}'", name)))
}

/// --data-dir の値を取り出す。global 引数はサブコマンド側の matches へ
/// 伝播するため、サブコマンドがあればそちらを見る。
fn data_dir_from(matches: &clap::ArgMatches) -> Option<String> {
    let deepest = matches
        .subcommand()
        .map(|(_, sub)| sub)
        .unwrap_or(matches);
    deepest.get_one::<String>("data-dir").cloned()
}

/// コマンドラインを解析する。補完生成が要求された場合は
/// ParseOutcome::GenerateCompletion を返す。
pub fn parse_args() -> Result<ParseOutcome, Error> {
    let cmd = build_clap_command();
    let matches = match cmd.try_get_matches() {
        Ok(m) => m,
        Err(e)
            if matches!(
                e.kind(),
                clap::error::ErrorKind::DisplayHelp | clap::error::ErrorKind::DisplayVersion
            ) =>
        {
            return Ok(ParseOutcome::Rendered(e.to_string()));
        }
        Err(e) => return Err(Error::invalid_argument(e.to_string())),
    };

    if let Some(&shell) = matches.get_one::<Shell>("generate") {
        return Ok(ParseOutcome::GenerateCompletion(shell));
    }

    let data_dir = data_dir_from(&matches);
    let command = if matches.get_flag("help") {
        Command::Help
    } else {
        matches_to_command(&matches)?
    };
    Ok(ParseOutcome::Run(RunConfig { data_dir, command }))
}

/// 補完スクリプトを標準出力に出力する。
pub fn print_completion(shell: Shell) {
    let mut cmd = build_clap_command();
    clap_complete::generate(shell, &mut cmd, "closet", &mut std::io::stdout());
}
