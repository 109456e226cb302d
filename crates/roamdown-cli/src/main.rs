use std::fs;
use std::io::Read;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand, ValueEnum};
use tracing::debug;
use tracing_subscriber::EnvFilter;

use roamdown_config::Config;
use roamdown_engine::{
    Direction, OutlineNode, Page, convert_forest, io as engine_io, parse_outline,
    serialize_markdown, serialize_outline,
};

#[derive(Parser)]
#[command(name = "roamdown", version)]
#[command(about = "Convert between Roam-style outline notes and flat markdown")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Convert a note file (or stdin) between dialects
    Convert {
        /// Input file; reads stdin when omitted
        input: Option<PathBuf>,

        /// Target format (default: config `default_format`, then markdown)
        #[arg(long, value_enum)]
        to: Option<TargetFormat>,

        /// Input format; auto sniffs JSON and otherwise assumes the dialect
        /// opposite the target
        #[arg(long, value_enum, default_value = "auto")]
        from: SourceFormat,

        /// Output file; writes stdout when omitted
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Print the daily-note page title for a date query
    Daily {
        /// today, yesterday, lastweek or YYYY-MM-DD (default: today)
        query: Option<String>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum TargetFormat {
    Roam,
    Markdown,
    Json,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum SourceFormat {
    Auto,
    Roam,
    Markdown,
    Json,
}

/// Which dialect a parsed forest's node text is currently in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Dialect {
    Source,
    Standard,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.command {
        Command::Convert {
            input,
            to,
            from,
            output,
        } => run_convert(input.as_deref(), to, from, output.as_deref()),
        Command::Daily { query } => run_daily(query.as_deref()),
    }
}

fn run_convert(
    input: Option<&Path>,
    to: Option<TargetFormat>,
    from: SourceFormat,
    output: Option<&Path>,
) -> Result<()> {
    let content = read_input(input)?;
    let target = resolve_target(to)?;
    let source = resolve_source(from, input, &content, target);
    debug!(?source, ?target, "converting");

    let (title, forest, dialect) = parse_input(&content, source, input)?;
    let rendered = render_output(title, forest, dialect, target)?;

    match output {
        Some(path) => fs::write(path, rendered)
            .with_context(|| format!("failed to write {}", path.display()))?,
        None => print!("{rendered}"),
    }
    Ok(())
}

fn run_daily(query: Option<&str>) -> Result<()> {
    let today = chrono::Local::now().date_naive();
    let query = query.unwrap_or("today");
    let Some(date) = roamdown_engine::daily::resolve_date_query(query, today) else {
        bail!("not a date query: {query} (expected today, yesterday, lastweek or YYYY-MM-DD)");
    };
    println!("{}", roamdown_engine::daily::daily_note_title(date));
    Ok(())
}

fn read_input(input: Option<&Path>) -> Result<String> {
    match input {
        Some(path) => {
            fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))
        }
        None => {
            let mut content = String::new();
            std::io::stdin()
                .read_to_string(&mut content)
                .context("failed to read stdin")?;
            Ok(content)
        }
    }
}

fn resolve_target(to: Option<TargetFormat>) -> Result<TargetFormat> {
    if let Some(target) = to {
        return Ok(target);
    }
    let configured = Config::load()
        .context("failed to load config")?
        .and_then(|config| config.default_format);
    Ok(match configured.as_deref() {
        Some("roam") => TargetFormat::Roam,
        Some("json") => TargetFormat::Json,
        Some("markdown") | None => TargetFormat::Markdown,
        Some(other) => bail!("unknown default_format in config: {other}"),
    })
}

/// Explicit `--from` wins; otherwise JSON is sniffed from the extension or a
/// leading brace, and plain text is assumed to be the dialect opposite the
/// target (converting to roam implies a markdown input and vice versa).
fn resolve_source(
    from: SourceFormat,
    input: Option<&Path>,
    content: &str,
    target: TargetFormat,
) -> SourceFormat {
    if from != SourceFormat::Auto {
        return from;
    }
    let json_extension = input
        .map(|path| engine_io::detect_kind(path) == engine_io::InputKind::Json)
        .unwrap_or(false);
    if json_extension || content.trim_start().starts_with('{') {
        return SourceFormat::Json;
    }
    match target {
        TargetFormat::Roam => SourceFormat::Markdown,
        TargetFormat::Markdown | TargetFormat::Json => SourceFormat::Roam,
    }
}

fn parse_input(
    content: &str,
    source: SourceFormat,
    input: Option<&Path>,
) -> Result<(Option<String>, Vec<OutlineNode>, Dialect)> {
    match source {
        SourceFormat::Json => {
            let page = engine_io::page_from_json_str(content).context("invalid page JSON")?;
            let title = page.page_text.clone();
            let forest = page.into_outline().context("invalid page block tree")?;
            // Backend JSON carries source-dialect text.
            Ok((Some(title), forest, Dialect::Source))
        }
        SourceFormat::Markdown => {
            let fallback = input
                .and_then(|path| path.file_stem())
                .and_then(|stem| stem.to_str())
                .unwrap_or("Untitled");
            let page = engine_io::page_from_markdown_str(content, fallback);
            let title = page.page_text.clone();
            let forest = page.into_outline().context("invalid page block tree")?;
            Ok((Some(title), forest, Dialect::Standard))
        }
        SourceFormat::Roam => Ok((None, parse_outline(content), Dialect::Source)),
        SourceFormat::Auto => unreachable!("auto is resolved before parsing"),
    }
}

fn render_output(
    title: Option<String>,
    forest: Vec<OutlineNode>,
    dialect: Dialect,
    target: TargetFormat,
) -> Result<String> {
    let into_dialect = |wanted: Dialect, forest: &[OutlineNode]| -> Vec<OutlineNode> {
        match (dialect, wanted) {
            (Dialect::Source, Dialect::Standard) => convert_forest(forest, Direction::ToStandard),
            (Dialect::Standard, Dialect::Source) => convert_forest(forest, Direction::ToSource),
            _ => forest.to_vec(),
        }
    };

    match target {
        TargetFormat::Roam => Ok(serialize_outline(&into_dialect(Dialect::Source, &forest))),
        TargetFormat::Markdown => {
            let body = serialize_markdown(&into_dialect(Dialect::Standard, &forest));
            Ok(match title {
                Some(title) => format!("# {title}\n\n{body}"),
                None => body,
            })
        }
        TargetFormat::Json => {
            let source_forest = into_dialect(Dialect::Source, &forest);
            let page = Page::from_outline(title.unwrap_or_else(|| "Untitled".to_string()), &source_forest);
            engine_io::page_to_json_string(&page).context("failed to render page JSON")
        }
    }
}
