//! sysfont CLI: list, match and resolve installed font families

mod logging;

use std::io::{self, IsTerminal, Write};
use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use clap::{ArgAction, Args, Parser, Subcommand, ValueEnum, ValueHint};
use regex::Regex;
use serde::Serialize;

use sysfont_core::config::DiscoveryConfig;
use sysfont_core::construct::{DescriptorConstructor, FontConstructor, FontDescriptor};
use sysfont_core::matcher::{Resolution, ResolveStep};
use sysfont_core::output::{family_records, write_json_pretty, write_ndjson, FamilyRecord};
use sysfont_core::registry::VariantKey;
use sysfont_core::system::SystemFonts;

/// CLI entrypoint for sysfont.
#[derive(Debug, Parser)]
#[command(name = "sysfont", version, about = "Find installed fonts by family name")]
pub struct Cli {
    /// JSON discovery config (platform, list command, font dirs, alias groups)
    #[arg(long = "config", global = true, value_hint = ValueHint::FilePath)]
    config: Option<PathBuf>,

    /// Log level on stderr (overrides RUST_LOG)
    #[arg(long = "log-level", global = true, value_enum)]
    log_level: Option<LogLevelArg>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// List every family key a request can name
    List(ListArgs),
    /// Print the installed file closest to the requested family and style
    Match(MatchArgs),
    /// Resolve a request the way a font engine would, default font included
    Resolve(ResolveArgs),
}

#[derive(Debug, Args)]
struct ListArgs {
    /// Regex patterns; a family is listed when any of them matches
    #[arg(short = 'n', long = "name", value_hint = ValueHint::Other)]
    name_patterns: Vec<String>,

    /// Emit a single JSON array
    #[arg(long = "json", action = ArgAction::SetTrue, conflicts_with = "ndjson")]
    json: bool,

    /// Emit newline-delimited JSON
    #[arg(long = "ndjson", action = ArgAction::SetTrue)]
    ndjson: bool,

    /// Format output as padded columns
    #[arg(long = "columns", action = ArgAction::SetTrue)]
    columns: bool,

    /// Control colorized output (auto|always|never)
    #[arg(long = "color", default_value_t = ColorChoice::Auto, value_enum)]
    color: ColorChoice,
}

#[derive(Debug, Args)]
struct MatchArgs {
    /// Family names in order of preference; commas split further
    #[arg(required = true, value_hint = ValueHint::Other)]
    names: Vec<String>,

    #[arg(short = 'b', long = "bold", action = ArgAction::SetTrue)]
    bold: bool,

    #[arg(short = 'i', long = "italic", action = ArgAction::SetTrue)]
    italic: bool,
}

#[derive(Debug, Args)]
struct ResolveArgs {
    /// Family names in order of preference; commas split further
    #[arg(required = true, value_hint = ValueHint::Other)]
    names: Vec<String>,

    /// Point size handed to the font engine
    #[arg(short = 's', long = "size", default_value_t = 12.0)]
    size: f32,

    #[arg(short = 'b', long = "bold", action = ArgAction::SetTrue)]
    bold: bool,

    #[arg(short = 'i', long = "italic", action = ArgAction::SetTrue)]
    italic: bool,

    /// Emit the resolution as JSON
    #[arg(long = "json", action = ArgAction::SetTrue)]
    json: bool,
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, ValueEnum)]
enum ColorChoice {
    Auto,
    Always,
    Never,
}

/// Log level argument for CLI
#[derive(Copy, Clone, Debug, Eq, PartialEq, ValueEnum)]
pub enum LogLevelArg {
    Off,
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl LogLevelArg {
    pub fn to_level_filter(self) -> log::LevelFilter {
        match self {
            LogLevelArg::Off => log::LevelFilter::Off,
            LogLevelArg::Error => log::LevelFilter::Error,
            LogLevelArg::Warn => log::LevelFilter::Warn,
            LogLevelArg::Info => log::LevelFilter::Info,
            LogLevelArg::Debug => log::LevelFilter::Debug,
            LogLevelArg::Trace => log::LevelFilter::Trace,
        }
    }
}

/// Parse CLI args and execute the selected command.
pub fn run() -> Result<()> {
    let cli = Cli::parse();
    logging::init(cli.log_level.map(LogLevelArg::to_level_filter));

    let config = load_config(cli.config.as_deref())?;
    let fonts = SystemFonts::from_config(&config);

    let stdout = io::stdout();
    let mut handle = stdout.lock();
    let is_terminal = handle.is_terminal();

    match cli.command {
        Command::List(args) => run_list(&fonts, &args, &mut handle, is_terminal),
        Command::Match(args) => run_match(&fonts, &args, &mut handle),
        Command::Resolve(args) => run_resolve(&fonts, &args, &mut handle),
    }
}

/// Config file (when given) with `SYSFONT_*` environment overrides on top.
fn load_config(path: Option<&Path>) -> Result<DiscoveryConfig> {
    let mut config = match path {
        Some(path) => DiscoveryConfig::from_json_file(path)?,
        None => DiscoveryConfig::default(),
    };
    config
        .apply_env()
        .context("invalid SYSFONT_* environment override")?;
    Ok(config)
}

fn run_list(
    fonts: &SystemFonts,
    args: &ListArgs,
    mut w: impl Write,
    is_terminal: bool,
) -> Result<()> {
    let patterns = compile_patterns(&args.name_patterns)?;
    let records = filter_records(family_records(&fonts.catalog()), &patterns);

    let use_color = match args.color {
        ColorChoice::Always => true,
        ColorChoice::Never => false,
        ColorChoice::Auto => is_terminal,
    };

    if args.ndjson {
        write_ndjson(&records, &mut w)?;
    } else if args.json {
        write_json_pretty(&records, &mut w)?;
    } else if args.columns {
        write_columns(&records, &mut w, use_color)?;
    } else {
        write_plain(&records, &mut w, use_color)?;
    }

    Ok(())
}

fn run_match(fonts: &SystemFonts, args: &MatchArgs, mut w: impl Write) -> Result<()> {
    let path = fonts
        .find_path(&args.names, args.bold, args.italic)
        .ok_or_else(|| anyhow!("no installed font matches: {}", args.names.join(", ")))?;

    writeln!(w, "{}", path.display())?;
    Ok(())
}

fn run_resolve(fonts: &SystemFonts, args: &ResolveArgs, mut w: impl Write) -> Result<()> {
    let resolution = fonts.resolution(&args.names, args.size, args.bold, args.italic);
    let report = ResolveReport::from(resolution);

    if args.json {
        serde_json::to_writer_pretty(&mut w, &report)?;
        writeln!(w)?;
    } else {
        write_report(&report, &mut w)?;
    }
    Ok(())
}

/// What `resolve` prints: the descriptor plus how it was reached.
#[derive(Debug, Serialize)]
struct ResolveReport {
    step: ResolveStep,
    #[serde(skip_serializing_if = "Option::is_none")]
    family: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    alias: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    variant: Option<&'static str>,
    font: FontDescriptor,
}

impl From<Resolution> for ResolveReport {
    fn from(resolution: Resolution) -> Self {
        Self {
            step: resolution.step,
            font: DescriptorConstructor.construct(&resolution.request),
            family: resolution.family,
            alias: resolution.alias,
            variant: resolution.variant.map(VariantKey::label),
        }
    }
}

fn write_report(report: &ResolveReport, mut w: impl Write) -> Result<()> {
    writeln!(w, "{}", report.font.source.display())?;
    if let Some(family) = &report.family {
        match &report.alias {
            Some(alias) => writeln!(w, "  family:    {family} (via {alias})")?,
            None => writeln!(w, "  family:    {family}")?,
        }
    }
    if let Some(variant) = report.variant {
        writeln!(w, "  variant:   {variant}")?;
    }
    writeln!(w, "  step:      {}", report.step.as_str())?;
    writeln!(w, "  size:      {}", report.font.size)?;

    let synthetic: Vec<&str> = [
        (report.font.synthetic_bold, "bold"),
        (report.font.synthetic_italic, "italic"),
    ]
    .into_iter()
    .filter_map(|(on, label)| on.then_some(label))
    .collect();
    if !synthetic.is_empty() {
        writeln!(w, "  synthetic: {}", synthetic.join(", "))?;
    }
    Ok(())
}

fn compile_patterns(patterns: &[String]) -> Result<Vec<Regex>> {
    patterns
        .iter()
        .map(|p| Regex::new(p).with_context(|| format!("invalid regex: {p}")))
        .collect()
}

fn filter_records(records: Vec<FamilyRecord>, patterns: &[Regex]) -> Vec<FamilyRecord> {
    if patterns.is_empty() {
        return records;
    }
    records
        .into_iter()
        .filter(|r| patterns.iter().any(|re| re.is_match(&r.family)))
        .collect()
}

fn write_plain(records: &[FamilyRecord], mut w: impl Write, color: bool) -> Result<()> {
    for record in records {
        let family = apply_color(&record.family, color, AnsiColor::Cyan);
        match &record.alias_of {
            Some(target) => {
                let target = apply_color(target, color, AnsiColor::Yellow);
                writeln!(w, "{family} -> {target}")?;
            }
            None => writeln!(w, "{family}")?,
        }
    }
    Ok(())
}

fn write_columns(records: &[FamilyRecord], mut w: impl Write, color: bool) -> Result<()> {
    let rows: Vec<(String, String, String)> = records
        .iter()
        .map(|r| {
            let target = r
                .alias_of
                .as_ref()
                .map(|t| format!("-> {t}"))
                .unwrap_or_else(|| "-".to_string());
            let variants = r.variants.keys().cloned().collect::<Vec<_>>().join(",");
            (r.family.clone(), target, variants)
        })
        .collect();

    let family_width = rows.iter().map(|r| r.0.len()).max().unwrap_or(0).min(80);
    let target_width = rows.iter().map(|r| r.1.len()).max().unwrap_or(0).min(80);

    for (family, target, variants) in rows {
        let padded_family = format!("{:<family_width$}", family);
        let padded_target = format!("{:<target_width$}", target);
        let rendered_family = apply_color(&padded_family, color, AnsiColor::Cyan);
        let rendered_target = apply_color(&padded_target, color, AnsiColor::Yellow);
        let rendered_variants = apply_color(&variants, color, AnsiColor::Green);

        writeln!(w, "{rendered_family}  {rendered_target}  {rendered_variants}")?;
    }

    Ok(())
}

#[derive(Copy, Clone)]
enum AnsiColor {
    Cyan,
    Yellow,
    Green,
}

fn apply_color(text: &str, color: bool, code: AnsiColor) -> String {
    if !color {
        return text.to_string();
    }

    let code_str = match code {
        AnsiColor::Cyan => "36",
        AnsiColor::Yellow => "33",
        AnsiColor::Green => "32",
    };

    format!("\u{1b}[{}m{}\u{1b}[0m", code_str, text)
}

#[cfg(test)]
mod tests;
