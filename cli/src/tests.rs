use super::*;
use clap::CommandFactory;
use std::collections::BTreeMap;
use std::io::Cursor;
use sysfont_core::alias::default_alias_groups;
use sysfont_core::discovery::{RawFontEntry, StaticDiscovery};
use sysfont_core::normalize::StyleHint;
use tempfile::tempdir;

fn record(family: &str, alias_of: Option<&str>, variants: &[&str]) -> FamilyRecord {
    FamilyRecord {
        family: family.to_string(),
        alias_of: alias_of.map(str::to_string),
        variants: variants
            .iter()
            .map(|v| (v.to_string(), PathBuf::from(format!("/fonts/{family}-{v}.ttf"))))
            .collect::<BTreeMap<_, _>>(),
    }
}

fn sample_fonts() -> SystemFonts {
    SystemFonts::new(StaticDiscovery::new([
        RawFontEntry::new("Verdana", "/fonts/verdana.ttf", StyleHint::Fontconfig("Regular".into())),
        RawFontEntry::new("Georgia Italic (TrueType)", "/fonts/georgiai.ttf", StyleHint::Embedded),
    ]))
    .with_alias_groups(default_alias_groups())
}

fn run_to_string(f: impl FnOnce(&mut Cursor<Vec<u8>>) -> Result<()>) -> String {
    let mut buf = Cursor::new(Vec::new());
    f(&mut buf).expect("command");
    String::from_utf8(buf.into_inner()).expect("utf8")
}

#[test]
fn parses_list_args_and_global_flags() {
    let cli = Cli::try_parse_from([
        "sysfont", "list", "-n", "^sans", "--columns", "--color", "always", "--log-level", "debug",
    ])
    .expect("parse cli");

    assert_eq!(cli.log_level, Some(LogLevelArg::Debug));
    let Command::List(args) = cli.command else {
        panic!("expected list");
    };
    assert_eq!(args.name_patterns, vec!["^sans"]);
    assert!(args.columns);
    assert_eq!(args.color, ColorChoice::Always);
}

#[test]
fn json_and_ndjson_conflict() {
    let parse = Cli::try_parse_from(["sysfont", "list", "--json", "--ndjson"]);
    assert!(parse.is_err());
}

#[test]
fn match_and_resolve_need_a_name() {
    assert!(Cli::try_parse_from(["sysfont", "match"]).is_err());
    assert!(Cli::try_parse_from(["sysfont", "resolve", "--bold"]).is_err());
}

#[test]
fn resolve_defaults_to_twelve_points() {
    let cli = Cli::try_parse_from(["sysfont", "resolve", "Arial", "serif", "-b"]).expect("parse");
    let Command::Resolve(args) = cli.command else {
        panic!("expected resolve");
    };
    assert_eq!(args.size, 12.0);
    assert!(args.bold && !args.italic);
    assert_eq!(args.names, vec!["Arial", "serif"]);
}

#[test]
fn log_level_maps_to_filter() {
    assert_eq!(LogLevelArg::Off.to_level_filter(), log::LevelFilter::Off);
    assert_eq!(LogLevelArg::Trace.to_level_filter(), log::LevelFilter::Trace);
}

#[test]
fn invalid_regex_returns_error() {
    assert!(compile_patterns(&["(".to_string()]).is_err());
}

#[test]
fn name_patterns_filter_records() {
    let records = vec![
        record("arial", None, &["regular"]),
        record("sans", Some("arial"), &["regular"]),
        record("serif", Some("times"), &[]),
    ];
    let patterns = compile_patterns(&["^s".to_string()]).expect("patterns");

    let kept: Vec<String> = filter_records(records, &patterns)
        .into_iter()
        .map(|r| r.family)
        .collect();
    assert_eq!(kept, vec!["sans", "serif"]);
}

#[test]
fn plain_output_marks_aliases() {
    let records = vec![record("arial", None, &["regular"]), record("sans", Some("arial"), &[])];

    let output = run_to_string(|buf| write_plain(&records, buf, false));
    assert_eq!(output, "arial\nsans -> arial\n");
}

#[test]
fn columns_align_targets() {
    let records = vec![
        record("arial", None, &["bold", "regular"]),
        record("monospace", Some("couriernew"), &["regular"]),
    ];

    let output = run_to_string(|buf| write_columns(&records, buf, false));
    let lines: Vec<&str> = output.lines().collect();
    assert_eq!(lines.len(), 2);
    assert_eq!(lines[0].find('-'), lines[1].find('-'));
    assert!(lines[0].ends_with("bold,regular"));
}

#[test]
fn color_choice_is_applied() {
    let records = vec![record("arial", None, &[])];

    let output = run_to_string(|buf| write_plain(&records, buf, true));
    assert!(output.contains("\u{1b}[36m"));
}

#[test]
fn list_json_contains_aliases() {
    let fonts = sample_fonts();
    let args = ListArgs {
        name_patterns: vec!["^(sans|verdana)$".to_string()],
        json: true,
        ndjson: false,
        columns: false,
        color: ColorChoice::Never,
    };

    let output = run_to_string(|buf| run_list(&fonts, &args, buf, false));
    let parsed: Vec<FamilyRecord> = serde_json::from_str(&output).expect("json");
    assert_eq!(parsed.len(), 2);
    assert_eq!(parsed[0].family, "sans");
    assert_eq!(parsed[0].alias_of.as_deref(), Some("verdana"));
}

#[test]
fn match_prints_path_or_fails() {
    let fonts = sample_fonts();
    let found = MatchArgs {
        names: vec!["serif".to_string()],
        bold: true,
        italic: false,
    };
    let output = run_to_string(|buf| run_match(&fonts, &found, buf));
    assert_eq!(output.trim(), "/fonts/georgiai.ttf");

    let missing = MatchArgs {
        names: vec!["wingdings".to_string()],
        bold: false,
        italic: false,
    };
    let mut buf = Cursor::new(Vec::new());
    let err = run_match(&fonts, &missing, &mut buf).unwrap_err();
    assert!(err.to_string().contains("wingdings"));
}

#[test]
fn resolve_reports_step_and_synthesis() {
    let fonts = sample_fonts();
    let args = ResolveArgs {
        names: vec!["sans".to_string()],
        size: 10.0,
        bold: true,
        italic: false,
        json: false,
    };

    let output = run_to_string(|buf| run_resolve(&fonts, &args, buf));
    assert!(output.starts_with("/fonts/verdana.ttf\n"));
    assert!(output.contains("family:    verdana (via sans)"));
    assert!(output.contains("step:      regular_style"));
    assert!(output.contains("synthetic: bold"));
}

#[test]
fn resolve_json_falls_back_to_default_font() {
    let fonts = sample_fonts();
    let args = ResolveArgs {
        names: vec!["No Such Font".to_string()],
        size: 12.0,
        bold: false,
        italic: true,
        json: true,
    };

    let output = run_to_string(|buf| run_resolve(&fonts, &args, buf));
    let parsed: serde_json::Value = serde_json::from_str(&output).expect("json");
    assert_eq!(parsed["step"], "default");
    assert_eq!(parsed["font"]["source"]["kind"], "default");
    assert_eq!(parsed["font"]["source"]["value"], "freesansbold.ttf");
    assert_eq!(parsed["font"]["synthetic_italic"], true);
    assert!(parsed.get("family").is_none());
}

#[test]
fn load_config_reads_json_file() {
    let tmp = tempdir().expect("tempdir");
    let path = tmp.path().join("sysfont.json");
    std::fs::write(&path, r#"{"platform": "macos", "default_font": "mine.ttf"}"#).expect("write");

    let config = load_config(Some(path.as_path())).expect("config");
    assert_eq!(config.default_font, "mine.ttf");

    let missing = load_config(Some(tmp.path().join("absent.json").as_path()));
    assert!(missing.is_err());
}

#[test]
fn help_output_includes_global_flags() {
    let mut root = Cli::command();
    root.build();
    let list = root
        .find_subcommand_mut("list")
        .expect("list command present");
    let help = list.render_long_help().to_string();
    assert!(help.contains("--columns"));
    assert!(help.contains("--color <COLOR>"));
    assert!(help.contains("--log-level"));
}
