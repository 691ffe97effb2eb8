use log::{debug, info, warn};

use snafu::{prelude::*, Snafu};
use survey_stats::dashboard::Dashboard;
use survey_stats::explorer::{compute_view, ChartModel};
use survey_stats::insights::{all_insights, Insight, InsightSeries};
use survey_stats::stats::round_to;
use survey_stats::*;

use std::fs;
use std::path::{Path, PathBuf};

use serde_json::json;
use serde_json::Map as JSMap;
use serde_json::Value as JSValue;
use text_diff::print_diff;

use crate::args::Args;
use crate::report::config_reader::*;
use crate::report::io_common::{provider_from_extension, simplify_file_name};

pub mod config_reader;
pub mod io_common;
pub mod io_csv;
pub mod io_excel;

#[derive(Debug, Snafu)]
pub enum ReportError {
    #[snafu(display("Error opening file {path}"))]
    OpeningExcel {
        source: calamine::XlsxError,
        path: String,
    },
    #[snafu(display("The workbook has no worksheet or the worksheet has no row"))]
    EmptyExcel {},
    #[snafu(display("The workbook has no worksheet named {name}"))]
    MissingWorksheet { name: String },
    #[snafu(display("Unexpected cell at line {lineno}: {content}"))]
    ExcelWrongCellType { lineno: u64, content: String },
    #[snafu(display("Error reading file {path}"))]
    OpeningFile {
        source: std::io::Error,
        path: String,
    },
    #[snafu(display("Error writing file {path}"))]
    WritingFile {
        source: std::io::Error,
        path: String,
    },
    #[snafu(display("Error parsing JSON"))]
    ParsingJson { source: serde_json::Error },
    #[snafu(display("The configuration file has no parent directory"))]
    MissingParentDir {},
    #[snafu(display("Unknown field"))]
    UnknownField { source: SurveyErrors },
    #[snafu(display("Unknown input type {provider}, expected csv, xlsx or bundled"))]
    UnknownProvider { provider: String },
    #[snafu(display("The input type {provider} requires a file path"))]
    MissingFilePath { provider: String },

    #[snafu(whatever, display("{message}"))]
    Whatever {
        message: String,
        #[snafu(source(from(Box<dyn std::error::Error>, Some)))]
        source: Option<Box<dyn std::error::Error>>,
    },
}

pub type ReportResult<T> = Result<T, ReportError>;

const BUNDLED: &str = "bundled";

fn counts_to_json(counts: &[CategoryCount]) -> Vec<JSValue> {
    counts
        .iter()
        .map(|c| json!({"name": c.name, "count": c.count}))
        .collect()
}

fn rates_to_json(rates: &[CategoryRate]) -> Vec<JSValue> {
    rates
        .iter()
        .map(|r| {
            json!({
                "name": r.name,
                "percentage": round_to(r.percentage, 1),
                "count": r.count,
                "correct": r.correct
            })
        })
        .collect()
}

fn cross_tab_to_json(tab: &CrossTab) -> JSValue {
    let mut rows: Vec<JSValue> = Vec::new();
    for row in tab.rows.iter() {
        let mut counts: JSMap<String, JSValue> = JSMap::new();
        for (column, count) in row.counts.iter() {
            counts.insert(column.clone(), json!(count));
        }
        rows.push(json!({"name": row.name, "total": row.total(), "counts": counts}));
    }
    json!({"columns": tab.columns(), "rows": rows})
}

fn overview_to_json(d: &Dashboard) -> JSValue {
    let o = &d.overview;
    json!({
        "totalResponses": o.total_responses,
        "correctAnswers": o.correct_answers,
        "knowledgeRate": round_to(o.knowledge_rate, 1),
        "republicans": o.republicans,
        "democrats": o.democrats,
        "independents": o.independents,
        "suburban": o.suburban,
        "urbanRate": round_to(o.urban_rate, 1),
        "tiktokUsers": o.tiktok_users,
        "tiktokRate": round_to(o.tiktok_rate, 1),
    })
}

fn dashboard_to_json(d: &Dashboard) -> JSValue {
    json!({
        "newsSources": rates_to_json(&d.news_sources),
        "parties": counts_to_json(&d.parties),
        "ideologies": counts_to_json(&d.ideologies),
        "parentAlignment": counts_to_json(&d.parent_alignment),
        "knowledgeByParty": rates_to_json(&d.knowledge_by_party),
        "knowledgeByGpa": rates_to_json(&d.knowledge_by_gpa),
        "approval": counts_to_json(&d.approval),
        "approvalByParty": cross_tab_to_json(&d.approval_by_party),
        "electionConfidence": counts_to_json(&d.election_confidence),
        "environment": counts_to_json(&d.environment),
        "environmentByParty": cross_tab_to_json(&d.environment_by_party),
        "trust": counts_to_json(&d.trust),
        "minimumWage": counts_to_json(&d.minimum_wage),
    })
}

fn insight_to_json(insight: &Insight, include_narrative: bool) -> JSValue {
    let series = match &insight.series {
        InsightSeries::Counts(c) => json!({"type": "counts", "data": counts_to_json(c)}),
        InsightSeries::Rates(r) => json!({"type": "rates", "data": rates_to_json(r)}),
        InsightSeries::Stacked(tab) => json!({"type": "stacked", "data": cross_tab_to_json(tab)}),
    };
    let mut figures: JSMap<String, JSValue> = JSMap::new();
    for (name, value) in insight.figures.iter() {
        figures.insert(name.clone(), json!(round_to(*value, 1)));
    }
    let mut js = json!({
        "title": insight.title,
        "description": insight.description,
        "series": series,
        "figures": figures,
    });
    if include_narrative {
        js["narrative"] = json!(insight.narrative);
    }
    js
}

fn view_to_json(x: Field, y: Field, view: &ChartModel) -> JSValue {
    let mut js = match view {
        ChartModel::Scatter(sv) => {
            let points: Vec<JSValue> = sv.points.iter().map(|p| json!({"x": p.x, "y": p.y})).collect();
            let line: Vec<JSValue> = sv
                .line
                .iter()
                .map(|p| json!({"x": round_to(p.x, 2), "y": round_to(p.y, 2)}))
                .collect();
            let regression = match sv.regression {
                Some(reg) => json!({
                    "slope": round_to(reg.slope, 4),
                    "intercept": round_to(reg.intercept, 4)
                }),
                None => JSValue::Null,
            };
            json!({
                "count": sv.count,
                "correlation": round_to(sv.correlation, 3),
                "rSquared": round_to(sv.r_squared, 3),
                "xMean": round_to(sv.x_mean, 2),
                "yMean": round_to(sv.y_mean, 2),
                "xStdDev": round_to(sv.x_std_dev, 2),
                "yStdDev": round_to(sv.y_std_dev, 2),
                "regression": regression,
                "line": line,
                "points": points,
            })
        }
        ChartModel::Rates(rv) => {
            let highest = match rv.highest() {
                Some(h) => json!({"name": h.name, "percentage": round_to(h.percentage, 1)}),
                None => JSValue::Null,
            };
            json!({
                "categories": rv.categories(),
                "count": rv.count,
                "average": round_to(rv.average, 1),
                "overallRate": round_to(rv.overall_rate, 1),
                "highest": highest,
                "rows": rates_to_json(&rv.rows),
            })
        }
        ChartModel::Grouped(gv) => json!({
            "totalResponses": gv.total_responses(),
            "xCategories": gv.x_categories(),
            "yCategories": gv.y_categories(),
            "table": cross_tab_to_json(&gv.table),
        }),
    };
    js["x"] = json!(x.key());
    js["y"] = json!(y.key());
    js["chartType"] = json!(view.chart_type());
    js
}

fn build_summary_js(
    config: &OutputConfig,
    survey: &Survey,
    selections: &[(Field, Field)],
    include_narratives: bool,
) -> JSValue {
    let records = survey.records();
    let d = dashboard::dashboard(records);
    let insights: Vec<JSValue> = all_insights(records)
        .iter()
        .map(|i| insight_to_json(i, include_narratives))
        .collect();
    let explorer: Vec<JSValue> = selections
        .iter()
        .map(|(x, y)| view_to_json(*x, *y, &compute_view(records, *x, *y)))
        .collect();
    json!({
        "config": config,
        "overview": overview_to_json(&d),
        "dashboard": dashboard_to_json(&d),
        "insights": insights,
        "explorer": explorer,
    })
}

/// The input of the report, after merging the command line with the configuration.
#[derive(Eq, PartialEq, Debug, Clone)]
struct ResolvedSource {
    provider: String,
    path: Option<String>,
    excel_worksheet_name: Option<String>,
}

fn resolve_path(root: Option<&Path>, path: &str) -> String {
    match root {
        Some(root_p) if Path::new(path).is_relative() => {
            let p: PathBuf = [root_p, Path::new(path)].iter().collect();
            p.as_path().display().to_string()
        }
        _ => path.to_string(),
    }
}

fn resolve_source(
    args: &Args,
    config: Option<&ReportConfig>,
    root: Option<&Path>,
) -> ReportResult<ResolvedSource> {
    let cds = config.and_then(|c| c.data_source.clone());
    let path = match (&args.input, cds.as_ref().and_then(|ds| ds.file_path.clone())) {
        (Some(p), _) => Some(p.clone()),
        (None, Some(p)) => Some(resolve_path(root, &p)),
        (None, None) => None,
    };
    let provider = match (&args.input_type, &cds, &args.input) {
        (Some(p), _, _) => p.clone(),
        (None, _, Some(p)) => provider_from_extension(p).to_string(),
        (None, Some(ds), None) => ds.provider.clone(),
        (None, None, None) => BUNDLED.to_string(),
    };
    let excel_worksheet_name = args
        .excel_worksheet_name
        .clone()
        .or_else(|| cds.and_then(|ds| ds.excel_worksheet_name));
    let res = ResolvedSource {
        provider,
        path,
        excel_worksheet_name,
    };
    debug!("resolve_source: {:?}", res);
    Ok(res)
}

fn read_survey(source: &ResolvedSource) -> ReportResult<Survey> {
    let file_path = || {
        source.path.clone().context(MissingFilePathSnafu {
            provider: source.provider.clone(),
        })
    };
    match source.provider.as_str() {
        BUNDLED => Ok(load_survey(BUNDLED_CSV)),
        "csv" => io_csv::read_csv_file(&file_path()?),
        "xlsx" => io_excel::read_excel_file(&file_path()?, source.excel_worksheet_name.as_deref()),
        x => UnknownProviderSnafu { provider: x }.fail(),
    }
}

fn resolve_selections(args: &Args, config: Option<&ReportConfig>) -> ReportResult<Vec<(Field, Field)>> {
    if args.x.len() != args.y.len() {
        whatever!(
            "Each --x option needs a --y option, got {} and {}",
            args.x.len(),
            args.y.len()
        )
    }
    if !args.x.is_empty() {
        let mut res: Vec<(Field, Field)> = Vec::new();
        for (x, y) in args.x.iter().zip(args.y.iter()) {
            let xf = x.parse::<Field>().context(UnknownFieldSnafu {})?;
            let yf = y.parse::<Field>().context(UnknownFieldSnafu {})?;
            res.push((xf, yf));
        }
        return Ok(res);
    }
    match config.and_then(|c| c.explorer.as_ref()) {
        Some(sels) => sels.iter().map(|s| s.fields()).collect(),
        None => Ok(vec![(Field::PoliticalParty, Field::PoliticalKnowledge)]),
    }
}

pub fn run_report(args: &Args) -> ReportResult<()> {
    let config: Option<ReportConfig> = match &args.config {
        Some(p) => Some(read_config(p)?),
        None => None,
    };
    info!("run_report: config: {:?}", config);
    let root_p: Option<&Path> = match &args.config {
        Some(p) => Some(Path::new(p.as_str()).parent().context(MissingParentDirSnafu {})?),
        None => None,
    };

    let source = resolve_source(args, config.as_ref(), root_p)?;
    let survey = read_survey(&source)?;
    info!(
        "run_report: {} records from {:?}",
        survey.len(),
        source.path.as_deref().unwrap_or(BUNDLED)
    );
    let selections = resolve_selections(args, config.as_ref())?;

    let output_settings = config.as_ref().map(|c| c.output_settings.clone());
    let source_name = match &source.path {
        Some(p) => simplify_file_name(p),
        None => BUNDLED.to_string(),
    };
    let output_config = OutputConfig {
        report_name: output_settings
            .as_ref()
            .map(|os| os.report_name.clone())
            .unwrap_or_else(|| source_name.clone()),
        survey_date: output_settings.as_ref().and_then(|os| os.survey_date.clone()),
        provider: source.provider.clone(),
        source: source_name,
    };
    let include_narratives = output_settings
        .as_ref()
        .and_then(|os| os.include_narratives)
        .unwrap_or(true);

    // Assemble the final json
    let result_js = build_summary_js(&output_config, &survey, &selections, include_narratives);
    let pretty_js_stats = serde_json::to_string_pretty(&result_js).context(ParsingJsonSnafu {})?;

    let out = match (&args.out, output_settings.and_then(|os| os.output_path)) {
        (Some(p), _) => Some(p.clone()),
        (None, Some(p)) if p == "stdout" => Some(p),
        (None, Some(p)) => Some(resolve_path(root_p, &p)),
        (None, None) => None,
    };
    match out.as_deref() {
        Some("stdout") => {
            println!("{}", pretty_js_stats);
        }
        Some(out_path) => {
            info!("run_report: writing summary to {:?}", out_path);
            fs::write(out_path, &pretty_js_stats).context(WritingFileSnafu { path: out_path })?;
        }
        None if args.reference.is_none() => {
            println!("{}", pretty_js_stats);
        }
        None => {}
    }

    // The reference summary, if provided for comparison
    if let Some(summary_p) = &args.reference {
        let summary_ref = read_summary(summary_p)?;
        let pretty_js_summary_ref =
            serde_json::to_string_pretty(&summary_ref).context(ParsingJsonSnafu {})?;
        if pretty_js_summary_ref != pretty_js_stats {
            warn!("Found differences with the reference summary");
            print_diff(
                pretty_js_summary_ref.as_str(),
                pretty_js_stats.as_ref(),
                "\n",
            );
            whatever!("Difference detected between calculated summary and reference summary")
        }
        info!("run_report: summary matches {:?}", summary_p);
    }

    Ok(())
}

#[cfg(test)]
pub fn run_report_test(test_name: &str) -> ReportResult<()> {
    use clap::Parser;
    let test_dir = format!("{}/tests/data/{}", env!("CARGO_MANIFEST_DIR"), test_name);
    info!("Running test {}", test_name);
    let config_path = format!("{}/{}_config.json", test_dir, test_name);
    let summary_path = format!("{}/{}_expected_summary.json", test_dir, test_name);
    let args = Args::try_parse_from([
        "surveyrpt",
        "--config",
        config_path.as_str(),
        "--reference",
        summary_path.as_str(),
    ])
    .with_whatever_context(|_| "invalid test arguments")?;
    run_report(&args)
}

#[cfg(test)]
pub fn test_wrapper(test_name: &str) {
    let _ = env_logger::builder().is_test(true).try_init();
    if let Err(e) = run_report_test(test_name) {
        eprintln!("An error occured {}", e);
        if let Some(bt) = snafu::ErrorCompat::backtrace(&e) {
            eprintln!("trace: {}", bt);
        }
        panic!("test {} failed: {:?}", test_name, e);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    fn args(cmd: &[&str]) -> Args {
        let mut v = vec!["surveyrpt"];
        v.extend_from_slice(cmd);
        Args::parse_from(v)
    }

    fn temp_path(name: &str) -> String {
        std::env::temp_dir()
            .join(format!("surveyrpt-{}-{}", std::process::id(), name))
            .display()
            .to_string()
    }

    #[test]
    fn small_csv() {
        test_wrapper("small_csv");
    }

    #[test]
    fn small_xlsx() {
        test_wrapper("small_xlsx");
    }

    #[test]
    fn bundled_survey() {
        test_wrapper("bundled_survey");
    }

    #[test]
    fn missing_worksheet() {
        let input = format!(
            "{}/tests/data/small_xlsx/small.xlsx",
            env!("CARGO_MANIFEST_DIR")
        );
        let r = run_report(&args(&[
            "--input",
            input.as_str(),
            "--excel-worksheet-name",
            "Sheet9",
        ]));
        assert!(matches!(r, Err(ReportError::MissingWorksheet { .. })));
    }

    #[test]
    fn bundled_default_selection() {
        let out = temp_path("bundled.json");
        run_report(&args(&["--out", out.as_str()])).unwrap();
        let js = read_summary(&out).unwrap();
        assert_eq!(js["config"]["provider"], json!("bundled"));
        assert_eq!(js["overview"]["totalResponses"], json!(92));
        assert_eq!(js["overview"]["knowledgeRate"], json!(58.7));
        assert_eq!(js["explorer"][0]["chartType"], json!("bar"));
        assert_eq!(js["explorer"][0]["highest"]["name"], json!("Republican"));
        assert_eq!(js["insights"].as_array().unwrap().len(), 5);
        assert!(js["insights"][0]["narrative"].is_string());
        let _ = fs::remove_file(&out);
    }

    #[test]
    fn out_then_reference() {
        let out = temp_path("round.json");
        let cmd = ["--x", "GPA", "--y", "GradeLevel", "--x", "Home", "--y", "Ideology"];
        let mut first = cmd.to_vec();
        first.extend_from_slice(&["--out", out.as_str()]);
        run_report(&args(&first)).unwrap();
        let js = read_summary(&out).unwrap();
        assert_eq!(js["explorer"][0]["chartType"], json!("scatter"));
        assert_eq!(js["explorer"][0]["count"], json!(91));
        assert_eq!(js["explorer"][1]["chartType"], json!("grouped"));

        let mut second = cmd.to_vec();
        second.extend_from_slice(&["--reference", out.as_str()]);
        assert!(run_report(&args(&second)).is_ok());

        // Another selection does not match the saved summary.
        let other = ["--x", "Home", "--y", "PoliticalKnowledge", "--reference", out.as_str()];
        assert!(run_report(&args(&other)).is_err());
        let _ = fs::remove_file(&out);
    }

    #[test]
    fn bad_selections() {
        let r = run_report(&args(&["--x", "GPA"]));
        assert!(matches!(r, Err(ReportError::Whatever { .. })));
        let r = run_report(&args(&["--x", "GPA", "--y", "Shoe"]));
        assert!(matches!(r, Err(ReportError::UnknownField { .. })));
    }

    #[test]
    fn bad_inputs() {
        let r = run_report(&args(&["--input-type", "ods"]));
        assert!(matches!(r, Err(ReportError::UnknownProvider { .. })));
        let r = run_report(&args(&["--input-type", "csv"]));
        assert!(matches!(r, Err(ReportError::MissingFilePath { .. })));
        let r = run_report(&args(&["--input", "/nonexistent/answers.csv"]));
        assert!(matches!(r, Err(ReportError::OpeningFile { .. })));
    }

    #[test]
    fn command_line_overrides_config() {
        let config = ReportConfig {
            output_settings: OutputSettings {
                report_name: "r".to_string(),
                output_path: None,
                survey_date: None,
                include_narratives: None,
            },
            data_source: Some(DataSource {
                provider: "xlsx".to_string(),
                file_path: Some("answers.xlsx".to_string()),
                excel_worksheet_name: Some("Form1".to_string()),
            }),
            explorer: None,
        };
        let root = Path::new("/data");
        let from_config = resolve_source(&args(&[]), Some(&config), Some(root)).unwrap();
        assert_eq!(from_config.provider, "xlsx");
        assert_eq!(from_config.path.as_deref(), Some("/data/answers.xlsx"));
        assert_eq!(from_config.excel_worksheet_name.as_deref(), Some("Form1"));

        let overridden = resolve_source(&args(&["--input", "local.csv"]), Some(&config), Some(root)).unwrap();
        assert_eq!(overridden.provider, "csv");
        assert_eq!(overridden.path.as_deref(), Some("local.csv"));

        let bundled = resolve_source(&args(&[]), None, None).unwrap();
        assert_eq!(bundled.provider, "bundled");
        assert_eq!(bundled.path, None);
    }
}
