//! rptmodel command line interface
//!
//! ```bash
//! # Data sets, libraries and join conditions as seen from the report
//! rptmodel inspect sales.rptdesign
//!
//! # Semantic check, exits non-zero when errors are found
//! rptmodel check shared.rptlibrary --json
//!
//! # Dump an element or structure definition
//! rptmodel defn JoinCondition
//! ```

use anyhow::{Context, bail};
use clap::{Parser, Subcommand};
use rptmodel::{
    Design, DesignSession,
    config::{SessionConfig, discover_config, load_config},
    core::handle::{DataSetHandle, ModuleHandle},
    schema::dictionary::get_dictionary,
};
use serde::Serialize;
use std::{
    path::{Path, PathBuf},
    process::ExitCode,
};
use tracing::{debug, info};

const LIBRARY_EXTENSION: &str = "rptlibrary";

#[derive(Parser)]
#[command(name = "rptmodel")]
#[command(version)]
#[command(about = "Inspect and check report design and library documents")]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Config file (defaults to the nearest rptmodel.toml)
    #[arg(long, short, global = true, env = "RPTMODEL_CONFIG")]
    config: Option<PathBuf>,

    /// Emit JSON instead of text
    #[arg(long, global = true)]
    json: bool,
}

#[derive(Subcommand)]
enum Command {
    /// Show libraries, data sets and join conditions of a document
    Inspect {
        file: PathBuf,
    },

    /// Run the semantic check on a document and its libraries
    Check {
        file: PathBuf,
    },

    /// Show an element or structure definition
    Defn {
        name: String,
    },
}

///
/// DocumentSummary
///

#[derive(Debug, Serialize)]
struct DocumentSummary {
    file: String,
    kind: String,
    libraries: Vec<LibrarySummary>,
    data_sets: Vec<DataSetSummary>,
}

#[derive(Debug, Serialize)]
struct LibrarySummary {
    namespace: String,
    file_name: String,
    loaded: bool,
}

#[derive(Debug, Serialize)]
struct DataSetSummary {
    name: String,
    kind: &'static str,

    #[serde(skip_serializing_if = "Option::is_none")]
    extends: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    data_source: Option<String>,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    data_sets: Vec<String>,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    join_conditions: Vec<JoinSummary>,
}

#[derive(Debug, Serialize)]
struct JoinSummary {
    join_type: Option<String>,
    operator: Option<String>,
    left: Option<String>,
    right: Option<String>,
}

fn main() -> anyhow::Result<ExitCode> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::WARN.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match &cli.command {
        Command::Inspect { file } => {
            let design = open(&session(&cli)?, file)?;
            let summary = summarize(&design);

            if cli.json {
                println!("{}", serde_json::to_string_pretty(&summary)?);
            } else {
                print_summary(&summary);
            }

            Ok(ExitCode::SUCCESS)
        }
        Command::Check { file } => {
            let design = open(&session(&cli)?, file)?;
            let errors = design.check();

            if cli.json {
                let flat: Vec<_> = errors
                    .flatten()
                    .into_iter()
                    .map(|(route, message)| {
                        serde_json::json!({ "route": route, "message": message })
                    })
                    .collect();
                println!("{}", serde_json::to_string_pretty(&flat)?);
            } else if errors.is_empty() {
                println!("{}: ok", file.display());
            } else {
                println!("{errors}");
            }

            Ok(if errors.is_empty() {
                ExitCode::SUCCESS
            } else {
                ExitCode::FAILURE
            })
        }
        Command::Defn { name } => {
            let dict = get_dictionary()?;
            let text = if let Some(defn) = dict.element(name) {
                serde_json::to_string_pretty(defn)?
            } else if let Some(defn) = dict.structure(name) {
                serde_json::to_string_pretty(defn)?
            } else {
                bail!("no element or structure named '{name}'");
            };
            println!("{text}");

            Ok(ExitCode::SUCCESS)
        }
    }
}

fn session(cli: &Cli) -> anyhow::Result<DesignSession> {
    let path = match &cli.config {
        Some(path) => Some(path.clone()),
        None => discover_config(&std::env::current_dir()?),
    };

    let config = match path {
        Some(path) => {
            debug!(config = %path.display(), "loading config");
            load_config(&path).with_context(|| format!("config '{}'", path.display()))?
        }
        None => SessionConfig::default(),
    };

    Ok(DesignSession::new(config))
}

fn open(session: &DesignSession, file: &Path) -> anyhow::Result<Design> {
    let is_library = file.extension().is_some_and(|ext| ext == LIBRARY_EXTENSION);
    info!(file = %file.display(), is_library, "opening");

    let design = if is_library {
        session.open_library(file)
    } else {
        session.open_design(file)
    };

    design.with_context(|| format!("cannot open '{}'", file.display()))
}

fn summarize(design: &Design) -> DocumentSummary {
    let handle = design.handle();

    DocumentSummary {
        file: design.path().display().to_string(),
        kind: handle.kind().to_string(),
        libraries: handle
            .libraries()
            .iter()
            .map(|lib| LibrarySummary {
                namespace: lib.namespace.clone(),
                file_name: lib.file_name.clone(),
                loaded: lib.is_loaded(),
            })
            .collect(),
        data_sets: data_sets(&handle),
    }
}

fn data_sets(handle: &ModuleHandle<'_>) -> Vec<DataSetSummary> {
    handle.data_sets().map(|ds| summarize_data_set(&ds)).collect()
}

fn summarize_data_set(ds: &DataSetHandle<'_>) -> DataSetSummary {
    let joint = ds.as_joint();

    DataSetSummary {
        name: ds.qualified_name(),
        kind: ds.defn_name(),
        extends: ds.extends().map(|parent| parent.qualified_name()),
        data_source: ds.data_source(),
        data_sets: joint.as_ref().map(|j| j.data_sets()).unwrap_or_default(),
        join_conditions: joint
            .map(|j| {
                j.join_conditions()
                    .map(|c| JoinSummary {
                        join_type: c.join_type(),
                        operator: c.join_operator(),
                        left: c.left_data_set(),
                        right: c.right_data_set(),
                    })
                    .collect()
            })
            .unwrap_or_default(),
    }
}

fn print_summary(summary: &DocumentSummary) {
    println!("{} ({})", summary.file, summary.kind);

    for lib in &summary.libraries {
        let state = if lib.loaded { "" } else { " [not loaded]" };
        println!("  library {} = {}{state}", lib.namespace, lib.file_name);
    }

    for ds in &summary.data_sets {
        println!("  {} {}", ds.kind, ds.name);
        if let Some(parent) = &ds.extends {
            println!("    extends {parent}");
        }
        if let Some(source) = &ds.data_source {
            println!("    data source {source}");
        }
        if !ds.data_sets.is_empty() {
            println!("    data sets {}", ds.data_sets.join(", "));
        }
        for join in &ds.join_conditions {
            println!(
                "    join {} {} {} {}",
                join.left.as_deref().unwrap_or("?"),
                join.join_type.as_deref().unwrap_or("?"),
                join.operator.as_deref().unwrap_or("?"),
                join.right.as_deref().unwrap_or("?"),
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rptmodel::MemoryLocator;

    const LIBRARY: &str = include_str!("../../rptmodel/tests/fixtures/new_library.rptlibrary");
    const REPORT: &str = include_str!("../../rptmodel/tests/fixtures/report.rptdesign");

    #[test]
    fn arguments_parse() {
        let cli = Cli::try_parse_from(["rptmodel", "check", "r.rptdesign", "--json"]).unwrap();

        assert!(cli.json);
        assert!(matches!(cli.command, Command::Check { .. }));
        assert!(Cli::try_parse_from(["rptmodel", "defn"]).is_err());
    }

    #[test]
    fn summary_shows_qualified_join_conditions() {
        let session = DesignSession::with_locator(
            SessionConfig::default(),
            MemoryLocator::new().with("new_library.rptlibrary", LIBRARY),
        );
        let design = session.open_design_str("report.rptdesign", REPORT).unwrap();

        let summary = summarize_data_set(&design.handle().find_data_set("Data Set").unwrap());
        assert_eq!(summary.extends.as_deref(), Some("new_library.Data Set"));
        assert_eq!(summary.join_conditions[0].left.as_deref(), Some("new_library.Rev"));

        let json = serde_json::to_value(&summary).unwrap();
        assert_eq!(json["join_conditions"][0]["right"], "new_library.HistUnitsSales");
        assert!(json.get("data_source").is_none());
    }

    #[test]
    fn element_definition_dumps_hooks() {
        let dict = get_dictionary().unwrap();
        let json = serde_json::to_value(dict.element("DataSet").unwrap()).unwrap();

        let hooks = json["methods"].as_array().unwrap();
        let hook = hooks.iter().find(|m| m["name"] == "beforeOpen").unwrap();
        let keys: Vec<_> = hook.as_object().unwrap().keys().cloned().collect();
        assert_eq!(
            keys,
            ["arguments", "display_name_id", "name", "return_type"]
        );
    }
}
