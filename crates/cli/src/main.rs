use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use serde_json::Value;
use tracing::{debug, info};

use afcore_content::ContentTree;
use afcore_models::{DataTableExport, DataTableField, ModelFactory};

mod config;

use config::ExportSettings;

/// Export adaptive form components from JSON content.
#[derive(Debug, Parser)]
#[command(name = "afcore", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Print the export payload of a component node
    Export {
        #[command(flatten)]
        node: NodeArgs,
        /// Print single-line JSON regardless of settings
        #[arg(long)]
        compact: bool,
    },
    /// Print the data-cmp-* attributes a data table template renders
    Attributes {
        #[command(flatten)]
        node: NodeArgs,
    },
    /// Print the JSON schema of the data table export payload
    Schema,
}

#[derive(Debug, Args)]
struct NodeArgs {
    /// JSON content file
    #[arg(long)]
    content: PathBuf,
    /// Absolute path of the node, or a path relative to the mount root
    #[arg(long)]
    path: String,
    /// Path the content file is mounted at
    #[arg(long)]
    root: Option<String>,
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();
    let settings = ExportSettings::load().context("load export settings")?;
    debug!(?settings, "resolved export settings");

    let output = match cli.command {
        Command::Export { node, compact } => {
            let tree = load_tree(&node, &settings)?;
            let payload = export_node(&tree, &node.path, &ModelFactory::with_defaults())?;
            render(&payload, settings.pretty && !compact)?
        }
        Command::Attributes { node } => {
            let tree = load_tree(&node, &settings)?;
            let (attributes, refresh) = data_table_attributes(&tree, &node.path)?;
            if let Some(period) = refresh {
                info!(seconds = period.as_secs(), "client view polls the data source");
            }
            render(&attributes, settings.pretty)?
        }
        Command::Schema => {
            let schema = schemars::schema_for!(DataTableExport);
            render(&serde_json::to_value(&schema)?, true)?
        }
    };
    println!("{output}");
    Ok(())
}

fn init_tracing() {
    let filter = std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into());
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

fn load_tree(node: &NodeArgs, settings: &ExportSettings) -> Result<ContentTree> {
    let mount = node.root.as_deref().unwrap_or(&settings.content_root);
    ContentTree::from_path(&node.content, mount)
        .with_context(|| format!("load content {} at {}", node.content.display(), mount))
}

fn export_node(tree: &ContentTree, path: &str, factory: &ModelFactory) -> Result<Value> {
    let resource = tree.require(path)?;
    let model = factory.adapt(resource)?;
    model.export().with_context(|| format!("export {}", resource.path()))
}

/// Template attributes of a data table node plus the polling period the
/// client view derives from them.
fn data_table_attributes(tree: &ContentTree, path: &str) -> Result<(Value, Option<Duration>)> {
    let resource = tree.require(path)?;
    let table = DataTableField::adapt(resource)?;
    Ok((serde_json::to_value(table.data_attributes())?, table.auto_refresh()))
}

fn render(value: &Value, pretty: bool) -> Result<String> {
    let text = if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    Ok(text)
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    const CONTENT: &str = r#"{
        "orders": {
            "sling:resourceType": "core/fd/components/form/datatable/v1/datatable",
            "name": "orders",
            "dataSourceType": "url",
            "dataSource": "/api/orders.json",
            "pageSize": "25"
        },
        "live": {
            "sling:resourceType": "core/fd/components/form/datatable/v1/datatable",
            "dataSourceType": "url",
            "dataSource": "/api/live.json",
            "refreshInterval": 30
        },
        "notes": {
            "sling:resourceType": "core/fd/components/form/textinput/v1/textinput"
        }
    }"#;

    fn tree() -> ContentTree {
        ContentTree::from_json_str(CONTENT, "/content/forms").expect("load content")
    }

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_export_arguments() {
        let cli = Cli::try_parse_from([
            "afcore", "export", "--content", "forms.json", "--path", "orders", "--root", "/content/forms", "--compact",
        ])
        .expect("parse export");
        match cli.command {
            Command::Export { node, compact } => {
                assert!(compact);
                assert_eq!(node.path, "orders");
                assert_eq!(node.root.as_deref(), Some("/content/forms"));
            }
            other => panic!("expected export, got {other:?}"),
        }
    }

    #[test]
    fn exports_bound_node() {
        let payload = export_node(&tree(), "/content/forms/orders", &ModelFactory::with_defaults()).expect("export");
        assert_eq!(payload["pageSize"], 25);
        assert_eq!(payload["dataSourceType"], "url");
        assert_eq!(payload["fieldType"], "data-table");
    }

    #[test]
    fn export_reports_unbound_and_missing_nodes() {
        let factory = ModelFactory::with_defaults();
        let unbound = export_node(&tree(), "notes", &factory).unwrap_err();
        assert!(unbound.to_string().contains("textinput"), "{unbound}");
        let missing = export_node(&tree(), "absent", &factory).unwrap_err();
        assert!(missing.to_string().contains("absent"), "{missing}");
    }

    #[test]
    fn attributes_render_as_json_object() {
        let (attributes, refresh) = data_table_attributes(&tree(), "orders").expect("attributes");
        assert_eq!(refresh, None);
        assert_eq!(attributes["data-cmp-datasource"], "/api/orders.json");
        assert_eq!(attributes["data-cmp-pagesize"], "25");
        let compact = render(&attributes, false).expect("render");
        assert!(!compact.contains('\n'));
    }

    #[test]
    fn attributes_report_polling_period_of_url_sources() {
        let (attributes, refresh) = data_table_attributes(&tree(), "/content/forms/live").expect("attributes");
        assert_eq!(attributes["data-cmp-refreshinterval"], "30");
        assert_eq!(refresh, Some(Duration::from_secs(30)));
    }
}
