//! Plait CLI entry point.

use std::io::Read;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use rhizome_plait_core::{compile_schema, validate, SchemaObject};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "plait")]
#[command(about = "Compile settable-field schemas into setter/mixin expression trees")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compile a schema and print the expression tree as JSON
    Compile {
        /// Schema file (.json or .toml, or - for JSON on stdin)
        schema: String,

        /// Name of the root declaration (defaults to the file stem)
        #[arg(short, long)]
        name: Option<String>,

        /// Output file (stdout if omitted)
        #[arg(short, long)]
        out: Option<PathBuf>,

        /// Emit compact JSON instead of pretty-printed
        #[arg(long)]
        compact: bool,
    },

    /// Check one or more schemas without compiling them
    Validate {
        /// Schema files
        #[arg(required = true)]
        schemas: Vec<String>,
    },
}

fn main() -> Result<ExitCode, Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(EnvFilter::from_default_env().add_directive("plait=info".parse()?))
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Compile {
            schema,
            name,
            out,
            compact,
        } => {
            let root = load(&schema)?;
            let name = name.unwrap_or_else(|| default_name(&schema));
            let tree = compile_schema(&name, &root)?;
            info!(root = %name, nodes = tree.size(), "compiled schema");

            let json = if compact {
                serde_json::to_string(&tree)?
            } else {
                serde_json::to_string_pretty(&tree)?
            };

            if let Some(out_path) = out {
                if let Some(parent) = out_path.parent() {
                    std::fs::create_dir_all(parent)?;
                }
                std::fs::write(&out_path, &json)?;
                info!("wrote {}", out_path.display());
            } else {
                println!("{}", json);
            }
        }

        Commands::Validate { schemas } => {
            let mut failed = 0;
            for schema in &schemas {
                let result = load(schema)
                    .map_err(|err| err.to_string())
                    .and_then(|root| validate(&root).map_err(|err| err.to_string()));
                match result {
                    Ok(()) => println!("{}: ok", schema),
                    Err(err) => {
                        warn!(schema = %schema, "validation failed");
                        println!("{}: {}", schema, err);
                        failed += 1;
                    }
                }
            }
            if failed > 0 {
                return Ok(ExitCode::FAILURE);
            }
        }
    }

    Ok(ExitCode::SUCCESS)
}

fn load(schema: &str) -> Result<SchemaObject, Box<dyn std::error::Error>> {
    if schema == "-" {
        let mut buf = String::new();
        std::io::stdin().read_to_string(&mut buf)?;
        Ok(SchemaObject::from_json_str(&buf)?)
    } else {
        Ok(SchemaObject::from_file(schema)?)
    }
}

fn default_name(schema: &str) -> String {
    if schema == "-" {
        return "root".to_string();
    }
    Path::new(schema)
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_else(|| "root".to_string())
}
