//! bimstep CLI - write IFC building models as STEP files
//!
//! `demo` exports the bundled sample project; `describe` and `types` show the
//! resolved record layouts of the bundled IFC4 types.

use std::path::PathBuf;

use anyhow::{bail, Result};
use bimstep_model::{descriptor_for, ifc, Model, ValueKind};
use bimstep_step::{write_step, InverseFailurePolicy, Mode};
use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::EnvFilter;

mod config;

use config::Config;

#[derive(Parser)]
#[command(name = "bimstep")]
#[command(about = "Write IFC building models as ISO 10303-21 STEP files", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Export the bundled sample project (one building, one wall)
    Demo {
        /// Output file (.ifc)
        output: PathBuf,
        /// TOML file with [header] and [writer] tables
        #[arg(short, long)]
        config: Option<PathBuf>,
        /// Use a worker pool of this size (0 = one per core)
        #[arg(short, long, conflicts_with = "sequential")]
        threads: Option<usize>,
        /// Traverse on the calling thread
        #[arg(long)]
        sequential: bool,
        /// Log and skip failing inverse-attribute entities instead of aborting
        #[arg(long)]
        skip_failed_inverses: bool,
    },
    /// Print the record layout of a bundled entity type
    Describe {
        /// Type name, any case (IfcWall, IFCWALL)
        type_name: String,
    },
    /// List the bundled entity types
    Types,
}

fn main() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Demo {
            output,
            config,
            threads,
            sequential,
            skip_failed_inverses,
        } => {
            let mut config = match config {
                Some(path) => Config::load(&path)?,
                None => Config::default(),
            };
            if let Some(threads) = threads {
                config.writer.mode = Mode::Parallel { threads };
            }
            if sequential {
                config.writer.mode = Mode::Sequential;
            }
            if skip_failed_inverses {
                config.writer.inverse_failure = InverseFailurePolicy::LogAndSkip;
            }
            run_demo(&output, config)?;
        }
        Commands::Describe { type_name } => {
            describe(&type_name)?;
        }
        Commands::Types => {
            for ty in ifc::ALL_TYPES {
                let marker = if ty.is_abstract { " (abstract)" } else { "" };
                println!("{}{}", ty.name, marker);
            }
        }
    }

    Ok(())
}

fn run_demo(output: &PathBuf, config: Config) -> Result<()> {
    let mut model = Model::new();
    let sample = ifc::sample::simple_wall_project(&mut model)?;

    let mut header = config.header;
    if header.name.is_empty() {
        if let Some(name) = output.file_name() {
            header.name = name.to_string_lossy().into_owned();
        }
    }

    let summary = write_step(&model, sample.project, &header, output, config.writer)?;
    info!(
        records = summary.records,
        skipped = summary.skipped_inverse,
        "export finished"
    );
    println!(
        "Wrote {} records to {} (project is #{})",
        summary.records,
        output.display(),
        summary.root_id
    );
    Ok(())
}

fn describe(type_name: &str) -> Result<()> {
    let Some(ty) = ifc::type_by_name(type_name) else {
        bail!("Unknown entity type: {}", type_name);
    };
    let descriptor = descriptor_for(ty)?;

    println!("{} ({})", descriptor.type_name(), descriptor.tag());
    if let Some(parent) = ty.supertype {
        println!("  subtype of {}", parent.name);
    }
    if ty.is_abstract {
        println!("  abstract");
    }
    println!("forward:");
    for attr in descriptor.forward() {
        let mut notes = Vec::new();
        if attr.derived {
            notes.push("derived");
        }
        if attr.kind == ValueKind::Select {
            notes.push("select");
        }
        let notes = if notes.is_empty() {
            String::new()
        } else {
            format!(" [{}]", notes.join(", "))
        };
        println!("  {:>2} {} ({}){}", attr.order, attr.name, attr.declared_in, notes);
    }
    if !descriptor.inverse().is_empty() {
        println!("inverse:");
        for inv in descriptor.inverse() {
            println!("     {} ({})", inv.name, inv.declared_in);
        }
    }
    Ok(())
}
