//! docdelta - structural diff, patch and set algebra CLI tool
//!
//! Reads JSON documents (or YAML, for `.yaml`/`.yml` files) and prints the
//! result as JSON, or YAML with `--yaml`. Set `RUST_LOG=docdelta=debug` to
//! trace the operations.

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Args, Parser, Subcommand, ValueEnum};
use docdelta::patch::{apply_fwd, apply_rev, diff, render, Patch};
use docdelta::setops::{difference, intersection, topo_difference, topo_intersection, union, Options};
use docdelta::value::{self, Value};
use docdelta::walk::walk;
use docdelta::DecodeError;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "docdelta", version, about = "Structural diff, patch and set algebra for JSON/YAML documents")]
struct Cli {
    /// Output location. Use '-' for stdout
    #[arg(short, long, default_value = "-", global = true)]
    output: String,

    /// Write YAML instead of JSON
    #[arg(long, global = true)]
    yaml: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Compute the patch that turns LHS into RHS
    Diff {
        #[arg(long)]
        lhs: PathBuf,
        #[arg(long)]
        rhs: PathBuf,
        /// Print the indented debug tree instead of the serialized patch
        #[arg(long)]
        render: bool,
    },
    /// Apply a patch produced by `diff` to a document
    Apply {
        #[arg(long)]
        patch: PathBuf,
        file: PathBuf,
        /// Apply the patch backwards, turning RHS back into LHS
        #[arg(long)]
        reverse: bool,
    },
    /// Everything held by either document
    Union(SetArgs),
    /// What both documents hold in common
    Intersection(SetArgs),
    /// LHS with everything matched by RHS removed
    Difference(SetArgs),
    /// Every position both documents occupy
    TopoIntersection(SetArgs),
    /// LHS with every position RHS occupies removed
    TopoDifference(SetArgs),
    /// List every node of a document with its path
    Walk { file: PathBuf },
}

#[derive(Debug, Args)]
struct SetArgs {
    #[arg(long)]
    lhs: PathBuf,
    #[arg(long)]
    rhs: PathBuf,
    /// How conflicting leaves are settled
    #[arg(long, value_enum)]
    resolve: Option<Resolve>,
    /// Fail when RHS holds content LHS does not
    #[arg(long)]
    must_subtract: bool,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Resolve {
    First,
    Second,
    Pair,
    PairIfUnequal,
}

impl SetArgs {
    fn options(&self) -> Options {
        let mut opts = match self.resolve {
            Some(Resolve::First) => Options::RESOLVE_FIRST,
            Some(Resolve::Second) => Options::RESOLVE_SECOND,
            Some(Resolve::Pair) => Options::PAIR_ALWAYS,
            Some(Resolve::PairIfUnequal) => Options::PAIR_IF_UNEQUAL,
            None => Options::empty(),
        };
        if self.must_subtract {
            opts |= Options::MUST_SUBTRACT;
        }
        opts
    }
}

type SetOp = fn(&Value, &Value, Options) -> docdelta::Result<Value>;

fn main() -> ExitCode {
    let cli = Cli::parse();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    if let Err(e) = run(cli) {
        eprintln!("Error: {}", e);
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let mut output: Box<dyn Write> = if cli.output == "-" {
        Box::new(io::stdout())
    } else {
        Box::new(
            fs::File::create(&cli.output)
                .map_err(|e| format!("Failed to create output file {:?}: {}", cli.output, e))?,
        )
    };

    match cli.command {
        Command::Diff { lhs, rhs, render: as_tree } => {
            let patch = diff(&load(&lhs)?, &load(&rhs)?)?;
            if as_tree {
                writeln!(output, "{}", render(&patch))?;
            } else if cli.yaml {
                write!(output, "{}", serde_yaml::to_string(&patch)?)?;
            } else {
                writeln!(output, "{}", serde_json::to_string_pretty(&patch)?)?;
            }
        }
        Command::Apply { patch, file, reverse } => {
            let patch = load_patch(&patch)?;
            let doc = load(&file)?;
            let result = if reverse {
                apply_rev(&patch, &doc)?
            } else {
                apply_fwd(&patch, &doc)?
            };
            write_value(&mut output, &result, cli.yaml)?;
        }
        Command::Union(args) => set_op(union, &args, &mut output, cli.yaml)?,
        Command::Intersection(args) => set_op(intersection, &args, &mut output, cli.yaml)?,
        Command::Difference(args) => set_op(difference, &args, &mut output, cli.yaml)?,
        Command::TopoIntersection(args) => set_op(topo_intersection, &args, &mut output, cli.yaml)?,
        Command::TopoDifference(args) => set_op(topo_difference, &args, &mut output, cli.yaml)?,
        Command::Walk { file } => {
            let mut doc = load(&file)?;
            let mut lines = Vec::new();
            walk(&mut doc, |pos| -> docdelta::Result<()> {
                let node = pos.value();
                if node.is_container() {
                    lines.push(format!("{} {}", pos.path(), node.kind()));
                } else {
                    lines.push(format!("{} {} {}", pos.path(), node.kind(), node));
                }
                Ok(())
            })?;
            for line in lines {
                writeln!(output, "{}", line)?;
            }
        }
    }

    Ok(())
}

fn set_op(
    op: SetOp,
    args: &SetArgs,
    output: &mut dyn Write,
    yaml: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let lhs = load(&args.lhs)?;
    let rhs = load(&args.rhs)?;
    let result = op(&lhs, &rhs, args.options())?;
    write_value(output, &result, yaml)
}

fn is_yaml(path: &Path) -> bool {
    matches!(
        path.extension().and_then(|ext| ext.to_str()),
        Some("yaml") | Some("yml")
    )
}

fn load(path: &Path) -> Result<Value, DecodeError> {
    if is_yaml(path) {
        value::from_yaml(&fs::read_to_string(path)?)
    } else {
        value::from_file(path)
    }
}

fn load_patch(path: &Path) -> Result<Patch, Box<dyn std::error::Error>> {
    let content = fs::read_to_string(path)
        .map_err(|e| format!("Failed to read patch file {:?}: {}", path, e))?;
    let patch = if is_yaml(path) {
        serde_yaml::from_str(&content)?
    } else {
        serde_json::from_str(&content)?
    };
    Ok(patch)
}

fn write_value(output: &mut dyn Write, doc: &Value, yaml: bool) -> Result<(), Box<dyn std::error::Error>> {
    if yaml {
        write!(output, "{}", value::to_yaml(doc)?)?;
    } else {
        writeln!(output, "{}", value::to_json_pretty(doc)?)?;
    }
    Ok(())
}
