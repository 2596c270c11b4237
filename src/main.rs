use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, ValueEnum};

use lumen::pipeline::Pipeline;

#[derive(Parser)]
#[command(name = "lumen", about = "Check and evaluate a lumen module")]
struct Cli {
    /// Source file containing a single top-level module
    path: PathBuf,

    /// Fully qualified name of the definition to evaluate
    #[arg(long, default_value = "Main.main")]
    entry: String,

    /// Stop after this stage and print its result
    #[arg(long, value_enum, default_value_t = Stage::All)]
    stage: Stage,

    /// Evaluate the parsed module without resolution or type checking
    #[arg(long)]
    raw: bool,
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Stage {
    Tokens,
    Parse,
    Resolve,
    Types,
    Eval,
    All,
}

fn init_tracing() {
    use tracing_subscriber::{EnvFilter, fmt, prelude::*};

    // Only initialize if RUST_LOG is set
    if std::env::var("RUST_LOG").is_ok() {
        tracing_subscriber::registry()
            .with(
                fmt::layer()
                    .with_writer(std::io::stderr)
                    .with_target(true)
                    .with_level(true),
            )
            .with(EnvFilter::from_default_env())
            .init();
    }
}

fn main() -> anyhow::Result<()> {
    init_tracing();
    let cli = Cli::parse();

    let source = std::fs::read_to_string(&cli.path)
        .with_context(|| format!("failed to read {}", cli.path.display()))?;
    let pipeline = Pipeline::default();

    match cli.stage {
        Stage::Tokens => {
            let tokens = pipeline.tokens(&source)?;
            let rendered: Vec<String> = tokens.iter().map(ToString::to_string).collect();
            println!("{}", rendered.join(" "));
        }
        Stage::Parse => print!("{}", pipeline.parse(&source)?),
        Stage::Resolve => print!("{}", pipeline.resolve(&source)?),
        Stage::Types => print!("{}", pipeline.check(&source)?.1),
        Stage::Eval | Stage::All if cli.raw => {
            let entry = cli.entry.rsplit('.').next().unwrap_or(&cli.entry);
            println!("{}", pipeline.run_raw(&source, entry)?);
        }
        Stage::Eval => {
            let module = pipeline.resolve(&source)?;
            let value = lumen::interpreter::evaluate_named(&module, &pipeline.primops, &cli.entry)?;
            println!("{value}");
        }
        Stage::All => println!("{}", pipeline.run(&source, &cli.entry)?),
    }

    Ok(())
}
