use std::collections::BTreeMap;
use std::io::IsTerminal;

use anyhow::Context;
use basisgen::lie::{parse_algebra, parse_weight, Irrep, Statistics};
use basisgen::{smeft, Eft, EftOptions, Model, NoProgress, Progress, TracingProgress};
use clap::{Args, Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Registry};

#[derive(Parser)]
#[command(author, version, about = "Count the independent operators of an effective field theory")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Count the invariant operators of each field content
    Invariants(QueryArgs),

    /// List the operators transforming in each irrep and charge
    Covariants(QueryArgs),

    /// Decompose a tensor product or a power of irreps
    Product(ProductArgs),
}

#[derive(Args)]
struct QueryArgs {
    /// Model name or JSON file. Uses the Standard Model EFT when omitted
    model: Option<String>,

    /// Maximal operator dimension
    #[arg(short, long, default_value_t = 6)]
    dimension: i64,

    /// Number of fermion flavors of the Standard Model EFT
    #[arg(short, long, default_value_t = 1)]
    flavors: usize,

    /// Keep operators related by the equations of motion
    #[arg(long)]
    no_eom: bool,

    /// Only report operators of exactly the maximal dimension
    #[arg(long)]
    exact_dimension: bool,

    /// Group the invariants by field classes
    #[arg(long)]
    by_classes: bool,

    /// Print the result as JSON
    #[arg(long)]
    json: bool,

    /// Minimal percentage between two progress reports. 0 disables them
    #[arg(long, default_value_t = 2)]
    progress_step: usize,
}

#[derive(Args)]
struct ProductArgs {
    /// Algebra, e.g. "SU3 x SU2" or "A2 + A1"
    algebra: String,

    /// Highest weight of the first irrep
    first: String,

    /// Highest weight of the second irrep. Without it, the first irrep is raised to a power
    second: Option<String>,

    /// Exponent of the power
    #[arg(short, long, default_value_t = 2)]
    exponent: usize,

    /// Use antisymmetric powers
    #[arg(long)]
    fermion: bool,
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_target(false)
        .with_ansi(std::io::stderr().is_terminal())
        .with_writer(std::io::stderr);
    Registry::default().with(filter).with(fmt_layer).init();
}

fn load(args: &QueryArgs) -> anyhow::Result<(Eft, BTreeMap<String, String>)> {
    match &args.model {
        Some(name) => {
            let model = Model::load(name)?;
            Ok((model.eft, model.classes))
        }
        None => Ok((smeft::smeft(args.flavors)?, smeft::field_classes())),
    }
}

fn options(args: &QueryArgs) -> EftOptions {
    EftOptions {
        use_eom: !args.no_eom,
        ignore_lower_dimensions: args.exact_dimension,
    }
}

fn progress(args: &QueryArgs) -> Box<dyn Progress> {
    if args.progress_step == 0 {
        Box::new(NoProgress)
    } else {
        Box::new(TracingProgress::new(args.progress_step))
    }
}

fn invariants(args: &QueryArgs) -> anyhow::Result<()> {
    let (eft, classes) = load(args)?;
    let invariants =
        eft.invariants_with_progress(args.dimension, options(args), progress(args).as_mut())?;
    if args.json {
        println!("{:#}", invariants.to_json());
        return Ok(());
    }
    if args.by_classes {
        println!("{}", invariants.show_by_classes(&classes));
    } else {
        println!("{invariants}");
    }
    println!("Number of operators: {}", invariants.count());
    Ok(())
}

fn covariants(args: &QueryArgs) -> anyhow::Result<()> {
    let (eft, _) = load(args)?;
    let covariants =
        eft.covariants_with_progress(args.dimension, options(args), progress(args).as_mut())?;
    if args.json {
        println!("{:#}", covariants.to_json());
    } else {
        println!("{covariants}");
    }
    Ok(())
}

fn product(args: &ProductArgs) -> anyhow::Result<()> {
    let algebra = parse_algebra(&args.algebra)?;
    let irrep = |code: &str| -> anyhow::Result<Irrep> {
        Irrep::new(algebra.clone(), parse_weight(code)?)
            .with_context(|| format!("Invalid irrep '{code}' for {algebra}"))
    };
    let first = irrep(&args.first)?;
    let result = match &args.second {
        Some(second) => first.multiply(&irrep(second)?)?,
        None => {
            let statistics = if args.fermion {
                Statistics::Fermion
            } else {
                Statistics::Boson
            };
            first.power(args.exponent, statistics)?
        }
    };
    println!("{result}");
    Ok(())
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing();

    match &cli.command {
        Command::Invariants(args) => invariants(args),
        Command::Covariants(args) => covariants(args),
        Command::Product(args) => product(args),
    }
}
