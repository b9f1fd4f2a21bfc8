use clap::{Args, Parser, Subcommand};
use rfconvert::prelude::{
    convert_nport_to_two_port, convert_two_port_representation, ComplexNumberType, ConvertError,
    NPortOptions, OrderMode, TwoPortOptions,
};
use simple_error::SimpleError;
use std::fs;
use std::io::{self, Read, Write};
use std::path::PathBuf;
use std::str::FromStr;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "rfconvert", about = "Convert Touchstone network-parameter files")]
struct Cli {
    #[command(subcommand)]
    command: CliCommand,
}

#[derive(Subcommand)]
enum CliCommand {
    /// Extract the 2-port between two ports of an N-port file (written as RI)
    Extract(ExtractArgs),
    /// Rewrite a 2-port file in another representation (dB/angle by default)
    Retarget(RetargetArgs),
}

#[derive(Args)]
struct IoArgs {
    /// Input file; stdin when omitted
    input: Option<PathBuf>,
    /// Output file; stdout when omitted
    #[arg(short, long)]
    output: Option<PathBuf>,
    /// Print the conversion summary as JSON on stderr
    #[arg(long)]
    json: bool,
}

#[derive(Args)]
struct ExtractArgs {
    #[command(flatten)]
    io: IoArgs,
    /// Number of ports in the input file
    #[arg(short = 'n', long)]
    nports: usize,
    /// First port of the pair (1-indexed)
    #[arg(short = 'a', long, default_value_t = 1)]
    port_a: usize,
    /// Second port of the pair (1-indexed)
    #[arg(short = 'b', long, default_value_t = 2)]
    port_b: usize,
    /// Matrix layout of the data: col, row or auto
    #[arg(long, default_value = "col")]
    ordering: OrderMode,
    /// Read the data as RI, MA or DB regardless of the option line
    #[arg(long)]
    format: Option<ComplexNumberType>,
    /// Print both readings of the first complete record on stderr
    #[arg(long)]
    diagnostics: bool,
}

#[derive(Args)]
struct RetargetArgs {
    #[command(flatten)]
    io: IoArgs,
    /// Input representation: auto, RI, MA or DB
    #[arg(long, default_value = "auto")]
    format: FormatHint,
    /// Output representation: RI, MA or DB
    #[arg(long, default_value = "db")]
    target: ComplexNumberType,
}

/// Input representation, or `auto` to take it from the option line.
#[derive(Clone, Copy, Debug)]
struct FormatHint(Option<ComplexNumberType>);

impl FromStr for FormatHint {
    type Err = SimpleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.eq_ignore_ascii_case("auto") {
            return Ok(FormatHint(None));
        }
        ComplexNumberType::from_str(s).map(|format| FormatHint(Some(format)))
    }
}

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: io::Error,
    },
    #[error("failed to write output: {0}")]
    Write(#[from] io::Error),
    #[error(transparent)]
    Convert(#[from] ConvertError),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    if let Err(error) = run(cli.command) {
        eprintln!("Error: {}", error);
        std::process::exit(2);
    }
}

fn run(command: CliCommand) -> Result<(), CliError> {
    match command {
        CliCommand::Extract(args) => run_extract(args),
        CliCommand::Retarget(args) => run_retarget(args),
    }
}

fn run_extract(args: ExtractArgs) -> Result<(), CliError> {
    let text = read_input(&args.io.input)?;
    let mut opts = NPortOptions::new()
        .ordering(args.ordering)
        .diagnostics(args.diagnostics);
    if let Some(format) = args.format {
        opts = opts.format(format);
    }

    let out = convert_nport_to_two_port(&text, args.nports, args.port_a, args.port_b, &opts)?;
    write_output(&args.io.output, &out.text)?;

    eprintln!("{}", out.preview);
    if let Some(diag) = &out.diagnostics {
        eprintln!(
            "record {} column-major (asymmetry {:.6}):\n{}",
            diag.freq, diag.column_asymmetry, diag.column_major
        );
        eprintln!(
            "record {} row-major (asymmetry {:.6}):\n{}",
            diag.freq, diag.row_asymmetry, diag.row_major
        );
    }
    if args.io.json {
        eprintln!("{}", serde_json::to_string_pretty(&out)?);
    }
    Ok(())
}

fn run_retarget(args: RetargetArgs) -> Result<(), CliError> {
    let text = read_input(&args.io.input)?;
    let opts = TwoPortOptions::new()
        .format(args.format.0)
        .target(args.target);

    let out = convert_two_port_representation(&text, &opts)?;
    write_output(&args.io.output, &out.text)?;

    eprintln!(
        "Detected format: {} - target: {} - points: {}",
        out.format, out.target, out.points
    );
    if args.io.json {
        eprintln!("{}", serde_json::to_string_pretty(&out)?);
    }
    Ok(())
}

fn read_input(path: &Option<PathBuf>) -> Result<String, CliError> {
    match path {
        Some(path) => fs::read_to_string(path).map_err(|source| CliError::Read {
            path: path.display().to_string(),
            source,
        }),
        None => {
            let mut buf = String::new();
            io::stdin()
                .read_to_string(&mut buf)
                .map_err(|source| CliError::Read {
                    path: "stdin".to_string(),
                    source,
                })?;
            Ok(buf)
        }
    }
}

fn write_output(path: &Option<PathBuf>, text: &str) -> Result<(), CliError> {
    match path {
        Some(path) => fs::write(path, format!("{}\n", text))?,
        None => {
            let mut stdout = io::stdout().lock();
            writeln!(stdout, "{}", text)?;
        }
    }
    Ok(())
}
