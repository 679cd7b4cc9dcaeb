use famgraph::{Family, OutputFormat};
use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::Path;
use tracing::level_filters::LevelFilter;

#[derive(Debug)]
enum CliError {
    Usage(&'static str),
    InputNotFound(String),
    Io(std::io::Error),
    Graph(famgraph::Error),
}

impl std::fmt::Display for CliError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CliError::Usage(msg) => write!(f, "{msg}"),
            CliError::InputNotFound(path) => write!(f, "input file {path} not found"),
            CliError::Io(err) => write!(f, "I/O error: {err}"),
            CliError::Graph(err) => write!(f, "{err}"),
        }
    }
}

impl From<std::io::Error> for CliError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<famgraph::Error> for CliError {
    fn from(value: famgraph::Error) -> Self {
        match value {
            famgraph::Error::Io(err) => Self::Io(err),
            other => Self::Graph(other),
        }
    }
}

#[derive(Debug)]
struct Args {
    input: Option<String>,
    output: Option<String>,
    format: OutputFormat,
    pretty: bool,
    log_level: LevelFilter,
}

impl Default for Args {
    fn default() -> Self {
        Self {
            input: None,
            output: None,
            format: OutputFormat::default(),
            pretty: false,
            log_level: LevelFilter::INFO,
        }
    }
}

fn usage() -> &'static str {
    "famgraph-cli\n\
\n\
USAGE:\n\
  famgraph-cli [--format indented|names|line|json] [--pretty] [--quiet|--verbose] <input> <output>\n\
\n\
NOTES:\n\
  - <input> is a tab-separated edge list: <vertexA>\\t<vertexB>[\\t<label>] per line.\n\
  - Use '-' for <input> to read stdin, or for <output> to write stdout.\n\
  - indented (default) prints '<head> <count>' then one '\\t<member>[\\t<label>]' line per member.\n\
  - Status messages go to stderr; --quiet keeps only errors, --verbose adds per-family detail.\n\
"
}

fn parse_args(argv: &[String]) -> Result<Args, CliError> {
    let mut args = Args::default();
    let mut positional: Vec<String> = Vec::new();

    let mut it = argv.iter().skip(1);
    while let Some(a) = it.next() {
        match a.as_str() {
            "--help" | "-h" => return Err(CliError::Usage(usage())),
            "--pretty" => args.pretty = true,
            "--quiet" | "-q" => args.log_level = LevelFilter::ERROR,
            "--verbose" | "-v" => args.log_level = LevelFilter::TRACE,
            "--format" => {
                let Some(fmt) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                args.format = fmt
                    .parse::<OutputFormat>()
                    .map_err(|_| CliError::Usage(usage()))?;
            }
            "--" => positional.extend(it.by_ref().cloned()),
            "-" => positional.push(a.clone()),
            other if other.starts_with('-') => return Err(CliError::Usage(usage())),
            path => positional.push(path.to_string()),
        }
    }

    let [input, output]: [String; 2] = positional
        .try_into()
        .map_err(|_| CliError::Usage(usage()))?;
    args.input = Some(input);
    args.output = Some(output);
    Ok(args)
}

fn init_logging(level: LevelFilter) {
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(false)
        .without_time()
        .with_writer(std::io::stderr)
        .init();
}

fn read_families(input: &str) -> Result<Vec<Family>, CliError> {
    tracing::info!("reading file {input}");
    let builder = if input == "-" {
        let mut buf = String::new();
        std::io::stdin().read_to_string(&mut buf)?;
        famgraph::parse_edge_list(&buf)?
    } else {
        famgraph::read_edge_list(BufReader::new(File::open(input)?))?
    };
    tracing::info!(
        vertices = builder.vertex_count(),
        edges = builder.edge_count(),
        "iterating by most connected vertex ..."
    );

    let families: Vec<Family> = builder.build().collect();
    tracing::info!(families = families.len(), "extraction finished");
    Ok(families)
}

fn write_output(families: &[Family], args: &Args) -> Result<(), CliError> {
    match args.output.as_deref() {
        None | Some("-") => {
            let mut out = std::io::stdout().lock();
            famgraph::write_families(&mut out, families, args.format, args.pretty)?;
            out.flush()?;
        }
        Some(path) => {
            let mut out = BufWriter::new(File::create(path)?);
            famgraph::write_families(&mut out, families, args.format, args.pretty)?;
            out.flush()?;
        }
    }
    Ok(())
}

fn run(args: Args) -> Result<(), CliError> {
    let input = args.input.as_deref().unwrap_or("-");
    if input != "-" && !Path::new(input).exists() {
        return Err(CliError::InputNotFound(input.to_string()));
    }

    // The output file is only created once every input line has been accepted.
    let families = read_families(input)?;
    write_output(&families, &args)?;
    tracing::info!("done");
    Ok(())
}

fn main() {
    let args = match parse_args(&std::env::args().collect::<Vec<_>>()) {
        Ok(v) => v,
        Err(CliError::Usage(msg)) => {
            eprintln!("{msg}");
            std::process::exit(2);
        }
        Err(err) => {
            eprintln!("{err}");
            std::process::exit(1);
        }
    };

    init_logging(args.log_level);

    if let Err(err) = run(args) {
        tracing::error!("{err}");
        std::process::exit(1);
    }
}
