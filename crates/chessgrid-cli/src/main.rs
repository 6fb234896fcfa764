#![forbid(unsafe_code)]

use chessgrid::parse_entries;
use chessgrid::render::pdf::{self, PdfError};
use chessgrid::render::raster::{self, RasterError, RasterOptions};
use chessgrid::render::{
    BoardRenderer, BoardStyle, LayoutConfig, RenderFailurePolicy, SvgBoardRenderer,
};
use chessgrid::request::{ErrorBody, GenerateRequest, RequestError};
use clap::{Parser, Subcommand, ValueEnum};
use serde_json::Value;
use std::io::{Read, Write};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Debug)]
enum CliError {
    Usage(String),
    Io(std::io::Error),
    Json(serde_json::Error),
    Request(RequestError),
    Config(chessgrid::render::Error),
    Board(chessgrid::render::Error),
    Pdf(PdfError),
    Raster(RasterError),
}

impl std::fmt::Display for CliError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CliError::Usage(msg) => write!(f, "{msg}"),
            CliError::Io(err) => write!(f, "I/O error: {err}"),
            CliError::Json(err) => write!(f, "JSON error: {err}"),
            CliError::Request(err) => write!(f, "{err}"),
            CliError::Config(err) => write!(f, "invalid config: {err}"),
            CliError::Board(err) => write!(f, "{err}"),
            CliError::Pdf(err) => write!(f, "{err}"),
            CliError::Raster(err) => write!(f, "{err}"),
        }
    }
}

impl CliError {
    /// Errors caused by the caller's input, reported verbatim with exit code 2.
    fn is_client_error(&self) -> bool {
        matches!(
            self,
            CliError::Usage(_)
                | CliError::Json(_)
                | CliError::Request(_)
                | CliError::Config(_)
                | CliError::Board(_)
                | CliError::Pdf(PdfError::Render(_))
        )
    }
}

impl From<std::io::Error> for CliError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<serde_json::Error> for CliError {
    fn from(value: serde_json::Error) -> Self {
        Self::Json(value)
    }
}

impl From<RequestError> for CliError {
    fn from(value: RequestError) -> Self {
        Self::Request(value)
    }
}

impl From<PdfError> for CliError {
    fn from(value: PdfError) -> Self {
        Self::Pdf(value)
    }
}

impl From<RasterError> for CliError {
    fn from(value: RasterError) -> Self {
        Self::Raster(value)
    }
}

/// Lay out chess positions as paginated PDF diagram sheets
#[derive(Parser, Debug)]
#[command(name = "chessgrid")]
#[command(version)]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug); RUST_LOG takes precedence
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Generate a PDF sheet from a list of positions
    Generate(GenerateArgs),
    /// Render a single board
    Board(BoardArgs),
}

#[derive(clap::Args, Debug)]
struct GenerateArgs {
    /// JSON request body file (`fens`, `diagrams_per_page`, ...); `-` reads stdin
    #[arg(long, conflicts_with = "input")]
    request: Option<String>,

    /// Text file with one `<fen> [description]` per line; `-` reads stdin
    #[arg(long)]
    input: Option<String>,

    /// Positions given directly on the command line
    fens: Vec<String>,

    #[arg(long)]
    diagrams_per_page: Option<String>,

    /// Title printed above the first grid
    #[arg(long)]
    title: Option<String>,

    #[arg(long)]
    turn_indicator: bool,

    #[arg(long)]
    page_numbers: bool,

    #[arg(long)]
    no_coordinates: bool,

    /// Draw boards from Black's side
    #[arg(long)]
    flip: bool,

    /// What to draw for positions that fail to render
    #[arg(long, value_enum)]
    on_failure: Option<FailurePolicyArg>,

    /// JSON layout config overriding the built-in defaults
    #[arg(long)]
    config: Option<PathBuf>,

    /// Output path; `-` writes to stdout
    #[arg(long, default_value = "chessgrid.pdf")]
    out: String,
}

#[derive(clap::Args, Debug)]
struct BoardArgs {
    fen: String,

    #[arg(long, value_enum, default_value_t = BoardFormat::Svg)]
    format: BoardFormat,

    /// Pixel scale for PNG output
    #[arg(long, default_value_t = 1.0)]
    scale: f32,

    /// Background colour for PNG output (`white`, `#rrggbb`, ...)
    #[arg(long)]
    background: Option<String>,

    #[arg(long)]
    turn_indicator: bool,

    #[arg(long)]
    no_coordinates: bool,

    #[arg(long)]
    flip: bool,

    /// JSON layout config (board colours and size)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Output path; defaults to stdout for SVG and `board.<format>` otherwise
    #[arg(long)]
    out: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum BoardFormat {
    Svg,
    Png,
    Pdf,
}

impl BoardFormat {
    fn extension(self) -> &'static str {
        match self {
            BoardFormat::Svg => "svg",
            BoardFormat::Png => "png",
            BoardFormat::Pdf => "pdf",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum FailurePolicyArg {
    Blank,
    Placeholder,
    Abort,
}

impl From<FailurePolicyArg> for RenderFailurePolicy {
    fn from(value: FailurePolicyArg) -> Self {
        match value {
            FailurePolicyArg::Blank => RenderFailurePolicy::Blank,
            FailurePolicyArg::Placeholder => RenderFailurePolicy::Placeholder,
            FailurePolicyArg::Abort => RenderFailurePolicy::Abort,
        }
    }
}

fn init_tracing(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn read_input(input: &str) -> Result<String, CliError> {
    if input == "-" {
        let mut buf = String::new();
        std::io::stdin().read_to_string(&mut buf)?;
        return Ok(buf);
    }
    Ok(std::fs::read_to_string(input)?)
}

fn write_output(bytes: &[u8], out: &str) -> Result<(), CliError> {
    if out == "-" {
        let mut stdout = std::io::stdout().lock();
        stdout.write_all(bytes)?;
        stdout.flush()?;
        return Ok(());
    }
    std::fs::write(out, bytes)?;
    Ok(())
}

fn load_config(path: Option<&PathBuf>) -> Result<LayoutConfig, CliError> {
    let Some(path) = path else {
        return Ok(LayoutConfig::default());
    };
    let text = std::fs::read_to_string(path)?;
    LayoutConfig::from_json_str(&text).map_err(CliError::Config)
}

fn build_request(args: &GenerateArgs, config: &LayoutConfig) -> Result<GenerateRequest, CliError> {
    let mut request = match &args.request {
        Some(path) => GenerateRequest::from_json_str(&read_input(path)?)?,
        None => {
            let mut entries = args
                .fens
                .iter()
                .filter_map(|line| chessgrid::PositionEntry::parse_line(line))
                .collect::<Vec<_>>();
            if let Some(path) = &args.input {
                entries.extend(parse_entries(&read_input(path)?));
            }
            if entries.is_empty() {
                return Err(CliError::Request(RequestError::MissingFens));
            }
            GenerateRequest {
                fens: Some(serde_json::to_value(&entries)?),
                diagrams_per_page: Some(Value::from(config.default_diagrams_per_page)),
                ..GenerateRequest::default()
            }
        }
    };

    if let Some(dpp) = &args.diagrams_per_page {
        request.diagrams_per_page = Some(Value::String(dpp.clone()));
    }
    if let Some(title) = &args.title {
        request.title = Some(title.clone());
    }
    if args.no_coordinates {
        request.show_coordinates = Some(false);
    }
    request.show_turn_indicator |= args.turn_indicator;
    request.show_page_numbers |= args.page_numbers;
    request.flipped |= args.flip;
    if let Some(policy) = args.on_failure {
        request.on_render_failure = policy.into();
    }
    Ok(request)
}

fn run_generate(args: GenerateArgs) -> Result<(), CliError> {
    let config = load_config(args.config.as_ref())?;
    let validated = build_request(&args, &config)?.validate()?;
    let generated = pdf::generate(&validated.entries, &validated.options, &config)?;
    for failure in &generated.failures {
        eprintln!(
            "warning: position {} could not be rendered: {}",
            failure.index + 1,
            failure.message
        );
    }
    write_output(&generated.bytes, &args.out)?;
    if args.out != "-" {
        eprintln!("wrote {} page(s) to {}", generated.page_count, args.out);
    }
    Ok(())
}

fn run_board(args: BoardArgs) -> Result<(), CliError> {
    if !(args.scale.is_finite() && args.scale > 0.0) {
        return Err(CliError::Usage("--scale must be a positive number".to_string()));
    }
    let config = load_config(args.config.as_ref())?;
    let style = BoardStyle {
        colors: config.board_colors.clone(),
        coordinates: config.show_coordinates && !args.no_coordinates,
        turn_indicator: args.turn_indicator,
        flipped: args.flip,
        size: config.board_size,
        ..BoardStyle::default()
    };
    let svg = SvgBoardRenderer
        .render(args.fen.trim(), &style)
        .map_err(CliError::Board)?
        .to_svg_document();

    let bytes = match args.format {
        BoardFormat::Svg => svg.into_bytes(),
        BoardFormat::Png => raster::svg_to_png(
            &svg,
            &RasterOptions {
                scale: args.scale,
                background: args.background.clone(),
            },
        )?,
        BoardFormat::Pdf => pdf::svg_to_pdf(&svg)?,
    };
    let out = match &args.out {
        Some(out) => out.clone(),
        None if args.format == BoardFormat::Svg => "-".to_string(),
        None => format!("board.{}", args.format.extension()),
    };
    write_output(&bytes, &out)
}

fn run(cli: Cli) -> Result<(), CliError> {
    match cli.command {
        Command::Generate(args) => run_generate(args),
        Command::Board(args) => run_board(args),
    }
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(cli) {
        Ok(()) => {}
        Err(err) if err.is_client_error() => {
            let body = ErrorBody {
                error: err.to_string(),
            };
            eprintln!("{}", body.to_json());
            std::process::exit(2);
        }
        Err(CliError::Io(err)) => {
            eprintln!("I/O error: {err}");
            std::process::exit(1);
        }
        Err(err) => {
            tracing::error!(error = %err, "generation failed");
            eprintln!("{}", ErrorBody::internal().to_json());
            std::process::exit(1);
        }
    }
}
