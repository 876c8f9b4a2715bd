use std::path::PathBuf;

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use diagram_poster::{AppConfig, PosterComposer};
use log::LevelFilter;

#[derive(Parser)]
#[command(
    name = "diagram-poster",
    version,
    about = "Compose design diagrams into a labeled poster"
)]
struct Cli {
    /// JSON configuration file; flags override its values.
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    /// More log output (repeat for debug).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
    /// Only log errors.
    #[arg(short, long, global = true)]
    quiet: bool,
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Combine the four diagrams into a 2x2 poster (the default).
    Compose(ComposeArgs),
    /// Render a diagram block from a markdown document via the remote renderer.
    #[cfg(feature = "remote")]
    Fetch {
        /// Document containing fenced diagram blocks.
        #[arg(long)]
        document: Option<PathBuf>,
        /// Zero-based block index.
        #[arg(long)]
        index: Option<usize>,
        /// Fence language tag.
        #[arg(long)]
        language: Option<String>,
        #[arg(short, long)]
        output: Option<PathBuf>,
        #[arg(long)]
        endpoint: Option<String>,
    },
    /// Render the built-in use case diagram via the remote renderer.
    #[cfg(feature = "remote")]
    FetchFallback {
        #[arg(short, long)]
        output: Option<PathBuf>,
        #[arg(long)]
        endpoint: Option<String>,
    },
}

#[derive(Args, Default)]
struct ComposeArgs {
    /// Top-left image (entity relationship diagram).
    #[arg(long)]
    erd: Option<PathBuf>,
    /// Top-right image (use case diagram).
    #[arg(long)]
    use_case: Option<PathBuf>,
    /// Bottom-left image (sequence diagram).
    #[arg(long)]
    sequence: Option<PathBuf>,
    /// Bottom-right image (customer journey).
    #[arg(long)]
    journey: Option<PathBuf>,
    #[arg(short, long)]
    output: Option<PathBuf>,
    #[arg(long)]
    padding: Option<u32>,
    #[arg(long)]
    title_height: Option<u32>,
    /// Preferred title font file.
    #[arg(long)]
    font: Option<PathBuf>,
    #[arg(long)]
    font_size: Option<f32>,
}

fn init_logging(verbose: u8, quiet: bool) {
    let level = match (quiet, verbose) {
        (true, _) => LevelFilter::Error,
        (false, 0) => LevelFilter::Warn,
        (false, 1) => LevelFilter::Info,
        _ => LevelFilter::Debug,
    };
    // explicit level only; RUST_LOG is not consulted
    let _ = env_logger::Builder::new()
        .filter_level(level)
        .format_timestamp(None)
        .try_init();
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let mut app = match &cli.config {
        Some(path) => AppConfig::from_json_file(path)?,
        None => AppConfig::default(),
    };

    match cli.command.unwrap_or(Command::Compose(ComposeArgs::default())) {
        Command::Compose(args) => {
            let cfg = &mut app.poster;
            if let Some(p) = args.erd {
                cfg.inputs.top_left.path = p;
            }
            if let Some(p) = args.use_case {
                cfg.inputs.top_right.path = p;
            }
            if let Some(p) = args.sequence {
                cfg.inputs.bottom_left.path = p;
            }
            if let Some(p) = args.journey {
                cfg.inputs.bottom_right.path = p;
            }
            if let Some(p) = args.output {
                cfg.output = p;
            }
            if let Some(v) = args.padding {
                cfg.padding = v;
            }
            if let Some(v) = args.title_height {
                cfg.title_height = v;
            }
            if let Some(p) = args.font {
                cfg.font_path = Some(p);
            }
            if let Some(v) = args.font_size {
                cfg.font_size = v;
            }

            let report = PosterComposer::new(app.poster).run().context("poster not created")?;
            if let Some(reason) = &report.font_fallback {
                println!("Note: titles drawn with the built-in font ({})", reason);
            }
            println!("Success: Created {}", report.output.display());
        }
        #[cfg(feature = "remote")]
        Command::Fetch {
            document,
            index,
            language,
            output,
            endpoint,
        } => {
            use diagram_poster::extract::DiagramTextExtractor;
            use diagram_poster::DiagramRenderer;

            let fetch = &mut app.fetch;
            if let Some(p) = document {
                fetch.document = p;
            }
            if let Some(i) = index {
                fetch.index = i;
            }
            if let Some(l) = language {
                fetch.language = l;
            }
            if let Some(p) = output {
                fetch.output = p;
            }
            if let Some(e) = endpoint {
                app.renderer.endpoint = e;
            }

            let source = DiagramTextExtractor::new(&app.fetch.language)
                .block_from_file(&app.fetch.document, app.fetch.index)?;
            let renderer = DiagramRenderer::new(&app.renderer)?;
            println!("Downloading diagram from: {}", renderer.render_url(&source));
            renderer.fetch_to_file(&source, &app.fetch.output)?;
            println!("Success: {} created", app.fetch.output.display());
        }
        #[cfg(feature = "remote")]
        Command::FetchFallback { output, endpoint } => {
            use diagram_poster::DiagramRenderer;

            let out = output.unwrap_or(app.fetch.output);
            if let Some(e) = endpoint {
                app.renderer.endpoint = e;
            }
            let renderer = DiagramRenderer::new(&app.renderer)?;
            println!(
                "Downloading fallback use case from: {}",
                renderer.render_url(diagram_poster::remote::FALLBACK_USE_CASE_DIAGRAM)
            );
            renderer.fetch_fallback_to_file(&out)?;
            println!("Success: {} created", out.display());
        }
    }
    Ok(())
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose, cli.quiet);

    if let Err(e) = run(cli) {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}
