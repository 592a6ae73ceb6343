use std::path::PathBuf;

use clap::{ArgAction, Parser, ValueEnum};

#[derive(Parser, Debug)]
#[command(name = "skills-showcase", version, about = "Render a collage of skill icons")]
struct Cli {
    /// JSON config file; missing fields keep their defaults.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Re-fetch and re-convert every icon even if a cached index exists.
    #[arg(long)]
    refresh: bool,

    /// Seed for rotations, random layout and the output file number.
    #[arg(long)]
    seed: Option<u64>,

    /// Do not open the result in the image viewer.
    #[arg(long)]
    no_show: bool,

    /// Directory receiving the output PNG.
    #[arg(long)]
    out_dir: Option<PathBuf>,

    /// Placement strategy.
    #[arg(long, value_enum)]
    layout: Option<LayoutChoice>,

    /// SVG conversion backend.
    #[arg(long, value_enum)]
    converter: Option<ConverterChoice>,

    /// More log output (-v debug, -vv trace).
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum LayoutChoice {
    Grid,
    Random,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum ConverterChoice {
    Remote,
    Local,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let cfg = build_config(&cli)?;
    let transport = skills_showcase::ReqwestTransport::new(cfg.http_timeout())?;
    let converter = cfg.build_converter();
    let mut rng = match cli.seed {
        Some(seed) => skills_showcase::Rng64::new(seed),
        None => skills_showcase::Rng64::from_entropy(),
    };

    let summary = skills_showcase::run(&cfg, &transport, converter.as_ref(), &mut rng)?;
    eprintln!(
        "wrote {} ({} icons, {} placements)",
        summary.output_path.display(),
        summary.icon_count,
        summary.placement_count
    );
    Ok(())
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => tracing::Level::INFO,
        1 => tracing::Level::DEBUG,
        _ => tracing::Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();
}

fn build_config(cli: &Cli) -> anyhow::Result<skills_showcase::ShowcaseConfig> {
    let mut cfg = match &cli.config {
        Some(path) => skills_showcase::ShowcaseConfig::from_json_file(path)?,
        None => skills_showcase::ShowcaseConfig::default(),
    };

    if cli.refresh {
        cfg.refresh = true;
    }
    if cli.no_show {
        cfg.show = false;
    }
    if let Some(dir) = &cli.out_dir {
        cfg.output_dir = dir.clone();
    }
    if let Some(layout) = cli.layout {
        cfg.layout = match layout {
            LayoutChoice::Grid => skills_showcase::LayoutStrategy::grid(),
            LayoutChoice::Random => skills_showcase::LayoutStrategy::random(),
        };
    }
    if let Some(converter) = cli.converter {
        cfg.converter = match converter {
            ConverterChoice::Remote => skills_showcase::ConverterKind::Remote,
            ConverterChoice::Local => skills_showcase::ConverterKind::Local,
        };
    }

    cfg.validate()?;
    Ok(cfg)
}
