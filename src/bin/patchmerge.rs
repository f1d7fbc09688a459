use std::{
    io::{BufRead, Write},
    path::{Path, PathBuf},
};

use anyhow::Context as _;
use clap::{Args, Parser, Subcommand, ValueEnum};
use rand::{SeedableRng, rngs::StdRng};

#[derive(Parser, Debug)]
#[command(name = "patchmerge", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Composite one random overlay per category onto every background image.
    Batch(BatchArgs),
    /// Print the layout plan for a canvas and a list of overlay files as JSON.
    Plan(PlanArgs),
}

#[derive(Args, Debug)]
struct BatchArgs {
    /// Directory with background images.
    #[arg(long)]
    backgrounds: Option<PathBuf>,

    /// Overlay root; each subfolder is one category.
    #[arg(long)]
    overlays: Option<PathBuf>,

    /// Output directory (created if absent).
    #[arg(long)]
    out: Option<PathBuf>,

    /// Resize every background to WxH before compositing.
    #[arg(long)]
    resize: Option<patchmerge::Canvas>,

    /// Seed for overlay selection. A random seed is drawn and logged when omitted.
    #[arg(long)]
    seed: Option<u64>,

    /// Never ask on stdin; missing values use their defaults.
    #[arg(long, default_value_t = false)]
    no_prompt: bool,

    #[command(flatten)]
    layout: LayoutArgs,
}

#[derive(Args, Debug)]
struct PlanArgs {
    /// Canvas size as WxH.
    #[arg(long)]
    canvas: patchmerge::Canvas,

    /// Overlay image files, in stack order.
    overlays: Vec<PathBuf>,

    #[command(flatten)]
    layout: LayoutArgs,
}

#[derive(Args, Debug)]
struct LayoutArgs {
    /// JSON layout config; flags below override its values.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Vertical anchor of the overlay stack.
    #[arg(long, value_enum)]
    anchor: Option<AnchorChoice>,

    /// Overlay width as a fraction of background width.
    #[arg(long)]
    width_ratio: Option<f64>,

    /// Gap in pixels between overlays.
    #[arg(long)]
    padding: Option<u32>,

    /// Top and bottom margin as a fraction of background height.
    #[arg(long)]
    margin_ratio: Option<f64>,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum AnchorChoice {
    Center,
    Top,
}

impl From<AnchorChoice> for patchmerge::Anchor {
    fn from(value: AnchorChoice) -> Self {
        match value {
            AnchorChoice::Center => patchmerge::Anchor::Center,
            AnchorChoice::Top => patchmerge::Anchor::Top,
        }
    }
}

const DEFAULT_BACKGROUNDS: &str = "./backgrounds";
const DEFAULT_OVERLAYS: &str = "./patches";
const DEFAULT_OUT: &str = "./outputs";

fn main() -> anyhow::Result<()> {
    init_tracing();
    let cli = Cli::parse();
    match cli.cmd {
        Command::Batch(args) => cmd_batch(args),
        Command::Plan(args) => cmd_plan(args),
    }
}

fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

impl LayoutArgs {
    fn resolve(&self) -> anyhow::Result<patchmerge::LayoutConfig> {
        let mut cfg = match &self.config {
            Some(path) => patchmerge::LayoutConfig::from_path(path)?,
            None => patchmerge::LayoutConfig::default(),
        };
        if let Some(anchor) = self.anchor {
            cfg.anchor = anchor.into();
        }
        if let Some(v) = self.width_ratio {
            cfg.width_ratio = v;
        }
        if let Some(v) = self.padding {
            cfg.padding_px = v;
        }
        if let Some(v) = self.margin_ratio {
            cfg.vertical_margin_ratio = v;
        }
        cfg.validate()?;
        Ok(cfg)
    }
}

fn cmd_batch(args: BatchArgs) -> anyhow::Result<()> {
    let mut layout = args.layout.resolve()?;
    let interactive = !args.no_prompt
        && (args.backgrounds.is_none() || args.overlays.is_none() || args.out.is_none());

    let mut resize = args.resize;
    let (background_dir, overlay_dir, output_dir) = if interactive {
        let mut prompter = Prompter::new(std::io::stdin().lock(), std::io::stderr());
        let bg = dir_or_prompt(
            &mut prompter,
            args.backgrounds,
            "Background directory",
            DEFAULT_BACKGROUNDS,
        )?;
        let ov = dir_or_prompt(
            &mut prompter,
            args.overlays,
            "Overlay directory",
            DEFAULT_OVERLAYS,
        )?;
        let out = dir_or_prompt(&mut prompter, args.out, "Output directory", DEFAULT_OUT)?;
        if resize.is_none() {
            resize = prompter.ask_parsed("Resize backgrounds to WxH (empty = keep size)")?;
        }
        if args.layout.anchor.is_none()
            && let Some(anchor) =
                prompter.ask_parsed("Vertical anchor, center or top (empty = center)")?
        {
            layout.anchor = anchor;
        }
        (bg, ov, out)
    } else {
        (
            args.backgrounds.unwrap_or_else(|| PathBuf::from(DEFAULT_BACKGROUNDS)),
            args.overlays.unwrap_or_else(|| PathBuf::from(DEFAULT_OVERLAYS)),
            args.out.unwrap_or_else(|| PathBuf::from(DEFAULT_OUT)),
        )
    };

    let seed = args.seed.unwrap_or_else(rand::random);
    tracing::info!(seed, "overlay selection seed");
    let mut rng = StdRng::seed_from_u64(seed);

    let opts = patchmerge::BatchOpts {
        background_dir,
        overlay_dir,
        output_dir,
        resize,
        layout,
    };
    let report = patchmerge::run_batch(&opts, &mut rng)?;

    eprintln!(
        "wrote {} file(s) to {} ({} composited, {} unchanged, {} failed)",
        report.composited + report.copied,
        opts.output_dir.display(),
        report.composited,
        report.copied,
        report.failed,
    );
    Ok(())
}

fn cmd_plan(args: PlanArgs) -> anyhow::Result<()> {
    let layout = args.layout.resolve()?;
    let sizes = args
        .overlays
        .iter()
        .map(|p| natural_size(p))
        .collect::<Vec<_>>();
    let plan = patchmerge::solve_layout(args.canvas, &sizes, &layout);
    let json = serde_json::to_string_pretty(&plan).context("serialize layout plan")?;
    println!("{json}");
    Ok(())
}

fn natural_size(path: &Path) -> Option<(u32, u32)> {
    match image::image_dimensions(path) {
        Ok(size) => Some(size),
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "cannot read overlay size");
            None
        }
    }
}

fn dir_or_prompt<R: BufRead, W: Write>(
    prompter: &mut Prompter<R, W>,
    given: Option<PathBuf>,
    label: &str,
    default: &str,
) -> anyhow::Result<PathBuf> {
    match given {
        Some(p) => Ok(p),
        None => Ok(PathBuf::from(prompter.ask(label, default)?)),
    }
}

struct Prompter<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Prompter<R, W> {
    fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Ask once; an empty answer (or EOF) yields `default`.
    fn ask(&mut self, label: &str, default: &str) -> anyhow::Result<String> {
        write!(self.output, "{label} [{default}]: ")?;
        self.output.flush()?;
        let line = self.read_line()?;
        Ok(if line.is_empty() {
            default.to_string()
        } else {
            line
        })
    }

    /// Ask until the answer parses or is empty.
    fn ask_parsed<T>(&mut self, label: &str) -> anyhow::Result<Option<T>>
    where
        T: std::str::FromStr,
        T::Err: std::fmt::Display,
    {
        loop {
            write!(self.output, "{label}: ")?;
            self.output.flush()?;
            let line = self.read_line()?;
            if line.is_empty() {
                return Ok(None);
            }
            match line.parse::<T>() {
                Ok(v) => return Ok(Some(v)),
                Err(e) => writeln!(self.output, "  {e}")?,
            }
        }
    }

    fn read_line(&mut self) -> anyhow::Result<String> {
        let mut line = String::new();
        self.input
            .read_line(&mut line)
            .context("read answer from stdin")?;
        Ok(line.trim().to_string())
    }
}
