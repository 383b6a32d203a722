use std::{
    fs::File,
    io::{BufWriter, Write as _},
    path::{Path, PathBuf},
};

use anyhow::Context as _;
use clap::{Args, Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "rivermap", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render a single frame as a PNG.
    Frame(FrameArgs),
    /// Dump a frame's draw operations and diagnostics as JSON.
    Ops(OpsArgs),
}

#[derive(Args, Debug)]
struct InputArgs {
    /// Dataset CSV with Continent, River_Count and Tributary_Sum columns.
    #[arg(long)]
    data: PathBuf,

    /// Background map image.
    #[arg(long)]
    map: PathBuf,

    /// Optional visualization config JSON (tables, title, labels).
    #[arg(long)]
    config: Option<PathBuf>,

    /// Canvas width in pixels.
    #[arg(long, default_value_t = 1280)]
    width: u32,

    /// Canvas height in pixels.
    #[arg(long, default_value_t = 720)]
    height: u32,

    /// Pointer position as `X,Y` in canvas coordinates; may lie off-canvas.
    #[arg(long, value_parser = parse_pointer, allow_hyphen_values = true)]
    pointer: Option<(f64, f64)>,
}

#[derive(Parser, Debug)]
struct FrameArgs {
    #[command(flatten)]
    input: InputArgs,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,

    /// TrueType/OpenType font used for all text. Text is omitted without one.
    #[arg(long)]
    font: Option<PathBuf>,
}

#[derive(Parser, Debug)]
struct OpsArgs {
    #[command(flatten)]
    input: InputArgs,

    /// Output JSON path (stdout if omitted).
    #[arg(long)]
    out: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.cmd {
        Command::Frame(args) => cmd_frame(args),
        Command::Ops(args) => cmd_ops(args),
    }
}

fn parse_pointer(s: &str) -> Result<(f64, f64), String> {
    let (x, y) = s
        .split_once(',')
        .ok_or_else(|| format!("expected X,Y, got '{s}'"))?;
    let parse = |v: &str| {
        v.trim()
            .parse::<f64>()
            .map_err(|e| format!("invalid coordinate '{v}': {e}"))
    };
    Ok((parse(x)?, parse(y)?))
}

fn load(input: &InputArgs) -> anyhow::Result<(rivermap::Visualizer, rivermap::FrameInput)> {
    let config = match &input.config {
        Some(p) => rivermap::VizConfig::from_path(p)?,
        None => rivermap::VizConfig::default(),
    };
    let table = rivermap::DataTable::from_path(&input.data)?;
    let map = rivermap::load_image(&input.map)?;
    let viz = rivermap::Visualizer::setup(&table, map, config)?;

    let mut frame = rivermap::FrameInput::new(rivermap::Canvas::new(input.width, input.height)?);
    if let Some((x, y)) = input.pointer {
        frame = frame.with_pointer(x, y);
    }
    Ok((viz, frame))
}

fn ensure_parent_dir(path: &Path) -> anyhow::Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    Ok(())
}

fn cmd_frame(args: FrameArgs) -> anyhow::Result<()> {
    let (viz, frame) = load(&args.input)?;
    let font_bytes = args
        .font
        .as_ref()
        .map(|p| std::fs::read(p).with_context(|| format!("read font '{}'", p.display())))
        .transpose()?;

    let (pixels, report) = viz.render_rgba(frame, font_bytes.as_deref())?;

    ensure_parent_dir(&args.out)?;
    image::save_buffer_with_format(
        &args.out,
        &pixels.data,
        pixels.width,
        pixels.height,
        image::ColorType::Rgba8,
        image::ImageFormat::Png,
    )
    .with_context(|| format!("write png '{}'", args.out.display()))?;

    for name in &report.hovered {
        eprintln!("hover: {name}");
    }
    eprintln!("wrote {}", args.out.display());
    Ok(())
}

fn cmd_ops(args: OpsArgs) -> anyhow::Result<()> {
    let (viz, frame) = load(&args.input)?;
    let mut surface = rivermap::RecordingSurface::new();
    let report = viz.draw_frame(&mut surface, frame)?;

    let doc = serde_json::json!({
        "setup_diagnostics": viz.setup_diagnostics(),
        "frame": report,
        "ops": surface.ops(),
    });

    match &args.out {
        Some(path) => {
            ensure_parent_dir(path)?;
            let f = File::create(path)
                .with_context(|| format!("create '{}'", path.display()))?;
            let mut w = BufWriter::new(f);
            serde_json::to_writer_pretty(&mut w, &doc).context("write ops JSON")?;
            w.flush().context("flush ops JSON")?;
            eprintln!("wrote {}", path.display());
        }
        None => {
            let stdout = std::io::stdout();
            let mut w = stdout.lock();
            serde_json::to_writer_pretty(&mut w, &doc).context("write ops JSON")?;
            writeln!(w).context("write ops JSON")?;
        }
    }
    Ok(())
}
