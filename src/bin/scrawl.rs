use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use image::ImageEncoder as _;

#[derive(Parser, Debug)]
#[command(name = "scrawl", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render the interactive preview composite as a PNG.
    Preview(PreviewArgs),
    /// Regenerate the composite for download and write the JPEG artifact.
    Download(DownloadArgs),
}

#[derive(Parser, Debug)]
struct PreviewArgs {
    /// Background image file.
    #[arg(long)]
    background: PathBuf,

    /// Canonical font file.
    #[arg(long)]
    font: PathBuf,

    /// Layer collection JSON.
    #[arg(long)]
    layers: PathBuf,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,
}

#[derive(Parser, Debug)]
struct DownloadArgs {
    /// Background image file.
    #[arg(long)]
    background: PathBuf,

    /// Canonical font file.
    #[arg(long)]
    font: PathBuf,

    /// Layer collection JSON.
    #[arg(long)]
    layers: PathBuf,

    /// Output JPEG path.
    #[arg(long)]
    out: PathBuf,

    /// JPEG encode quality (1-100).
    #[arg(long, default_value_t = 90)]
    quality: u8,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    match cli.cmd {
        Command::Preview(args) => cmd_preview(args),
        Command::Download(args) => cmd_download(args),
    }
}

fn read_layers(path: &Path) -> anyhow::Result<Vec<scrawl::TextLayer>> {
    let bytes = std::fs::read(path)
        .with_context(|| format!("read layer collection '{}'", path.display()))?;
    Ok(scrawl::decode_layers(&bytes)?)
}

fn cmd_preview(args: PreviewArgs) -> anyhow::Result<()> {
    let layers = read_layers(&args.layers)?;
    let background = scrawl::load_image(&args.background)?;
    let font_bytes = scrawl::load_font(&args.font)?;

    let mut compositor = scrawl::Compositor::new(font_bytes);
    let frame = compositor.composite(&background, &layers)?;

    let file = File::create(&args.out)
        .with_context(|| format!("create output '{}'", args.out.display()))?;
    let writer = BufWriter::new(file);
    image::codecs::png::PngEncoder::new(writer)
        .write_image(
            &frame.to_straight_rgba(),
            frame.width,
            frame.height,
            image::ExtendedColorType::Rgba8,
        )
        .with_context(|| "encode preview png")?;

    println!(
        "wrote {} ({}x{}, {} layers)",
        args.out.display(),
        frame.width,
        frame.height,
        layers.len()
    );
    Ok(())
}

fn cmd_download(args: DownloadArgs) -> anyhow::Result<()> {
    let layers = read_layers(&args.layers)?;

    let mut config = scrawl::RegeneratorConfig::new(&args.background, &args.font);
    config.jpeg_quality = args.quality;
    let mut regenerator = scrawl::Regenerator::new(config);

    let artifact = scrawl::request_download(&layers, &mut regenerator)?;
    std::fs::write(&args.out, &artifact.bytes)
        .with_context(|| format!("write artifact '{}'", args.out.display()))?;

    println!(
        "wrote {} ({} bytes, {})",
        args.out.display(),
        artifact.bytes.len(),
        artifact.media_type
    );
    Ok(())
}
