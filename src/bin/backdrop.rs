use std::{
    path::{Path, PathBuf},
    rc::Rc,
};

use anyhow::Context as _;
use clap::{Args, Parser, Subcommand};

use backdrop::{
    BackgroundConfig, BackgroundRenderer, FrameRGBA, LayoutCache, ManualHost, PresetId, Size,
    ThemePalette, raster::composite::flatten_over, rasterize, render_thumbnail,
};

#[derive(Parser, Debug)]
#[command(name = "backdrop", version, about = "Render decorative backgrounds headlessly")]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List every preset with its kind.
    List,
    /// Write a background config as a standalone SVG.
    Svg(SvgArgs),
    /// Render a background config as a PNG.
    Frame(FrameArgs),
    /// Render every thumbnail-safe preset as a PNG.
    Thumbnails(ThumbnailArgs),
}

#[derive(Args, Debug)]
struct ViewArgs {
    /// Built-in theme palette.
    #[arg(long, default_value = "ocean")]
    palette: String,

    /// Container width in CSS pixels.
    #[arg(long, default_value_t = 1280.0)]
    width: f64,

    /// Container height in CSS pixels.
    #[arg(long, default_value_t = 720.0)]
    height: f64,

    /// Device pixel ratio of the particle canvas (capped at 2).
    #[arg(long, default_value_t = 1.0)]
    dpr: f64,

    /// Freeze the particle canvas on its first frame.
    #[arg(long)]
    reduced_motion: bool,
}

impl ViewArgs {
    fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    fn palette(&self) -> anyhow::Result<ThemePalette> {
        ThemePalette::named(&self.palette).with_context(|| {
            format!(
                "unknown palette '{}' (expected one of {})",
                self.palette,
                backdrop::theme::PALETTE_NAMES.join(", ")
            )
        })
    }

    fn host(&self) -> anyhow::Result<Rc<ManualHost>> {
        let host = ManualHost::new(self.size(), self.dpr)?.with_reduced_motion(self.reduced_motion);
        Ok(Rc::new(host))
    }
}

#[derive(Parser, Debug)]
struct SvgArgs {
    /// Input background config JSON.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Output SVG path.
    #[arg(long)]
    out: PathBuf,

    #[command(flatten)]
    view: ViewArgs,
}

#[derive(Parser, Debug)]
struct FrameArgs {
    /// Input background config JSON.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,

    /// Time in seconds at which animated vector presets are sampled.
    #[arg(long, default_value_t = 0.0)]
    time: f64,

    /// Simulated frames to run before capturing the particle canvas.
    #[arg(long, default_value_t = 60)]
    frames: u32,

    /// Keep the layer transparent instead of flattening it onto the palette background.
    #[arg(long)]
    transparent: bool,

    #[command(flatten)]
    view: ViewArgs,
}

#[derive(Parser, Debug)]
struct ThumbnailArgs {
    /// Output directory; one `<preset>.png` per thumbnail.
    #[arg(long)]
    out_dir: PathBuf,

    /// Preset id to mark as selected.
    #[arg(long)]
    selected: Option<String>,

    #[arg(long, default_value = "ocean")]
    palette: String,

    #[arg(long, default_value_t = 320.0)]
    width: f64,

    #[arg(long, default_value_t = 180.0)]
    height: f64,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.cmd {
        Command::List => cmd_list(),
        Command::Svg(args) => cmd_svg(args),
        Command::Frame(args) => cmd_frame(args),
        Command::Thumbnails(args) => cmd_thumbnails(args),
    }
}

fn read_config(path: &Path) -> anyhow::Result<BackgroundConfig> {
    let config = BackgroundConfig::from_path(path)
        .with_context(|| format!("load background config '{}'", path.display()))?;
    if let Err(e) = config.validate() {
        tracing::warn!(error = %e, "config does not validate, rendering leniently");
    }
    Ok(config)
}

fn cmd_list() -> anyhow::Result<()> {
    for meta in backdrop::presets() {
        let thumb = if backdrop::registry::thumbnail_generator(meta.id).is_some() {
            "thumb"
        } else {
            ""
        };
        println!(
            "{:<20} {:<9} {:<5} {:<20} {}",
            meta.id.as_str(),
            meta.kind.as_str(),
            thumb,
            meta.name,
            meta.description
        );
    }
    Ok(())
}

fn cmd_svg(args: SvgArgs) -> anyhow::Result<()> {
    let config = read_config(&args.in_path)?;
    let host = args.view.host()?;
    let mut renderer = BackgroundRenderer::new(host).with_palette(args.view.palette()?);

    let svg = match renderer.render(&config) {
        Some(mounted) => mounted.to_svg(args.view.size()).with_context(|| {
            format!(
                "preset '{}' draws on a canvas; use `frame` instead",
                mounted.preset
            )
        })?,
        None => backdrop::to_svg(
            &backdrop::Scene::new(backdrop::scene::ViewBox::Viewport),
            args.view.size(),
        ),
    };

    create_parent_dir(&args.out)?;
    std::fs::write(&args.out, svg)
        .with_context(|| format!("write svg '{}'", args.out.display()))?;
    eprintln!("wrote {}", args.out.display());
    Ok(())
}

fn cmd_frame(args: FrameArgs) -> anyhow::Result<()> {
    let config = read_config(&args.in_path)?;
    let palette = args.view.palette()?;
    let host = args.view.host()?;
    let mut renderer = BackgroundRenderer::new(host).with_palette(palette);
    renderer.render(&config);
    for _ in 0..args.frames {
        renderer.poll();
    }

    let size = args.view.size();
    let mut frame = match renderer.mounted() {
        Some(mounted) => rasterize(mounted, size, args.time)?,
        None => {
            let (w, h) = backdrop::raster::svg::raster_size(size)?;
            FrameRGBA::transparent(w, h)
        }
    };
    if !args.transparent {
        flatten_over(&mut frame.data, palette.bg.to_rgba8_premul());
    }
    write_png(&args.out, &frame)
}

fn cmd_thumbnails(args: ThumbnailArgs) -> anyhow::Result<()> {
    let palette = ThemePalette::named(&args.palette)
        .with_context(|| format!("unknown palette '{}'", args.palette))?;
    let size = Size::new(args.width, args.height);
    let mut layouts = LayoutCache::new();

    std::fs::create_dir_all(&args.out_dir)
        .with_context(|| format!("create output dir '{}'", args.out_dir.display()))?;

    for id in PresetId::ALL {
        let selected = args.selected.as_deref() == Some(id.as_str());
        let Some(thumb) = render_thumbnail(id.as_str(), selected, &palette, size, &mut layouts)
        else {
            continue;
        };
        // Previews never animate, so the canvas keeps its first frame.
        let host = Rc::new(ManualHost::new(size, 1.0)?.with_reduced_motion(true));
        let mounted = thumb.mount(host);
        let mut frame = rasterize(&mounted, size, 0.0)?;
        flatten_over(&mut frame.data, palette.bg.to_rgba8_premul());

        let out = args.out_dir.join(format!("{id}.png"));
        write_png(&out, &frame)?;
        if selected {
            eprintln!("  (selected) {id}");
        }
    }
    Ok(())
}

fn create_parent_dir(path: &Path) -> anyhow::Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    Ok(())
}

fn write_png(path: &Path, frame: &FrameRGBA) -> anyhow::Result<()> {
    create_parent_dir(path)?;
    image::save_buffer_with_format(
        path,
        &frame.to_straight_rgba8(),
        frame.width,
        frame.height,
        image::ColorType::Rgba8,
        image::ImageFormat::Png,
    )
    .with_context(|| format!("write png '{}'", path.display()))?;
    eprintln!("wrote {}", path.display());
    Ok(())
}
