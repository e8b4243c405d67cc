use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::{Args, Parser, Subcommand};
use deepfry::{
    ExportFormat, ExportOpts, ExportOutcome, FrySession, Param, ParameterSet, Preset, SessionOpts,
};

#[derive(Parser, Debug)]
#[command(name = "deepfry", version)]
struct Cli {
    /// Log pipeline and scheduler decisions to stderr.
    #[arg(short, long, global = true, default_value_t = false)]
    verbose: bool,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Deep-fry an image file.
    Fry(FryArgs),
    /// Write the built-in demo image, optionally fried.
    Demo(DemoArgs),
    /// Print every preset bundle as JSON.
    Presets,
}

#[derive(Parser, Debug)]
struct FryArgs {
    /// Input image (any format the decoder reads, or SVG).
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Output path. A directory gets the fixed export file name.
    #[arg(long)]
    out: PathBuf,

    #[command(flatten)]
    look: LookArgs,
}

#[derive(Parser, Debug)]
struct DemoArgs {
    /// Output path. A directory gets the fixed export file name.
    #[arg(long)]
    out: PathBuf,

    /// Run the pipeline over the demo image instead of writing it untouched.
    #[arg(long, default_value_t = false)]
    fry: bool,

    #[command(flatten)]
    look: LookArgs,
}

#[derive(Args, Debug)]
struct LookArgs {
    /// Start from a preset: none, film, lofi, vhs, ultra.
    #[arg(long, conflicts_with = "params")]
    preset: Option<Preset>,

    /// Start from a JSON parameter file.
    #[arg(long)]
    params: Option<PathBuf>,

    /// Brightness, percent (50..=400).
    #[arg(long, allow_negative_numbers = true)]
    brightness: Option<f32>,
    /// Contrast, percent (50..=250).
    #[arg(long, allow_negative_numbers = true)]
    contrast: Option<f32>,
    /// Saturation, percent (0..=300).
    #[arg(long, allow_negative_numbers = true)]
    saturation: Option<f32>,
    /// Hue rotation, degrees (-180..=180).
    #[arg(long, allow_negative_numbers = true)]
    hue: Option<f32>,
    /// Exposure, EV (-2..=2).
    #[arg(long, allow_negative_numbers = true)]
    exposure: Option<f32>,
    /// Burn, percent (0..=100).
    #[arg(long, allow_negative_numbers = true)]
    burn: Option<f32>,
    /// Noise amount (0..=1).
    #[arg(long, allow_negative_numbers = true)]
    noise: Option<f32>,
    /// Posterization levels (0..=8; 0 and 1 disable).
    #[arg(long)]
    posterize: Option<u8>,

    /// Export PNG instead of JPEG.
    #[arg(long, default_value_t = false)]
    png: bool,

    /// JPEG quality (1..=100).
    #[arg(long, default_value_t = deepfry::encode::export::JPEG_QUALITY)]
    quality: u8,

    /// Fixed noise seed for reproducible grain.
    #[arg(long)]
    seed: Option<u64>,
}

impl LookArgs {
    fn parameter_set(&self) -> anyhow::Result<ParameterSet> {
        let mut params = match (&self.params, self.preset) {
            (Some(path), _) => {
                let text = std::fs::read_to_string(path)
                    .with_context(|| format!("read params '{}'", path.display()))?;
                serde_json::from_str::<ParameterSet>(&text)
                    .with_context(|| format!("parse params '{}'", path.display()))?
            }
            (None, Some(preset)) => ParameterSet::from_preset(preset),
            (None, None) => ParameterSet::default(),
        };

        let overrides = [
            (Param::Brightness, self.brightness),
            (Param::Contrast, self.contrast),
            (Param::Saturation, self.saturation),
            (Param::Hue, self.hue),
            (Param::Exposure, self.exposure),
            (Param::Burn, self.burn),
            (Param::Noise, self.noise),
            (Param::Posterize, self.posterize.map(f32::from)),
        ];
        for (param, value) in overrides {
            if let Some(v) = value {
                params.set(param, v);
            }
        }
        Ok(params)
    }

    fn session_opts(&self) -> SessionOpts {
        let mut opts = SessionOpts::from_env();
        if self.seed.is_some() {
            opts.noise_seed = self.seed;
        }
        opts.export = ExportOpts {
            format: if self.png {
                ExportFormat::Png
            } else {
                ExportFormat::Jpeg {
                    quality: self.quality,
                }
            },
        };
        opts
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    match cli.cmd {
        Command::Fry(args) => cmd_fry(args),
        Command::Demo(args) => cmd_demo(args),
        Command::Presets => cmd_presets(),
    }
}

fn init_tracing(verbose: bool) {
    let level = if verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::WARN
    };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_max_level(level)
        .with_target(false)
        .init();
}

fn cmd_fry(args: FryArgs) -> anyhow::Result<()> {
    let mut sess = FrySession::stepped(args.look.session_opts());
    sess.load_image_path(&args.in_path)
        .with_context(|| format!("load image '{}'", args.in_path.display()))?;
    sess.set_params(args.look.parameter_set()?);
    run_and_export(&mut sess, &args.out)
}

fn cmd_demo(args: DemoArgs) -> anyhow::Result<()> {
    let mut sess = FrySession::stepped(args.look.session_opts());
    sess.load_demo_image().context("generate demo image")?;
    if args.fry {
        sess.set_params(args.look.parameter_set()?);
    } else {
        sess.set_params(ParameterSet::neutral());
    }
    run_and_export(&mut sess, &args.out)
}

fn cmd_presets() -> anyhow::Result<()> {
    let all: Vec<ParameterSet> = Preset::ALL
        .iter()
        .map(|&p| ParameterSet::from_preset(p))
        .collect();
    let json = serde_json::to_string_pretty(&all).context("serialize presets")?;
    println!("{json}");
    Ok(())
}

fn run_and_export(sess: &mut FrySession<deepfry::SteppedClock>, out: &Path) -> anyhow::Result<()> {
    while sess.step()?.is_some() {}

    match sess.export()? {
        ExportOutcome::Encoded(img) => {
            let path = if out.is_dir() {
                out.join(&img.file_name)
            } else {
                if let Some(parent) = out.parent().filter(|p| !p.as_os_str().is_empty()) {
                    std::fs::create_dir_all(parent)
                        .with_context(|| format!("create output dir '{}'", parent.display()))?;
                }
                out.to_path_buf()
            };
            img.write_file(&path)?;
            eprintln!("wrote {} ({}x{})", path.display(), img.width, img.height);
        }
        ExportOutcome::Skipped(notice) => {
            eprintln!("nothing exported: {notice}");
        }
    }
    Ok(())
}
