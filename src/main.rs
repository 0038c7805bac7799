use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};

use wordcloud_rs::layout::ProbeStrategy;
use wordcloud_rs::render::svg::SvgSurface;
use wordcloud_rs::render::text::{EstimateMeasure, FontMeasure, TextMeasure};
use wordcloud_rs::render::{Size, Viewport};
use wordcloud_rs::source::DataSource;
use wordcloud_rs::{Cloud, CloudConfig, CloudPhase, Setting};

const USAGE: &str = "usage: wordcloud-rs <data.json | url | json-text> [out.svg] \
[--size=WxH] [--font=path.ttf] [--lang=en] [--ignore-bad] [--compass] [setting=value ...]";

/// Parsed command line.
struct Args {
    data: String,
    output: PathBuf,
    config: CloudConfig,
    viewport: Viewport,
    font: Option<PathBuf>,
}

fn parse_args() -> Result<Args> {
    let mut positional = Vec::new();
    let mut config = CloudConfig::default();
    let mut viewport = Viewport {
        container: Size::default(),
        window: Size::new(1280.0, 800.0),
    };
    let mut font = None;

    for arg in std::env::args().skip(1) {
        if let Some(flag) = arg.strip_prefix("--") {
            match flag.split_once('=') {
                Some(("size", v)) => {
                    let (w, h) = v.split_once('x').context("--size expects WxH")?;
                    viewport.container = Size::new(w.parse()?, h.parse()?);
                }
                Some(("font", v)) => font = Some(PathBuf::from(v)),
                Some(("lang", v)) => config.language = v.to_string(),
                None if flag == "ignore-bad" => config.ignore_bad_items = true,
                None if flag == "compass" => config.layout.probe = ProbeStrategy::Compass,
                _ => bail!("unknown flag --{}\n{}", flag, USAGE),
            }
        } else if let Some((name, value)) = arg.split_once('=') {
            let setting = Setting::from_name(name)
                .with_context(|| format!("unknown setting '{}'", name))?;
            let value = setting.parse(value)?;
            setting.apply(&mut config, value);
        } else {
            positional.push(arg);
        }
    }

    let mut positional = positional.into_iter();
    let Some(data) = positional.next() else {
        bail!(USAGE);
    };
    let output = positional
        .next()
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("cloud.svg"));

    Ok(Args {
        data,
        output,
        config,
        viewport,
        font,
    })
}

fn data_source(arg: &str) -> Result<DataSource> {
    let path = Path::new(arg);
    if path.is_file() {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading {}", path.display()))?;
        return Ok(DataSource::Json(text));
    }
    Ok(DataSource::infer(arg))
}

fn run<M: TextMeasure>(measure: M, args: Args) -> Result<()> {
    let surface = SvgSurface::new(measure, args.viewport);
    let cloud = Cloud::new(args.config, data_source(&args.data)?, surface)?;

    if cloud.phase() != CloudPhase::Ready {
        bail!("no data received from {}", args.data);
    }

    cloud
        .surface()
        .write_to(&args.output)
        .with_context(|| format!("writing {}", args.output.display()))?;

    let bounds = cloud.layout().and_then(|l| l.bounds());
    tracing::info!(
        "Wrote {} words to {} (bounds {:?})",
        cloud.topics().len(),
        args.output.display(),
        bounds
    );
    println!("{}", args.output.display());
    Ok(())
}

fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_ansi(false)
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("wordcloud_rs=info".parse()?),
        )
        .init();

    let args = parse_args()?;
    tracing::info!("wordcloud-rs starting, data: {}", args.data);

    let measure = match &args.font {
        Some(path) => Some(FontMeasure::from_path(path)?),
        None => match FontMeasure::load_system_font() {
            Ok(m) => Some(m),
            Err(e) => {
                tracing::warn!("{}; falling back to estimated text widths", e);
                None
            }
        },
    };

    match measure {
        Some(m) => run(m, args),
        None => run(EstimateMeasure::default(), args),
    }
}
