//! # HV Clocks Application Entry Point
//!
//! Runs the clock face controller against an in-memory framebuffer and prints
//! a terminal preview after every frame. The two mode switches of a graphical
//! host map to `--analog` and `--digital`.

// Test modules
#[cfg(test)]
mod tests;

use std::env;
use std::sync::Arc;

use anyhow::{bail, Context};
use chrono::NaiveTime;
use embedded_graphics::{pixelcolor::Rgb888, prelude::RgbColor};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use hv_clocks::{
    canvas::Canvas,
    clock::{FixedClock, SystemClock, TimeSource},
    config::Config,
    controller::{render_frame, ClockFaceController, Timing},
    framebuffer::Framebuffer,
    DisplayMode,
};

type PreviewController = ClockFaceController<Canvas<Framebuffer>, dyn TimeSource>;

/// Command line options. Anything not given falls back to the config file.
#[derive(Debug, Default, PartialEq)]
pub struct Options {
    pub mode: Option<DisplayMode>,
    pub frames: Option<u64>,
    pub config: Option<String>,
    pub time: Option<NaiveTime>,
    pub once: bool,
    pub help: bool,
}

const USAGE: &str =
    "usage: hv-clocks [--analog|--digital] [--frames N] [--config PATH] [--time HH:MM:SS] [--once]";

/// Parse command line arguments (without the program name).
pub fn parse_args<I>(args: I) -> anyhow::Result<Options>
where
    I: IntoIterator<Item = String>,
{
    let mut options = Options::default();
    let mut args = args.into_iter();
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--analog" => options.mode = Some(DisplayMode::Analog),
            "--digital" => options.mode = Some(DisplayMode::Digital),
            "--once" => options.once = true,
            "--frames" => {
                let value = args.next().context("--frames needs a value")?;
                options.frames = Some(
                    value
                        .parse()
                        .with_context(|| format!("invalid frame count {value:?}"))?,
                );
            }
            "--config" => {
                options.config = Some(args.next().context("--config needs a path")?);
            }
            "--time" => {
                let value = args.next().context("--time needs HH:MM:SS")?;
                options.time = Some(
                    NaiveTime::parse_from_str(&value, "%H:%M:%S")
                        .with_context(|| format!("invalid time {value:?}"))?,
                );
            }
            "--help" | "-h" => options.help = true,
            other => bail!("unknown argument {other:?}\n{USAGE}"),
        }
    }
    Ok(options)
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Print the framebuffer as ASCII art.
fn print_preview(framebuffer: &Framebuffer, columns: u32) {
    println!("{}", framebuffer.to_ascii(columns));
}

/// Drive the controller until `frame_limit` frames are drawn (0 = forever)
/// or Ctrl-C arrives.
async fn run(
    controller: &mut PreviewController,
    mode: DisplayMode,
    frame_limit: u64,
    columns: u32,
    timing: Timing,
) -> anyhow::Result<()> {
    let mut frames = controller.frames();
    match mode {
        DisplayMode::Analog => controller.show_analog(),
        _ => controller.show_digital(),
    }

    let ctrl_c = tokio::signal::ctrl_c();
    tokio::pin!(ctrl_c);

    loop {
        tokio::select! {
            changed = frames.changed() => {
                changed.context("frame channel closed")?;
                let frame = *frames.borrow_and_update();
                {
                    let surface = controller.surface();
                    let canvas = surface
                        .lock()
                        .map_err(|_| anyhow::anyhow!("drawing surface poisoned"))?;
                    if let Some(reading) = frame.reading {
                        println!(
                            "{} {:02}:{:02}:{:02}",
                            frame.mode, reading.hour, reading.minute, reading.second
                        );
                    }
                    print_preview(canvas.target(), columns);
                }
                if frame_limit > 0 && frame.count >= frame_limit {
                    break;
                }
            }
            _ = tokio::time::sleep(timing.tick() * 3) => {
                if controller.active_timers() == 0 {
                    bail!("clock face stopped unexpectedly");
                }
            }
            result = &mut ctrl_c => {
                result.context("listening for Ctrl-C")?;
                info!("interrupted");
                break;
            }
        }
    }

    controller.stop();
    Ok(())
}

/// Main application entry point.
fn main() -> anyhow::Result<()> {
    init_tracing();

    let options = parse_args(env::args().skip(1))?;
    if options.help {
        println!("{USAGE}");
        return Ok(());
    }
    let config = match &options.config {
        Some(path) => Config::load_from_path(path),
        None => Config::load(),
    };

    let mode = options.mode.unwrap_or(config.clock.start_mode);
    let frame_limit = options.frames.unwrap_or(config.clock.frames);
    let columns = config.display.preview_columns;
    let time: Arc<dyn TimeSource> = match options.time {
        Some(time) => Arc::new(FixedClock::new(time)),
        None => Arc::new(SystemClock),
    };

    if config.display.width < 300 || config.display.height < 300 {
        warn!(
            width = config.display.width,
            height = config.display.height,
            "surface is smaller than the 300x300 face, output will be cropped"
        );
    }
    let framebuffer = Framebuffer::new(config.display.width, config.display.height);
    let mut canvas = Canvas::with_background(framebuffer, Rgb888::WHITE);

    // One-shot render: no timer, no runtime
    if options.once {
        let reading = time.reading();
        render_frame(&mut canvas, mode, reading).context("rendering frame")?;
        print_preview(canvas.target(), columns);
        return Ok(());
    }

    let timing = Timing::try_from(&config.clock).context("invalid clock timing")?;
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("starting tokio runtime")?;

    runtime.block_on(async {
        let mut controller: PreviewController = ClockFaceController::new(canvas, time, timing);
        run(&mut controller, mode, frame_limit, columns, timing).await
    })
}
