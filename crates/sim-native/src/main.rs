use std::fs;
use std::io::Write;
use std::path::PathBuf;
use std::time::Instant;

use anyhow::{bail, Context};

use sim_core::{
    auto_calibrate, render_frame, FrameOutput, LedTopology, Pattern, RenderParams, SimClock,
    ViewTransform,
};

struct Options {
    width: u32,
    height: u32,
    frames: usize,
    speed: f32,
    pattern: Pattern,
    calibrate: bool,
    out_dir: PathBuf,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            width: 320,
            height: 180,
            frames: 30,
            speed: 1.0,
            pattern: Pattern::Ridge,
            calibrate: false,
            out_dir: PathBuf::from("frames"),
        }
    }
}

fn parse_options() -> anyhow::Result<Options> {
    let mut opts = Options::default();
    let mut args = std::env::args().skip(1);
    while let Some(arg) = args.next() {
        let mut value = |name: &str| {
            args.next()
                .with_context(|| format!("{name} requires a value"))
        };
        match arg.as_str() {
            "--width" => opts.width = value("--width")?.parse()?,
            "--height" => opts.height = value("--height")?.parse()?,
            "--frames" => opts.frames = value("--frames")?.parse()?,
            "--speed" => opts.speed = value("--speed")?.parse()?,
            "--pattern" => {
                opts.pattern = match value("--pattern")?.as_str() {
                    "ridge" => Pattern::Ridge,
                    "swirl" => Pattern::Swirl,
                    other => bail!("unknown pattern `{other}` (expected ridge or swirl)"),
                }
            }
            "--calibrate" => opts.calibrate = true,
            "--out" => opts.out_dir = PathBuf::from(value("--out")?),
            "--help" | "-h" => {
                println!(
                    "usage: sim-native [--width N] [--height N] [--frames N] [--speed F] \
                     [--pattern ridge|swirl] [--calibrate] [--out DIR]"
                );
                std::process::exit(0);
            }
            other => bail!("unknown argument `{other}` (try --help)"),
        }
    }
    Ok(opts)
}

fn write_pgm(path: &std::path::Path, width: u32, height: u32, pixels: &[u8]) -> anyhow::Result<()> {
    let mut f = fs::File::create(path).with_context(|| format!("create {}", path.display()))?;
    write!(f, "P5\n{width} {height}\n255\n")?;
    f.write_all(pixels)?;
    Ok(())
}

fn led_bar(v: f32) -> &'static str {
    const BARS: [&str; 9] = [" ", ".", ":", "-", "=", "+", "*", "#", "@"];
    BARS[((v.clamp(0.0, 1.0) * 8.0).round()) as usize]
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let opts = parse_options()?;

    let mut params = RenderParams {
        pattern: opts.pattern,
        ..RenderParams::default()
    };
    let topology = LedTopology::default();
    let view = ViewTransform::new(opts.width, opts.height);
    let clock = SimClock::new(opts.speed);

    if opts.calibrate {
        if let Some(cal) = auto_calibrate(&params, &topology, clock.now(), clock.speed()) {
            log::info!("calibration window: lo={:.4} hi={:.4}", cal.lo, cal.hi);
            params.calibration = Some(cal);
        }
    }

    fs::create_dir_all(&opts.out_dir)
        .with_context(|| format!("create {}", opts.out_dir.display()))?;

    let started = Instant::now();
    for frame in 0..opts.frames {
        // Fixed 30 Hz cadence for deterministic output; the clock is only
        // used to anchor t0 and the playback speed.
        let t = clock.now() + frame as f32 / 30.0 * clock.speed();
        let FrameOutput {
            pixels,
            led_brightness,
        } = render_frame(t, &params, &view, &topology);

        let path = opts.out_dir.join(format!("frame_{frame:04}.pgm"));
        write_pgm(&path, opts.width, opts.height, &pixels)?;

        let bars: String = led_brightness.iter().map(|v| led_bar(*v)).collect();
        println!("t={t:7.3}  [{bars}]");
    }
    log::info!(
        "rendered {} frames ({}x{}) in {:?}",
        opts.frames,
        opts.width,
        opts.height,
        started.elapsed()
    );
    Ok(())
}
