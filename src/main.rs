mod caster;
mod color;
mod config;
mod frame;
mod interactive;
mod lighting;
mod map;
mod player;
mod render;
mod shade;
mod trig;

#[cfg(test)]
mod tests;

use std::path::PathBuf;

// Re-export public API
pub use caster::{
    CastParams, RayHit, cast_columns, cast_columns_sequential, cast_ray, ray_angle,
};
pub use color::Rgb;
pub use config::RenderConfig;
pub use frame::{DrawCommand, Frame, World};
pub use interactive::{InteractiveViewer, ViewerConfig};
pub use lighting::{DepthPolicy, LightSet, LightSource};
pub use map::{Cell, GridMap, MapError};
pub use player::{InputState, Player};
pub use render::{Canvas, save_ppm};
pub use shade::{ShadingMode, project, shade_distance, shade_lit};
pub use trig::{Exact, SinCos, SinCosTable, TrigSource, sin_cos};

/// What the binary was asked to do
#[derive(Debug, Clone, PartialEq)]
enum Command {
    Usage,
    Interactive,
    Snapshot(PathBuf),
    Benchmark,
}

/// Parsed command line
#[derive(Debug, Clone)]
struct Options {
    command: Command,
    viewer: ViewerConfig,
}

fn parse_args<I: IntoIterator<Item = String>>(args: I) -> Result<Options, String> {
    let mut command = Command::Interactive;
    let mut viewer = ViewerConfig::default();
    let mut args = args.into_iter();

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--help" | "-h" => command = Command::Usage,
            "--interactive" => command = Command::Interactive,
            "--benchmark" => command = Command::Benchmark,
            "--snapshot" => {
                let path = args.next().ok_or("--snapshot needs an output file")?;
                command = Command::Snapshot(PathBuf::from(path));
            }
            "--map" => {
                let path = args.next().ok_or("--map needs a layout file")?;
                viewer.map_path = Some(PathBuf::from(path));
            }
            "--flat" => viewer.render.shading = ShadingMode::Distance,
            "--ambient-only" => viewer.render.depth_policy = DepthPolicy::AmbientOnly,
            "--table" => {
                viewer.render = viewer.render.with_trig_table(SinCosTable::DEFAULT_ENTRIES);
            }
            other => log::warn!("Ignoring unknown argument {:?}", other),
        }
    }

    Ok(Options { command, viewer })
}

fn main() {
    let env = env_logger::Env::default().default_filter_or("info");
    let _ = env_logger::Builder::from_env(env).try_init();

    let options = match parse_args(std::env::args().skip(1)) {
        Ok(options) => options,
        Err(e) => {
            log::error!("{}", e);
            std::process::exit(2);
        }
    };

    if let Err(e) = run(options) {
        log::error!("{}", e);
        std::process::exit(1);
    }
}

fn run(options: Options) -> Result<(), String> {
    match &options.command {
        Command::Usage => {
            print_usage();
            Ok(())
        }
        Command::Interactive => run_interactive(options.viewer),
        Command::Snapshot(path) => run_snapshot(&options.viewer, path),
        Command::Benchmark => run_benchmark(&options.viewer),
    }
}

fn print_usage() {
    println!("Raycast Lights");
    println!("Run without arguments (or with --interactive) for the minifb viewer");
    println!("Run with --snapshot <file.ppm> to render one frame to disk");
    println!("Run with --benchmark to time the column pass");
    println!("Options: --map <file>  --flat  --ambient-only  --table");
}

fn run_interactive(config: ViewerConfig) -> Result<(), String> {
    let mut viewer = InteractiveViewer::new(config)?;
    viewer.run()
}

fn run_snapshot(config: &ViewerConfig, path: &std::path::Path) -> Result<(), String> {
    config.render.validate()?;
    let map = config.load_map()?;
    let world = World::with_map(map, config.render.clone());
    let frame = world.render(0.0);

    let (width, height) = config.render.screen_size;
    let mut canvas = Canvas::new(width, height);
    canvas.draw_all(&frame.commands);
    save_ppm(&canvas, path).map_err(|e| format!("{}: {}", path.display(), e))?;

    log::info!(
        "Wrote {}x{} {} snapshot to {}",
        width,
        height,
        config.render.shading.as_str(),
        path.display()
    );
    Ok(())
}

fn run_benchmark(config: &ViewerConfig) -> Result<(), String> {
    use std::time::Instant;

    config.render.validate()?;
    let map = config.load_map()?;

    println!("=== Column Pass Benchmark ===\n");

    let widths = [320usize, 640, 1280];
    let iterations = 50;
    let params = config.render.cast;
    let fov = config.render.fov;
    let player = Player::default();
    let table = SinCosTable::default();

    for width in widths {
        println!("Columns: {}", width);
        println!("-----------------------");

        let start = Instant::now();
        for _ in 0..iterations {
            let _ = cast_columns_sequential(&map, &player, &params, width, fov, &Exact);
        }
        let sequential_ms = start.elapsed().as_secs_f64() * 1000.0 / iterations as f64;

        let start = Instant::now();
        for _ in 0..iterations {
            let _ = cast_columns(&map, &player, &params, width, fov, &Exact);
        }
        let parallel_ms = start.elapsed().as_secs_f64() * 1000.0 / iterations as f64;

        let start = Instant::now();
        for _ in 0..iterations {
            let _ = cast_columns(&map, &player, &params, width, fov, &table);
        }
        let table_ms = start.elapsed().as_secs_f64() * 1000.0 / iterations as f64;

        println!("  Sequential (exact trig): {:.3} ms/frame", sequential_ms);
        println!("  Parallel (exact trig):   {:.3} ms/frame", parallel_ms);
        println!("  Parallel (trig table):   {:.3} ms/frame", table_ms);
        println!("  Speedup: {:.2}x", sequential_ms / parallel_ms);
        println!();
    }

    // Full frame including shading and draw commands
    let world = World::with_map(map, config.render.clone());
    let start = Instant::now();
    for _ in 0..iterations {
        let _ = world.render(0.0);
    }
    let frame_ms = start.elapsed().as_secs_f64() * 1000.0 / iterations as f64;
    let (width, height) = config.render.screen_size;
    println!(
        "Full frame {}x{}: {:.3} ms ({:.1} FPS max)",
        width,
        height,
        frame_ms,
        1000.0 / frame_ms
    );

    Ok(())
}
