//! Loads a skinned glTF asset, plays its active animation for a number of
//! fixed-step frames and prints what the renderer would receive.
//!
//! ```text
//! cargo run --example inspect -- model.glb [frames] [--settings settings.json] [--wgpu]
//! ```

use std::path::PathBuf;
use std::time::Duration;

use anyhow::Context;
use armature::gpu::{GpuContext, HeadlessContext, WgpuContext};
use armature::{ModelSettings, SkinnedModel, Timer};

struct Args {
    path: PathBuf,
    frames: u32,
    settings: ModelSettings,
    use_wgpu: bool,
}

fn parse_args() -> anyhow::Result<Args> {
    let mut path = None;
    let mut frames = 120;
    let mut settings = ModelSettings::default();
    let mut use_wgpu = false;

    let mut args = std::env::args().skip(1);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--wgpu" => use_wgpu = true,
            "--settings" => {
                let file = args.next().context("--settings needs a path")?;
                let text = std::fs::read_to_string(&file)
                    .with_context(|| format!("Failed to read settings file: {file}"))?;
                settings = ModelSettings::from_json_str(&text)?;
            }
            _ if path.is_none() => path = Some(PathBuf::from(arg)),
            _ => frames = arg.parse().context("frame count must be an integer")?,
        }
    }

    Ok(Args {
        path: path.context("usage: inspect <model.gltf|model.glb> [frames] [--settings file] [--wgpu]")?,
        frames,
        settings,
        use_wgpu,
    })
}

fn play<C: GpuContext>(args: &Args, ctx: &mut C) -> anyhow::Result<()> {
    let mut model = SkinnedModel::load(&args.path, &args.settings, ctx)
        .with_context(|| format!("Failed to load {}", args.path.display()))?;

    let cpu = model.model();
    println!("Loaded {}", args.path.display());
    println!(
        "  nodes: {} ({} in scene), vertices: {}, indices: {}",
        cpu.graph.len(),
        cpu.graph.linear().len(),
        cpu.vertices.len(),
        cpu.indices.len()
    );
    for (i, skin) in cpu.skins.iter().enumerate() {
        let uploaded = model.skin_resources(i).is_some();
        println!("  skin {i} '{}': {} joints, uploaded: {uploaded}", skin.name, skin.joint_count());
    }
    for (i, name) in cpu.animation_names().enumerate() {
        println!("  animation {i}: {name}");
    }

    let mut timer = Timer::new();
    let mut advanced = 0;
    for _ in 0..args.frames {
        let dt = timer.step(Duration::from_secs_f32(1.0 / 60.0));
        if model.advance(ctx, dt) {
            advanced += 1;
        }
    }

    let cpu = model.model();
    match cpu.active_animation() {
        Some(animation) => println!(
            "Played '{}' for {advanced} frames ({:.2}s), play-head at {:.3}s of [{:.3}, {:.3}]",
            animation.name,
            timer.elapsed().as_secs_f32(),
            animation.current_time(),
            animation.start(),
            animation.end()
        ),
        None => println!("No active animation; {} frames were inert", args.frames),
    }

    for draw in model.draw_commands() {
        println!(
            "  draw node {:>3}: indices {}..{} skin {:?}",
            draw.node,
            draw.first_index,
            draw.first_index + draw.index_count,
            draw.skin
        );
    }

    model.unload(ctx);
    Ok(())
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let args = parse_args()?;

    if args.use_wgpu {
        let mut ctx = pollster::block_on(WgpuContext::new_headless())?;
        play(&args, &mut ctx)
    } else {
        let mut ctx = HeadlessContext::new();
        play(&args, &mut ctx)?;
        println!("Buffers still alive after unload: {}", ctx.live_buffers());
        Ok(())
    }
}
