// Frame loop driver
//
// Wires the engine to the renderer: one surface, one field, one clock.
// Signals arrive on a watcher thread and land in shared flags the loop polls
// between frames; a resize swaps the field and viewport out, it never stops
// the loop.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use log::info;
use signal_hook::consts::{SIGINT, SIGTERM, SIGWINCH};
use signal_hook::iterator::Signals;

use driftfield_engine::{
    Animation, CounterAnimation, FieldAnimation, FieldOptions, FrameClock, ShutdownFlag,
};
use driftfield_render::{FrameEmitter, Rasterizer, TerminalSurface, Theme, Viewport};

/// Everything the loop needs, resolved from the CLI.
pub struct RunOptions {
    pub fps: u32,
    pub seed: Option<u64>,
    pub theme: Theme,
    pub scale: f32,
    pub duration: Option<Duration>,
    pub hud: bool,
}

pub fn run(options: RunOptions) -> Result<()> {
    let shutdown = ShutdownFlag::new();
    let resize_pending = Arc::new(AtomicBool::new(false));
    spawn_signal_watcher(shutdown.clone(), resize_pending.clone())?;

    let mut surface = TerminalSurface::acquire()?;
    let (cols, rows) = surface.size()?;
    let mut viewport = Viewport::new(cols, rows, options.scale);

    let mut animation = FieldAnimation::new(
        viewport.surface_width(),
        viewport.surface_height(),
        FieldOptions {
            fps: options.fps,
            seed: options.seed,
        },
    )?;
    let mut rasterizer = Rasterizer::new(viewport, options.theme);
    let mut emitter = FrameEmitter::new(cols, rows);
    let mut clock = FrameClock::new(options.fps);

    let particle_count = animation.field().particles().len();
    let mut hud = options.hud.then(|| {
        CounterAnimation::new(particle_count as u64)
            .with_suffix(" particles")
            .with_fps(options.fps)
    });

    info!(
        "Driftfield: {} particles on a {}x{} cell surface at {} fps",
        particle_count, cols, rows, options.fps
    );

    let started = Instant::now();
    let mut frames: u64 = 0;
    while !shutdown.is_raised() {
        if let Some(limit) = options.duration {
            if started.elapsed() >= limit {
                break;
            }
        }
        if resize_pending.swap(false, Ordering::SeqCst) {
            let (cols, rows) = surface.size()?;
            viewport = Viewport::new(cols, rows, options.scale);
            animation.resize(viewport.surface_width(), viewport.surface_height())?;
            rasterizer.set_viewport(viewport);
            emitter.resize(cols, rows);
            info!(
                "Driftfield: surface resized to {}x{} cells, {} particles",
                cols,
                rows,
                animation.field().particles().len()
            );
        }

        let Some(scene) = animation.next_frame() else {
            break;
        };
        let buffer = rasterizer.rasterize(&scene);
        emitter
            .emit(&mut surface, buffer)
            .context("failed to write frame")?;

        if let Some(counter) = hud.as_mut() {
            let row = rasterizer.viewport().rows.saturating_sub(1);
            match counter.next_frame() {
                Some(text) => {
                    emitter
                        .overlay_text(
                            &mut surface,
                            row,
                            1,
                            &text,
                            options.theme.accent,
                            options.theme.background,
                        )
                        .context("failed to write overlay")?;
                }
                None => {
                    // Let the field reclaim the overlay row.
                    emitter.force_row(row);
                    hud = None;
                }
            }
        }

        frames += 1;
        clock.tick();
    }

    info!(
        "Driftfield: shutting down after {} frames ({})",
        frames,
        humantime::format_duration(Duration::from_secs(started.elapsed().as_secs()))
    );
    Ok(())
}

fn spawn_signal_watcher(shutdown: ShutdownFlag, resize_pending: Arc<AtomicBool>) -> Result<()> {
    let mut signals =
        Signals::new([SIGWINCH, SIGINT, SIGTERM]).context("failed to install signal handlers")?;
    thread::Builder::new()
        .name("driftfield-signals".to_string())
        .spawn(move || {
            for signal in signals.forever() {
                match signal {
                    SIGWINCH => {
                        resize_pending.store(true, Ordering::SeqCst);
                    }
                    SIGINT | SIGTERM => {
                        shutdown.raise();
                        break;
                    }
                    _ => {}
                }
            }
        })
        .context("failed to spawn signal watcher")?;
    Ok(())
}
