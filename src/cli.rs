// CLI definition

use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;

#[derive(Debug, Parser)]
#[clap(
    name = "driftfield",
    version,
    about = "Ambient particle-field background animation for your terminal"
)]
pub struct CliArgs {
    /// Target frames per second
    #[clap(long, value_parser = clap::value_parser!(u32).range(1..=240), default_value_t = 60)]
    pub fps: u32,

    /// Fix the RNG seed for a reproducible field
    #[clap(long, value_parser)]
    pub seed: Option<u64>,

    /// Color theme: midnight, ember, or aurora
    #[clap(long, value_parser, default_value = "midnight", env = "DRIFTFIELD_THEME")]
    pub theme: String,

    /// Surface units per terminal pseudo-pixel; smaller means denser
    #[clap(long, value_parser, default_value_t = driftfield_render::DEFAULT_SCALE)]
    pub scale: f32,

    /// Stop after this long (e.g. "30s", "5m"); runs until interrupted otherwise
    #[clap(long, value_parser = humantime::parse_duration)]
    pub duration: Option<Duration>,

    /// Append logs to this file; without it logging is disabled
    #[clap(long, value_parser, env = "DRIFTFIELD_LOG")]
    pub log_file: Option<PathBuf>,

    /// Skip the particle-count intro overlay
    #[clap(long)]
    pub no_hud: bool,
}
