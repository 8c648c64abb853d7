use clap::Parser;
use std::path::PathBuf;

/// karaokebox - sing along from the terminal 🎤
#[derive(Parser, Debug)]
#[command(name = "karaokebox", version, about)]
pub struct Args {
    /// Karaoke folder with the catalog and videos (remembered for next time)
    #[arg(long, short = 'f')]
    pub folder: Option<PathBuf>,

    /// Do not launch a video player; songs end after their duration
    #[arg(long)]
    pub no_video: bool,

    /// Generate default config.toml to stdout
    #[arg(long)]
    pub generate_config: bool,
}
