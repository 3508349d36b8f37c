use clap::Parser;
use std::path::PathBuf;

/// A terminal star field with comets, particle bursts and a spinner you can
/// drag around with the mouse
#[derive(Parser, Debug)]
#[command(version, about)]
pub struct Args {
    /// Frames per second
    #[arg(long, default_value_t = 60, value_parser = clap::value_parser!(u32).range(1..=240))]
    pub fps: u32,

    /// Number of interactive dots on the spinner
    #[arg(long, default_value_t = 6, value_parser = clap::value_parser!(u16).range(1..=64))]
    pub dots: u16,

    /// Seed for the random number generator
    #[arg(long)]
    pub seed: Option<u64>,

    /// Show the debug overlay on start
    #[arg(short, long)]
    pub debug: bool,

    /// Never ring the bell on hover
    #[arg(short, long)]
    pub mute: bool,

    /// Write logs to this file
    #[arg(long)]
    pub log_file: Option<PathBuf>,

    /// Log filter directive, e.g. "stardrift=debug"
    #[arg(long)]
    pub log_level: Option<String>,
}

pub fn parse() -> Args {
    Args::parse()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let args = Args::try_parse_from(["stardrift"]).unwrap();
        assert_eq!(args.fps, 60);
        assert_eq!(args.dots, 6);
        assert!(args.seed.is_none());
        assert!(!args.debug && !args.mute);
    }

    #[test]
    fn rejects_zero_dots_and_fps() {
        assert!(Args::try_parse_from(["stardrift", "--dots", "0"]).is_err());
        assert!(Args::try_parse_from(["stardrift", "--fps", "0"]).is_err());
    }

    #[test]
    fn parses_flags() {
        let args = Args::try_parse_from([
            "stardrift", "--seed", "7", "-d", "-m", "--log-file", "fx.log",
        ])
        .unwrap();
        assert_eq!(args.seed, Some(7));
        assert!(args.debug && args.mute);
        assert_eq!(args.log_file, Some(PathBuf::from("fx.log")));
    }
}
