use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use nessys_core::control::Speed;
use tracing::Level;

/// Headless host for the bundled translated demo.
#[derive(Parser, Debug)]
#[command(name = "nessys", author, version, about, long_about = None)]
pub struct Args {
    /// iNES image providing CHR data and the nametable layout
    #[arg(long)]
    pub rom: Option<PathBuf>,

    /// Stop after this many finished frames
    #[arg(long)]
    pub frames: Option<u64>,

    /// Stop after this many seconds of wall-clock time
    #[arg(long, default_value_t = 5)]
    pub seconds: u64,

    /// Emulation speed multiplier
    #[arg(long, value_enum, default_value_t = SpeedArg::X1)]
    pub speed: SpeedArg,

    /// Start with the greyscale filter on
    #[arg(long)]
    pub greyscale: bool,

    /// Pause once this many frames have been shown
    #[arg(long)]
    pub pause_after: Option<u64>,

    /// Request a restart once this many frames have been shown
    #[arg(long)]
    pub restart_after: Option<u64>,

    /// Write the last finished frame to this PNG on exit
    #[arg(long)]
    pub dump: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, default_value = "info")]
    pub log_level: Level,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SpeedArg {
    #[value(name = "1")]
    X1,
    #[value(name = "2")]
    X2,
    #[value(name = "5")]
    X5,
    #[value(name = "100")]
    X100,
}

impl From<SpeedArg> for Speed {
    fn from(arg: SpeedArg) -> Self {
        match arg {
            SpeedArg::X1 => Speed::Normal,
            SpeedArg::X2 => Speed::Double,
            SpeedArg::X5 => Speed::Quintuple,
            SpeedArg::X100 => Speed::Unbounded,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_menu_flags() {
        let args = Args::try_parse_from([
            "nessys",
            "--speed",
            "5",
            "--greyscale",
            "--frames",
            "120",
            "--restart-after",
            "30",
            "--log-level",
            "debug",
        ])
        .expect("valid flags");
        assert_eq!(Speed::from(args.speed), Speed::Quintuple);
        assert!(args.greyscale);
        assert_eq!(args.frames, Some(120));
        assert_eq!(args.restart_after, Some(30));
        assert_eq!(args.log_level, Level::DEBUG);
        assert!(args.rom.is_none());
    }

    #[test]
    fn rejects_unknown_speeds() {
        assert!(Args::try_parse_from(["nessys", "--speed", "3"]).is_err());
    }
}
