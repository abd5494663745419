//! Command-line configuration.
//!
//! Every option can also be set through a `BLOCKFALL_*` environment variable.

use std::path::PathBuf;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use clap::Parser;

use crate::types::DEFAULT_GRAVITY_MS;

/// Falling-block puzzle game for the terminal.
#[derive(Parser, Debug, Clone, PartialEq, Eq)]
#[command(version, about, long_about = None)]
pub struct Args {
    /// Seed for piece selection. Defaults to a clock-derived value.
    #[arg(long, env = "BLOCKFALL_SEED")]
    pub seed: Option<u32>,

    /// Milliseconds between automatic ticks. 0 disables them; Space still ticks.
    #[arg(long, env = "BLOCKFALL_GRAVITY_MS", default_value_t = DEFAULT_GRAVITY_MS)]
    pub gravity_ms: u32,

    /// Terminal columns per block.
    #[arg(long, default_value_t = 2, value_parser = clap::value_parser!(u16).range(1..=4))]
    pub block_width: u16,

    /// Terminal rows per block.
    #[arg(long, default_value_t = 1, value_parser = clap::value_parser!(u16).range(1..=2))]
    pub block_height: u16,

    /// Append logs (including the score after every redraw) to this file.
    /// The game owns the terminal, so logs never go to stdout or stderr.
    #[arg(long, env = "BLOCKFALL_LOG", default_value_os_t = default_log_path())]
    pub log_file: PathBuf,
}

/// `blockfall.log` in the system temp directory.
pub fn default_log_path() -> PathBuf {
    std::env::temp_dir().join("blockfall.log")
}

impl Args {
    /// The configured seed, or one derived from the wall clock.
    pub fn seed_or_clock(&self) -> u32 {
        self.seed.unwrap_or_else(|| {
            SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .map(|d| d.subsec_nanos() ^ d.as_secs() as u32)
                .unwrap_or(1)
        })
    }

    /// Interval between automatic ticks, if enabled.
    pub fn gravity(&self) -> Option<Duration> {
        (self.gravity_ms > 0).then(|| Duration::from_millis(self.gravity_ms as u64))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let args = Args::try_parse_from(["blockfall"]).unwrap();
        assert_eq!(args.gravity_ms, DEFAULT_GRAVITY_MS);
        assert_eq!(args.block_width, 2);
        assert_eq!(args.block_height, 1);
        assert_eq!(args.log_file, default_log_path());
        assert_eq!(
            args.gravity(),
            Some(Duration::from_millis(DEFAULT_GRAVITY_MS as u64))
        );
    }

    #[test]
    fn zero_gravity_means_manual_ticks() {
        let args = Args::try_parse_from(["blockfall", "--gravity-ms", "0", "--seed", "7"]).unwrap();
        assert_eq!(args.gravity(), None);
        assert_eq!(args.seed_or_clock(), 7);
    }

    #[test]
    fn log_file_can_be_overridden() {
        let args = Args::try_parse_from(["blockfall", "--log-file", "/tmp/game.log"]).unwrap();
        assert_eq!(args.log_file, PathBuf::from("/tmp/game.log"));
        assert!(default_log_path().ends_with("blockfall.log"));
    }

    #[test]
    fn block_size_is_bounded() {
        assert!(Args::try_parse_from(["blockfall", "--block-width", "0"]).is_err());
        assert!(Args::try_parse_from(["blockfall", "--block-height", "3"]).is_err());
        let args = Args::try_parse_from(["blockfall", "--block-width", "3"]).unwrap();
        assert_eq!(args.block_width, 3);
    }
}
