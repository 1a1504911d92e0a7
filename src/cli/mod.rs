// CLI module for first-aid-relay
// Author: kelexine (https://github.com/kelexine)

use clap::Parser;
use std::path::PathBuf;

/// first-aid-relay - Injury descriptions and photos to structured first-aid guidance
#[derive(Parser, Debug)]
#[command(name = "first-aid-relay", version, about, long_about = None)]
pub struct Args {
    /// Path to a TOML config file (default: ~/.first-aid-relay/config.toml)
    #[arg(short, long, env = "FIRST_AID_CONFIG")]
    pub config: Option<PathBuf>,

    /// Override the bind address
    #[arg(long)]
    pub host: Option<String>,

    /// Override the listen port
    #[arg(short, long)]
    pub port: Option<u16>,

    /// Probe the Gemini API once and exit instead of serving
    #[arg(long)]
    pub check: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_overrides() {
        let args = Args::parse_from(["first-aid-relay", "--port", "8080", "--check"]);
        assert_eq!(args.port, Some(8080));
        assert!(args.check);
        assert!(args.host.is_none());
    }
}
