use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// OnTime - find out when to leave so you arrive on time
#[derive(Debug, Parser)]
#[command(name = "ontime")]
#[command(about = "Find out when to leave so you arrive on time", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Use this config file instead of the default location
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Parse a time the way the planner would (e.g. 8:30am, 14:30, 9)
    Parse {
        /// Time to parse
        #[arg(required = true)]
        time: String,

        /// Print the result as JSON
        #[arg(long)]
        json: bool,
    },

    /// Compute a leave-by time from a known travel duration
    #[command(alias = "leave")]
    LeaveBy {
        /// Desired arrival time
        #[arg(long, required = true)]
        arrive: String,

        /// Travel time in seconds
        #[arg(long, required = true)]
        travel_seconds: u64,
    },

    /// Plan a trip between two places
    Plan {
        /// Start address, or LAT,LON
        #[arg(long, required = true, allow_hyphen_values = true)]
        from: String,

        /// Destination address, or LAT,LON
        #[arg(long, required = true, allow_hyphen_values = true)]
        to: String,

        /// Desired arrival time
        #[arg(long, required = true)]
        arrive: String,

        /// Travel mode
        #[arg(long)]
        profile: Option<TravelProfile>,

        /// Print the result as JSON
        #[arg(long)]
        json: bool,
    },

    /// Plan trips interactively
    #[command(alias = "repl")]
    Interactive {
        /// Travel mode
        #[arg(long)]
        profile: Option<TravelProfile>,
    },

    /// View or modify configuration
    Config {
        #[command(subcommand)]
        action: ConfigActions,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum TravelProfile {
    Driving,
    DrivingTraffic,
    Walking,
    Cycling,
}

impl TravelProfile {
    pub fn as_mapbox(&self) -> &'static str {
        match self {
            TravelProfile::Driving => "mapbox/driving",
            TravelProfile::DrivingTraffic => "mapbox/driving-traffic",
            TravelProfile::Walking => "mapbox/walking",
            TravelProfile::Cycling => "mapbox/cycling",
        }
    }
}

#[derive(Debug, Subcommand)]
pub enum ConfigActions {
    /// Print the active configuration
    Show,
    /// Print the config file location
    Path,
    /// Write a default config file if none exists
    Init,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_plan_command() {
        let cli = Cli::try_parse_from([
            "ontime",
            "plan",
            "--from",
            "43.61,-116.21",
            "--to",
            "Boise Airport",
            "--arrive",
            "8:30am",
            "--profile",
            "walking",
        ])
        .unwrap();

        match cli.command {
            Commands::Plan { from, to, arrive, profile, json } => {
                assert_eq!(from, "43.61,-116.21");
                assert_eq!(to, "Boise Airport");
                assert_eq!(arrive, "8:30am");
                assert_eq!(profile, Some(TravelProfile::Walking));
                assert!(!json);
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn test_negative_coordinates_are_values() {
        let cli = Cli::try_parse_from([
            "ontime", "plan", "--from", "-33.86,151.20", "--to", "-33.90,151.18", "--arrive", "9",
        ])
        .unwrap();
        assert!(matches!(cli.command, Commands::Plan { ref from, .. } if from == "-33.86,151.20"));
    }

    #[test]
    fn test_profile_mapping() {
        assert_eq!(TravelProfile::DrivingTraffic.as_mapbox(), "mapbox/driving-traffic");
        assert_eq!(TravelProfile::Cycling.as_mapbox(), "mapbox/cycling");
    }
}
