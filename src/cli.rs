use clap::{Parser, Subcommand};
use std::path::PathBuf;

const ABOUT: &str = "Current weather, forecasts, saved locations and weather news";

const LONG_ABOUT: &str = "
Look up the weather for a city or postal code, see the daily forecast, and
browse weather headlines.

Every successful `weather` lookup is saved, so `skycast saved` lists the
cities you have checked before along with their last known conditions.
`skycast saved --refresh` looks each of them up again.
";

#[derive(Parser, Debug)]
#[command(version, about = ABOUT, long_about = LONG_ABOUT)]
pub struct Args {
    /// Configuration file (default: <config dir>/skycast/config.toml)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Saved-locations file, overriding the configured one
    #[arg(long, global = true)]
    pub data_file: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Show and save current conditions for a city
    Weather {
        /// City name or postal code, used verbatim as the saved key
        city: String,
    },
    /// Show the daily forecast for a city
    Forecast {
        /// City name or postal code
        city: String,
    },
    /// List previously looked-up cities
    Saved {
        /// Fetch current conditions again for every saved city
        #[arg(long)]
        refresh: bool,
    },
    /// Show the top weather headlines
    News,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_weather_with_spaces() {
        let args = Args::parse_from(["skycast", "weather", "New York"]);
        assert!(matches!(args.command, Command::Weather { ref city } if city == "New York"));
    }

    #[test]
    fn test_global_options_after_subcommand() {
        let args = Args::parse_from(["skycast", "saved", "--data-file", "/tmp/wx.json"]);
        assert!(matches!(args.command, Command::Saved { refresh: false }));
        assert_eq!(args.data_file, Some(PathBuf::from("/tmp/wx.json")));
    }

    #[test]
    fn test_parse_saved_refresh() {
        let args = Args::parse_from(["skycast", "saved", "--refresh"]);
        assert!(matches!(args.command, Command::Saved { refresh: true }));
    }

    #[test]
    fn test_cli_definition_is_consistent() {
        use clap::CommandFactory;
        Args::command().debug_assert();
    }
}
