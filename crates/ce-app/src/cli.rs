//! Command line flags

use std::path::PathBuf;

use clap::Parser;

/// Linked county socioeconomic dashboard
#[derive(Debug, Default, PartialEq, Eq, Parser)]
#[command(name = "county-explorer", author, version, about, long_about = None)]
pub struct CliArgs {
    /// JSON dashboard configuration
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// County attribute table
    #[arg(short, long, value_name = "CSV")]
    pub data: Option<PathBuf>,

    /// County boundaries (TopoJSON or GeoJSON)
    #[arg(short, long, value_name = "JSON")]
    pub boundaries: Option<PathBuf>,

    /// Run on a synthetic dataset
    #[arg(long)]
    pub demo: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Result<CliArgs, clap::Error> {
        CliArgs::try_parse_from(std::iter::once("county-explorer").chain(args.iter().copied()))
    }

    #[test]
    fn test_no_arguments() {
        assert_eq!(parse(&[]).unwrap(), CliArgs::default());
    }

    #[test]
    fn test_all_flags() {
        let parsed = parse(&[
            "--config", "dash.json", "--data", "data.csv", "--boundaries", "counties.json", "--demo",
        ])
        .unwrap();

        assert_eq!(parsed.config, Some(PathBuf::from("dash.json")));
        assert_eq!(parsed.data, Some(PathBuf::from("data.csv")));
        assert_eq!(parsed.boundaries, Some(PathBuf::from("counties.json")));
        assert!(parsed.demo);
    }

    #[test]
    fn test_short_flags() {
        let parsed = parse(&["-d", "data.csv", "-b", "counties.json"]).unwrap();
        assert_eq!(parsed.data, Some(PathBuf::from("data.csv")));
        assert_eq!(parsed.boundaries, Some(PathBuf::from("counties.json")));
    }

    #[test]
    fn test_unknown_flag_is_an_error() {
        let err = parse(&["--colour", "red"]).unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::UnknownArgument);
    }

    #[test]
    fn test_missing_value_is_an_error() {
        assert!(parse(&["--data"]).is_err());
    }
}
