use std::path::PathBuf;

use clap::Parser;

#[derive(Parser, Debug)]
#[command(name = "ecs-session")]
#[command(about = "Interactive CLI tool for ECS task sessions")]
#[command(version)]
pub struct Cli {
    /// AWS region (e.g., us-west-2); skips region selection
    #[arg(short = 'r', long = "region")]
    pub region: Option<String>,

    /// AWS profile to use (defaults to AWS_PROFILE env var or default profile)
    #[arg(short = 'p', long = "profile")]
    pub profile: Option<String>,

    /// File holding the saved default region
    #[arg(long = "region-file", value_name = "PATH")]
    pub region_file: Option<PathBuf>,

    /// Hide session summary after the session ends
    #[arg(long = "no-summary")]
    pub no_summary: bool,

    /// Enable verbose output for debugging
    #[arg(short = 'v', long = "verbose")]
    pub verbose: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_short_region_flag() {
        let cli = Cli::try_parse_from(["ecs-session", "-r", "eu-west-1"]).unwrap();
        assert_eq!(cli.region.as_deref(), Some("eu-west-1"));
        assert!(cli.profile.is_none());
        assert!(!cli.no_summary);
    }

    #[test]
    fn test_long_flags() {
        let cli = Cli::try_parse_from([
            "ecs-session",
            "--region",
            "us-east-1",
            "--profile",
            "staging",
            "--region-file",
            "/tmp/region.txt",
            "--no-summary",
            "--verbose",
        ])
        .unwrap();

        assert_eq!(cli.region.as_deref(), Some("us-east-1"));
        assert_eq!(cli.profile.as_deref(), Some("staging"));
        assert_eq!(cli.region_file, Some(PathBuf::from("/tmp/region.txt")));
        assert!(cli.no_summary);
        assert!(cli.verbose);
    }

    #[test]
    fn test_positional_arguments_rejected() {
        assert!(Cli::try_parse_from(["ecs-session", "prod"]).is_err());
    }
}
