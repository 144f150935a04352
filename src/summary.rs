use std::time::Duration;

use colored::*;

use crate::navigator::LaunchReport;
use crate::output::print_success;

pub fn print_session_summary(report: &LaunchReport, profile: Option<&str>) {
    let target = &report.target;
    eprintln!();
    print_success("Execute-command session completed");

    let border = "━".repeat(75).blue();
    eprintln!("{}", border);
    eprintln!("{}", "SESSION SUMMARY".green().bold());
    eprintln!("{}", border);

    eprintln!("{}", "Target Details:".yellow().bold());
    eprintln!("  • Cluster: {}", target.cluster.green());
    eprintln!("  • Service: {}", target.service);
    eprintln!("  • Task: {}", target.task);
    eprintln!("  • Container: {}", target.container.green());
    eprintln!();

    eprintln!("{}", "Connection Details:".yellow().bold());
    eprintln!("  • Command: {}", target.command.green());
    eprintln!("  • Duration: {}", format_duration(report.duration).green());
    eprintln!("  • Profile: {}", profile.unwrap_or("default"));
    eprintln!("  • Region: {}", target.region);
    eprintln!("{}", border);
}

fn format_duration(duration: Duration) -> String {
    let total_seconds = duration.as_secs();
    let hours = total_seconds / 3600;
    let minutes = (total_seconds % 3600) / 60;
    let seconds = total_seconds % 60;

    if hours > 0 {
        format!("{}h {}m {}s", hours, minutes, seconds)
    } else if minutes > 0 {
        format!("{}m {}s", minutes, seconds)
    } else {
        format!("{}s", seconds)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_duration() {
        assert_eq!(format_duration(Duration::from_millis(900)), "0s");
        assert_eq!(format_duration(Duration::from_secs(59)), "59s");
        assert_eq!(format_duration(Duration::from_secs(61)), "1m 1s");
        assert_eq!(format_duration(Duration::from_secs(3600 + 120 + 5)), "1h 2m 5s");
    }
}
