use std::process::{Command, ExitStatus, Stdio};

use tracing::debug;

use crate::error::Error;

/// The fully resolved path through the wizard.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionTarget {
    pub region: String,
    pub cluster: String,
    pub service: String,
    pub task: String,
    pub container: String,
    pub command: String,
}

#[cfg_attr(test, mockall::automock)]
pub trait SessionLauncher {
    /// Runs one interactive session against `target`, blocking until the
    /// operator leaves it.
    fn launch(&self, target: &SessionTarget) -> Result<(), Error>;
}

/// Launches sessions through `aws ecs execute-command`.
pub struct AwsCliLauncher {
    program: String,
    profile: Option<String>,
}

impl AwsCliLauncher {
    pub fn new(profile: Option<String>) -> Self {
        Self {
            program: "aws".to_string(),
            profile,
        }
    }

    #[cfg(test)]
    fn with_program(mut self, program: &str) -> Self {
        self.program = program.to_string();
        self
    }

    fn command_args(&self, target: &SessionTarget) -> Vec<String> {
        let mut args: Vec<String> = ["ecs", "execute-command"]
            .iter()
            .map(|s| s.to_string())
            .collect();

        if let Some(profile) = self.profile.as_ref() {
            args.extend(["--profile".to_string(), profile.clone()]);
        }

        args.extend([
            "--cluster".to_string(),
            target.cluster.clone(),
            "--task".to_string(),
            target.task.clone(),
            "--container".to_string(),
            target.container.clone(),
            "--interactive".to_string(),
            "--command".to_string(),
            target.command.clone(),
            "--region".to_string(),
            target.region.clone(),
        ]);

        args
    }
}

impl SessionLauncher for AwsCliLauncher {
    fn launch(&self, target: &SessionTarget) -> Result<(), Error> {
        let args = self.command_args(target);
        debug!("Running {} {}", self.program, args.join(" "));

        // The session owns the terminal until it exits.
        let status = Command::new(&self.program)
            .args(&args)
            .stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .status()
            .map_err(|e| Error::Launch(format!("could not run '{}': {}", self.program, e)))?;

        if status.success() {
            Ok(())
        } else {
            Err(Error::Launch(describe_exit(status)))
        }
    }
}

fn describe_exit(status: ExitStatus) -> String {
    match status.code() {
        Some(code) => format!("aws exited with code {}", code),
        None => "aws was terminated by a signal".to_string(),
    }
}
