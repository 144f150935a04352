//! The selection wizard: region, cluster, service, task, container, command.
//!
//! Each stage is one state of an explicit state machine. "Back" (`0`) at a
//! stage unwinds exactly one level; back at the cluster stage forgets the
//! region and starts region resolution over.

use std::time::{Duration, Instant};

use colored::*;
use tracing::{debug, warn};

use crate::console::Console;
use crate::error::Error;
use crate::inventory::Inventory;
use crate::launcher::{SessionLauncher, SessionTarget};
use crate::region_store::RegionStore;

/// Offered when the operator would rather pick than type a region.
pub const TOP_REGIONS: [&str; 5] = [
    "us-east-1",
    "us-west-2",
    "eu-west-1",
    "ap-southeast-1",
    "ap-northeast-1",
];

const CHOICE_PROMPT: &str = "Enter the number of your choice";
const DEFAULT_COMMAND: &str = "sh";

/// Ordered: a later stage depends on every earlier one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Stage {
    ResolvingRegion,
    ChoosingCluster,
    ChoosingService,
    ChoosingTask,
    ChoosingContainer,
    ChoosingCommand,
    Launching,
}

/// What has been chosen so far. Lives for one run of the wizard.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct SessionContext {
    pub region: Option<String>,
    pub cluster: Option<String>,
    pub service: Option<String>,
    pub task: Option<String>,
    pub container: Option<String>,
    pub command: Option<String>,
}

impl SessionContext {
    pub fn new(region: Option<String>) -> Self {
        Self {
            region: region.filter(|r| !r.trim().is_empty()),
            ..Default::default()
        }
    }

    /// Drops the selection made at `stage` and everything after it.
    fn unwind_to(&mut self, stage: Stage) {
        if stage <= Stage::ResolvingRegion {
            self.region = None;
        }
        if stage <= Stage::ChoosingCluster {
            self.cluster = None;
        }
        if stage <= Stage::ChoosingService {
            self.service = None;
        }
        if stage <= Stage::ChoosingTask {
            self.task = None;
        }
        if stage <= Stage::ChoosingContainer {
            self.container = None;
        }
        if stage <= Stage::ChoosingCommand {
            self.command = None;
        }
    }

    fn breadcrumb(&self) -> Vec<(&'static str, &str)> {
        [
            ("Region", &self.region),
            ("Cluster", &self.cluster),
            ("Service", &self.service),
            ("Task", &self.task),
            ("Container", &self.container),
            ("Command", &self.command),
        ]
        .into_iter()
        .filter_map(|(label, value)| value.as_deref().map(|v| (label, v)))
        .collect()
    }

    fn target(&self) -> Result<SessionTarget, Error> {
        Ok(SessionTarget {
            region: required(&self.region, "region")?.to_string(),
            cluster: required(&self.cluster, "cluster")?.to_string(),
            service: required(&self.service, "service")?.to_string(),
            task: required(&self.task, "task")?.to_string(),
            container: required(&self.container, "container")?.to_string(),
            command: required(&self.command, "command")?.to_string(),
        })
    }
}

fn required<'a>(value: &'a Option<String>, what: &'static str) -> Result<&'a str, Error> {
    value.as_deref().ok_or(Error::MissingSelection(what))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Selection {
    Back,
    Index(usize),
}

/// Interprets a 1-based menu answer. `None` means the answer should be asked
/// again.
pub fn parse_selection(input: &str, len: usize, allow_back: bool) -> Option<Selection> {
    match input.trim().parse::<usize>().ok()? {
        0 if allow_back => Some(Selection::Back),
        0 => None,
        n if n <= len => Some(Selection::Index(n - 1)),
        _ => None,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CommandChoice {
    Preset(&'static str),
    Custom,
    Unrecognised,
}

fn parse_command_choice(input: &str) -> CommandChoice {
    match input.trim() {
        "1" => CommandChoice::Preset("sh"),
        "2" => CommandChoice::Preset("bash"),
        "3" => CommandChoice::Custom,
        _ => CommandChoice::Unrecognised,
    }
}

/// A finished session.
#[derive(Debug)]
pub struct LaunchReport {
    pub target: SessionTarget,
    pub duration: Duration,
}

pub struct Navigator<I, L, C> {
    inventory: I,
    launcher: L,
    console: C,
    store: RegionStore,
}

impl<I: Inventory, L: SessionLauncher, C: Console> Navigator<I, L, C> {
    pub fn new(inventory: I, launcher: L, console: C, store: RegionStore) -> Self {
        Self {
            inventory,
            launcher,
            console,
            store,
        }
    }

    /// Walks the operator through every stage and launches one session.
    pub async fn run(&mut self, mut ctx: SessionContext) -> Result<LaunchReport, Error> {
        let mut stage = Stage::ResolvingRegion;
        loop {
            stage = match stage {
                Stage::Launching => return self.launch(&ctx).await,
                current => self.step(current, &mut ctx).await?,
            };
            debug!("entering {:?}", stage);
        }
    }

    /// Runs a single stage and returns the next one. `Launching` is left to
    /// [`Navigator::run`] and returned unchanged.
    pub async fn step(&mut self, stage: Stage, ctx: &mut SessionContext) -> Result<Stage, Error> {
        match stage {
            Stage::ResolvingRegion => self.resolve_region(ctx),
            Stage::ChoosingCluster => self.choose_cluster(ctx).await,
            Stage::ChoosingService => self.choose_service(ctx).await,
            Stage::ChoosingTask => self.choose_task(ctx).await,
            Stage::ChoosingContainer => self.choose_container(ctx).await,
            Stage::ChoosingCommand => self.choose_command(ctx),
            Stage::Launching => Ok(Stage::Launching),
        }
    }

    fn resolve_region(&mut self, ctx: &mut SessionContext) -> Result<Stage, Error> {
        if ctx.region.is_none() {
            if let Some(saved) = self.store.load() {
                let prompt = format!("Found saved region '{}'. Do you want to use it?", saved);
                if self.console.confirm(&prompt)? {
                    ctx.region = Some(saved);
                }
            }
        }

        if ctx.region.is_none() {
            let region = self.enter_or_choose_region()?;
            self.offer_to_save(&region)?;
            ctx.region = Some(region);
        }

        self.render(ctx)?;
        Ok(Stage::ChoosingCluster)
    }

    fn enter_or_choose_region(&mut self) -> Result<String, Error> {
        loop {
            self.console.line("Would you like to:");
            self.console
                .line(&format!("{} Enter a region manually (e.g., us-west-2)", "[1]".yellow()));
            self.console
                .line(&format!("{} Choose from the 5 most-used regions", "[2]".yellow()));

            let answer = self.console.read_line(CHOICE_PROMPT)?;
            match answer.trim() {
                "1" => return self.enter_region(),
                "2" => return self.choose_top_region(),
                other => self.reject(other, 1, 2),
            }
        }
    }

    fn enter_region(&mut self) -> Result<String, Error> {
        loop {
            let region = self.console.read_line("Enter your desired region code")?;
            let region = region.trim();
            if !region.is_empty() {
                return Ok(region.to_string());
            }
        }
    }

    fn choose_top_region(&mut self) -> Result<String, Error> {
        let options: Vec<String> = TOP_REGIONS.iter().map(|r| r.to_string()).collect();
        loop {
            if let Selection::Index(i) = self.choose("region", &options, false)? {
                return Ok(options[i].clone());
            }
        }
    }

    fn offer_to_save(&mut self, region: &str) -> Result<(), Error> {
        let prompt = format!(
            "Would you like to save '{}' as the default region for next time?",
            region
        );
        if !self.console.confirm(&prompt)? {
            return Ok(());
        }

        match self.store.save(region) {
            Ok(()) => self
                .console
                .line(&format!("{} Default region saved.", "✔".green().bold())),
            Err(e) => warn!("Could not save default region: {}", e),
        }
        Ok(())
    }

    async fn choose_cluster(&mut self, ctx: &mut SessionContext) -> Result<Stage, Error> {
        let region = required(&ctx.region, "region")?.to_string();
        let mut clusters = self.inventory.list_clusters(&region).await?;

        match self.choose("cluster", &clusters, true)? {
            Selection::Back => {
                ctx.unwind_to(Stage::ResolvingRegion);
                self.render(ctx)?;
                Ok(Stage::ResolvingRegion)
            }
            Selection::Index(i) => {
                ctx.unwind_to(Stage::ChoosingCluster);
                ctx.cluster = Some(clusters.swap_remove(i));
                self.render(ctx)?;
                Ok(Stage::ChoosingService)
            }
        }
    }

    async fn choose_service(&mut self, ctx: &mut SessionContext) -> Result<Stage, Error> {
        let region = required(&ctx.region, "region")?.to_string();
        let cluster = required(&ctx.cluster, "cluster")?.to_string();
        let mut services = self.inventory.list_services(&region, &cluster).await?;

        let service = match self.choose("service", &services, true)? {
            Selection::Back => {
                ctx.unwind_to(Stage::ChoosingCluster);
                self.render(ctx)?;
                return Ok(Stage::ChoosingCluster);
            }
            Selection::Index(i) => services.swap_remove(i),
        };

        // Not a hard gate: the operator may carry on and let the launch fail.
        let enabled = self
            .inventory
            .is_execute_command_enabled(&region, &cluster, &service)
            .await?;
        if !enabled {
            self.console.clear()?;
            self.console.line(&format!(
                "{} Execute-command is disabled for service: {}",
                "[WARNING]".yellow().bold(),
                service
            ));
            if self
                .console
                .confirm("Do you want to go back and choose a different service?")?
            {
                ctx.unwind_to(Stage::ChoosingService);
                self.render(ctx)?;
                return Ok(Stage::ChoosingService);
            }
        }

        ctx.unwind_to(Stage::ChoosingService);
        ctx.service = Some(service);
        self.render(ctx)?;
        Ok(Stage::ChoosingTask)
    }

    async fn choose_task(&mut self, ctx: &mut SessionContext) -> Result<Stage, Error> {
        let region = required(&ctx.region, "region")?.to_string();
        let cluster = required(&ctx.cluster, "cluster")?.to_string();
        let service = required(&ctx.service, "service")?.to_string();
        let mut tasks = self.inventory.list_tasks(&region, &cluster, &service).await?;

        match self.choose("task", &tasks, true)? {
            Selection::Back => {
                ctx.unwind_to(Stage::ChoosingService);
                self.render(ctx)?;
                Ok(Stage::ChoosingService)
            }
            Selection::Index(i) => {
                ctx.unwind_to(Stage::ChoosingTask);
                ctx.task = Some(tasks.swap_remove(i));
                self.render(ctx)?;
                Ok(Stage::ChoosingContainer)
            }
        }
    }

    async fn choose_container(&mut self, ctx: &mut SessionContext) -> Result<Stage, Error> {
        let region = required(&ctx.region, "region")?.to_string();
        let cluster = required(&ctx.cluster, "cluster")?.to_string();
        let task = required(&ctx.task, "task")?.to_string();
        let mut containers = self
            .inventory
            .list_containers(&region, &cluster, &task)
            .await?;

        match self.choose("container", &containers, true)? {
            Selection::Back => {
                ctx.unwind_to(Stage::ChoosingTask);
                self.render(ctx)?;
                Ok(Stage::ChoosingTask)
            }
            Selection::Index(i) => {
                ctx.unwind_to(Stage::ChoosingContainer);
                ctx.container = Some(containers.swap_remove(i));
                self.render(ctx)?;
                Ok(Stage::ChoosingCommand)
            }
        }
    }

    fn choose_command(&mut self, ctx: &mut SessionContext) -> Result<Stage, Error> {
        self.console.line("Choose a command to run:");
        self.console.line(&format!("{} sh", "[1]".yellow()));
        self.console.line(&format!("{} bash", "[2]".yellow()));
        self.console
            .line(&format!("{} Enter custom command", "[3]".yellow()));

        let answer = self.console.read_line(CHOICE_PROMPT)?;
        let command = match parse_command_choice(&answer) {
            CommandChoice::Preset(command) => command.to_string(),
            CommandChoice::Custom => self.enter_custom_command()?,
            CommandChoice::Unrecognised => {
                self.console.line(&format!(
                    "{} Invalid choice, defaulting to '{}'",
                    "✘".red().bold(),
                    DEFAULT_COMMAND
                ));
                DEFAULT_COMMAND.to_string()
            }
        };

        ctx.command = Some(command);
        self.render(ctx)?;
        Ok(Stage::Launching)
    }

    fn enter_custom_command(&mut self) -> Result<String, Error> {
        loop {
            let command = self.console.read_line("Enter your custom command")?;
            if !command.trim().is_empty() {
                return Ok(command.trim().to_string());
            }
        }
    }

    async fn launch(&mut self, ctx: &SessionContext) -> Result<LaunchReport, Error> {
        let target = ctx.target()?;
        self.console.line(&format!(
            "{} Starting AWS CLI execute-command session...",
            "[INFO]".blue().bold()
        ));

        let started = Instant::now();
        match self.launcher.launch(&target) {
            Ok(()) => Ok(LaunchReport {
                target,
                duration: started.elapsed(),
            }),
            Err(Error::Launch(detail)) => Err(self.explain_launch_failure(&target, detail).await),
            Err(e) => Err(e),
        }
    }

    /// Turns a failed session into `ExecuteCommandDisabled` when ECS says the
    /// service has execute-command turned off.
    async fn explain_launch_failure(&self, target: &SessionTarget, detail: String) -> Error {
        let enabled = self
            .inventory
            .is_execute_command_enabled(&target.region, &target.cluster, &target.service)
            .await;

        match enabled {
            Ok(false) => Error::ExecuteCommandDisabled(format!(
                "service {} in cluster {} ({})",
                target.service, target.cluster, detail
            )),
            Ok(true) => Error::Launch(detail),
            Err(e) => {
                debug!("could not re-check execute-command after launch failure: {}", e);
                Error::Launch(detail)
            }
        }
    }

    /// Prints an enumerated menu and keeps asking until the answer is valid.
    fn choose(
        &mut self,
        entity: &str,
        options: &[String],
        allow_back: bool,
    ) -> Result<Selection, Error> {
        if allow_back {
            self.console
                .line(&format!("Choose a {} (or type '0' to go back):", entity));
            self.console.line(&format!("{} Go back", "[0]".yellow()));
        } else {
            self.console.line(&format!("Choose a {}:", entity));
        }

        if options.is_empty() {
            self.console
                .line(&format!("No {}s found.", entity).dimmed().to_string());
        }
        for (i, option) in options.iter().enumerate() {
            self.console
                .line(&format!("{} {}", format!("[{}]", i + 1).yellow(), option));
        }

        let lowest = if allow_back { 0 } else { 1 };
        loop {
            let answer = self.console.read_line(CHOICE_PROMPT)?;
            match parse_selection(&answer, options.len(), allow_back) {
                Some(selection) => return Ok(selection),
                None => self.reject(&answer, lowest, options.len()),
            }
        }
    }

    fn reject(&mut self, answer: &str, lowest: usize, highest: usize) {
        self.console.line(&format!(
            "{} Invalid choice '{}', enter a number from {} to {}",
            "✘".red().bold(),
            answer.trim(),
            lowest,
            highest
        ));
    }

    /// Clears the screen and redraws every confirmed selection.
    fn render(&mut self, ctx: &SessionContext) -> Result<(), Error> {
        self.console.clear()?;
        for (label, value) in ctx.breadcrumb() {
            self.console
                .line(&format!("{} {}: {}", "✔".green().bold(), label, value));
        }
        Ok(())
    }
}
