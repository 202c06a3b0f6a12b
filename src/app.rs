use crate::cli::{Cli, Commands, ConfigActions, TravelProfile};
use crate::config::{get_config_path, Config};
use crate::env_manager;
use crate::parser::coordinates::looks_like_coordinates;
use crate::parser::{parse_coordinates, parse_time};
use crate::repl::{ReplCommand, HELP_TEXT};
use crate::services::{
    ConsoleNotifier, Geocoder, MapboxRouter, NominatimGeocoder, Notifier, Router,
};
use crate::trip::{format_travel, LeaveTime, Slot, TripPlan, TripPlanner};
use anyhow::{anyhow, Context, Result};
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;
use serde_json::json;
use std::path::{Path, PathBuf};
use std::time::Duration;

pub type LivePlanner = TripPlanner<NominatimGeocoder, MapboxRouter, ConsoleNotifier>;

pub struct Application {
    config: Config,
    config_path: Option<PathBuf>,
}

impl Application {
    pub fn new(config: Config, config_path: Option<PathBuf>) -> Self {
        Self { config, config_path }
    }

    /// Load the config from `path`, or from the default location
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let config = match path {
            Some(path) if path.exists() => Config::load_from(path)?,
            Some(path) => {
                log::warn!("Config file {} not found, using defaults", path.display());
                Config::default()
            }
            None => Config::load()?,
        };
        Ok(Self::new(config, path.map(Path::to_path_buf)))
    }

    pub async fn run(&self, cli: Cli) -> Result<()> {
        match cli.command {
            Commands::Parse { time, json } => self.parse_command(&time, json),
            Commands::LeaveBy { arrive, travel_seconds } => {
                self.leave_by_command(&arrive, travel_seconds)
            }
            Commands::Plan { from, to, arrive, profile, json } => {
                let mut planner = self.build_planner(profile)?;
                self.plan_command(&mut planner, &from, &to, &arrive, json).await
            }
            Commands::Interactive { profile } => {
                let mut planner = self.build_planner(profile)?;
                self.interactive(&mut planner).await
            }
            Commands::Config { action } => self.config_command(action),
        }
    }

    fn parse_command(&self, time: &str, as_json: bool) -> Result<()> {
        let parsed = parse_time(time.trim()).with_context(|| format!("Could not parse '{}'", time))?;
        if as_json {
            let value = json!({
                "hour": parsed.hour(),
                "minute": parsed.minute(),
                "time": parsed.to_string(),
                "twelve_hour": parsed.to_twelve_hour(),
            });
            println!("{}", serde_json::to_string_pretty(&value)?);
        } else {
            println!("{} ({})", parsed, parsed.to_twelve_hour());
        }
        Ok(())
    }

    fn leave_by_command(&self, arrive: &str, travel_seconds: u64) -> Result<()> {
        let arrival =
            parse_time(arrive.trim()).with_context(|| format!("Invalid arrival time '{}'", arrive))?;
        let leave = LeaveTime::compute(arrival, Duration::from_secs(travel_seconds));
        println!("{}", leave);
        Ok(())
    }

    pub fn build_planner(&self, profile: Option<TravelProfile>) -> Result<LivePlanner> {
        let mut routing = self.config.routing.clone();
        if let Some(profile) = profile {
            routing.profile = profile.as_mapbox().to_string();
        }
        let token = env_manager::mapbox_token(&self.config).ok_or_else(|| {
            anyhow!(
                "No Mapbox access token. Set {} or routing.access_token in the config file",
                env_manager::MAPBOX_TOKEN_VAR
            )
        })?;

        let geocoder = NominatimGeocoder::new(&self.config.geocoding)?;
        let router = MapboxRouter::new(&routing, token)?;
        Ok(TripPlanner::new(geocoder, router, ConsoleNotifier::new())
            .with_notifications(&self.config.notifications))
    }

    async fn plan_command<G: Geocoder, R: Router, N: Notifier>(
        &self,
        planner: &mut TripPlanner<G, R, N>,
        from: &str,
        to: &str,
        arrive: &str,
        as_json: bool,
    ) -> Result<()> {
        choose(planner, Slot::Start, from).await?;
        choose(planner, Slot::End, to).await?;
        let plan = planner.plan_travel(arrive).await?;

        if as_json {
            println!("{}", serde_json::to_string_pretty(&plan)?);
        } else {
            print_plan(&plan);
        }
        Ok(())
    }

    async fn interactive<G: Geocoder, R: Router, N: Notifier>(
        &self,
        planner: &mut TripPlanner<G, R, N>,
    ) -> Result<()> {
        log::info!("Starting interactive planner");
        let mut rl = DefaultEditor::new()?;
        let mut arrival: Option<String> = None;

        println!("Welcome to OnTime! Type 'help' for commands.");

        loop {
            match rl.readline("🧭 ") {
                Ok(line) => {
                    if line.trim().is_empty() {
                        continue;
                    }
                    let _ = rl.add_history_entry(line.as_str());
                    let command = match ReplCommand::parse(&line) {
                        Ok(command) => command,
                        Err(e) => {
                            println!("{}", e);
                            continue;
                        }
                    };
                    if command == ReplCommand::Exit {
                        break;
                    }
                    if let Err(e) = run_repl_command(planner, &mut arrival, command).await {
                        log::debug!("Command failed: {:#}", e);
                    }
                }
                Err(ReadlineError::Interrupted) => {
                    println!("CTRL-C");
                    break;
                }
                Err(ReadlineError::Eof) => {
                    println!("CTRL-D");
                    break;
                }
                Err(err) => {
                    println!("Error: {:?}", err);
                    break;
                }
            }
        }
        Ok(())
    }

    fn config_command(&self, action: ConfigActions) -> Result<()> {
        let path = match &self.config_path {
            Some(path) => path.clone(),
            None => get_config_path()?,
        };
        match action {
            ConfigActions::Show => {
                let mut shown = self.config.clone();
                if shown.routing.access_token.is_some() {
                    shown.routing.access_token = Some("********".to_string());
                }
                print!("{}", toml::to_string_pretty(&shown)?);
            }
            ConfigActions::Path => println!("{}", path.display()),
            ConfigActions::Init => {
                if path.exists() {
                    println!("Config already exists at {}", path.display());
                } else {
                    Config::default().save_to(&path)?;
                    println!("Wrote default config to {}", path.display());
                }
            }
        }
        Ok(())
    }
}

/// Fill a slot from either a `LAT,LON` pair or an address
pub async fn choose<G: Geocoder, R: Router, N: Notifier>(
    planner: &mut TripPlanner<G, R, N>,
    slot: Slot,
    input: &str,
) -> Result<()> {
    if looks_like_coordinates(input) {
        planner.pin(slot, parse_coordinates(input)?).await;
    } else {
        planner.set_location(slot, input).await?;
    }
    Ok(())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Replan {
    Never,
    WhenReady,
    Always,
}

/// Apply one interactive command
///
/// Location edits re-plan once start, end and arrival are all known;
/// `time` and `plan` always plan and alert about whatever is missing.
pub async fn run_repl_command<G: Geocoder, R: Router, N: Notifier>(
    planner: &mut TripPlanner<G, R, N>,
    arrival: &mut Option<String>,
    command: ReplCommand,
) -> Result<()> {
    let replan = match command {
        ReplCommand::SetLocation(slot, address) => {
            planner.set_location(slot, &address).await?;
            Replan::WhenReady
        }
        ReplCommand::Click(coords) => {
            let slot = planner.place_at(coords).await;
            println!("Placed {} at {}", slot, coords);
            Replan::Never
        }
        ReplCommand::Here(coords) => {
            planner.use_current_position(coords).await;
            Replan::Never
        }
        ReplCommand::Clear(slot) => {
            planner.clear(slot);
            Replan::Never
        }
        ReplCommand::Time(text) => {
            *arrival = Some(text);
            Replan::Always
        }
        ReplCommand::Plan => Replan::Always,
        ReplCommand::Status => {
            print_status(planner, arrival.as_deref());
            Replan::Never
        }
        ReplCommand::Help => {
            println!("{}", HELP_TEXT);
            Replan::Never
        }
        ReplCommand::Exit => Replan::Never,
    };

    let ready = planner.start().is_some() && planner.end().is_some() && arrival.is_some();
    if replan == Replan::Always || (replan == Replan::WhenReady && ready) {
        let plan = planner.plan_travel(arrival.as_deref().unwrap_or_default()).await?;
        print_plan(&plan);
    }
    Ok(())
}

fn print_status<G: Geocoder, R: Router, N: Notifier>(
    planner: &TripPlanner<G, R, N>,
    arrival: Option<&str>,
) {
    let describe = |slot| match planner.waypoint(slot) {
        Some(waypoint) => waypoint.to_string(),
        None => "(not set)".to_string(),
    };
    println!("Start:   {}", describe(Slot::Start));
    println!("End:     {}", describe(Slot::End));
    println!("Arrival: {}", arrival.unwrap_or("(not set)"));
}

fn print_plan(plan: &TripPlan) {
    println!("From:    {}", plan.start);
    println!("To:      {}", plan.end);
    println!("Mode:    {}", plan.profile);
    println!("Travel:  {}", format_travel(plan.leave.travel_seconds));
    println!("Arrive:  {}", plan.leave.arrive_display());
    println!("Leave:   {}", plan.leave.leave_display());
}
