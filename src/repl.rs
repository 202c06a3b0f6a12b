//! Line commands accepted by the interactive planner

use crate::parser::parse_coordinates;
use crate::services::Coordinates;
use crate::trip::Slot;
use anyhow::{anyhow, Result};

pub const HELP_TEXT: &str = "\
Available commands:
  start <address>     - Set the start location (blank clears it)
  end <address>       - Set the destination (blank clears it)
  click <lat,lon>     - Drop a point: start if unset, otherwise end
  here <lat,lon>      - Use your current position as the start
  clear start|end     - Remove a location
  time <arrival>      - Set the arrival time and plan the trip
  plan                - Re-plan with the last arrival time
  status              - Show the current locations and arrival time
  help                - Show this help
  exit                - Exit the planner";

#[derive(Debug, Clone, PartialEq)]
pub enum ReplCommand {
    SetLocation(Slot, String),
    Click(Coordinates),
    Here(Coordinates),
    Clear(Slot),
    Time(String),
    Plan,
    Status,
    Help,
    Exit,
}

impl ReplCommand {
    pub fn parse(line: &str) -> Result<Self> {
        let line = line.trim();
        let (verb, rest) = match line.split_once(char::is_whitespace) {
            Some((verb, rest)) => (verb, rest.trim()),
            None => (line, ""),
        };

        match verb.to_lowercase().as_str() {
            "start" | "from" => Ok(ReplCommand::SetLocation(Slot::Start, rest.to_string())),
            "end" | "to" => Ok(ReplCommand::SetLocation(Slot::End, rest.to_string())),
            "click" => Ok(ReplCommand::Click(parse_coordinates(rest)?)),
            "here" => Ok(ReplCommand::Here(parse_coordinates(rest)?)),
            "clear" => match rest.to_lowercase().as_str() {
                "start" => Ok(ReplCommand::Clear(Slot::Start)),
                "end" => Ok(ReplCommand::Clear(Slot::End)),
                other => Err(anyhow!("Unknown location '{}'. Use 'start' or 'end'", other)),
            },
            "time" | "arrive" => Ok(ReplCommand::Time(rest.to_string())),
            "plan" => Ok(ReplCommand::Plan),
            "status" => Ok(ReplCommand::Status),
            "help" | "?" => Ok(ReplCommand::Help),
            "exit" | "quit" => Ok(ReplCommand::Exit),
            "" => Err(anyhow!("No command provided")),
            other => Err(anyhow!("Unknown command '{}'. Type 'help' for commands", other)),
        }
    }
}
