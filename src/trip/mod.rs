pub mod leave_time;
pub mod planner;

pub use leave_time::{format_travel, format_twelve_hour, LeaveTime};
pub use planner::{PlanError, Slot, TripPlan, TripPlanner, Waypoint};
