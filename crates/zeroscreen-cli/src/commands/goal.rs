use clap::Subcommand;
use zeroscreen_core::HoursMinutes;

use super::{hours_arg, minutes_arg, open_state};

#[derive(Subcommand)]
pub enum GoalAction {
    /// Set the daily screen-time goal
    Set {
        /// Hours (0-23)
        #[arg(long, default_value_t = 0, value_parser = hours_arg())]
        hours: u32,
        /// Minutes (0-59)
        #[arg(long, default_value_t = 0, value_parser = minutes_arg())]
        minutes: u32,
    },
    /// Show the current goal
    Show {
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },
}

pub fn run(action: GoalAction) -> Result<(), Box<dyn std::error::Error>> {
    let mut state = open_state()?;

    match action {
        GoalAction::Set { hours, minutes } => {
            let goal = HoursMinutes::new(hours, minutes)?;
            state.set_goal_hm(goal)?;
            println!("Nice Goal! Current goal: {goal}");
        }
        GoalAction::Show { json } => {
            if json {
                let value = serde_json::json!({
                    "goal_seconds": state.goal_seconds(),
                    "hours": state.goal().hours(),
                    "minutes": state.goal().minutes(),
                });
                println!("{}", serde_json::to_string_pretty(&value)?);
            } else {
                println!("{}", state.goal());
            }
        }
    }
    Ok(())
}
