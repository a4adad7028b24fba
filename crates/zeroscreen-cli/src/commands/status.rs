use zeroscreen_core::{Database, ProgressState};

use super::open_state;

pub fn status_json(state: &ProgressState<Database>) -> serde_json::Value {
    let level = state.level();
    serde_json::json!({
        "goal_seconds": state.goal_seconds(),
        "goal": state.goal().to_string(),
        "points": state.points(),
        "level": level.level,
        "fraction": level.fraction,
        "percent_to_next": level.percent_to_next(),
        "onboarding_complete": state.onboarding_complete(),
    })
}

pub fn run(json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let state = open_state()?;

    if json {
        println!("{}", serde_json::to_string_pretty(&status_json(&state))?);
        return Ok(());
    }

    let level = state.level();
    println!("POINTS        {}", state.points());
    println!("LEVEL         {} ({})", level.level, level.summary());
    println!("CURRENT GOAL  {}", state.goal());
    if !state.onboarding_complete() {
        println!("Onboarding not finished, run `zeroscreen onboarding run`.");
    }
    Ok(())
}
