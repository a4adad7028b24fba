use clap::Subcommand;
use zeroscreen_core::{HoursMinutes, OnboardingFlow, OnboardingStep};

use super::{hours_arg, minutes_arg, open_state};

#[derive(Subcommand)]
pub enum OnboardingAction {
    /// Show whether onboarding is finished
    Status,
    /// Walk through onboarding, setting the first goal
    Run {
        /// First goal hours (0-23)
        #[arg(long, default_value_t = 2, value_parser = hours_arg())]
        hours: u32,
        /// First goal minutes (0-59)
        #[arg(long, default_value_t = 30, value_parser = minutes_arg())]
        minutes: u32,
    },
    /// Mark onboarding as finished without changing the goal
    Complete,
}

fn print_step(step: OnboardingStep) {
    println!("== {} ==", step.title());
    println!("{}", step.body());
    println!();
}

pub fn run(action: OnboardingAction) -> Result<(), Box<dyn std::error::Error>> {
    let mut state = open_state()?;

    match action {
        OnboardingAction::Status => {
            let complete = state.onboarding_complete();
            println!("{}", if complete { "complete" } else { "not complete" });
        }
        OnboardingAction::Run { hours, minutes } => {
            let mut flow = OnboardingFlow::start(&state);
            if flow.is_complete() {
                println!("onboarding already complete");
                return Ok(());
            }
            print_step(flow.step());
            print_step(flow.advance()?);
            let goal = HoursMinutes::new(hours, minutes)?;
            print_step(flow.submit_goal(&mut state, goal)?);
            flow.finish(&mut state)?;
            println!("Goal set to {goal}. Onboarding complete.");
        }
        OnboardingAction::Complete => {
            if state.complete_onboarding()? {
                println!("onboarding complete");
            } else {
                println!("onboarding already complete");
            }
        }
    }
    Ok(())
}
