use clap::Args;
use zeroscreen_core::HoursMinutes;

use super::{hours_arg, minutes_arg, open_state};

#[derive(Args)]
pub struct LogArgs {
    /// Hours of screen time today (0-23)
    #[arg(long, default_value_t = 0, value_parser = hours_arg())]
    hours: u32,
    /// Minutes of screen time today (0-59)
    #[arg(long, default_value_t = 0, value_parser = minutes_arg())]
    minutes: u32,
    /// Print the outcome as JSON
    #[arg(long)]
    json: bool,
}

pub fn run(args: LogArgs) -> Result<(), Box<dyn std::error::Error>> {
    let mut state = open_state()?;
    let logged = HoursMinutes::new(args.hours, args.minutes)?;
    let outcome = state.log_time_hm(logged)?;

    if args.json {
        let mut value = serde_json::to_value(outcome)?;
        if let Some(obj) = value.as_object_mut() {
            obj.insert("message".into(), outcome.message().into());
        }
        println!("{}", serde_json::to_string_pretty(&value)?);
    } else {
        println!("{}", outcome.message());
        println!("Score change: {outcome}");
        println!("Points: {}", outcome.points);
    }
    Ok(())
}
