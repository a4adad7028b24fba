use std::path::Path;

use zeroscreen_core::{Config, ShareCard};

use super::open_state;

pub fn run(config: &Config, svg: Option<&Path>) -> Result<(), Box<dyn std::error::Error>> {
    let state = open_state()?;
    let card =
        ShareCard::from_points(state.points()).with_invite_message(&config.share.invite_message);

    println!("{}", card.render_text());
    if let Some(path) = svg {
        std::fs::write(path, card.to_svg())?;
        println!("card written to {}", path.display());
    }
    Ok(())
}
