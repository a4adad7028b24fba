use super::open_state;

pub fn run(yes: bool) -> Result<(), Box<dyn std::error::Error>> {
    if !yes {
        return Err(
            "this will clear all your settings, including goal and level data; pass --yes to confirm"
                .into(),
        );
    }
    let mut state = open_state()?;
    state.erase_all()?;
    println!("all data erased");
    Ok(())
}
