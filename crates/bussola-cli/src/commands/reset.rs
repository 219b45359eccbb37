use super::{open_store, CliResult};

pub fn run(yes: bool) -> CliResult {
    if !yes {
        return Err("this deletes every check-in and experiment; pass --yes to confirm".into());
    }
    let mut store = open_store()?;
    store.reset()?;
    println!("All data deleted. New user: {}", store.data().user.id);
    Ok(())
}
