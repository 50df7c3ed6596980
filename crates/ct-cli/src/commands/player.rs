use std::path::Path;

use ct_core::TrackerConfig;

pub fn run(config: TrackerConfig, file: &Path, name: &str) -> Result<(), String> {
    let mut store = super::open(config, file)?;
    if super::report(store.add_player(name))? {
        super::save(&store, file)?;
    }
    Ok(())
}
