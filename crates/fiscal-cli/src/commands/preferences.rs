use anyhow::{Context, Result};
use fiscal_application::CollapsePreference;
use fiscal_core::config::ShellConfig;
use fiscal_infrastructure::{FiscalPaths, TomlPreferenceStore};

pub fn open_store(paths: &FiscalPaths) -> Result<TomlPreferenceStore> {
    TomlPreferenceStore::from_paths(paths).context("Failed to locate preferences file")
}

pub fn status(paths: &FiscalPaths, config: &ShellConfig) -> Result<()> {
    let store = open_store(paths)?;
    let pref = CollapsePreference::load(&store, config.collapse_preference_key.as_str());
    println!(
        "{} = {}",
        pref.key(),
        if pref.is_collapsed() { "collapsed" } else { "expanded" }
    );
    Ok(())
}

pub fn toggle(paths: &FiscalPaths, config: &ShellConfig) -> Result<()> {
    let store = open_store(paths)?;
    let mut pref = CollapsePreference::load(&store, config.collapse_preference_key.as_str());
    let collapsed = pref.toggle(&store);
    println!(
        "✓ Sidebar is now {}",
        if collapsed { "collapsed" } else { "expanded" }
    );
    Ok(())
}
