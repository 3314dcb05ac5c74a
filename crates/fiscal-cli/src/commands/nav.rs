use anyhow::Result;
use fiscal_application::{CollapsePreference, SidebarItem, SidebarView};
use fiscal_core::config::ShellConfig;
use fiscal_core::navigation::NAVIGATION_ENTRIES;
use fiscal_infrastructure::FiscalPaths;

use super::preferences::open_store;

pub fn show(paths: &FiscalPaths, config: &ShellConfig, path: &str, json: bool) -> Result<()> {
    let store = open_store(paths)?;
    let collapsed =
        CollapsePreference::load(&store, config.collapse_preference_key.as_str()).is_collapsed();
    let view = SidebarView::build(NAVIGATION_ENTRIES, path, collapsed);

    if json {
        println!("{}", serde_json::to_string_pretty(&view)?);
        return Ok(());
    }

    print_view(&view);
    if view.active().is_none() {
        println!("\n(no entry matches {})", path);
    }
    Ok(())
}

pub fn print_view(view: &SidebarView) {
    println!("[{}]", view.toggle_label);
    for item in &view.primary {
        print_item(item);
    }
    println!("  ----");
    for item in &view.secondary {
        print_item(item);
    }
}

fn print_item(item: &SidebarItem) {
    let marker = if item.active { ">" } else { " " };
    let label = if item.show_label { item.entry.label } else { "" };
    println!("{} {:<12} {:?} {}", marker, item.entry.path, item.entry.icon, label);
}
