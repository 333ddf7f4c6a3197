//! Crumbs command implementation

use anyhow::{Context, Result};
use docsite::breadcrumbs::derive_breadcrumbs;
use docsite::theme;

pub fn show_breadcrumbs(path: &str, json: bool) -> Result<()> {
    let items = derive_breadcrumbs(path);

    if json {
        let out = serde_json::to_string_pretty(&items).context("Failed to serialize breadcrumbs")?;
        println!("{}", out);
        return Ok(());
    }

    if items.is_empty() {
        println!("{} {}", theme::info(theme::info_symbol()), "no breadcrumbs for this path");
        return Ok(());
    }

    for item in &items {
        match &item.url {
            Some(url) => println!("{}  {}", item.name, theme::link(url)),
            None => println!("{}", theme::current(&item.name)),
        }
    }

    Ok(())
}
