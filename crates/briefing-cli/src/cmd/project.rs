//! Dashboard commands: list, show, delete and share stored briefings.

use super::{load_config, open_store, LinkShare};
use crate::output::{print_json, print_table, truncate};
use anyhow::Context;
use briefing_core::{
    dashboard::Dashboard,
    record::format_duration,
    share::{self, ShareTarget},
    store::BriefingStore,
};
use std::path::Path;

// ---------------------------------------------------------------------------
// list
// ---------------------------------------------------------------------------

pub fn list(root: &Path, json: bool) -> anyhow::Result<()> {
    let config = load_config(root)?;
    let dashboard = Dashboard::new(open_store(root, &config)?);

    if json {
        print_json(&dashboard.entries())?;
        return Ok(());
    }

    if dashboard.is_empty() {
        println!("No projects.");
        println!("Start one with 'briefing new'.");
        return Ok(());
    }

    let rows: Vec<Vec<String>> = dashboard
        .entries()
        .iter()
        .map(|e| {
            vec![
                e.id.clone(),
                truncate(&e.title, 32),
                e.video_type.label().to_string(),
                format_duration(e.duration),
                e.visual_style.clone(),
                e.date.clone(),
                truncate(&e.blurb, 40),
            ]
        })
        .collect();
    print_table(
        &["ID", "TITLE", "TYPE", "DURATION", "STYLE", "MODIFIED", "SUMMARY"],
        rows,
    );
    Ok(())
}

// ---------------------------------------------------------------------------
// show
// ---------------------------------------------------------------------------

pub fn show(root: &Path, id: &str, json: bool) -> anyhow::Result<()> {
    let config = load_config(root)?;
    let dashboard = Dashboard::new(open_store(root, &config)?);
    let record = dashboard
        .open(id)
        .with_context(|| format!("project '{id}' not found"))?;

    if json {
        print_json(&record)?;
    } else {
        print!("{}", share::format_payload(&record));
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// delete
// ---------------------------------------------------------------------------

pub fn delete(root: &Path, id: &str, json: bool) -> anyhow::Result<()> {
    let config = load_config(root)?;
    let mut dashboard = Dashboard::new(open_store(root, &config)?);
    let existed = dashboard.entries().iter().any(|e| e.id == id);
    dashboard
        .delete(id)
        .with_context(|| format!("failed to delete project '{id}'"))?;

    if json {
        print_json(&serde_json::json!({
            "id": id,
            "deleted": existed,
            "remaining": dashboard.entries().len(),
        }))?;
    } else if existed {
        println!("Deleted project '{id}'.");
    } else {
        println!("No project '{id}'; nothing to delete.");
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// share
// ---------------------------------------------------------------------------

pub fn share(root: &Path, id: &str, open: bool, json: bool) -> anyhow::Result<()> {
    let config = load_config(root)?;
    let store = open_store(root, &config)?;
    let record = store
        .get(id)
        .with_context(|| format!("project '{id}' not found"))?;

    let payload = share::format_payload(&record);
    let mut target = LinkShare::new(&config, open || config.share.open_browser);
    let shared = target.share(&payload);
    let url = target.last_url.unwrap_or_default();

    if json {
        print_json(&serde_json::json!({
            "id": id,
            "payload": payload,
            "url": url,
        }))?;
    } else {
        print!("{payload}");
        println!();
        println!("Share link: {url}");
    }
    if let Err(e) = shared {
        tracing::warn!(error = %e, "could not open share link");
    }
    Ok(())
}
