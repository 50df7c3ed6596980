use std::path::Path;

use ct_core::{TrackerConfig, codec, export};

pub fn run(
    config: TrackerConfig,
    file: &Path,
    format: &str,
    campaign: Option<&str>,
    output: Option<&Path>,
) -> Result<(), String> {
    let mut store = super::open_existing(config, file)?;

    let content = match format {
        "json" => codec::serialize(&store.export_snapshot()).map_err(|e| e.to_string())?,
        "markdown" | "md" | "text" | "txt" => {
            let name = campaign.ok_or("markdown and text exports need --campaign")?;
            let canonical = super::resolve_campaign(&store, name)?;
            store
                .select_campaign(&canonical)
                .map_err(|e| e.to_string())?;
            if format.starts_with('t') {
                export::campaign_text(&store)
            } else {
                export::campaign_markdown(&store)
            }
        }
        _ => {
            return Err(format!(
                "unsupported format: \"{format}\". Use: markdown, text, json"
            ));
        }
    };

    if let Some(path) = output {
        std::fs::write(path, &content)
            .map_err(|e| format!("cannot write to {}: {e}", path.display()))?;
        println!("  Exported to {}", path.display());
    } else {
        print!("{content}");
    }

    Ok(())
}
