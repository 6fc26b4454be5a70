//! Writes the models visible to the configured key to a flat text file.

use std::fs;
use std::path::Path;
use anyhow::Context;
use comfy_table::{Attribute, Cell, ContentArrangement, Table};
use tracing::info;

use crate::llm::{GeminiClient, ModelInfo};
use crate::text::quoted_list;

/// Default output file for the models listing
pub const DEFAULT_OUTPUT: &str = "models.txt";

const DIVIDER_WIDTH: usize = 20;

/// Renders the listing: one `Model:`/`Methods:` block per model, each followed by a divider
pub fn format_models(models: &[ModelInfo]) -> String {
    let divider = "-".repeat(DIVIDER_WIDTH);
    let mut out = String::new();
    for model in models {
        out.push_str(&format!("Model: {}\n", model.name));
        out.push_str(&format!("Methods: {}\n", quoted_list(&model.supported_generation_methods)));
        out.push_str(&divider);
        out.push('\n');
    }
    out
}

/// Writes the listing to `path`, replacing any previous file
pub fn write_models_file(path: &Path, models: &[ModelInfo]) -> anyhow::Result<()> {
    fs::write(path, format_models(models))
        .with_context(|| format!("failed to write {}", path.display()))?;
    info!("Wrote {} models to {}", models.len(), path.display());
    Ok(())
}

/// Console summary of the listing
pub fn models_table(models: &[ModelInfo]) -> Table {
    let mut table = Table::new();
    table
        .set_header(vec![
            Cell::new("Model").fg(comfy_table::Color::Cyan).add_attribute(Attribute::Bold),
            Cell::new("Methods").fg(comfy_table::Color::Cyan).add_attribute(Attribute::Bold),
        ])
        .load_preset(comfy_table::presets::UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic);

    for model in models {
        table.add_row(vec![
            Cell::new(&model.name).fg(comfy_table::Color::Green),
            Cell::new(model.supported_generation_methods.join(", ")),
        ]);
    }
    table
}

/// Fetches every model and writes the listing, returning the models written.
pub async fn list_models_to_file(client: &GeminiClient, path: &Path) -> anyhow::Result<Vec<ModelInfo>> {
    let models = client.list_models().await.context("failed to list models")?;
    write_models_file(path, &models)?;
    Ok(models)
}
