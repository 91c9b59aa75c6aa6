//! `fwz parse`: run the CSV tokenizer over a file.

use std::path::Path;

use anyhow::{Context, Result};
use comfy_table::{presets, Cell, Color, ContentArrangement, Table};
use console::style;

use formwiz_core::csv::parse_csv;

pub async fn parse_file(path: &Path, json: bool) -> Result<()> {
    let text = tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("Failed to read {}", path.display()))?;
    let rows = parse_csv(&text);

    if json {
        println!("{}", serde_json::to_string_pretty(&rows)?);
        return Ok(());
    }

    let mut table = Table::new();
    table.load_preset(presets::UTF8_FULL_CONDENSED);
    table.set_content_arrangement(ContentArrangement::Dynamic);

    for (index, row) in rows.iter().enumerate() {
        let mut cells = vec![Cell::new(index + 1).fg(Color::DarkGrey)];
        cells.extend(row.iter().map(Cell::new));
        table.add_row(cells);
    }

    println!();
    println!("{table}");
    println!();
    println!(
        "  {} row{}",
        style(rows.len()).bold(),
        if rows.len() == 1 { "" } else { "s" }
    );
    println!();

    Ok(())
}
