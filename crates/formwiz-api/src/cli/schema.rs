//! `fwz schema` and `fwz check`: inspect the compiled schema sheet.

use std::time::Duration;

use anyhow::Result;
use comfy_table::{presets, Cell, Color, ContentArrangement, Table};
use console::style;
use indicatif::{ProgressBar, ProgressStyle};

use formwiz_core::field_key::{bind_field_keys, find_key_collisions};
use formwiz_core::schema::compiler::SkipReason;
use formwiz_core::schema::{LoadedSchema, SchemaOrigin};

use crate::cli::SchemaArgs;
use crate::state::AppState;

/// Load the schema behind a spinner unless output is machine-readable.
pub(crate) async fn load_with_spinner(
    state: &AppState,
    args: &SchemaArgs,
    show: bool,
) -> LoadedSchema {
    if !show {
        return state.load_schema(args).await;
    }

    let spinner = ProgressBar::new_spinner();
    if let Ok(spinner_style) = ProgressStyle::default_spinner().template("{spinner:.cyan} {msg}") {
        spinner.set_style(spinner_style);
    }
    spinner.set_message("Loading schema...");
    spinner.enable_steady_tick(Duration::from_millis(80));

    let loaded = state.load_schema(args).await;

    spinner.finish_and_clear();
    loaded
}

pub(crate) fn print_origin(loaded: &LoadedSchema) {
    match &loaded.origin {
        SchemaOrigin::Source { description } => {
            println!("  {} Schema from {}", style("✓").green().bold(), style(description).dim());
        }
        SchemaOrigin::Fallback { reason } => {
            println!(
                "  {} Using default schema ({})",
                style("!").yellow().bold(),
                style(reason).yellow()
            );
        }
    }
}

/// Print every step with its fields.
pub async fn show_schema(
    state: &AppState,
    args: &SchemaArgs,
    json: bool,
    quiet: bool,
) -> Result<()> {
    let loaded = load_with_spinner(state, args, !json && !quiet).await;

    if json {
        let keys = bind_field_keys(&loaded.schema);
        let output = serde_json::json!({
            "origin": loaded.origin,
            "sections": loaded.schema.sections(),
            "fields": loaded.schema.fields(),
            "keys": keys,
            "skipped_columns": loaded.skipped_columns,
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    println!();
    print_origin(&loaded);
    println!();

    if loaded.schema.is_empty() {
        println!("  {} The sheet defines no fields.", style("i").blue().bold());
        println!();
        return Ok(());
    }

    let keys = bind_field_keys(&loaded.schema);

    let mut table = Table::new();
    table.load_preset(presets::UTF8_FULL_CONDENSED);
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec![
        Cell::new("Step").fg(Color::White),
        Cell::new("Question").fg(Color::White),
        Cell::new("Key").fg(Color::White),
        Cell::new("Type").fg(Color::White),
        Cell::new("Required").fg(Color::White),
    ]);

    for (index, section) in loaded.schema.sections().iter().enumerate() {
        let step = index + 1;
        for (field, key) in loaded.schema.fields().iter().zip(&keys) {
            if &field.section != section {
                continue;
            }
            let required = if field.required {
                Cell::new("yes").fg(Color::Green)
            } else {
                Cell::new("no").fg(Color::DarkGrey)
            };
            table.add_row(vec![
                Cell::new(format!("{step}. {section}")).fg(Color::Cyan),
                Cell::new(&field.question),
                Cell::new(key).fg(Color::White),
                Cell::new(field.field_type.to_string()),
                required,
            ]);
        }
    }

    println!("{table}");
    println!();
    println!(
        "  {} step{}, {} field{}",
        style(loaded.schema.section_count()).bold(),
        if loaded.schema.section_count() == 1 { "" } else { "s" },
        style(loaded.schema.fields().len()).bold(),
        if loaded.schema.fields().len() == 1 { "" } else { "s" },
    );
    println!();

    Ok(())
}

/// Report problems in the sheet. Fails when any are found.
pub async fn check_schema(state: &AppState, args: &SchemaArgs, json: bool) -> Result<()> {
    let loaded = state.load_schema(args).await;
    let collisions = find_key_collisions(&loaded.schema);
    let problems = collisions.len() + usize::from(loaded.is_fallback());

    if json {
        let output = serde_json::json!({
            "config": state.data_dir.join("config.toml"),
            "origin": loaded.origin,
            "collisions": collisions,
            "skipped_columns": loaded.skipped_columns,
            "ok": problems == 0,
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        println!();
        println!(
            "  Config: {}",
            style(state.data_dir.join("config.toml").display()).dim()
        );
        print_origin(&loaded);
        println!();

        if collisions.is_empty() {
            println!("  {} Field keys are unique", style("✓").green());
        }
        for collision in &collisions {
            if collision.key.is_empty() {
                println!("  {} No usable key for:", style("✗").red());
            } else {
                println!(
                    "  {} Key {} is shared by:",
                    style("✗").red(),
                    style(&collision.key).yellow()
                );
            }
            for question in &collision.questions {
                println!("      {} {}", style("•").dim(), question);
            }
        }

        for skipped in &loaded.skipped_columns {
            let reason = match skipped.reason {
                SkipReason::Blank => "blank",
                SkipReason::MissingQuestion => "no question",
                SkipReason::MissingSection => "no section",
            };
            println!(
                "  {} Column {} skipped ({})",
                style("i").blue(),
                skipped.column + 1,
                style(reason).dim()
            );
        }
        println!();
    }

    if problems > 0 {
        anyhow::bail!("schema check found {problems} problem(s)");
    }
    Ok(())
}
