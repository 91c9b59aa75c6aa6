//! `fwz dashboard`: submissions paired with their scores.

use std::future::Future;
use std::time::Duration;

use anyhow::Result;
use comfy_table::{presets, Cell, Color, ContentArrangement, Table};
use console::style;
use tracing::info;

use formwiz_core::scoring::{load_dashboard, RecordSource};
use formwiz_infra::config::refresh_interval;
use formwiz_types::record::{field_text, DashboardSnapshot, Record};

use crate::state::AppState;

/// Fields of a scoring record shown inline in the table.
const MAX_SCORE_FIELDS: usize = 4;

pub async fn dashboard(state: &AppState, watch: bool, json: bool) -> Result<()> {
    let source = state.record_source();
    let name_field = state.config.company_name_field.as_str();

    if !watch {
        let snapshot = load_dashboard(&source, name_field).await;
        return render(&snapshot, name_field, json);
    }

    let period = refresh_interval(&state.config);
    info!(period_secs = period.as_secs(), "Watching dashboard");
    watch_until(&source, name_field, period, json, tokio::signal::ctrl_c()).await
}

/// Refresh every `period` until `shutdown` resolves.
///
/// The fetch runs inside the `select!` against a single shutdown future, so
/// a signal arriving mid-fetch ends the loop without waiting for the fetch.
async fn watch_until<R, F>(
    source: &R,
    name_field: &str,
    period: Duration,
    json: bool,
    shutdown: F,
) -> Result<()>
where
    R: RecordSource,
    F: Future<Output = std::io::Result<()>>,
{
    let mut ticker = tokio::time::interval(period);
    tokio::pin!(shutdown);

    loop {
        tokio::select! {
            result = &mut shutdown => {
                result?;
                return Ok(());
            }
            snapshot = async {
                ticker.tick().await;
                load_dashboard(source, name_field).await
            } => {
                render(&snapshot, name_field, json)?;
                if !json {
                    println!("  {}", style("Press Ctrl+C to stop").dim());
                }
            }
        }
    }
}

fn render(snapshot: &DashboardSnapshot, name_field: &str, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string(snapshot)?);
        return Ok(());
    }

    println!();
    println!(
        "  {} Submissions at {}",
        style("⚡").bold(),
        style(snapshot.fetched_at.format("%Y-%m-%d %H:%M:%S UTC")).dim()
    );
    println!();

    if snapshot.entries.is_empty() {
        println!("  {} No submissions yet.", style("i").blue().bold());
        println!();
        return Ok(());
    }

    let mut table = Table::new();
    table.load_preset(presets::UTF8_FULL_CONDENSED);
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec![
        Cell::new("#").fg(Color::White),
        Cell::new("Company").fg(Color::White),
        Cell::new("Score").fg(Color::White),
    ]);

    for (index, entry) in snapshot.entries.iter().enumerate() {
        let name = field_text(&entry.submission, name_field).unwrap_or_else(|| "-".to_string());
        let score = match &entry.score {
            Some(score) => Cell::new(score_summary(score, name_field)).fg(Color::Green),
            None => Cell::new("not scored").fg(Color::DarkGrey),
        };
        table.add_row(vec![
            Cell::new(index + 1).fg(Color::DarkGrey),
            Cell::new(name).fg(Color::Cyan),
            score,
        ]);
    }

    println!("{table}");
    println!();
    println!(
        "  {} submission{}, {} scored",
        style(snapshot.entries.len()).bold(),
        if snapshot.entries.len() == 1 { "" } else { "s" },
        style(snapshot.scored_count()).bold()
    );
    println!();

    Ok(())
}

/// `field: value` pairs of a scoring record, minus the company name.
fn score_summary(score: &Record, name_field: &str) -> String {
    score
        .keys()
        .filter(|k| k.as_str() != name_field)
        .filter_map(|k| field_text(score, k).map(|v| format!("{k}: {v}")))
        .take(MAX_SCORE_FIELDS)
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn score_summary_skips_name_and_compound_values() {
        let score = json!({
            "Название компании": "Ромашка",
            "total": 87,
            "comment": "сильная команда",
            "tags": ["a"]
        });
        let summary = score_summary(score.as_object().unwrap(), "Название компании");
        assert!(summary.contains("total: 87"));
        assert!(summary.contains("comment: сильная команда"));
        assert!(!summary.contains("Ромашка"));
        assert!(!summary.contains("tags"));
    }

    /// A collaborator that never answers.
    struct StalledSource;

    impl RecordSource for StalledSource {
        async fn fetch_submissions(&self) -> anyhow::Result<Vec<Record>> {
            std::future::pending().await
        }

        async fn fetch_scores(&self) -> anyhow::Result<Vec<Record>> {
            std::future::pending().await
        }
    }

    #[tokio::test]
    async fn shutdown_interrupts_a_stalled_refresh() {
        let shutdown = async {
            tokio::time::sleep(Duration::from_millis(20)).await;
            Ok::<(), std::io::Error>(())
        };
        let watch = watch_until(
            &StalledSource,
            "Название компании",
            Duration::from_secs(60),
            true,
            shutdown,
        );
        let watched = tokio::time::timeout(Duration::from_secs(5), watch).await;
        assert!(matches!(watched, Ok(Ok(()))));
    }

    #[tokio::test]
    async fn shutdown_error_is_reported() {
        let shutdown = async { Err(std::io::Error::other("no signal handler")) };
        let result = watch_until(
            &StalledSource,
            "Название компании",
            Duration::from_secs(60),
            true,
            shutdown,
        )
        .await;
        assert!(result.is_err());
    }
}
