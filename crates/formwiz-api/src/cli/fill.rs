//! `fwz fill`: walk the application wizard in the terminal, or apply a JSON
//! file of answers non-interactively.

use std::collections::BTreeMap;
use std::path::Path;

use anyhow::{Context, Result};
use chrono::Utc;
use comfy_table::{presets, Cell, Color, ContentArrangement, Table};
use console::style;
use dialoguer::{Input, Select};
use tracing::info;

use formwiz_core::field_key::field_label;
use formwiz_core::wizard::Wizard;
use formwiz_types::schema::FieldDefinition;
use formwiz_types::wizard::{AdvanceOutcome, FieldIssue, IssueReason};

use crate::cli::schema::{load_with_spinner, print_origin};
use crate::cli::SchemaArgs;
use crate::state::AppState;

const BAR_WIDTH: usize = 20;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Action {
    Next,
    Back,
    Jump,
    Submit,
    Quit,
}

impl Action {
    fn label(&self) -> &'static str {
        match self {
            Action::Next => "Next step >",
            Action::Back => "< Previous step",
            Action::Jump => "Go to step...",
            Action::Submit => "Submit",
            Action::Quit => "Quit without submitting",
        }
    }
}

// ---------------------------------------------------------------------------
// Interactive
// ---------------------------------------------------------------------------

pub async fn fill_interactive(state: &AppState, args: &SchemaArgs) -> Result<()> {
    let loaded = load_with_spinner(state, args, true).await;
    println!();
    print_origin(&loaded);

    let mut wizard =
        Wizard::new(loaded.schema).with_dismiss_after_secs(state.config.validation_dismiss_secs);
    info!(
        session = %wizard.state().session_id,
        steps = wizard.step_count(),
        "Wizard session started"
    );

    loop {
        wizard.expire_validation_message(Utc::now());
        print_step_header(&wizard);
        if let Some(message) = wizard.validation_message() {
            println!("  {} {}", style("✗").red().bold(), style(message).red());
            println!();
        }

        let fields: Vec<(FieldDefinition, String)> = wizard
            .step_fields(wizard.current_step())
            .map(|(field, key)| (field.clone(), key.to_string()))
            .collect();
        if fields.is_empty() {
            println!("  {}", style("No questions on this step.").dim());
        }
        for (field, key) in &fields {
            let value = prompt_field(field, wizard.value(key))?;
            wizard.set_value(key, value);
            if let Some(error) = wizard.error(key) {
                println!("    {} {}", style("!").yellow(), style(error).yellow());
            }
        }

        let actions = available_actions(wizard.current_step(), wizard.step_count());
        let labels: Vec<&str> = actions.iter().map(Action::label).collect();
        println!();
        let selection = Select::new().items(&labels).default(0).interact()?;

        match actions[selection] {
            Action::Next => {
                let target = wizard.current_step() + 1;
                report_outcome(&wizard.request_advance(target));
            }
            Action::Back => {
                let target = wizard.current_step().saturating_sub(1);
                report_outcome(&wizard.request_advance(target));
            }
            Action::Jump => {
                let target: usize = Input::new()
                    .with_prompt(format!("Step (1-{})", wizard.step_count()))
                    .interact_text()?;
                report_outcome(&wizard.request_advance(target));
            }
            Action::Submit => {
                if submit_issues(&mut wizard).is_empty() {
                    info!(session = %wizard.state().session_id, "Wizard completed");
                    print_summary(&wizard);
                    return Ok(());
                }
            }
            Action::Quit => {
                println!();
                println!("  {} Nothing was submitted.", style("i").blue().bold());
                println!();
                return Ok(());
            }
        }
    }
}

fn available_actions(step: usize, step_count: usize) -> Vec<Action> {
    let mut actions = Vec::with_capacity(5);
    if step < step_count {
        actions.push(Action::Next);
    }
    if step > 1 {
        actions.push(Action::Back);
    }
    if step_count > 1 {
        actions.push(Action::Jump);
    }
    actions.push(Action::Submit);
    actions.push(Action::Quit);
    actions
}

fn prompt_field(field: &FieldDefinition, current: &str) -> Result<String> {
    println!();
    if !field.placeholder.is_empty() {
        println!("  {}", style(&field.placeholder).dim());
    }
    if let Some(accept) = &field.accept {
        println!("  {}", style(format!("Path to a file ({accept})")).dim());
    }
    let marker = if field.required { " *" } else { "" };
    let value: String = Input::new()
        .with_prompt(format!("{}{marker}", field.question))
        .with_initial_text(current)
        .allow_empty(true)
        .interact_text()?;
    Ok(value)
}

fn print_step_header(wizard: &Wizard) {
    let step = wizard.current_step();
    let section = wizard.schema().section_for_step(step).unwrap_or("");

    println!();
    println!(
        "  {} {}",
        style(format!("Step {step}/{}", wizard.step_count())).cyan().bold(),
        style(section).bold()
    );

    let overview: Vec<String> = wizard
        .progress_report()
        .iter()
        .map(|p| {
            if p.step == step {
                style("●").cyan().to_string()
            } else if p.accessible {
                style("○").green().to_string()
            } else {
                style("○").dim().to_string()
            }
        })
        .collect();
    println!(
        "  {}  {} {}",
        overview.join(" "),
        render_bar(wizard.progress(step)),
        style(format!("{:.0}%", wizard.progress(step) * 100.0)).dim()
    );
    println!();
}

fn report_outcome(outcome: &AdvanceOutcome) {
    match outcome {
        AdvanceOutcome::Moved { from, to } if from != to => {
            tracing::debug!(from, to, "Moved between steps");
        }
        AdvanceOutcome::Moved { .. } => {}
        AdvanceOutcome::Rejected { message } => {
            tracing::debug!(step = message.step, issues = message.issues.len(), "Move rejected");
        }
    }
}

/// Try to reach the last step and collect whatever still blocks submission.
///
/// Navigation checks the steps before the target, so the last step's own
/// gating fields are checked here.
fn submit_issues(wizard: &mut Wizard) -> Vec<FieldIssue> {
    let last = wizard.step_count();
    if let AdvanceOutcome::Rejected { message } = wizard.request_advance(last) {
        return message.issues;
    }

    let issues = wizard.step_issues(last);
    for issue in &issues {
        println!("  {} {}", style("✗").red(), describe_issue(issue));
    }
    issues
}

fn describe_issue(issue: &FieldIssue) -> String {
    match &issue.reason {
        IssueReason::Empty => format!("{}: required", issue.label),
        IssueReason::Invalid(reason) => format!("{}: {reason}", issue.label),
    }
}

fn print_summary(wizard: &Wizard) {
    let mut table = Table::new();
    table.load_preset(presets::UTF8_FULL_CONDENSED);
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec![
        Cell::new("Field").fg(Color::White),
        Cell::new("Answer").fg(Color::White),
    ]);
    for (key, value) in &wizard.state().values {
        if value.trim().is_empty() {
            continue;
        }
        table.add_row(vec![
            Cell::new(field_label(key).unwrap_or(key.as_str())).fg(Color::Cyan),
            Cell::new(value.trim()),
        ]);
    }

    println!();
    println!("  {} Application complete", style("✓").green().bold());
    println!();
    println!("{table}");
    println!(
        "  Session {}",
        style(wizard.state().session_id.to_string()).dim()
    );
    println!();
}

fn render_bar(ratio: f64) -> String {
    let filled = ((ratio.clamp(0.0, 1.0) * BAR_WIDTH as f64).round()) as usize;
    format!(
        "{}{}",
        style("█".repeat(filled)).green(),
        style("░".repeat(BAR_WIDTH - filled)).dim()
    )
}

// ---------------------------------------------------------------------------
// From a file
// ---------------------------------------------------------------------------

/// Apply answers from a JSON object keyed by field key, then try to reach
/// the last step. Fails when the form is incomplete.
pub async fn fill_from_file(
    state: &AppState,
    args: &SchemaArgs,
    path: &Path,
    json: bool,
) -> Result<()> {
    let text = tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("Failed to read {}", path.display()))?;
    let answers: BTreeMap<String, serde_json::Value> = serde_json::from_str(&text)
        .with_context(|| format!("{} is not a JSON object of answers", path.display()))?;

    let loaded = load_with_spinner(state, args, !json).await;
    let origin = loaded.origin.clone();
    let mut wizard =
        Wizard::new(loaded.schema).with_dismiss_after_secs(state.config.validation_dismiss_secs);

    for (key, value) in answers {
        wizard.set_value(&key, answer_text(value));
    }

    let last = wizard.step_count();
    let outcome = wizard.request_advance(last);
    let final_issues = if outcome.is_moved() {
        wizard.step_issues(last)
    } else {
        Vec::new()
    };
    let complete = outcome.is_moved() && final_issues.is_empty();

    if json {
        let output = serde_json::json!({
            "session_id": wizard.state().session_id,
            "origin": origin,
            "outcome": outcome,
            "current_step": wizard.current_step(),
            "step_count": last,
            "final_step_issues": final_issues,
            "field_errors": wizard.state().errors,
            "progress": wizard.progress_report(),
            "overall_progress": wizard.overall_progress(),
            "complete": complete,
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        println!();
        for p in wizard.progress_report() {
            let mark = if p.accessible {
                style("✓").green()
            } else {
                style("✗").red()
            };
            println!(
                "  {} {}. {}  {} {}/{}",
                mark,
                p.step,
                p.section.as_deref().unwrap_or("-"),
                render_bar(p.ratio),
                p.filled,
                p.required
            );
        }
        println!();
        if let AdvanceOutcome::Rejected { message } = &outcome {
            println!("  {} {}", style("✗").red().bold(), style(message).red());
        }
        for issue in &final_issues {
            println!("  {} {}", style("✗").red(), describe_issue(issue));
        }
        if complete {
            println!("  {} All steps are complete", style("✓").green().bold());
        }
        println!();
    }

    if !complete {
        anyhow::bail!("the application form is incomplete");
    }
    Ok(())
}

fn answer_text(value: serde_json::Value) -> String {
    match value {
        serde_json::Value::String(s) => s,
        serde_json::Value::Null => String::new(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn answers_become_text() {
        assert_eq!(answer_text(json!("Москва")), "Москва");
        assert_eq!(answer_text(json!(12)), "12");
        assert_eq!(answer_text(json!(null)), "");
    }

    #[test]
    fn actions_depend_on_position() {
        assert_eq!(
            available_actions(1, 3),
            vec![Action::Next, Action::Jump, Action::Submit, Action::Quit]
        );
        assert_eq!(
            available_actions(3, 3),
            vec![Action::Back, Action::Jump, Action::Submit, Action::Quit]
        );
        assert_eq!(available_actions(1, 1), vec![Action::Submit, Action::Quit]);
    }

    #[test]
    fn describe_issue_names_the_reason() {
        let issue = FieldIssue {
            key: "email".to_string(),
            label: "Контактный email".to_string(),
            reason: IssueReason::Invalid("некорректный email".to_string()),
        };
        assert_eq!(describe_issue(&issue), "Контактный email: некорректный email");
    }

    const TWO_STEP_SHEET: &str = "\
Раздел,A,B
Вопрос,Город,Стадия проекта
Подсказка,,
Статус,обязательно,обязательно";

    async fn fill_with(answers: serde_json::Value) -> Result<()> {
        let tmp = tempfile::TempDir::new().unwrap();
        let sheet = tmp.path().join("schema.csv");
        let values = tmp.path().join("answers.json");
        tokio::fs::write(&sheet, TWO_STEP_SHEET).await.unwrap();
        tokio::fs::write(&values, answers.to_string()).await.unwrap();

        let state = AppState {
            config: formwiz_types::config::FormConfig::default(),
            data_dir: tmp.path().to_path_buf(),
        };
        let args = SchemaArgs {
            file: Some(sheet),
            url: None,
        };
        fill_from_file(&state, &args, &values, true).await
    }

    #[tokio::test]
    async fn values_file_completing_every_step_succeeds() {
        let result = fill_with(json!({"city": "Казань", "stage": "MVP"})).await;
        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn values_file_accepts_scalar_answers() {
        let result = fill_with(json!({"city": "Казань", "stage": 42})).await;
        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn values_file_missing_last_step_answer_fails() {
        let err = fill_with(json!({"city": "Казань"})).await.unwrap_err();
        assert!(err.to_string().contains("incomplete"));
    }

    #[tokio::test]
    async fn values_file_must_be_an_object() {
        let err = fill_with(json!(["Казань"])).await.unwrap_err();
        assert!(err.to_string().contains("not a JSON object"));
    }

    #[test]
    fn submit_reports_last_step_issues() {
        use formwiz_types::schema::{FieldType, Schema};

        let field = |section: &str, question: &str| FieldDefinition {
            section: section.to_string(),
            question: question.to_string(),
            placeholder: String::new(),
            required: true,
            field_type: FieldType::Text,
            accept: None,
            max_length: None,
            rows: None,
        };
        let mut wizard = Wizard::new(Schema::from_fields(vec![
            field("A", "Город"),
            field("B", "Стадия проекта"),
        ]));

        wizard.set_value("city", "Казань");
        let issues = submit_issues(&mut wizard);
        assert_eq!(wizard.current_step(), 2);
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].key, "stage");

        wizard.set_value("stage", "MVP");
        assert!(submit_issues(&mut wizard).is_empty());
    }
}
