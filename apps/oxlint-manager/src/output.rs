//! Output rendering for the `lint`, `show` and edit commands.
//!
//! Supports `human` (default) and `json` outputs.

use crate::controller::SelectorRow;
use crate::models::{LintReport, Severity};
use owo_colors::OwoColorize;
use serde_json::json;
use serde_json::Value as JsonVal;

fn use_colors(output: &str) -> bool {
    output != "json" && std::env::var_os("NO_COLOR").is_none()
}

fn paint_severity(sev: Severity, color: bool) -> String {
    let label = format!("⟦{}⟧", sev);
    if !color {
        return label;
    }
    match sev {
        Severity::Error => label.red().bold().to_string(),
        Severity::Warn => label.yellow().bold().to_string(),
        Severity::Off => label.bright_black().to_string(),
    }
}

/// Print a lint report. Human mode echoes the linter output, then the summary.
pub fn print_lint(report: &LintReport, output: &str) -> serde_json::Result<()> {
    match output {
        "json" => println!("{}", serde_json::to_string_pretty(&compose_lint_json(report))?),
        _ => {
            let color = use_colors(output);
            if !report.full_output.is_empty() {
                print!("{}", report.full_output);
                if !report.full_output.ends_with('\n') {
                    println!();
                }
            }
            if let Some(err) = &report.error {
                eprintln!("{} {}", crate::utils::error_prefix(), err);
                return Ok(());
            }
            let line = format!("— {} —", report.summary);
            if !color {
                println!("{}", line);
            } else {
                match report.counts() {
                    Some((_, e)) if e > 0 => println!("{}", line.red().bold()),
                    Some((w, _)) if w > 0 => println!("{}", line.yellow().bold()),
                    Some(_) => println!("{}", line.green().bold()),
                    None => println!("{}", line.bold()),
                }
            }
        }
    }
    Ok(())
}

/// Print category and rule selectors followed by the current status.
pub fn print_selectors(
    categories: &[SelectorRow],
    rules: &[SelectorRow],
    status: &str,
    output: &str,
) -> serde_json::Result<()> {
    match output {
        "json" => {
            let out = compose_selectors_json(categories, rules, status);
            println!("{}", serde_json::to_string_pretty(&out)?);
        }
        _ => {
            let color = use_colors(output);
            let heading = |s: &str| if color { s.bold().to_string() } else { s.to_string() };
            println!("{}", heading("Rule Categories"));
            for c in categories {
                println!("  {:<12} {}", c.name, paint_severity(c.value, color));
            }
            println!("{}", heading("Rules by Category"));
            let mut current = None;
            for r in rules {
                if current != Some(r.category) {
                    println!("  {}", heading(r.category.as_str()));
                    current = Some(r.category);
                }
                println!("    {:<32} {}", r.name, paint_severity(r.value, color));
            }
            println!("{}", heading("Lint Results"));
            println!("  {}", status);
        }
    }
    Ok(())
}

/// Print the status messages an edit produced, oldest first.
pub fn print_messages(messages: &[String], output: &str) -> serde_json::Result<()> {
    match output {
        "json" => println!("{}", serde_json::to_string_pretty(&json!({ "messages": messages }))?),
        _ => {
            for m in messages {
                println!("{}", m);
            }
        }
    }
    Ok(())
}

/// Compose lint JSON object (pure) for testing purposes.
pub fn compose_lint_json(report: &LintReport) -> JsonVal {
    let counts = report
        .counts()
        .map(|(w, e)| json!({ "warnings": w, "errors": e }));
    json!({
        "summary": report.summary,
        "fullOutput": report.full_output,
        "counts": counts,
        "error": report.error,
    })
}

/// Compose selectors JSON object (pure) for testing purposes.
pub fn compose_selectors_json(categories: &[SelectorRow], rules: &[SelectorRow], status: &str) -> JsonVal {
    let cats: serde_json::Map<String, JsonVal> = categories
        .iter()
        .map(|c| (c.name.clone(), json!(c.value.as_str())))
        .collect();
    let rule_items: Vec<_> = rules
        .iter()
        .map(|r| json!({ "rule": r.name, "category": r.category.as_str(), "severity": r.value.as_str() }))
        .collect();
    json!({ "categories": cats, "rules": rule_items, "status": status })
}
