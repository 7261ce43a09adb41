use crate::{CheckResult, UnknownWord};
use colored::*;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use std::str::FromStr;

#[derive(Debug, Clone, Copy)]
pub enum OutputFormat {
    Text,
    Json,
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            _ => Err(format!("Unknown format: {}", s)),
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputFormat::Text => write!(f, "text"),
            OutputFormat::Json => write!(f, "json"),
        }
    }
}

/// What the user picked at the interactive prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PromptAction {
    Skip,
    Replace(String),
    Add,
    Quit,
}

#[derive(Debug, Serialize, Deserialize)]
struct JsonReport {
    file: String,
    word: String,
    offset: usize,
    predecessor: String,
    successor: String,
}

#[derive(Debug, Serialize, Deserialize)]
struct JsonOutput {
    files_checked: usize,
    total_unknown: usize,
    reports: Vec<JsonReport>,
}

pub fn print_reports(
    file_path: &Path,
    result: &CheckResult,
    colored_output: bool,
    format: &OutputFormat,
) {
    match format {
        OutputFormat::Text => print_text_reports(file_path, result, colored_output),
        OutputFormat::Json => print_json_reports(file_path, result),
    }
}

fn print_text_reports(file_path: &Path, result: &CheckResult, colored_output: bool) {
    if result.reports.is_empty() {
        return;
    }

    let file_name = file_path.display().to_string();

    if colored_output {
        println!("\n{}", file_name.bold().underline());
    } else {
        println!("\n{}", file_name);
    }

    for report in &result.reports {
        let suggestions = suggestion_list(report);

        if colored_output {
            println!(
                "  {} {}",
                format!("@{}", report.offset).blue().bold(),
                report.word.red().bold()
            );
            if !suggestions.is_empty() {
                let suggestions = suggestions
                    .iter()
                    .map(|s| s.green().to_string())
                    .collect::<Vec<_>>()
                    .join(&", ".dimmed().to_string());
                println!("    {} {}", "→".dimmed(), suggestions);
            }
        } else {
            println!("  @{} {}", report.offset, report.word);
            if !suggestions.is_empty() {
                println!("    → {}", suggestions.join(", "));
            }
        }
    }
}

fn print_json_reports(file_path: &Path, result: &CheckResult) {
    let json_reports: Vec<JsonReport> = result
        .reports
        .iter()
        .map(|r| JsonReport {
            file: file_path.display().to_string(),
            word: r.word.clone(),
            offset: r.offset,
            predecessor: r.predecessor.clone(),
            successor: r.successor.clone(),
        })
        .collect();

    let output = JsonOutput {
        files_checked: 1,
        total_unknown: result.unknown_count,
        reports: json_reports,
    };

    match serde_json::to_string_pretty(&output) {
        Ok(json) => println!("{}", json),
        Err(e) => eprintln!("Failed to serialize report: {}", e),
    }
}

/// The bounding neighbors, with absent (empty) bounds left out.
fn suggestion_list(report: &UnknownWord) -> Vec<String> {
    [&report.predecessor, &report.successor]
        .into_iter()
        .filter(|s| !s.is_empty())
        .cloned()
        .collect()
}

pub fn print_check_summary(total_unknown: usize, files: &[impl AsRef<Path>], colored: bool) {
    println!();
    if total_unknown == 0 {
        if colored {
            println!("{}", "✓ No unknown words found!".green().bold());
        } else {
            println!("✓ No unknown words found!");
        }
    } else {
        let word = if total_unknown == 1 { "word" } else { "words" };
        if colored {
            println!(
                "{} {} unknown {} found in {} {}",
                "✗".red().bold(),
                total_unknown.to_string().red().bold(),
                word,
                files.len(),
                if files.len() == 1 { "file" } else { "files" }
            );
        } else {
            println!(
                "✗ {} unknown {} found in {} {}",
                total_unknown,
                word,
                files.len(),
                if files.len() == 1 { "file" } else { "files" }
            );
        }
    }
}

pub fn print_fix_summary(total_fixed: usize, files: &[impl AsRef<Path>], colored: bool) {
    println!();
    if total_fixed == 0 {
        if colored {
            println!("{}", "No corrections needed!".green().bold());
        } else {
            println!("No corrections needed!");
        }
    } else {
        let fix_word = if total_fixed == 1 {
            "correction"
        } else {
            "corrections"
        };
        if colored {
            println!(
                "{} {} {} applied to {} {}",
                "✓".green().bold(),
                total_fixed.to_string().green().bold(),
                fix_word,
                files.len(),
                if files.len() == 1 { "file" } else { "files" }
            );
        } else {
            println!(
                "✓ {} {} applied to {} {}",
                total_fixed,
                fix_word,
                files.len(),
                if files.len() == 1 { "file" } else { "files" }
            );
        }
    }
}

pub fn print_interactive_prompt(report: &UnknownWord, colored: bool) -> PromptAction {
    if colored {
        println!(
            "\n{} {} at offset {}",
            "Unknown word:".yellow().bold(),
            report.word.red().bold(),
            report.offset.to_string().blue()
        );
    } else {
        println!("\nUnknown word: {} at offset {}", report.word, report.offset);
    }

    let mut options = vec!["[s] Skip".to_string()];
    if !report.predecessor.is_empty() {
        if colored {
            options.push(format!("[1] {}", report.predecessor.green()));
        } else {
            options.push(format!("[1] {}", report.predecessor));
        }
    }
    if !report.successor.is_empty() {
        if colored {
            options.push(format!("[2] {}", report.successor.green()));
        } else {
            options.push(format!("[2] {}", report.successor));
        }
    }
    options.push("[r] Replace with...".to_string());
    options.push("[a] Add to dictionary".to_string());
    options.push("[q] Quit".to_string());

    for option in &options {
        println!("  {}", option);
    }

    print!("\nChoice: ");
    use std::io::{self, Write};
    if io::stdout().flush().is_err() {
        return PromptAction::Quit;
    }

    let mut input = String::new();
    if io::stdin().read_line(&mut input).is_err() {
        return PromptAction::Quit;
    }

    match input.trim() {
        "1" if !report.predecessor.is_empty() => PromptAction::Replace(report.predecessor.clone()),
        "2" if !report.successor.is_empty() => PromptAction::Replace(report.successor.clone()),
        "a" | "A" => PromptAction::Add,
        "q" | "Q" => PromptAction::Quit,
        "r" | "R" => {
            print!("Replacement: ");
            if io::stdout().flush().is_err() {
                return PromptAction::Quit;
            }
            let mut replacement = String::new();
            if io::stdin().read_line(&mut replacement).is_err() {
                return PromptAction::Quit;
            }
            let replacement = replacement.trim();
            if replacement.is_empty() {
                PromptAction::Skip
            } else {
                PromptAction::Replace(replacement.to_string())
            }
        }
        _ => PromptAction::Skip,
    }
}
