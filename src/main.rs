use anyhow::{Context, Result};
use clap::{CommandFactory, Parser};
use clap_complete::{generate, Shell};
use regex::Regex;
use spelltree::checker::dictionary::ImportStrategy;
use spelltree::cli::output::{self, OutputFormat, PromptAction};
use spelltree::{dict, CheckResult, Config, SpellChecker};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

#[derive(Parser, Debug)]
#[command(name = "spelltree")]
#[command(version, about = "A BST-backed dictionary and spellchecker", long_about = None)]
struct Cli {
    /// Documents to check
    #[arg(value_name = "FILES")]
    files: Vec<PathBuf>,

    /// Dictionary word list to import
    #[arg(short, long)]
    dictionary: Option<PathBuf>,

    /// Import the dictionary as a complete tree of minimal depth
    #[arg(short, long)]
    balanced: bool,

    /// Interactively fix unknown words
    #[arg(short, long)]
    interactive: bool,

    /// Disable colored output
    #[arg(long)]
    no_color: bool,

    /// Exit with code 0 even if unknown words are found
    #[arg(long)]
    no_fail: bool,

    /// Output format (text, json)
    #[arg(short = 'o', long, default_value = "text")]
    format: OutputFormat,

    /// Pattern to ignore (regex)
    #[arg(long)]
    ignore_pattern: Vec<String>,

    /// Personal dictionary file
    #[arg(long)]
    personal_dict: Option<PathBuf>,

    /// Generate shell completion script
    #[arg(long, value_name = "SHELL")]
    completion: Option<Shell>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Parser, Debug)]
enum Commands {
    /// Dictionary management
    Dict {
        #[command(subcommand)]
        action: DictCommands,
    },
}

#[derive(Parser, Debug)]
enum DictCommands {
    /// Convert a word list into a saved dictionary tree
    Convert {
        /// Word list, one word per line
        source: PathBuf,
        /// Output dictionary file
        dest: PathBuf,
        /// Build a complete tree of minimal depth
        #[arg(long)]
        balanced: bool,
    },
    /// Show dictionary info
    Info {
        /// Dictionary file
        path: PathBuf,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Handle shell completion generation
    if let Some(shell) = cli.completion {
        let mut cmd = Cli::command();
        generate(shell, &mut cmd, "spelltree", &mut io::stdout());
        return Ok(());
    }

    // Handle subcommands
    if let Some(command) = cli.command {
        return handle_command(command);
    }

    // Load configuration
    let config = Config::load(
        cli.dictionary.clone(),
        cli.personal_dict.clone(),
        cli.ignore_pattern.clone(),
        cli.balanced,
    )?;

    // Validate input files
    if cli.files.is_empty() {
        anyhow::bail!("No files specified. Use --help for usage information.");
    }

    let strategy = if config.balanced_import {
        ImportStrategy::Balanced
    } else {
        ImportStrategy::Sequential
    };

    // Compile ignore patterns
    let mut ignore_patterns = Vec::new();
    for pattern in &config.ignore_patterns {
        match Regex::new(pattern) {
            Ok(re) => ignore_patterns.push(re),
            Err(e) => eprintln!("Warning: Invalid regex pattern '{}': {}", pattern, e),
        }
    }

    // Process files
    let mut total_unknown = 0;
    let mut total_fixed = 0;

    for file_path in &cli.files {
        if !file_path.exists() {
            eprintln!("Error: File not found: {}", file_path.display());
            continue;
        }

        let result = if cli.interactive {
            fix_file_interactive(file_path, &config, strategy, &ignore_patterns, !cli.no_color)?
        } else {
            check_file(
                file_path,
                &config,
                strategy,
                &ignore_patterns,
                !cli.no_color,
                &cli.format,
            )?
        };

        total_unknown += result.unknown_count;
        total_fixed += result.fixed_count;
    }

    // Print summary
    if cli.interactive {
        output::print_fix_summary(total_fixed, &cli.files, !cli.no_color);
    } else {
        output::print_check_summary(total_unknown, &cli.files, !cli.no_color);
    }

    // Exit with appropriate code
    if total_unknown > 0 && !cli.no_fail && !cli.interactive {
        std::process::exit(1);
    }

    Ok(())
}

fn handle_command(command: Commands) -> Result<()> {
    match command {
        Commands::Dict { action } => match action {
            DictCommands::Convert {
                source,
                dest,
                balanced,
            } => {
                let strategy = if balanced {
                    ImportStrategy::Balanced
                } else {
                    ImportStrategy::Sequential
                };
                dict::manager::convert(&source, &dest, strategy)?;
            }
            DictCommands::Info { path } => {
                dict::manager::show_info(&path)?;
            }
        },
    }
    Ok(())
}

/// Build a checker with the configured dictionary and personal words.
fn new_checker(config: &Config, strategy: ImportStrategy) -> Result<SpellChecker> {
    let dict_path = config.dictionary.as_ref().ok_or_else(|| {
        anyhow::anyhow!("No dictionary specified. Pass --dictionary or set one in .spelltree.toml.")
    })?;

    let mut checker = SpellChecker::new();
    checker
        .import_dictionary(dict_path, strategy)
        .with_context(|| format!("Failed to import dictionary: {}", dict_path.display()))?;

    if let Some(personal_dict_path) = &config.personal_dictionary {
        if personal_dict_path.exists() {
            let content = fs::read_to_string(personal_dict_path)
                .context("Failed to read personal dictionary")?;
            for line in content.lines() {
                let word = line.trim();
                if !word.is_empty() && !word.starts_with('#') {
                    checker.add_word_to_dictionary(word);
                }
            }
        }
    }

    Ok(checker)
}

fn check_file(
    file_path: &Path,
    config: &Config,
    strategy: ImportStrategy,
    ignore_patterns: &[Regex],
    colored: bool,
    format: &OutputFormat,
) -> Result<CheckResult> {
    let mut checker = new_checker(config, strategy)?;
    checker
        .load_document(file_path)
        .with_context(|| format!("Failed to read file: {}", file_path.display()))?;

    let mut reports = Vec::new();
    let mut continue_search = false;
    while let Some(report) = checker.spell_check(continue_search) {
        continue_search = true;
        if should_ignore(&report.word, ignore_patterns) {
            continue;
        }
        reports.push(report);
    }

    let result = CheckResult {
        unknown_count: reports.len(),
        fixed_count: 0,
        reports,
    };

    output::print_reports(file_path, &result, colored, format);

    Ok(result)
}

fn fix_file_interactive(
    file_path: &Path,
    config: &Config,
    strategy: ImportStrategy,
    ignore_patterns: &[Regex],
    colored: bool,
) -> Result<CheckResult> {
    let mut checker = new_checker(config, strategy)?;
    checker
        .load_document(file_path)
        .with_context(|| format!("Failed to read file: {}", file_path.display()))?;

    let mut fixed_count = 0;
    let mut words_to_add = Vec::new();
    let mut continue_search = false;

    while let Some(report) = checker.spell_check(continue_search) {
        continue_search = true;
        if should_ignore(&report.word, ignore_patterns) {
            continue;
        }

        match output::print_interactive_prompt(&report, colored) {
            PromptAction::Skip => {}
            PromptAction::Replace(replacement) => {
                let end = report.offset + report.word.chars().count();
                checker.replace_text(report.offset, end, &replacement)?;
                fixed_count += 1;
            }
            PromptAction::Add => {
                checker.add_word_to_dictionary(&report.word);
                words_to_add.push(report.word.to_ascii_lowercase());
            }
            PromptAction::Quit => break,
        }
    }

    // Write back to file
    if fixed_count > 0 {
        checker
            .save_document(file_path)
            .with_context(|| format!("Failed to write file: {}", file_path.display()))?;
    }

    // Add words to personal dictionary
    if !words_to_add.is_empty() {
        if let Some(personal_dict_path) = &config.personal_dictionary {
            let mut dict_content = if personal_dict_path.exists() {
                fs::read_to_string(personal_dict_path)?
            } else {
                String::new()
            };

            for word in words_to_add {
                dict_content.push_str(&format!("{}\n", word));
            }

            fs::write(personal_dict_path, dict_content)?;
        }
    }

    Ok(CheckResult {
        unknown_count: 0,
        fixed_count,
        reports: Vec::new(),
    })
}

fn should_ignore(word: &str, ignore_patterns: &[Regex]) -> bool {
    // Skip single characters
    if word.len() <= 1 {
        return true;
    }

    ignore_patterns.iter().any(|pattern| pattern.is_match(word))
}
