use anyhow::{Context, Result};
use colored::*;
use std::fs;
use std::path::Path;

use crate::checker::dictionary::{Dictionary, ImportStrategy};

/// Convert a one-word-per-line list into a saved tree file.
pub fn convert(source: &Path, dest: &Path, strategy: ImportStrategy) -> Result<()> {
    let strategy_name = match strategy {
        ImportStrategy::Sequential => "sequential",
        ImportStrategy::Balanced => "balanced",
    };
    println!(
        "{} {} ({} import)...",
        "Importing".cyan().bold(),
        source.display(),
        strategy_name
    );

    let mut dictionary = Dictionary::new();
    dictionary
        .import_file(source, strategy)
        .with_context(|| format!("Failed to import word list: {}", source.display()))?;

    println!(
        "Found {} words, tree depth {}",
        dictionary.len().to_string().yellow(),
        dictionary.depth().to_string().yellow()
    );

    dictionary
        .save(dest)
        .with_context(|| format!("Failed to write dictionary: {}", dest.display()))?;

    println!(
        "{} Dictionary written: {}",
        "✓".green().bold(),
        dest.display().to_string().cyan()
    );

    Ok(())
}

/// Report a saved dictionary's size, word count, and tree depth.
pub fn show_info(path: &Path) -> Result<()> {
    if !path.exists() {
        println!(
            "{} Dictionary {} not found.",
            "✗".red().bold(),
            path.display().to_string().yellow()
        );
        return Ok(());
    }

    let metadata = fs::metadata(path)
        .with_context(|| format!("Failed to read metadata: {}", path.display()))?;

    let mut dictionary = Dictionary::new();
    dictionary
        .load(path)
        .with_context(|| format!("Failed to load dictionary: {}", path.display()))?;

    println!("{}", format!("Dictionary: {}", path.display()).bold());
    println!("  Size: {} KB", metadata.len() / 1024);
    println!("  Words: {}", dictionary.len());
    println!("  Tree depth: {}", dictionary.depth());
    println!("  Format: pre-order word list");

    Ok(())
}
