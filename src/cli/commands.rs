//! CLI command implementations.
//!
//! Contains the business logic for each CLI command.

use crate::cli::output::{
    CleanResult, OutputFormat, format_chunks, format_clean_results, with_trailing_newline,
};
use crate::cli::parser::{Cli, Commands};
use crate::core::{PipelineConfig, RevealOptions};
use crate::error::Result;
use crate::io::read_input;
use crate::payload::repair_completion_str;
use crate::pipeline::{Pipeline, Stage};
use crate::reveal::{RevealSplitter, schedule};

/// Executes the CLI command.
///
/// # Arguments
///
/// * `cli` - Parsed CLI arguments.
///
/// # Returns
///
/// Result with output string on success.
///
/// # Errors
///
/// Returns an error if the command fails to execute.
pub fn execute(cli: &Cli) -> Result<String> {
    let format = OutputFormat::parse(&cli.format)?;

    match &cli.command {
        Commands::Clean {
            files,
            stage,
            doubled_letters,
            schemes,
        } => cmd_clean(
            files,
            stage,
            doubled_letters.as_deref(),
            schemes.as_deref(),
            cli.verbose,
            format,
        ),
        Commands::Chunks {
            file,
            min_chunk,
            speed,
            delay,
        } => cmd_chunks(file.as_deref(), *min_chunk, *speed, *delay, format),
        Commands::Payload { file } => cmd_payload(file.as_deref(), format),
    }
}

/// Builds a pipeline configuration from CLI overrides.
fn build_config(
    doubled_letters: Option<&str>,
    schemes: Option<&str>,
    min_chunk: Option<usize>,
) -> Result<PipelineConfig> {
    let mut config = PipelineConfig::new();

    if let Some(letters) = doubled_letters {
        config = config.with_doubled_letters(letters);
    }

    if let Some(schemes) = schemes {
        let schemes: Vec<&str> = schemes
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .collect();
        config = config.with_url_schemes(&schemes);
    }

    if let Some(min_chunk) = min_chunk {
        config = config.with_min_chunk_len(min_chunk);
    }

    config.validate()?;
    Ok(config)
}

/// Maps `"-"` to the stdin label for output headers.
fn source_label(path: &str) -> String {
    if path == "-" {
        "<stdin>".to_string()
    } else {
        path.to_string()
    }
}

// ==================== Command Implementations ====================

fn cmd_clean(
    files: &[String],
    stage_name: &str,
    doubled_letters: Option<&str>,
    schemes: Option<&str>,
    verbose: bool,
    format: OutputFormat,
) -> Result<String> {
    let stage = Stage::parse(stage_name)?;
    let config = build_config(doubled_letters, schemes, None)?;
    let pipeline = Pipeline::new(config);

    let mut sources = Vec::new();
    let mut texts = Vec::new();
    if files.is_empty() {
        sources.push("<stdin>".to_string());
        texts.push(read_input(None)?);
    } else {
        for file in files {
            sources.push(source_label(file));
            texts.push(read_input(Some(file))?);
        }
    }

    let outputs = if stage == Stage::All {
        pipeline.clean_batch(&texts)
    } else {
        texts
            .iter()
            .map(|text| pipeline.apply(stage, text))
            .collect()
    };

    let results: Vec<CleanResult> = sources
        .into_iter()
        .zip(texts.iter())
        .zip(outputs)
        .map(|((source, input), text)| CleanResult {
            source,
            stage: stage.name().to_string(),
            input_bytes: input.len(),
            output_bytes: text.len(),
            text,
        })
        .collect();

    Ok(format_clean_results(&results, verbose, format))
}

fn cmd_chunks(
    file: Option<&str>,
    min_chunk: usize,
    speed: u64,
    delay: u64,
    format: OutputFormat,
) -> Result<String> {
    let config = build_config(None, None, Some(min_chunk))?;
    let pipeline = Pipeline::new(config);

    let raw = read_input(file)?;
    let clean = pipeline.clean(&raw);

    let splitter = RevealSplitter::from_config(pipeline.config());
    let chunks = splitter.split(&clean);
    let options = RevealOptions::new()
        .with_speed_ms(speed)
        .with_delay_ms(delay);
    let steps = schedule(&chunks, options);

    Ok(format_chunks(&chunks, &steps, format))
}

fn cmd_payload(file: Option<&str>, _format: OutputFormat) -> Result<String> {
    // The repaired document is itself JSON, so both formats print it as-is
    let json = read_input(file)?;
    let repaired = repair_completion_str(&json, &Pipeline::default())?;
    Ok(with_trailing_newline(&repaired))
}
