use std::fs;
use std::io::{self, Write};
use std::path::Path;

use aba_cli::batch::Batch;
use aba_core::{AbaError, AbaFile, AbaRecord, GeneratorOptions, LineEnding, Parser};
use anyhow::{Context, Result};
use tracing::{info, info_span};

use crate::cli::{GenerateArgs, InspectArgs, ValidateArgs};
use crate::types::{AttributeView, GenerateResult, LineIssue, RecordView};

pub fn run_generate(args: &GenerateArgs) -> Result<GenerateResult> {
    let span = info_span!("generate", batch = %args.batch.display());
    let _guard = span.enter();

    let batch = Batch::load(&args.batch)?;
    let line_ending = if args.crlf {
        LineEnding::CrLf
    } else {
        LineEnding::Lf
    };
    let options = GeneratorOptions::default()
        .with_line_ending(line_ending)
        .with_trailing_line_ending(args.trailing_newline);
    let generator = batch
        .into_generator(options)
        .with_context(|| format!("build records from {}", args.batch.display()))?;

    let contents = match generator.contents() {
        Ok(contents) => contents,
        Err(AbaError::ValidationFailed(errors)) => return Ok(GenerateResult::Invalid(errors)),
        Err(AbaError::LengthMismatches(mismatches)) => {
            return Ok(GenerateResult::Overflow(mismatches));
        }
        Err(error) => return Err(error).context("generate ABA content"),
    };
    let lines = generator.transactions().len() + 1 + usize::from(generator.file_total().is_some());

    match &args.output {
        Some(path) => {
            fs::write(path, &contents).with_context(|| format!("write {}", path.display()))?;
            info!(path = %path.display(), lines, "wrote ABA file");
        }
        None => {
            let mut stdout = io::stdout().lock();
            stdout
                .write_all(contents.as_bytes())
                .and_then(|()| stdout.flush())
                .context("write ABA content to stdout")?;
        }
    }

    Ok(GenerateResult::Written {
        output: args.output.clone(),
        lines,
    })
}

pub fn run_inspect(args: &InspectArgs) -> Result<Vec<RecordView>> {
    let parser = read_file(&args.file)?;
    let records = parser
        .records()
        .with_context(|| format!("decode {}", args.file.display()))?;
    info!(records = records.len(), "decoded ABA file");
    Ok(record_views(&records))
}

pub fn run_validate(args: &ValidateArgs) -> Result<Vec<LineIssue>> {
    let parser = read_file(&args.file)?;
    let file = parser
        .parse_file()
        .with_context(|| format!("decode {}", args.file.display()))?;
    let issues = line_issues(file);
    info!(issues = issues.len(), "validated ABA file");
    Ok(issues)
}

fn read_file(path: &Path) -> Result<Parser> {
    let contents =
        fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    Ok(Parser::new(contents))
}

fn record_views(records: &[AbaRecord]) -> Vec<RecordView> {
    records
        .iter()
        .enumerate()
        .map(|(idx, record)| RecordView {
            line: idx + 1,
            record_type: record.record_type(),
            attributes: record
                .attributes()
                .into_iter()
                .map(|(name, value)| AttributeView {
                    name,
                    value: value.to_string(),
                })
                .collect(),
        })
        .collect()
}

fn line_issues(file: AbaFile) -> Vec<LineIssue> {
    file.into_records()
        .into_iter()
        .enumerate()
        .flat_map(|(idx, record)| {
            let record_type = record.record_type();
            record.validate().into_iter().map(move |error| LineIssue {
                line: idx + 1,
                record_type,
                error,
            })
        })
        .collect()
}
