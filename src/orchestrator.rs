//! Orchestrator.
//!
//! Parses the file-list options into `ProgramArgs`/`Vec<GenomeArgs>`,
//! drives the worker pool, then invokes the distance engine and matrix
//! writer.

use std::fs;
use std::sync::Arc;

use crate::args::{Cli, CommonArgs};
use crate::config::{fit_short_name, GenomeArgs, ProgramArgs};
use crate::distance::{pairwise_distances, Signature};
use crate::error::GencoreError;
use crate::ingest::finalize_signature;
use crate::lcp::LcpParse;
use crate::logging::Logger;
use crate::matrix::{matrix_filename, write_matrix};
use crate::pool::run_pool;
use crate::types::Mode;

/// Read a list file's non-empty lines, one entry per line.
fn read_list(path: &std::path::Path) -> Result<Vec<String>, GencoreError> {
    let contents = fs::read_to_string(path)?;
    Ok(contents
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .map(str::to_string)
        .collect())
}

fn parse_per_genome_u32(
    file: &Option<std::path::PathBuf>,
    what: &'static str,
    count: usize,
) -> Result<Option<Vec<u32>>, GencoreError> {
    let Some(path) = file else { return Ok(None) };
    let lines = read_list(path)?;
    if lines.len() != count {
        return Err(GencoreError::ListLengthMismatch {
            what,
            inputs: count,
            other: lines.len(),
        });
    }
    let mut values = Vec::with_capacity(lines.len());
    for line in &lines {
        let value: u32 = line
            .parse()
            .map_err(|_| GencoreError::Cli(format!("invalid {what} value: {line}")))?;
        if value == 0 {
            return Err(GencoreError::Cli(format!(
                "{what} must be greater than 0, got {line}"
            )));
        }
        values.push(value);
    }
    Ok(Some(values))
}

/// Build `(ProgramArgs, Vec<GenomeArgs>)` from the parsed CLI, validating
/// list lengths and the minimum-genome-count invariant.
fn build_args(mode: Mode, common: &CommonArgs) -> Result<(ProgramArgs, Vec<GenomeArgs>), GencoreError> {
    let inputs = read_list(&common.input_list)?;
    if inputs.len() < 2 {
        return Err(GencoreError::TooFewGenomes(inputs.len()));
    }

    let pargs = ProgramArgs {
        mode,
        thread_number: common.thread_number.max(1),
        prefix: common.prefix.clone(),
        number_of_genomes: inputs.len(),
        lcp_level: common.lcp_level,
        sig_type: common.sig_type(),
        verbose: common.verbose,
    };

    let outputs = match &common.output_list {
        Some(path) => {
            let outputs = read_list(path)?;
            if outputs.len() != inputs.len() {
                return Err(GencoreError::ListLengthMismatch {
                    what: "output",
                    inputs: inputs.len(),
                    other: outputs.len(),
                });
            }
            Some(outputs)
        }
        None => None,
    };

    let short_names = match &common.short_name_list {
        Some(path) => {
            let names = read_list(path)?;
            if names.len() != inputs.len() {
                return Err(GencoreError::ListLengthMismatch {
                    what: "short-name",
                    inputs: inputs.len(),
                    other: names.len(),
                });
            }
            Some(names)
        }
        None => None,
    };

    let min_cc_overrides = parse_per_genome_u32(&common.min_cc_file, "min-cc", inputs.len())?;
    let max_cc_overrides = parse_per_genome_u32(&common.max_cc_file, "max-cc", inputs.len())?;

    let mut genomes = Vec::with_capacity(inputs.len());
    for (idx, in_path) in inputs.into_iter().enumerate() {
        let mut genome = GenomeArgs::new(in_path, &pargs);

        if let Some(names) = &short_names {
            genome.short_name = fit_short_name(&names[idx]);
        }
        if let Some(path) = &outputs {
            genome.out_path = Some(path[idx].clone());
            genome.write_archive = true;
        }
        if let Some(value) = &common.min_cc {
            if *value == 0 {
                return Err(GencoreError::Cli(format!("min-cc must be greater than 0, got {value}")));
            }
            genome.min_cc = *value;
        }
        if let Some(value) = &common.max_cc {
            if *value == 0 {
                return Err(GencoreError::Cli(format!("max-cc must be greater than 0, got {value}")));
            }
            genome.max_cc = *value;
        }
        if let Some(overrides) = &min_cc_overrides {
            genome.min_cc = overrides[idx];
        }
        if let Some(overrides) = &max_cc_overrides {
            genome.max_cc = overrides[idx];
        }

        genomes.push(genome);
    }

    Ok((pargs, genomes))
}

fn log_genome_summary(logger: &Logger, genome: &GenomeArgs) {
    logger.verbose(format!(
        "{}: cores={} min_cc={} max_cc={}",
        genome.in_path, genome.core_count, genome.min_cc, genome.max_cc
    ));
}

/// Run the full pipeline for the parsed CLI invocation, returning the
/// process exit code (0 success, 1 fatal).
pub fn run<L: LcpParse + Send>(cli: Cli) -> i32 {
    let mode = cli.mode.mode();
    let common = cli.mode.common();
    let logger = Arc::new(Logger::new(common.verbose));

    if mode == Mode::Bam {
        logger.error(GencoreError::BamNotSupported.to_string());
        return 1;
    }

    let (pargs, mut genomes) = match build_args(mode, common) {
        Ok(built) => built,
        Err(e) => {
            logger.error(e.to_string());
            return 1;
        }
    };

    run_pool::<L>(&pargs, &mut genomes, &logger);

    let mut short_names = Vec::with_capacity(genomes.len());
    let mut signatures = Vec::with_capacity(genomes.len());
    for genome in &mut genomes {
        let total_len = finalize_signature(&mut genome.cores, genome.min_cc, genome.max_cc, genome.sig_type);
        genome.core_count = genome.cores.len() as u64;
        genome.total_len = total_len as f64;
        log_genome_summary(&logger, genome);

        short_names.push(genome.short_name.clone());
        signatures.push(Signature {
            cores: genome.cores.clone(),
            total_len: genome.total_len,
            kind: genome.sig_type,
        });
    }

    let matrices = pairwise_distances(&signatures);
    let kind = pargs.sig_type.to_string();

    let outcomes = [
        (matrix_filename(&pargs.prefix, &kind, "jaccard", pargs.lcp_level), &matrices.jaccard),
        (matrix_filename(&pargs.prefix, &kind, "dice", pargs.lcp_level), &matrices.dice),
        (matrix_filename(&pargs.prefix, &kind, "jc", pargs.lcp_level), &matrices.jc),
    ];

    for (path, matrix) in outcomes {
        if let Err(e) = write_matrix(&path, &short_names, matrix) {
            logger.error(format!("failed to write {path}: {e}"));
            return 1;
        }
    }

    0
}
