//! Process-wide and per-genome configuration.
//!
//! `ProgramArgs` holds the process-wide configuration, immutable after
//! parsing; `GenomeArgs` is the per-genome descriptor, owned exclusively
//! by its assigned worker until the pool joins.

use crate::types::{Mode, SignatureType, SimpleCore};

/// Default LCP level (`-l`).
pub const DEFAULT_LCP_LEVEL: u32 = 4;

/// Default worker thread count (`-t`).
pub const DEFAULT_THREAD_NUMBER: usize = 8;

/// Default matrix filename prefix (`-p`).
pub const DEFAULT_PREFIX: &str = "gc";

/// Default `min_cc` for FASTA mode.
pub const DEFAULT_MIN_CC_FA: u32 = 0;
/// Default `max_cc` for FASTA mode.
pub const DEFAULT_MAX_CC_FA: u32 = u32::MAX;
/// Default `min_cc` for FASTQ mode.
pub const DEFAULT_MIN_CC_FQ: u32 = 15;
/// Default `max_cc` for FASTQ mode.
pub const DEFAULT_MAX_CC_FQ: u32 = 256;

/// The width of a short name, in characters.
pub const SHORT_NAME_WIDTH: usize = 10;

/// Process-wide configuration, immutable after argument parsing.
#[derive(Debug, Clone)]
pub struct ProgramArgs {
    pub mode: Mode,
    pub thread_number: usize,
    pub prefix: String,
    pub number_of_genomes: usize,
    pub lcp_level: u32,
    pub sig_type: SignatureType,
    pub verbose: bool,
}

impl Default for ProgramArgs {
    fn default() -> Self {
        ProgramArgs {
            mode: Mode::Fa,
            thread_number: DEFAULT_THREAD_NUMBER,
            prefix: DEFAULT_PREFIX.to_string(),
            number_of_genomes: 0,
            lcp_level: DEFAULT_LCP_LEVEL,
            sig_type: SignatureType::Set,
            verbose: false,
        }
    }
}

/// Per-genome descriptor, populated exclusively by its assigned worker.
#[derive(Debug, Clone)]
pub struct GenomeArgs {
    pub in_path: String,
    pub out_path: Option<String>,
    /// Exactly `SHORT_NAME_WIDTH` characters, space-padded or truncated.
    pub short_name: String,
    pub min_cc: u32,
    pub max_cc: u32,
    pub lcp_level: u32,
    pub mode: Mode,
    pub sig_type: SignatureType,
    pub write_archive: bool,
    pub verbose: bool,

    /// Populated by the assigned worker; empty until the ingester runs.
    pub cores: Vec<SimpleCore>,
    pub core_count: u64,
    pub total_len: f64,
}

impl GenomeArgs {
    pub fn new(in_path: String, program_args: &ProgramArgs) -> Self {
        let (min_cc, max_cc) = match program_args.mode {
            Mode::Fq => (DEFAULT_MIN_CC_FQ, DEFAULT_MAX_CC_FQ),
            _ => (DEFAULT_MIN_CC_FA, DEFAULT_MAX_CC_FA),
        };

        GenomeArgs {
            short_name: fit_short_name(&in_path),
            in_path,
            out_path: None,
            min_cc,
            max_cc,
            lcp_level: program_args.lcp_level,
            mode: program_args.mode,
            sig_type: program_args.sig_type,
            write_archive: false,
            verbose: program_args.verbose,
            cores: Vec::new(),
            core_count: 0,
            total_len: 0.0,
        }
    }
}

/// Fit a short name to [`SHORT_NAME_WIDTH`] characters: truncate if
/// longer, space-pad if shorter.
pub fn fit_short_name(name: &str) -> String {
    if name.chars().count() > SHORT_NAME_WIDTH {
        name.chars().take(SHORT_NAME_WIDTH).collect()
    } else {
        format!("{name:<width$}", width = SHORT_NAME_WIDTH)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fit_short_name_pads() {
        let name = fit_short_name("abc");
        assert_eq!(name.chars().count(), SHORT_NAME_WIDTH);
        assert_eq!(name, "abc       ");
    }

    #[test]
    fn test_fit_short_name_truncates() {
        let name = fit_short_name("this_name_is_too_long");
        assert_eq!(name.chars().count(), SHORT_NAME_WIDTH);
        assert_eq!(name, "this_name_");
    }

    #[test]
    fn test_fit_short_name_exact() {
        let name = fit_short_name("exactlyten");
        assert_eq!(name, "exactlyten");
    }

    #[test]
    fn test_default_program_args() {
        let args = ProgramArgs::default();
        assert_eq!(args.mode, Mode::Fa);
        assert_eq!(args.thread_number, DEFAULT_THREAD_NUMBER);
        assert_eq!(args.prefix, "gc");
        assert_eq!(args.lcp_level, DEFAULT_LCP_LEVEL);
    }

    #[test]
    fn test_genome_args_defaults_by_mode() {
        let mut pargs = ProgramArgs::default();
        pargs.mode = Mode::Fq;
        let g = GenomeArgs::new("reads.fq".to_string(), &pargs);
        assert_eq!(g.min_cc, DEFAULT_MIN_CC_FQ);
        assert_eq!(g.max_cc, DEFAULT_MAX_CC_FQ);

        pargs.mode = Mode::Fa;
        let g = GenomeArgs::new("genome.fa".to_string(), &pargs);
        assert_eq!(g.min_cc, DEFAULT_MIN_CC_FA);
        assert_eq!(g.max_cc, DEFAULT_MAX_CC_FA);
    }
}
