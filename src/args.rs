//! CLI surface: `fa`/`fq`/`ld` (plus a recognized-but-unimplemented `bam`
//! stub) subcommands, each sharing a common set of options.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::config::{DEFAULT_LCP_LEVEL, DEFAULT_PREFIX, DEFAULT_THREAD_NUMBER};
use crate::types::{Mode, SignatureType};

/// LCP-based genome core extraction and pairwise distance matrices.
#[derive(Parser, Debug)]
#[command(name = "gencore")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub mode: ModeArgs,
}

#[derive(Subcommand, Debug)]
pub enum ModeArgs {
    /// Ingest assembled genomes (FASTA contigs).
    Fa(CommonArgs),
    /// Ingest (optionally gzipped) read sets (FASTQ), forward + reverse complement.
    Fq(CommonArgs),
    /// Re-read previously serialized core archives.
    Ld(CommonArgs),
    /// Recognized but unimplemented.
    Bam(CommonArgs),
}

impl ModeArgs {
    pub fn mode(&self) -> Mode {
        match self {
            ModeArgs::Fa(_) => Mode::Fa,
            ModeArgs::Fq(_) => Mode::Fq,
            ModeArgs::Ld(_) => Mode::Load,
            ModeArgs::Bam(_) => Mode::Bam,
        }
    }

    pub fn common(&self) -> &CommonArgs {
        match self {
            ModeArgs::Fa(c) | ModeArgs::Fq(c) | ModeArgs::Ld(c) | ModeArgs::Bam(c) => c,
        }
    }
}

#[derive(Args, Debug)]
pub struct CommonArgs {
    /// List of input file paths, one per line (required).
    #[arg(short = 'i', long = "input-list")]
    pub input_list: PathBuf,

    /// LCP level.
    #[arg(short = 'l', long = "level", default_value_t = DEFAULT_LCP_LEVEL)]
    pub lcp_level: u32,

    /// Worker thread count.
    #[arg(short = 't', long = "threads", default_value_t = DEFAULT_THREAD_NUMBER)]
    pub thread_number: usize,

    /// Minimum run length kept (default: fa=0, fq=15).
    #[arg(long = "min-cc")]
    pub min_cc: Option<u32>,

    /// Maximum run length kept (default: fa=UINT32_MAX, fq=256).
    #[arg(long = "max-cc")]
    pub max_cc: Option<u32>,

    /// Per-genome min-cc, one per line; overrides `--min-cc`.
    #[arg(long = "min-cc-file")]
    pub min_cc_file: Option<PathBuf>,

    /// Per-genome max-cc, one per line; overrides `--max-cc`.
    #[arg(long = "max-cc-file")]
    pub max_cc_file: Option<PathBuf>,

    /// Signature semantics: distinct cores (default).
    #[arg(long = "set", conflicts_with = "vec_mode")]
    pub set_mode: bool,

    /// Signature semantics: multiset, preserving multiplicities.
    #[arg(long = "vec")]
    pub vec_mode: bool,

    /// List of output archive paths, one per line; enables archiving.
    #[arg(short = 'o', long = "output-list")]
    pub output_list: Option<PathBuf>,

    /// Matrix-file prefix.
    #[arg(short = 'p', long = "prefix", default_value = DEFAULT_PREFIX)]
    pub prefix: String,

    /// List of 10-char short names, one per line (default: input basename, truncated/padded).
    #[arg(short = 's', long = "short-name-list")]
    pub short_name_list: Option<PathBuf>,

    /// Verbose logging.
    #[arg(short = 'v', long = "verbose")]
    pub verbose: bool,
}

impl CommonArgs {
    pub fn sig_type(&self) -> SignatureType {
        if self.vec_mode {
            SignatureType::Vector
        } else {
            SignatureType::Set
        }
    }
}
