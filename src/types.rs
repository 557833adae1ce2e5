//! Core data structures for gencore.
//!
//! This module contains the fundamental types used throughout the LCP
//! core-extraction and genome comparison pipeline.

use std::fmt;
use std::str::FromStr;

/// A single LCP core: an LCP `label` (upper 32 bits) packed with the
/// `length` of the source substring (lower 32 bits).
///
/// Ordering is numeric on the whole 64-bit value, which means cores are
/// primarily ordered by label and, for equal labels, by length. This is
/// exactly the ordering the signature finalizer and distance engine rely
/// on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SimpleCore(pub u64);

impl SimpleCore {
    /// Pack an LCP label and a source-substring length into one core.
    pub fn pack(label: u32, length: u32) -> Self {
        SimpleCore(((label as u64) << 32) | (length as u64))
    }

    /// The LCP label (upper 32 bits).
    pub fn label(&self) -> u32 {
        (self.0 >> 32) as u32
    }

    /// The source-substring length (lower 32 bits).
    pub fn length(&self) -> u32 {
        (self.0 & 0xFFFF_FFFF) as u32
    }
}

impl fmt::Display for SimpleCore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.label(), self.length())
    }
}

/// Program mode, selecting which ingester is used.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Mode {
    /// FASTA contigs.
    Fa,
    /// (Optionally gzipped) FASTQ reads, forward and reverse-complement.
    Fq,
    /// Previously serialized core archive.
    Load,
    /// Recognized but unimplemented.
    Bam,
}

/// Error type for parsing a program mode from string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseModeError;

impl fmt::Display for ParseModeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid mode: expected 'fa', 'fq', 'ld', or 'bam'")
    }
}

impl std::error::Error for ParseModeError {}

impl FromStr for Mode {
    type Err = ParseModeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "fa" => Ok(Mode::Fa),
            "fq" => Ok(Mode::Fq),
            "ld" => Ok(Mode::Load),
            "bam" => Ok(Mode::Bam),
            _ => Err(ParseModeError),
        }
    }
}

impl Mode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Mode::Fa => "FA",
            Mode::Fq => "FQ",
            Mode::Load => "LOAD",
            Mode::Bam => "BAM",
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Signature semantics: SET (distinct cores) or VECTOR (multiset).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SignatureType {
    Set,
    Vector,
}

impl fmt::Display for SignatureType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SignatureType::Set => write!(f, "set"),
            SignatureType::Vector => write!(f, "vec"),
        }
    }
}

/// Log severity, matching the original `LogLevel` enum (INFO, WARN, ERROR).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    Info,
    Warn,
    Error,
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LogLevel::Info => write!(f, "INFO"),
            LogLevel::Warn => write!(f, "WARN"),
            LogLevel::Error => write!(f, "ERROR"),
        }
    }
}
