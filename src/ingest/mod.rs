//! Shared ingestion plumbing: core buffer capacity estimation/growth and
//! the per-genome signature finalizer used by every ingester.

pub mod fasta;
pub mod fastq;
pub mod load;

use crate::types::{SignatureType, SimpleCore};

/// FASTA capacity-estimation constant.
pub const MAGIC_FA: f64 = 2.20;
/// FASTQ capacity-estimation constant.
pub const MAGIC_FQ: f64 = 2.00;
/// Growth factor applied when the core buffer needs to reallocate beyond
/// its initial reservation.
pub const GROW_FACTOR: f64 = 1.5;

/// Estimate initial core-buffer capacity for a FASTA input of `file_size`
/// bytes at the given LCP level: `file_size / MAGIC_FA^level`.
pub fn estimate_fa_capacity(file_size: u64, level: u32) -> usize {
    let estimate = file_size as f64 / MAGIC_FA.powi(level as i32);
    estimate.max(1.0) as usize
}

/// Estimate initial core-buffer capacity for a (possibly gzipped) FASTQ
/// input at the given LCP level. Uncompressed size is estimated as
/// `4 * compressed_size` when `is_gzipped`.
pub fn estimate_fq_capacity(file_size: u64, is_gzipped: bool, level: u32) -> usize {
    let uncompressed = if is_gzipped {
        file_size as f64 * 4.0
    } else {
        file_size as f64
    };
    let estimate = (uncompressed / 2.0) / MAGIC_FQ.powi(level as i32);
    estimate.max(1.0) as usize
}

/// Grow a capacity by [`GROW_FACTOR`], guaranteeing forward progress even
/// when `capacity` is 0 or 1.
pub fn grow_capacity(capacity: usize) -> usize {
    let grown = (capacity as f64 * GROW_FACTOR) as usize;
    grown.max(capacity + 1)
}

/// Append a core to a genome's core buffer, reserving room at
/// [`GROW_FACTOR`] ahead of need whenever the buffer is about to grow past
/// its current capacity, rather than leaving the growth strategy to
/// `Vec`'s own (roughly-doubling) default.
pub fn push_core(cores: &mut Vec<SimpleCore>, core: SimpleCore) {
    if cores.len() == cores.capacity() {
        let target = grow_capacity(cores.capacity());
        cores.reserve_exact(target - cores.len());
    }
    cores.push(core);
}

/// Sort, filter, and (for SET mode) deduplicate a genome's cores in place,
/// returning the `total_len` field: the sum of the `length` component
/// over the distinct retained values.
///
/// Filtering happens before deduplication so VECTOR mode preserves the
/// original multiplicities of kept runs.
pub fn finalize_signature(
    cores: &mut Vec<SimpleCore>,
    min_cc: u32,
    max_cc: u32,
    kind: SignatureType,
) -> u64 {
    cores.sort_unstable();

    if kind == SignatureType::Vector && min_cc <= 1 && max_cc == u32::MAX {
        let total_len: u64 = cores.iter().map(|c| c.length() as u64).sum();
        cores.shrink_to_fit();
        return total_len;
    }

    let mut retained: Vec<SimpleCore> = Vec::with_capacity(cores.len());
    let mut total_len: u64 = 0;

    let mut i = 0;
    while i < cores.len() {
        let mut j = i + 1;
        while j < cores.len() && cores[j] == cores[i] {
            j += 1;
        }
        let run_len = (j - i) as u32;

        if run_len >= min_cc && run_len <= max_cc {
            total_len += cores[i].length() as u64;
            match kind {
                SignatureType::Set => retained.push(cores[i]),
                SignatureType::Vector => retained.extend(std::iter::repeat(cores[i]).take(j - i)),
            }
        }

        i = j;
    }

    *cores = retained;
    cores.shrink_to_fit();
    total_len
}
