//! Archive loader (`ld` mode).
//!
//! Re-reads a previously serialized core archive, re-deepening each parse
//! to the currently requested LCP level. This lets a caller re-run the
//! distance computation at a different level without re-reading the raw
//! FASTA/FASTQ inputs.

use std::fs::File;

use crate::archive::{ArchiveReader, ArchiveWriter};
use crate::config::GenomeArgs;
use crate::error::GenomeError;
use crate::ingest::push_core;
use crate::lcp::LcpParse;
use crate::logging::Logger;
use crate::types::SimpleCore;

pub fn ingest_load<L: LcpParse>(genome: &mut GenomeArgs, logger: &Logger) -> Result<(), GenomeError> {
    logger.verbose(format!("started loading archive {}", genome.in_path));

    let file = File::open(&genome.in_path).map_err(|e| GenomeError::Open {
        path: genome.in_path.clone(),
        source: e,
    })?;
    let mut reader = ArchiveReader::new(file, genome.in_path.clone());

    let mut archive = match &genome.out_path {
        Some(path) if genome.write_archive => {
            let out = File::create(path).map_err(|e| GenomeError::ArchiveCreate {
                path: path.clone(),
                source: e,
            })?;
            Some(ArchiveWriter::new(out))
        }
        _ => None,
    };

    while let Some(mut lps) = reader.read_next::<L>()? {
        lps.deepen(genome.lcp_level);

        if let Some(archive) = archive.as_mut() {
            archive.save(&lps).map_err(|e| GenomeError::Read {
                path: genome.in_path.clone(),
                source: e,
            })?;
        }

        for core in lps.cores() {
            push_core(&mut genome.cores, SimpleCore::pack(core.label, core.length()));
        }
    }

    if let Some(archive) = archive.as_mut() {
        archive.done().map_err(|e| GenomeError::Read {
            path: genome.in_path.clone(),
            source: e,
        })?;
    }

    logger.verbose(format!(
        "ended loading {}, cores: {}",
        genome.in_path,
        genome.cores.len()
    ));

    Ok(())
}
