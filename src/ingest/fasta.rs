//! FASTA ingester.
//!
//! Streams a FASTA file; for each contig, runs the LCP engine and emits
//! cores into the genome's core buffer, optionally archiving each
//! contig's parse.

use std::fs::File;
use std::io::{BufRead, BufReader};

use crate::archive::ArchiveWriter;
use crate::config::GenomeArgs;
use crate::error::GenomeError;
use crate::ingest::{estimate_fa_capacity, push_core};
use crate::lcp::LcpParse;
use crate::logging::Logger;
use crate::types::SimpleCore;

pub fn ingest_fasta<L: LcpParse>(genome: &mut GenomeArgs, logger: &Logger) -> Result<(), GenomeError> {
    logger.verbose(format!("started processing {}", genome.in_path));

    let file = File::open(&genome.in_path).map_err(|e| GenomeError::Open {
        path: genome.in_path.clone(),
        source: e,
    })?;

    let file_size = file.metadata().map(|m| m.len()).unwrap_or(0);
    genome
        .cores
        .reserve(estimate_fa_capacity(file_size, genome.lcp_level));

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

    let reader = BufReader::new(file);
    let mut contig: Vec<u8> = Vec::new();

    for line in reader.lines() {
        let line = line.map_err(|e| GenomeError::Read {
            path: genome.in_path.clone(),
            source: e,
        })?;

        if line.starts_with('>') {
            flush_contig::<L>(&mut contig, genome, &mut archive)?;
        } else {
            contig.extend_from_slice(line.as_bytes());
        }
    }
    flush_contig::<L>(&mut contig, genome, &mut archive)?;

    if let Some(archive) = archive.as_mut() {
        archive.done().map_err(|e| GenomeError::Read {
            path: genome.in_path.clone(),
            source: e,
        })?;
    }

    logger.verbose(format!(
        "ended processing {}, cores: {}",
        genome.in_path,
        genome.cores.len()
    ));

    Ok(())
}

fn flush_contig<L: LcpParse>(
    contig: &mut Vec<u8>,
    genome: &mut GenomeArgs,
    archive: &mut Option<ArchiveWriter<File>>,
) -> Result<(), GenomeError> {
    if contig.is_empty() {
        return Ok(());
    }

    let mut lps = L::new(contig);
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

    contig.clear();
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ProgramArgs;
    use crate::lcp::Lps;
    use crate::types::Mode;
    use std::io::Write;

    fn make_genome(path: &str) -> GenomeArgs {
        let pargs = ProgramArgs {
            mode: Mode::Fa,
            lcp_level: 1,
            ..ProgramArgs::default()
        };
        GenomeArgs::new(path.to_string(), &pargs)
    }

    #[test]
    fn test_ingest_single_contig() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("genome.fa");
        let mut file = File::create(&path).unwrap();
        writeln!(file, ">contig1").unwrap();
        writeln!(file, "ACGTACGT").unwrap();
        writeln!(file, "ACGTACGT").unwrap();

        let mut genome = make_genome(path.to_str().unwrap());
        let logger = Logger::default();
        ingest_fasta::<Lps>(&mut genome, &logger).unwrap();

        assert!(!genome.cores.is_empty());
    }

    #[test]
    fn test_ingest_multiple_contigs_concatenates_independently() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("genome.fa");
        let mut file = File::create(&path).unwrap();
        writeln!(file, ">contig1").unwrap();
        writeln!(file, "ACGTACGT").unwrap();
        writeln!(file, ">contig2").unwrap();
        writeln!(file, "TTTTGGGG").unwrap();

        let mut genome = make_genome(path.to_str().unwrap());
        let logger = Logger::default();
        ingest_fasta::<Lps>(&mut genome, &logger).unwrap();

        assert!(!genome.cores.is_empty());
    }

    #[test]
    fn test_missing_input_returns_error() {
        let mut genome = make_genome("/nonexistent/path/genome.fa");
        let logger = Logger::default();
        let result = ingest_fasta::<Lps>(&mut genome, &logger);
        assert!(matches!(result, Err(GenomeError::Open { .. })));
    }

    #[test]
    fn test_archive_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let fa_path = dir.path().join("genome.fa");
        let archive_path = dir.path().join("genome.archive");
        let mut file = File::create(&fa_path).unwrap();
        writeln!(file, ">contig1").unwrap();
        writeln!(file, "AAAACCCCGGGGTTTT").unwrap();

        let mut genome = make_genome(fa_path.to_str().unwrap());
        genome.out_path = Some(archive_path.to_str().unwrap().to_string());
        genome.write_archive = true;

        let logger = Logger::default();
        ingest_fasta::<Lps>(&mut genome, &logger).unwrap();

        assert!(archive_path.exists());

        use crate::archive::ArchiveReader;
        let archive_file = File::open(&archive_path).unwrap();
        let mut reader = ArchiveReader::new(archive_file, archive_path.to_str().unwrap());
        let mut loaded_cores = Vec::new();
        while let Some(mut lps) = reader.read_next::<Lps>().unwrap() {
            lps.deepen(genome.lcp_level);
            for core in lps.cores() {
                loaded_cores.push(SimpleCore::pack(core.label, core.length()));
            }
        }

        let mut expected = genome.cores.clone();
        let mut actual = loaded_cores;
        expected.sort();
        actual.sort();
        assert_eq!(expected, actual);
    }
}
