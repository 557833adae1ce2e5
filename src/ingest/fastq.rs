//! FASTQ ingester.
//!
//! Streams a (optionally gzipped) FASTQ read set. Each read is processed
//! twice: once forward, once as its reverse complement.

use std::fs::File;
use std::io::{BufRead, BufReader};

use flate2::read::GzDecoder;

use crate::archive::ArchiveWriter;
use crate::config::GenomeArgs;
use crate::error::GenomeError;
use crate::ingest::{estimate_fq_capacity, push_core};
use crate::lcp::LcpParse;
use crate::logging::Logger;
use crate::types::SimpleCore;

pub fn ingest_fastq<L: LcpParse>(genome: &mut GenomeArgs, logger: &Logger) -> Result<(), GenomeError> {
    logger.verbose(format!("started processing {}", genome.in_path));

    let file = File::open(&genome.in_path).map_err(|e| GenomeError::Open {
        path: genome.in_path.clone(),
        source: e,
    })?;

    let file_size = file.metadata().map(|m| m.len()).unwrap_or(0);
    let is_gzipped = genome.in_path.ends_with(".gz");
    genome
        .cores
        .reserve(estimate_fq_capacity(file_size, is_gzipped, genome.lcp_level));

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

    let reader: Box<dyn BufRead> = if is_gzipped {
        Box::new(BufReader::new(GzDecoder::new(file)))
    } else {
        Box::new(BufReader::new(file))
    };
    let mut lines = reader.lines();

    loop {
        let _id = match lines.next() {
            Some(line) => line.map_err(|e| GenomeError::Read {
                path: genome.in_path.clone(),
                source: e,
            })?,
            None => break,
        };

        let seq = match next_record_line(&mut lines, &genome.in_path, logger)? {
            Some(l) => l,
            None => break,
        };
        let _plus = match next_record_line(&mut lines, &genome.in_path, logger)? {
            Some(l) => l,
            None => break,
        };
        let _qual = match next_record_line(&mut lines, &genome.in_path, logger)? {
            Some(l) => l,
            None => break,
        };

        process_read::<L>(seq.as_bytes(), genome, &mut archive)?;
    }

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

/// Read the next line of a FASTQ record. `None` means the file ended
/// mid-record (a truncated trailing record), which is logged but is not
/// an I/O error: the genome's signature is simply built from the
/// complete records seen so far.
fn next_record_line(
    lines: &mut std::io::Lines<Box<dyn BufRead>>,
    path: &str,
    logger: &Logger,
) -> Result<Option<String>, GenomeError> {
    match lines.next() {
        Some(line) => {
            let line = line.map_err(|e| GenomeError::Read {
                path: path.to_string(),
                source: e,
            })?;
            Ok(Some(line))
        }
        None => {
            logger.warn(format!("{path}: truncated trailing FASTQ record, ignoring"));
            Ok(None)
        }
    }
}

fn process_read<L: LcpParse>(
    seq: &[u8],
    genome: &mut GenomeArgs,
    archive: &mut Option<ArchiveWriter<File>>,
) -> Result<(), GenomeError> {
    let mut forward = L::new(seq);
    forward.deepen(genome.lcp_level);
    if let Some(archive) = archive.as_mut() {
        archive.save(&forward).map_err(|e| GenomeError::Read {
            path: genome.in_path.clone(),
            source: e,
        })?;
    }
    for core in forward.cores() {
        push_core(&mut genome.cores, SimpleCore::pack(core.label, core.length()));
    }

    let mut reverse_complement = L::new_rc(seq);
    reverse_complement.deepen(genome.lcp_level);
    if let Some(archive) = archive.as_mut() {
        archive
            .save(&reverse_complement)
            .map_err(|e| GenomeError::Read {
                path: genome.in_path.clone(),
                source: e,
            })?;
    }
    for core in reverse_complement.cores() {
        push_core(&mut genome.cores, SimpleCore::pack(core.label, core.length()));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ProgramArgs;
    use crate::lcp::Lps;
    use crate::types::Mode;
    use flate2::write::GzEncoder;
    use flate2::Compression;
    use std::io::Write;

    fn make_genome(path: &str) -> GenomeArgs {
        let pargs = ProgramArgs {
            mode: Mode::Fq,
            lcp_level: 1,
            ..ProgramArgs::default()
        };
        GenomeArgs::new(path.to_string(), &pargs)
    }

    #[test]
    fn test_ingest_plain_fastq_produces_forward_and_rc_cores() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("reads.fastq");
        let mut file = File::create(&path).unwrap();
        writeln!(file, "@read1").unwrap();
        writeln!(file, "ACGTACGTACGT").unwrap();
        writeln!(file, "+").unwrap();
        writeln!(file, "IIIIIIIIIIII").unwrap();

        let mut genome = make_genome(path.to_str().unwrap());
        let logger = Logger::default();
        ingest_fastq::<Lps>(&mut genome, &logger).unwrap();

        assert!(!genome.cores.is_empty());
    }

    #[test]
    fn test_ingest_gzipped_fastq() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("reads.fastq.gz");
        let file = File::create(&path).unwrap();
        let mut encoder = GzEncoder::new(file, Compression::default());
        writeln!(encoder, "@read1").unwrap();
        writeln!(encoder, "ACGTACGTACGT").unwrap();
        writeln!(encoder, "+").unwrap();
        writeln!(encoder, "IIIIIIIIIIII").unwrap();
        encoder.finish().unwrap();

        let mut genome = make_genome(path.to_str().unwrap());
        let logger = Logger::default();
        ingest_fastq::<Lps>(&mut genome, &logger).unwrap();

        assert!(!genome.cores.is_empty());
    }

    #[test]
    fn test_truncated_trailing_record_is_ignored_not_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("reads.fastq");
        let mut file = File::create(&path).unwrap();
        writeln!(file, "@read1").unwrap();
        writeln!(file, "ACGTACGTACGT").unwrap();
        writeln!(file, "+").unwrap();
        writeln!(file, "IIIIIIIIIIII").unwrap();
        writeln!(file, "@truncated_read").unwrap();
        // missing sequence/plus/qual lines

        let mut genome = make_genome(path.to_str().unwrap());
        let logger = Logger::default();
        let result = ingest_fastq::<Lps>(&mut genome, &logger);
        assert!(result.is_ok());
        assert!(!genome.cores.is_empty());
    }

    #[test]
    fn test_reverse_complement_of_one_read_matches_two_separate_reads() {
        // A FASTQ with one read R and its literal RC as a second read
        // should double the multiset of a FASTQ with R alone.
        let dir = tempfile::tempdir().unwrap();

        let single_path = dir.path().join("single.fastq");
        let mut single = File::create(&single_path).unwrap();
        writeln!(single, "@r1").unwrap();
        writeln!(single, "ACGTTGCA").unwrap();
        writeln!(single, "+").unwrap();
        writeln!(single, "IIIIIIII").unwrap();

        let doubled_path = dir.path().join("doubled.fastq");
        let mut doubled = File::create(&doubled_path).unwrap();
        writeln!(doubled, "@r1").unwrap();
        writeln!(doubled, "ACGTTGCA").unwrap();
        writeln!(doubled, "+").unwrap();
        writeln!(doubled, "IIIIIIII").unwrap();
        writeln!(doubled, "@r1_rc").unwrap();
        writeln!(doubled, "TGCAACGT").unwrap(); // reverse complement of ACGTTGCA
        writeln!(doubled, "+").unwrap();
        writeln!(doubled, "IIIIIIII").unwrap();

        let mut single_genome = make_genome(single_path.to_str().unwrap());
        let mut doubled_genome = make_genome(doubled_path.to_str().unwrap());
        let logger = Logger::default();

        ingest_fastq::<Lps>(&mut single_genome, &logger).unwrap();
        ingest_fastq::<Lps>(&mut doubled_genome, &logger).unwrap();

        let mut single_sorted = single_genome.cores.clone();
        single_sorted.sort();
        let mut doubled_sorted = doubled_genome.cores.clone();
        doubled_sorted.sort();

        // VECTOR mode: doubled file's multiset is exactly twice the single's.
        assert_eq!(doubled_sorted.len(), single_sorted.len() * 2);
        let mut expected: Vec<SimpleCore> = single_sorted
            .iter()
            .cloned()
            .chain(single_sorted.iter().cloned())
            .collect();
        expected.sort();
        assert_eq!(doubled_sorted, expected);

        // SET mode: distinct values are identical.
        let mut single_distinct = single_sorted.clone();
        single_distinct.dedup();
        let mut doubled_distinct = doubled_sorted.clone();
        doubled_distinct.dedup();
        assert_eq!(single_distinct, doubled_distinct);
    }
}
