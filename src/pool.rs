//! Worker pool.
//!
//! One job per genome, dispatched across a fixed-size rayon thread pool.
//! Output ordering is driven by the genome's position in the input list,
//! not by completion order, so jobs are submitted directly via
//! `rayon::Scope` rather than routed through a channel: each job writes
//! into its own `GenomeArgs` slot and there is nothing downstream to
//! reorder.

use std::sync::Arc;

use crate::config::{GenomeArgs, ProgramArgs};
use crate::ingest::{fasta::ingest_fasta, fastq::ingest_fastq, load::ingest_load};
use crate::lcp::LcpParse;
use crate::logging::Logger;
use crate::types::Mode;

/// Run one ingest job per genome across a pool sized
/// `min(thread_number, number_of_genomes)`.
///
/// A job that fails logs the error and leaves its genome's core buffer
/// empty; the run continues. `L` is the LCP engine implementation used by
/// every ingester.
pub fn run_pool<L: LcpParse + Send>(
    pargs: &ProgramArgs,
    genomes: &mut [GenomeArgs],
    logger: &Arc<Logger>,
) {
    if genomes.is_empty() {
        return;
    }

    let pool_size = pargs.thread_number.min(genomes.len()).max(1);
    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(pool_size)
        .build()
        .unwrap_or_else(|_| rayon::ThreadPoolBuilder::new().build().expect("default rayon pool"));

    pool.scope(|scope| {
        for genome in genomes.iter_mut() {
            let logger = Arc::clone(logger);
            scope.spawn(move |_| {
                run_one_job::<L>(genome, &logger);
            });
        }
    });
}

fn run_one_job<L: LcpParse>(genome: &mut GenomeArgs, logger: &Logger) {
    let thread_id = std::thread::current().id();
    logger.verbose(format!(
        "Thread ID: {thread_id:?} started processing {}",
        genome.in_path
    ));

    let result = match genome.mode {
        Mode::Fa => ingest_fasta::<L>(genome, logger),
        Mode::Fq => ingest_fastq::<L>(genome, logger),
        Mode::Load => ingest_load::<L>(genome, logger),
        Mode::Bam => {
            logger.error(format!("{}: BAM ingestion is not supported", genome.in_path));
            return;
        }
    };

    if let Err(e) = result {
        logger.error(format!("{}: {e}", genome.in_path));
        genome.cores.clear();
    }

    logger.verbose(format!(
        "Thread ID: {thread_id:?} finished processing {}",
        genome.in_path
    ));
}
