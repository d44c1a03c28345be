//! Stream screening: classify each payment and write three verdict files.

use crate::{
    classifier::{Classifier, Verdicts},
    data::{records, GraphIndex},
    error::{Error, Result},
    types::Trust,
};
use derive_more::Display;
use log::{debug, info, warn};
use rayon::prelude::*;
use std::{
    io::{Read, Write},
    time::Instant,
};

/// What to do with a stream row that lacks its two ids.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MalformedPolicy {
    Abort,
    /// Drop the row from all three outputs.
    Skip,
}

impl Default for MalformedPolicy {
    fn default() -> Self {
        MalformedPolicy::Abort
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StreamConfig {
    chunk_size: usize,
    malformed: MalformedPolicy,
}

impl Default for StreamConfig {
    fn default() -> Self {
        Self {
            chunk_size: 4096,
            malformed: MalformedPolicy::default(),
        }
    }
}

impl StreamConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of payments classified in parallel before writing.
    pub fn chunk_size(mut self, chunk_size: usize) -> Self {
        self.chunk_size = chunk_size.max(1);
        self
    }

    pub fn malformed(mut self, malformed: MalformedPolicy) -> Self {
        self.malformed = malformed;
        self
    }
}

#[derive(Debug, Display, Default, Clone, Copy, PartialEq, Eq)]
#[display(
    fmt = "processed={} skipped={} trusted={:?}",
    processed,
    skipped,
    trusted
)]
pub struct StreamSummary {
    pub processed: usize,
    pub skipped: usize,
    /// Count of `trusted` lines per output.
    pub trusted: [usize; 3],
}

/// Classifies every payment of `stream` and writes one line per payment
/// to each sink, in input order.
///
/// On an aborting row every payment read before it is still written, so
/// the outputs do not depend on the chunk size.
pub fn process_stream<R, W>(
    index: &GraphIndex,
    stream: R,
    sinks: &mut [W; 3],
    config: StreamConfig,
) -> Result<StreamSummary>
where
    R: Read,
    W: Write,
{
    let time_now = Instant::now();
    let classifier = Classifier::new(index);
    let mut summary = StreamSummary::default();
    let mut chunk = Vec::with_capacity(config.chunk_size);
    for record in records(stream) {
        match record {
            Ok(pair) => chunk.push(pair),
            Err(Error::MalformedRecord { line, fields })
                if config.malformed == MalformedPolicy::Skip =>
            {
                warn!("skipping line {} with {} fields", line, fields);
                summary.skipped += 1;
            }
            Err(e) => {
                finish(classifier, &chunk, sinks, &mut summary)?;
                return Err(e);
            }
        }
        if chunk.len() == config.chunk_size {
            write_chunk(classifier, &chunk, sinks, &mut summary)?;
            chunk.clear();
        }
    }
    finish(classifier, &chunk, sinks, &mut summary)?;
    info!(
        "stream done in {}ms: {}",
        (Instant::now() - time_now).as_millis(),
        summary
    );
    Ok(summary)
}

fn finish<W: Write>(
    classifier: Classifier,
    chunk: &[(String, String)],
    sinks: &mut [W; 3],
    summary: &mut StreamSummary,
) -> Result<()> {
    write_chunk(classifier, chunk, sinks, summary)?;
    for sink in sinks.iter_mut() {
        sink.flush()?;
    }
    Ok(())
}

fn write_chunk<W: Write>(
    classifier: Classifier,
    chunk: &[(String, String)],
    sinks: &mut [W; 3],
    summary: &mut StreamSummary,
) -> Result<()> {
    if chunk.is_empty() {
        return Ok(());
    }
    let verdicts: Vec<Verdicts> = chunk
        .par_iter()
        .map(|(id1, id2)| classifier.classify(id1, id2))
        .collect();
    for v in verdicts {
        for (i, trust) in v.trust().iter().enumerate() {
            writeln!(sinks[i], "{}", trust)?;
            if *trust == Trust::Trusted {
                summary.trusted[i] += 1;
            }
        }
        summary.processed += 1;
    }
    debug!("{} payments classified", summary.processed);
    Ok(())
}
