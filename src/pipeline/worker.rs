//! Concurrent code encoding with in-order reassembly.

use super::progress::{CancellationFlag, ProgressReporter, encoding_progress};
use crate::compose::EncodedCode;
use crate::error::PipelineError;
use crate::links::LinkRecord;
use log::{debug, info};
use refcards_traits::CodeEncoder;
use std::collections::BTreeMap;
use std::sync::Arc;
use tokio::sync::Semaphore;
use tokio::task::{self, JoinSet};

/// Encodes every record on blocking worker threads, at most `concurrency` at
/// a time, and returns the codes in input order.
///
/// The first failure (or a cancellation) aborts the remaining work.
pub(crate) async fn encode_all(
    encoder: Arc<dyn CodeEncoder>,
    records: Vec<LinkRecord>,
    concurrency: usize,
    progress: &ProgressReporter,
    cancel: &CancellationFlag,
) -> Result<Vec<EncodedCode>, PipelineError> {
    let total = records.len();
    let semaphore = Arc::new(Semaphore::new(concurrency.max(1)));
    let mut tasks = JoinSet::new();

    info!(
        "[ENCODER] Encoding {} links with up to {} workers ({}).",
        total,
        concurrency,
        encoder.name()
    );

    for record in records {
        let semaphore = Arc::clone(&semaphore);
        let encoder = Arc::clone(&encoder);
        let cancel = cancel.clone();
        tasks.spawn(async move {
            let index = record.sequence_index;
            let _permit = semaphore
                .acquire_owned()
                .await
                .map_err(|e| PipelineError::Internal(e.to_string()))?;
            cancel.check()?;

            let result = task::spawn_blocking(move || {
                let raster = encoder.encode(&record.url);
                (record, raster)
            })
            .await?;

            let encoded: Result<EncodedCode, PipelineError> = match result {
                (record, Ok(raster)) => Ok(EncodedCode { record, raster }),
                (record, Err(source)) => Err(PipelineError::Encoding {
                    index,
                    url: record.url,
                    source,
                }),
            };
            encoded
        });
    }

    let mut buffer = BTreeMap::new();
    let mut next_index = 0;
    let mut ordered = Vec::with_capacity(total);

    while let Some(joined) = tasks.join_next().await {
        let code = match joined.map_err(PipelineError::from).and_then(|r| r) {
            Ok(code) => code,
            Err(e) => {
                tasks.abort_all();
                return Err(e);
            }
        };
        if let Err(e) = cancel.check() {
            tasks.abort_all();
            return Err(e);
        }

        buffer.insert(code.record.sequence_index, code);
        while let Some(code) = buffer.remove(&next_index) {
            ordered.push(code);
            next_index += 1;
        }

        let done = ordered.len() + buffer.len();
        progress.report(encoding_progress(done, total));
        if buffer.len() > 8 {
            debug!(
                "[ENCODER] {} codes waiting for #{}.",
                buffer.len(),
                next_index
            );
        }
    }

    if !buffer.is_empty() || ordered.len() != total {
        return Err(PipelineError::Internal(format!(
            "encoded {} of {} codes",
            ordered.len(),
            total
        )));
    }
    info!("[ENCODER] Finished encoding {} codes.", total);
    Ok(ordered)
}
