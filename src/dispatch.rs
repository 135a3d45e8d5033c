use futures_util::StreamExt;
use futures_util::stream;
use tracing::{info, warn};

use crate::core::{Extractor, Record};

/// Run an extractor over a batch with at most `workers` URLs in flight.
///
/// Results land in a slot per input index, so the output always matches the
/// input order. `on_progress(done, total)` fires after every completed URL.
pub async fn run_batch<F>(
    urls: &[String],
    extractor: &dyn Extractor,
    workers: usize,
    mut on_progress: F,
) -> Vec<Record>
where
    F: FnMut(usize, usize),
{
    let total = urls.len();
    let workers = workers.max(1);
    let platform = extractor.platform();
    info!(%platform, total, workers, "starting batch");
    for url in urls.iter().filter(|url| !extractor.matches(url.as_str())) {
        warn!(%platform, url = url.as_str(), "url does not look like a {platform} link");
    }

    let mut slots: Vec<Option<Record>> = vec![None; total];
    let mut completed = stream::iter(urls.iter().enumerate())
        .map(|(index, url)| async move { (index, extractor.extract(url).await) })
        .buffer_unordered(workers);

    let mut done = 0;
    while let Some((index, record)) = completed.next().await {
        slots[index] = Some(record);
        done += 1;
        on_progress(done, total);
    }

    let records: Vec<Record> = slots.into_iter().flatten().collect();
    let failed = records.iter().filter(|r| r.is_error()).count();
    info!(total, failed, "batch finished");
    records
}
