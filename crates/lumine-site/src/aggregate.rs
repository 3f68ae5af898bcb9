//! Multi-branch changelog aggregation
//!
//! Every release branch publishes its own `changelogs/source.txt`. The site
//! shows them as one list: each text is parsed on its own, the lists are
//! concatenated in branch order and the result is sorted newest first.

use futures::future::try_join_all;
use tracing::{debug, info};

use lumine_changelog::{ChangelogEntry, merge_newest_first, parse};

use crate::endpoints::Endpoints;
use crate::fetch::{FetchError, TextSource};

/// Fetch and merge the changelogs of all `branches`
///
/// All branch fetches run concurrently. The aggregation is all-or-nothing:
/// if any branch fails, no entries are returned.
///
/// # Errors
///
/// Returns `FetchError::Branch` naming the first failing branch.
pub async fn aggregate<S>(
    source: &S,
    endpoints: &Endpoints,
    branches: &[String],
) -> Result<Vec<ChangelogEntry>, FetchError>
where
    S: TextSource + ?Sized,
{
    let fetches = branches.iter().map(move |branch| async move {
        let url = endpoints.changelog_url(branch);
        debug!(branch = %branch, url = %url, "Fetching branch changelog");
        source
            .fetch_text(&url)
            .await
            .map(|text| (branch.clone(), text))
            .map_err(|e| FetchError::Branch {
                branch: branch.clone(),
                source: Box::new(e),
            })
    });

    let texts = try_join_all(fetches).await?;
    let entries = aggregate_texts(&texts);

    info!(
        branches = branches.len(),
        entries = entries.len(),
        "Aggregated changelogs"
    );
    Ok(entries)
}

/// Merge already fetched `(branch, text)` pairs, in the given order
#[must_use]
pub fn aggregate_texts(texts: &[(String, String)]) -> Vec<ChangelogEntry> {
    merge_newest_first(texts.iter().map(|(_, text)| parse(text)))
}
