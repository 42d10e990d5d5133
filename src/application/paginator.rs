// Generic cursor paginator shared by every platform listing
use crate::application::platform_repository::ContentPage;
use crate::domain::analytics::ContentItem;
use crate::domain::error::PipelineError;
use std::collections::HashSet;
use std::future::Future;
use std::time::Duration;
use tokio_util::sync::CancellationToken;

/// Drain a cursor-paginated listing into one ordered item list.
///
/// Pages are requested strictly in sequence. Any page failure fails the whole
/// collection, so callers never see an undercounted set. A cursor is never
/// requested twice: a source that hands back an already visited cursor is
/// reported as `MalformedPage`. Cancellation is observed at page boundaries,
/// after the in-flight request completes, and discards everything collected.
pub async fn collect_pages<F, Fut>(
    mut fetch_page: F,
    initial_cursor: Option<String>,
    cancel: &CancellationToken,
) -> Result<Vec<ContentItem>, PipelineError>
where
    F: FnMut(Option<String>) -> Fut,
    Fut: Future<Output = Result<ContentPage, PipelineError>>,
{
    let mut items = Vec::new();
    let mut visited: HashSet<String> = HashSet::new();
    let mut cursor = initial_cursor.filter(|c| !c.is_empty());
    if let Some(c) = &cursor {
        visited.insert(c.clone());
    }
    let mut pages = 0usize;

    loop {
        if cancel.is_cancelled() {
            return Err(PipelineError::Cancelled);
        }

        let page = fetch_page(cursor.take()).await?;
        if cancel.is_cancelled() {
            tracing::debug!("Discarding page {} after cancellation", pages + 1);
            return Err(PipelineError::Cancelled);
        }
        pages += 1;

        tracing::debug!("Page {} returned {} items", pages, page.items.len());
        for raw in &page.items {
            items.push(raw.parse()?);
        }

        match page.next_cursor.filter(|c| !c.is_empty()) {
            None => break,
            Some(next) => {
                if !visited.insert(next.clone()) {
                    return Err(PipelineError::MalformedPage(format!(
                        "cursor '{}' repeated after {} pages",
                        next, pages
                    )));
                }
                cursor = Some(next);
            }
        }
    }

    tracing::debug!("Collected {} items over {} pages", items.len(), pages);
    Ok(items)
}

/// Bound a page request by an optional deadline; expiry is `SourceUnavailable`
pub async fn with_page_timeout<T, Fut>(
    limit: Option<Duration>,
    request: Fut,
) -> Result<T, PipelineError>
where
    Fut: Future<Output = Result<T, PipelineError>>,
{
    match limit {
        None => request.await,
        Some(limit) => tokio::time::timeout(limit, request).await.map_err(|_| {
            PipelineError::SourceUnavailable(format!(
                "page request timed out after {}ms",
                limit.as_millis()
            ))
        })?,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::platform_repository::RawContentItem;
    use std::collections::HashMap;
    use std::sync::Mutex;

    fn page(timestamps: &[&str], next: Option<&str>) -> ContentPage {
        ContentPage::new(
            timestamps
                .iter()
                .map(|t| RawContentItem::new(*t, None))
                .collect(),
            next.map(str::to_string),
        )
    }

    /// Serves pages keyed by cursor and records every cursor requested
    struct PagedSource {
        pages: HashMap<Option<String>, Result<ContentPage, PipelineError>>,
        requested: Mutex<Vec<Option<String>>>,
    }

    impl PagedSource {
        fn new(pages: Vec<(Option<&str>, Result<ContentPage, PipelineError>)>) -> Self {
            Self {
                pages: pages
                    .into_iter()
                    .map(|(k, v)| (k.map(str::to_string), v))
                    .collect(),
                requested: Mutex::new(Vec::new()),
            }
        }

        async fn fetch(&self, cursor: Option<String>) -> Result<ContentPage, PipelineError> {
            self.requested.lock().unwrap().push(cursor.clone());
            self.pages
                .get(&cursor)
                .cloned()
                .unwrap_or_else(|| Err(PipelineError::MalformedPage("unknown cursor".into())))
        }
    }

    #[tokio::test]
    async fn test_collects_pages_in_order() {
        let source = PagedSource::new(vec![
            (None, Ok(page(&["2023-01-01", "2023-01-02"], Some("A")))),
            (Some("A"), Ok(page(&["2023-01-03", "2023-01-04"], Some("B")))),
            (Some("B"), Ok(page(&[], None))),
        ]);

        let items = collect_pages(|c| source.fetch(c), None, &CancellationToken::new())
            .await
            .unwrap();

        let days: Vec<String> = items
            .iter()
            .map(|i| i.published_at.format("%d").to_string())
            .collect();
        assert_eq!(days, vec!["01", "02", "03", "04"]);
        assert_eq!(
            *source.requested.lock().unwrap(),
            vec![None, Some("A".to_string()), Some("B".to_string())]
        );
    }

    #[tokio::test]
    async fn test_starts_from_initial_cursor() {
        let source = PagedSource::new(vec![
            (Some("A"), Ok(page(&["2023-01-01", "2023-01-02"], Some("B")))),
            (Some("B"), Ok(page(&["2023-01-03", "2023-01-04"], None))),
        ]);

        let items = collect_pages(
            |c| source.fetch(c),
            Some("A".to_string()),
            &CancellationToken::new(),
        )
        .await
        .unwrap();

        assert_eq!(items.len(), 4);
        assert_eq!(source.requested.lock().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_failed_page_fails_whole_collection() {
        let source = PagedSource::new(vec![
            (None, Ok(page(&["2023-01-01"], Some("A")))),
            (
                Some("A"),
                Err(PipelineError::SourceUnavailable("503".to_string())),
            ),
        ]);

        let err = collect_pages(|c| source.fetch(c), None, &CancellationToken::new())
            .await
            .unwrap_err();
        assert_eq!(err, PipelineError::SourceUnavailable("503".to_string()));
    }

    #[tokio::test]
    async fn test_repeated_cursor_is_never_requested_twice() {
        let source = PagedSource::new(vec![
            (None, Ok(page(&["2023-01-01"], Some("A")))),
            (Some("A"), Ok(page(&["2023-01-02"], Some("B")))),
            (Some("B"), Ok(page(&["2023-01-03"], Some("A")))),
        ]);

        let err = collect_pages(|c| source.fetch(c), None, &CancellationToken::new())
            .await
            .unwrap_err();

        assert!(matches!(err, PipelineError::MalformedPage(_)));
        let requested = source.requested.lock().unwrap();
        assert_eq!(requested.len(), 3);
        assert_eq!(
            requested.iter().filter(|c| c.as_deref() == Some("A")).count(),
            1
        );
    }

    #[tokio::test]
    async fn test_empty_cursor_ends_listing() {
        let source = PagedSource::new(vec![(None, Ok(page(&["2023-01-01"], Some(""))))]);

        let items = collect_pages(|c| source.fetch(c), None, &CancellationToken::new())
            .await
            .unwrap();
        assert_eq!(items.len(), 1);
    }

    #[tokio::test]
    async fn test_bad_timestamp_is_malformed_page() {
        let source = PagedSource::new(vec![(None, Ok(page(&["not a date"], None)))]);

        let err = collect_pages(|c| source.fetch(c), None, &CancellationToken::new())
            .await
            .unwrap_err();
        assert!(matches!(err, PipelineError::MalformedPage(_)));
    }

    #[tokio::test]
    async fn test_cancellation_discards_in_flight_page() {
        let cancel = CancellationToken::new();
        let requests = Mutex::new(0);

        let err = collect_pages(
            |_| {
                *requests.lock().unwrap() += 1;
                // Caller walks away while this page is in flight
                cancel.cancel();
                async { Ok::<_, PipelineError>(page(&["2023-01-01"], Some("A"))) }
            },
            None,
            &cancel,
        )
        .await
        .unwrap_err();

        assert_eq!(err, PipelineError::Cancelled);
        assert_eq!(*requests.lock().unwrap(), 1);
    }

    #[tokio::test]
    async fn test_page_timeout_layers_over_fetch() {
        let err = collect_pages(
            |_| {
                with_page_timeout(Some(Duration::from_millis(10)), async {
                    tokio::time::sleep(Duration::from_secs(5)).await;
                    Ok::<_, PipelineError>(page(&[], None))
                })
            },
            None,
            &CancellationToken::new(),
        )
        .await
        .unwrap_err();

        assert!(matches!(err, PipelineError::SourceUnavailable(_)));
    }
}
