/// Read-through caching for an async computation.
///
/// Looks `$key` up in `$cache` and returns the stored value on a hit. On a
/// miss, awaits `$block`, queues the result for storage with a TTL of `$ttl`
/// seconds, and returns it. Errors from the lookup or from `$block` are
/// propagated with `?`, so the enclosing function must return `AppResult`.
///
/// # Example
/// ```rust,ignore
/// let videos: Vec<YouTubeVideo> = cached!(cache, key, SEARCH_CACHE_TTL, async move {
///     fetch_from_api().await
/// })?;
/// ```
#[macro_export]
macro_rules! cached {
    ($cache:expr, $key:expr, $ttl:expr, $block:expr) => {{
        if let Some(cached) = $cache.get_from_cache(&$key).await? {
            Ok(cached)
        } else {
            let value = $block.await?;
            $cache.set_in_background(&$key, &value, $ttl);
            Ok(value)
        }
    }};
}
