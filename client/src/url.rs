//! Request target assembly.
//!
//! A malformed base URL is a misconfigured client, not a request-time
//! condition, so `build_url` panics instead of returning an `ApiError`.

use url::Url;

/// Join `base`, `path`, ordered query pairs and an optional fragment.
///
/// Exactly one `/` separates the base path from `path`. An empty `query`
/// leaves the URL without a `?`. Any query already present on `base` is
/// replaced by `query`.
///
/// # Panics
/// If `base` does not parse as a URL with an authority.
pub fn build_url(base: &str, path: &str, query: &[(&str, &str)], fragment: Option<&str>) -> Url {
    let mut url = match Url::parse(base) {
        Ok(url) => url,
        Err(e) => panic!("invalid base url {base:?}: {e}"),
    };
    if url.cannot_be_a_base() || url.host().is_none() {
        panic!("invalid base url {base:?}: missing authority");
    }

    let joined = format!(
        "{}/{}",
        url.path().trim_end_matches('/'),
        path.trim_start_matches('/')
    );
    url.set_path(&joined);

    if query.is_empty() {
        url.set_query(None);
    } else {
        let mut pairs = url.query_pairs_mut();
        pairs.clear();
        for (name, value) in query {
            pairs.append_pair(name, value);
        }
    }

    if let Some(fragment) = fragment {
        url.set_fragment(Some(fragment));
    }
    url
}
