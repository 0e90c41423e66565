use reqwest::Url;

const LAST_REL: &str = "rel=\"last\"";

/// Splits a `Link` header into `(url, rel-params)` pairs.
fn link_entries(link: &str) -> impl Iterator<Item = (&str, &str)> {
    link.split(',').filter_map(|entry| {
        let (target, params) = entry.split_once(';')?;
        let url = target.trim().strip_prefix('<')?.strip_suffix('>')?;
        Some((url, params))
    })
}

/// The `page` query parameter of the `rel="last"` entry.
pub fn last_page(link: &str) -> Option<u32> {
    let (url, _) = link_entries(link).find(|(_, params)| params.contains(LAST_REL))?;
    let url = Url::parse(url).ok()?;
    let page = url
        .query_pairs()
        .find(|(key, _)| key == "page")
        .and_then(|(_, value)| value.parse().ok());
    page
}

/// Total items of a `per_page=1` listing: the last page number when the
/// listing spans several pages, otherwise however many items came back.
pub fn count_from_single_item_pages(link: Option<&str>, items_on_page: usize) -> u32 {
    link.and_then(last_page)
        .unwrap_or(items_on_page as u32)
}
