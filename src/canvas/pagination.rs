use std::future::Future;

use reqwest::header::{HeaderMap, LINK};

use crate::error::AppError;

/// One page of a Canvas listing and the URL of the page after it, if any.
#[derive(Debug)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub next: Option<String>,
}

/// Everything collected from a paged listing.
///
/// `error` is set when a page failed; `items` then holds the pages before it.
#[derive(Debug)]
pub struct Listing<T> {
    pub items: Vec<T>,
    pub pages: usize,
    pub error: Option<AppError>,
}

impl<T> Listing<T> {
    pub fn is_truncated(&self) -> bool {
        self.error.is_some()
    }
}

/// Follows `next` links from `first_url` until none remain or a fetch fails.
pub async fn collect_pages<T, F, Fut>(first_url: String, mut fetch: F) -> Listing<T>
where
    F: FnMut(String) -> Fut,
    Fut: Future<Output = Result<Page<T>, AppError>>,
{
    let mut listing = Listing {
        items: Vec::new(),
        pages: 0,
        error: None,
    };
    let mut url = Some(first_url);

    while let Some(current) = url.take() {
        match fetch(current).await {
            Ok(page) => {
                listing.items.extend(page.items);
                listing.pages += 1;
                url = page.next;
            }
            Err(e) => {
                listing.error = Some(e);
                break;
            }
        }
    }

    listing
}

/// Extracts the `rel="next"` target from a `Link` header.
pub fn next_link(headers: &HeaderMap) -> Option<String> {
    headers
        .get_all(LINK)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .find_map(parse_next_link)
}

pub fn parse_next_link(header: &str) -> Option<String> {
    header.split(',').find_map(|entry| {
        let mut parts = entry.split(';');
        let target = parts.next()?.trim();
        let is_next = parts.any(|param| {
            let param = param.trim();
            param
                .strip_prefix("rel=")
                .map(|rel| rel.trim_matches('"').split_whitespace().any(|r| r == "next"))
                .unwrap_or(false)
        });

        if is_next {
            target
                .strip_prefix('<')
                .and_then(|t| t.strip_suffix('>'))
                .map(str::to_string)
        } else {
            None
        }
    })
}
