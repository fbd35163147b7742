//! Fetch an article from the SCP archives and pull out its title, body and
//! object class.

pub mod error;
pub mod extract;
pub mod fetch;
pub mod resolve;

pub use error::{FetchError, Result};
pub use extract::extract_article;
pub use fetch::fetch_page;
pub use resolve::{resolve, resolve_with_base, ARCHIVE_BASE_URL};

use scp_model::Article;

/// Resolve a command-line argument (URL or article number), fetch the page
/// and extract the article from it.
///
/// Invalid arguments fail before any request is made.
pub async fn resolve_and_fetch(arg: &str, paint: bool) -> Result<Article> {
    resolve_and_fetch_from(ARCHIVE_BASE_URL, arg, paint).await
}

/// [`resolve_and_fetch`] with article numbers resolved against `base`.
pub async fn resolve_and_fetch_from(base: &str, arg: &str, paint: bool) -> Result<Article> {
    let url = resolve_with_base(arg, base)?;
    let html = fetch_page(&url).await?;
    extract_article(&html, paint)
}
