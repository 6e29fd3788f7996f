// Candidate locator resolution
//
// The wizard's markup shifts between releases, so page objects describe each
// element as an ordered list of selectors. The first candidate that works wins.

use crate::error::{Error, Result};
use playwright_rs::{ClickOptions, FillOptions, Locator, Page};
use std::future::Future;
use std::time::Duration;

/// Runs `op` on each candidate in order and returns the first success.
///
/// # Errors
///
/// `Error::ElementNotFound` naming every candidate if all of them fail,
/// `Error::InvalidArgument` if `candidates` is empty.
pub async fn first_success<'a, T, F, Fut>(candidates: &[&'a str], mut op: F) -> Result<T>
where
    F: FnMut(&'a str) -> Fut,
    Fut: Future<Output = Result<T>>,
{
    if candidates.is_empty() {
        return Err(Error::InvalidArgument(
            "no candidate selectors given".to_string(),
        ));
    }

    for &candidate in candidates {
        match op(candidate).await {
            Ok(value) => return Ok(value),
            Err(e) => tracing::trace!(selector = candidate, error = %e, "candidate failed"),
        }
    }

    Err(Error::ElementNotFound {
        candidates: candidates.iter().map(|c| c.to_string()).collect(),
    })
}

/// First candidate with a visible match.
pub async fn resolve(page: &Page, candidates: &[&str]) -> Result<Locator> {
    first_success(candidates, |selector| async move {
        let locator = page.locator(selector).await.first();
        if locator.is_visible().await? {
            Ok(locator)
        } else {
            Err(not_found(selector))
        }
    })
    .await
}

/// First candidate with any match, visible or not.
pub async fn resolve_attached(page: &Page, candidates: &[&str]) -> Result<Locator> {
    first_success(candidates, |selector| async move {
        let locator = page.locator(selector).await.first();
        if locator.count().await? > 0 {
            Ok(locator)
        } else {
            Err(not_found(selector))
        }
    })
    .await
}

/// Clicks the first candidate that accepts a normal click, falling back to a
/// forced click on the first candidate present in the DOM.
pub async fn click_any(page: &Page, candidates: &[&str], timeout: Duration) -> Result<()> {
    let timeout_ms = timeout.as_millis() as f64;
    let normal = first_success(candidates, |selector| async move {
        let options = ClickOptions::builder().timeout(timeout_ms).build();
        page.locator(selector)
            .await
            .first()
            .click(Some(options))
            .await
            .map_err(Error::from)
    })
    .await;

    match normal {
        Ok(()) => Ok(()),
        Err(e) => {
            tracing::debug!(error = %e, "no candidate took a normal click, forcing");
            let target = resolve_attached(page, candidates).await?;
            let options = ClickOptions::builder()
                .force(true)
                .timeout(timeout_ms)
                .build();
            target.click(Some(options)).await?;
            Ok(())
        }
    }
}

/// Fills the first candidate that accepts input, with the same forced
/// fallback as [`click_any`].
pub async fn fill_any(
    page: &Page,
    candidates: &[&str],
    value: &str,
    timeout: Duration,
) -> Result<()> {
    let timeout_ms = timeout.as_millis() as f64;
    let normal = first_success(candidates, |selector| async move {
        let options = FillOptions::builder().timeout(timeout_ms).build();
        page.locator(selector)
            .await
            .first()
            .fill(value, Some(options))
            .await
            .map_err(Error::from)
    })
    .await;

    match normal {
        Ok(()) => Ok(()),
        Err(e) => {
            tracing::debug!(error = %e, "no candidate accepted input, forcing");
            let target = resolve_attached(page, candidates).await?;
            let options = FillOptions::builder()
                .force(true)
                .timeout(timeout_ms)
                .build();
            target.fill(value, Some(options)).await?;
            Ok(())
        }
    }
}

fn not_found(selector: &str) -> Error {
    Error::ElementNotFound {
        candidates: vec![selector.to_string()],
    }
}
