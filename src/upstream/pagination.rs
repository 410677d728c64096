//! Multi-page aggregation
//!
//! Walks a list endpoint from page 1 until the upstream stops reporting
//! `has_more`, concatenating each page's `data` array. All-or-nothing: a
//! failure on any page discards what was gathered so far.

use serde_json::Value;
use tracing::debug;

use super::client::{ApiFamily, UpstreamClient};
use super::error::UpstreamError;

impl UpstreamClient {
    /// Fetches every page of a list endpoint as one collection
    ///
    /// # Arguments
    /// * `path` - List endpoint path below the family's base URL
    /// * `includes` - Expansions sent with every page
    /// * `family` - API family selecting the base URL
    /// * `query` - Extra query parameters sent with every page
    ///
    /// # Returns
    /// * `Ok(Vec<Value>)` - All records in upstream order
    /// * `Err(UpstreamError::Pagination)` - A page failed; no partial data is returned
    pub async fn request_all_pages(
        &self,
        path: &str,
        includes: &[&str],
        family: ApiFamily,
        query: &[(&str, String)],
    ) -> Result<Vec<Value>, UpstreamError> {
        let page_size = self.config().page_size.to_string();
        let max_pages = self.config().max_pages;
        let mut items = Vec::new();
        let mut page_number: u32 = 1;

        loop {
            if page_number > max_pages {
                return Err(UpstreamError::PageLimit(max_pages));
            }

            let mut page_query: Vec<(&str, String)> = query.to_vec();
            page_query.push(("page", page_number.to_string()));
            page_query.push(("per_page", page_size.clone()));

            let page = self
                .request(path, includes, family, &page_query)
                .await
                .map_err(|source| UpstreamError::Pagination {
                    page: page_number,
                    source: Box::new(source),
                })?;

            let has_more = page.has_more();
            let fetched = append_items(&mut items, page.data).map_err(|source| {
                UpstreamError::Pagination {
                    page: page_number,
                    source: Box::new(source),
                }
            })?;
            debug!(path, page = page_number, fetched, has_more, "fetched page");

            if !has_more {
                return Ok(items);
            }
            page_number += 1;
        }
    }
}

/// Appends a page's records, returning how many were added
fn append_items(items: &mut Vec<Value>, data: Value) -> Result<usize, UpstreamError> {
    match data {
        Value::Array(records) => {
            let count = records.len();
            items.extend(records);
            Ok(count)
        }
        Value::Null => Ok(0),
        other => Err(UpstreamError::UnexpectedShape(format!(
            "expected a list of records, got {}",
            json_kind(&other)
        ))),
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
