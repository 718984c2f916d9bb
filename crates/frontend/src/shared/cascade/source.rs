use super::id::OptionId;
use super::record::normalize_envelope;
use crate::shared::api_utils::get_json;
use serde_json::Value;
use std::future::Future;
use std::pin::Pin;

pub type OptionsFuture = Pin<Box<dyn Future<Output = Result<Vec<Value>, String>>>>;

/// Remote list provider for one cascade level.
///
/// Gets the selected ids of the level's parents in declaration order and
/// returns the raw records, envelope already removed.
pub trait OptionSource: Send + Sync {
    fn fetch(&self, parents: &[OptionId]) -> OptionsFuture;
}

/// GET against the backend; `path` turns parent ids into an `/api/...` path
pub struct HttpOptionSource {
    path: fn(&[OptionId]) -> String,
}

impl HttpOptionSource {
    pub fn new(path: fn(&[OptionId]) -> String) -> Self {
        Self { path }
    }
}

impl OptionSource for HttpOptionSource {
    fn fetch(&self, parents: &[OptionId]) -> OptionsFuture {
        let path = (self.path)(parents);
        Box::pin(async move {
            let body: Value = get_json(&path).await?;
            Ok(normalize_envelope(body))
        })
    }
}

/// Parent id at `position` as a path segment; empty when missing
pub fn segment(parents: &[OptionId], position: usize) -> String {
    parents
        .get(position)
        .map(|id| urlencoding::encode(&id.as_key()).into_owned())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_segment_encodes_text_ids() {
        let parents = vec![OptionId::from(36), OptionId::from("DAY SCHOLAR")];
        assert_eq!(segment(&parents, 0), "36");
        assert_eq!(segment(&parents, 1), "DAY%20SCHOLAR");
        assert_eq!(segment(&parents, 2), "");
    }
}
