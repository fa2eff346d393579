use serde::Deserialize;

/// One page of a paginated list response: `{count, next, previous, results}`.
#[derive(Clone, Debug, Deserialize)]
pub struct Paginated<T> {
    pub count: i64,
    pub next: Option<String>,
    pub previous: Option<String>,
    pub results: Vec<T>,
}

impl<T> Paginated<T> {
    pub fn has_next(&self) -> bool {
        self.next.is_some()
    }
}
