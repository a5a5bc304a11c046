use serde::{Deserialize, Serialize};

/// Envelope the manager wraps around every collection response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListResult<T> {
    #[serde(default = "Vec::new")]
    pub results: Vec<T>,
    #[serde(default)]
    pub result_count: Option<u64>,
    #[serde(default)]
    pub cursor: Option<String>,
}

impl<T> ListResult<T> {
    pub fn into_results(self) -> Vec<T> {
        self.results
    }
}
