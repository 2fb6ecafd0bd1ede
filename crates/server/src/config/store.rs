use serde::Deserialize;

/// Configuration for the record store backend.
#[derive(Debug, Deserialize)]
pub struct StoreConfig {
    /// Which backend to use: `"memory"` or `"redis"`.
    #[serde(default = "default_backend")]
    pub backend: String,

    /// Connection URL for the backend (e.g. `redis://localhost:6379`).
    pub url: Option<String>,

    /// Key prefix for backends that support it. Defaults to `"tryon"`.
    pub prefix: Option<String>,

    /// Connection pool size for pooled backends.
    pub pool_size: Option<usize>,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            backend: default_backend(),
            url: None,
            prefix: None,
            pool_size: None,
        }
    }
}

fn default_backend() -> String {
    "memory".to_owned()
}
