#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("state database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("dataset missing or unreadable: {0}")]
    DatasetMissing(String),

    #[error("dataset contains no categories")]
    EmptyDataset,

    #[error("duplicate product name in dataset: {0:?}")]
    DuplicateProduct(String),

    #[error("category labels {a:?} and {b:?} collide on key {key:?}")]
    CategoryKeyCollision { a: String, b: String, key: String },

    #[error("no product named {0:?} in the catalog")]
    UnknownProduct(String),

    #[error("invalid price range {0:?} — expected `all`, `min-max`, or `min+`")]
    InvalidPriceRange(String),

    #[error("could not decode share token")]
    TokenDecode,

    #[error("clipboard unavailable: {0}")]
    Clipboard(String),
}

pub type Result<T> = std::result::Result<T, Error>;
