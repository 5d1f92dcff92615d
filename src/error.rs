use crate::store::{Collection, StoreOp};

#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Any failed call against the document store, including decoding of fetched documents.
    #[error("Remote persistence failure: {op} on {collection}: {source}")]
    Persistence {
        collection: Collection,
        op: StoreOp,
        #[source]
        source: anyhow::Error,
    },
}

impl Error {
    pub fn persistence(collection: Collection, op: StoreOp, source: impl Into<anyhow::Error>) -> Self {
        Error::Persistence {
            collection,
            op,
            source: source.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
