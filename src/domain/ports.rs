use crate::error::Result;
use crate::layout::Document;
use async_trait::async_trait;

/// Byte-oriented key-value storage backing the local draft.
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    async fn put(&self, key: &str, value: Vec<u8>) -> Result<()>;
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>>;
    async fn remove(&self, key: &str) -> Result<()>;
    async fn contains(&self, key: &str) -> Result<bool>;
}

pub type KeyValueStoreBox = Box<dyn KeyValueStore>;

/// Turns a laid-out document into the bytes of a downloadable file.
pub trait DocumentRenderer: Send + Sync {
    fn render(&self, document: &Document) -> Result<Vec<u8>>;
}

pub type DocumentRendererBox = Box<dyn DocumentRenderer>;

/// Asks the user a yes/no question.
pub trait Confirm {
    fn confirm(&self, prompt: &str) -> bool;
}

impl<F> Confirm for F
where
    F: Fn(&str) -> bool,
{
    fn confirm(&self, prompt: &str) -> bool {
        self(prompt)
    }
}
