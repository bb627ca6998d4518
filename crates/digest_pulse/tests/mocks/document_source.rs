use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use digest_pulse::{Document, DocumentSource, FetchError};

#[derive(Debug, Clone)]
pub struct MockDocumentSource {
    pub content: String,
    pub calls: Arc<Mutex<Vec<String>>>,
    pub fail_with_status: Option<u16>,
}

impl MockDocumentSource {
    pub fn new(content: &str) -> Self {
        Self {
            content: content.to_string(),
            calls: Arc::new(Mutex::new(Vec::new())),
            fail_with_status: None,
        }
    }

    pub fn failing(status: u16) -> Self {
        Self {
            fail_with_status: Some(status),
            ..Self::new("")
        }
    }
}

#[async_trait]
impl DocumentSource for MockDocumentSource {
    async fn load(&self, source: &str) -> Result<Document, FetchError> {
        self.calls.lock().unwrap().push(source.to_string());
        if let Some(status) = self.fail_with_status {
            return Err(FetchError::Status {
                status,
                url: source.to_string(),
            });
        }
        Ok(Document::new(self.content.clone(), source))
    }
}
