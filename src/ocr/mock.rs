//! Mock transcription oracle for tests and offline runs.

use std::collections::VecDeque;

use async_trait::async_trait;
use image::DynamicImage;
use parking_lot::Mutex;

use super::error::OcrError;
use super::OcrOracle;

/// Replays scripted transcriptions in order, then falls back to a fixed text.
pub struct MockOracle {
    queue: Mutex<VecDeque<Result<String, String>>>,
    fallback: String,
}

impl MockOracle {
    /// Oracle that answers every page with the same text.
    pub fn fixed(text: impl Into<String>) -> Self {
        Self {
            queue: Mutex::new(VecDeque::new()),
            fallback: text.into(),
        }
    }

    /// Oracle that answers pages with the given texts in order.
    pub fn scripted<I, S>(texts: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            queue: Mutex::new(texts.into_iter().map(|t| Ok(t.into())).collect()),
            fallback: String::new(),
        }
    }

    /// Queues a transport failure for the next page.
    pub fn push_failure(&self, reason: impl Into<String>) {
        self.queue.lock().push_back(Err(reason.into()));
    }

    /// Queues a transcription for the next page.
    pub fn push_text(&self, text: impl Into<String>) {
        self.queue.lock().push_back(Ok(text.into()));
    }
}

#[async_trait]
impl OcrOracle for MockOracle {
    async fn transcribe(&self, _image: &DynamicImage) -> Result<String, OcrError> {
        match self.queue.lock().pop_front() {
            Some(Ok(text)) => Ok(text),
            Some(Err(reason)) => Err(OcrError::RequestFailed { reason }),
            None => Ok(self.fallback.clone()),
        }
    }
}
