use std::collections::VecDeque;
use std::io;
use std::path::Path;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use bytes::Bytes;
use futures::stream;
use futures::StreamExt;

use leadscribe::application::ports::{
    ChatClient, ChatClientError, ChatRequest, CrmClient, CrmClientError, DownloadError,
    FileDownload, FileDownloader, MediaStore, MediaStoreError, StoredAudio, TranscriptionEngine,
    TranscriptionError,
};
use leadscribe::domain::{CommentId, FileId, LeadId, TimelineComment};

/// Scriptable CRM double: canned comment / download-url responses, a
/// failure budget for `add_comment`, and call counters for asserting that
/// short-circuited pipelines stop calling out.
pub struct MockCrmClient {
    comment: Option<TimelineComment>,
    download_url: Option<String>,
    add_comment_failures: AtomicU32,
    pub posted: Mutex<Vec<(String, String)>>,
    pub get_comment_calls: AtomicU32,
    pub resolve_calls: AtomicU32,
    pub add_comment_calls: AtomicU32,
}

impl MockCrmClient {
    pub fn new() -> Self {
        Self {
            comment: None,
            download_url: None,
            add_comment_failures: AtomicU32::new(0),
            posted: Mutex::new(Vec::new()),
            get_comment_calls: AtomicU32::new(0),
            resolve_calls: AtomicU32::new(0),
            add_comment_calls: AtomicU32::new(0),
        }
    }

    pub fn with_comment(mut self, comment: TimelineComment) -> Self {
        self.comment = Some(comment);
        self
    }

    pub fn with_download_url(mut self, url: &str) -> Self {
        self.download_url = Some(url.to_string());
        self
    }

    /// The next `count` calls to `add_comment` fail.
    pub fn failing_add_comments(self, count: u32) -> Self {
        self.add_comment_failures.store(count, Ordering::SeqCst);
        self
    }

    pub fn posted_comments(&self) -> Vec<(String, String)> {
        self.posted.lock().unwrap().clone()
    }
}

#[async_trait]
impl CrmClient for MockCrmClient {
    async fn get_comment(&self, _id: &CommentId) -> Result<TimelineComment, CrmClientError> {
        self.get_comment_calls.fetch_add(1, Ordering::SeqCst);
        self.comment
            .clone()
            .ok_or_else(|| CrmClientError::ApiRequestFailed("mock: no comment".to_string()))
    }

    async fn resolve_download_url(&self, _id: &FileId) -> Result<String, CrmClientError> {
        self.resolve_calls.fetch_add(1, Ordering::SeqCst);
        self.download_url
            .clone()
            .ok_or_else(|| CrmClientError::NotFound("mock: no download url".to_string()))
    }

    async fn add_comment(&self, lead: &LeadId, text: &str) -> Result<(), CrmClientError> {
        self.add_comment_calls.fetch_add(1, Ordering::SeqCst);
        let remaining = self.add_comment_failures.load(Ordering::SeqCst);
        if remaining > 0 {
            self.add_comment_failures
                .store(remaining - 1, Ordering::SeqCst);
            return Err(CrmClientError::ApiRequestFailed(
                "mock: post failed".to_string(),
            ));
        }
        self.posted
            .lock()
            .unwrap()
            .push((lead.as_str().to_string(), text.to_string()));
        Ok(())
    }
}

/// Serves a fixed body with an optional Content-Disposition header.
pub struct MockFileDownloader {
    body: Vec<u8>,
    content_disposition: Option<String>,
    pub calls: AtomicU32,
}

impl MockFileDownloader {
    pub fn new(body: Vec<u8>, content_disposition: Option<&str>) -> Self {
        Self {
            body,
            content_disposition: content_disposition.map(String::from),
            calls: AtomicU32::new(0),
        }
    }
}

#[async_trait]
impl FileDownloader for MockFileDownloader {
    async fn download(&self, _url: &str) -> Result<FileDownload, DownloadError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let chunks: Vec<Result<Bytes, io::Error>> = self
            .body
            .chunks(1024)
            .map(|c| Ok(Bytes::copy_from_slice(c)))
            .collect();
        Ok(FileDownload {
            content_disposition: self.content_disposition.clone(),
            body: stream::iter(chunks).boxed(),
        })
    }
}

/// One scripted response for the chat double.
pub enum ChatScript {
    Reply(&'static str),
    RateLimited,
    Fail(&'static str),
}

/// Chat double with independent scripts for the feedback and sentiment
/// prompts, distinguished by their system messages.
pub struct MockChatClient {
    feedback: Mutex<VecDeque<ChatScript>>,
    sentiment: Mutex<VecDeque<ChatScript>>,
    pub calls: AtomicU32,
}

impl MockChatClient {
    pub fn new(feedback: Vec<ChatScript>, sentiment: Vec<ChatScript>) -> Self {
        Self {
            feedback: Mutex::new(feedback.into()),
            sentiment: Mutex::new(sentiment.into()),
            calls: AtomicU32::new(0),
        }
    }

    pub fn succeeding(feedback: &'static str, sentiment: &'static str) -> Self {
        Self::new(
            vec![ChatScript::Reply(feedback)],
            vec![ChatScript::Reply(sentiment)],
        )
    }
}

#[async_trait]
impl ChatClient for MockChatClient {
    async fn complete(&self, request: &ChatRequest) -> Result<String, ChatClientError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let queue = if request.system.contains("sentiment") {
            &self.sentiment
        } else {
            &self.feedback
        };
        let script = queue.lock().unwrap().pop_front();
        match script {
            Some(ChatScript::Reply(text)) => Ok(text.to_string()),
            Some(ChatScript::RateLimited) => Err(ChatClientError::RateLimited),
            Some(ChatScript::Fail(detail)) => {
                Err(ChatClientError::ApiRequestFailed(detail.to_string()))
            }
            None => Err(ChatClientError::ApiRequestFailed(
                "mock: unscripted call".to_string(),
            )),
        }
    }
}

/// Returns a fixed transcript for any audio path; can also be scripted to
/// fail with an error or panic outright.
pub struct MockTranscriptionEngine {
    transcript: Option<&'static str>,
    panics: bool,
    pub calls: AtomicU32,
}

impl MockTranscriptionEngine {
    pub fn returning(transcript: &'static str) -> Self {
        Self {
            transcript: Some(transcript),
            panics: false,
            calls: AtomicU32::new(0),
        }
    }

    pub fn failing() -> Self {
        Self {
            transcript: None,
            panics: false,
            calls: AtomicU32::new(0),
        }
    }

    pub fn panicking() -> Self {
        Self {
            transcript: None,
            panics: true,
            calls: AtomicU32::new(0),
        }
    }
}

#[async_trait]
impl TranscriptionEngine for MockTranscriptionEngine {
    async fn transcribe(&self, _audio_path: &Path) -> Result<String, TranscriptionError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.panics {
            panic!("mock: engine crashed");
        }
        match self.transcript {
            Some(text) => Ok(text.to_string()),
            None => Err(TranscriptionError::TranscriptionFailed(
                "mock: engine failure".to_string(),
            )),
        }
    }
}

/// Media directory double whose writes always fail, as if the disk were
/// full or the directory unwritable.
pub struct FailingMediaStore;

#[async_trait]
impl MediaStore for FailingMediaStore {
    async fn store(
        &self,
        _filename: &str,
        _stream: futures::stream::BoxStream<'_, Result<Bytes, io::Error>>,
    ) -> Result<StoredAudio, MediaStoreError> {
        Err(MediaStoreError::WriteFailed("mock: disk full".to_string()))
    }

    async fn delete(&self, _filename: &str) -> Result<(), MediaStoreError> {
        Ok(())
    }
}
