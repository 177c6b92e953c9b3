//! Shared test doubles: in-process HTTP server, scripted providers, an
//! in-memory fetcher and store.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use anyhow::Result;
use async_trait::async_trait;
use axum::Router;
use bytes::Bytes;
use uuid::Uuid;

use crate::extraction::fetch::{DocumentFetcher, FetchError};
use crate::generation::config::Template;
use crate::llm_client::prompts::OUTREACH_SYSTEM;
use crate::llm_client::{CompletionProvider, ProviderError};
use crate::models::message::MessageRecord;
use crate::storage::{Archive, ConfigLookup, UserSettings};

/// Serves `app` on an ephemeral local port and returns its base URL.
pub async fn serve(app: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{addr}")
}

pub struct StaticFetcher {
    body: Result<Vec<u8>, u16>,
    calls: AtomicUsize,
}

impl StaticFetcher {
    pub fn ok(body: impl Into<Vec<u8>>) -> Arc<Self> {
        Arc::new(Self {
            body: Ok(body.into()),
            calls: AtomicUsize::new(0),
        })
    }

    pub fn failing(status: u16) -> Arc<Self> {
        Arc::new(Self {
            body: Err(status),
            calls: AtomicUsize::new(0),
        })
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl DocumentFetcher for StaticFetcher {
    async fn fetch(&self, _url: &str) -> Result<Bytes, FetchError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match &self.body {
            Ok(body) => Ok(Bytes::from(body.clone())),
            Err(status) => Err(FetchError::Status(*status)),
        }
    }
}

/// Provider that returns one scripted outcome, then `EmptyContent`.
pub struct ScriptedProvider {
    outcome: Mutex<Option<Result<String, ProviderError>>>,
    prompts: Mutex<Vec<String>>,
}

impl ScriptedProvider {
    pub fn ok(text: &str) -> Arc<Self> {
        Self::with(Ok(text.to_string()))
    }

    pub fn status(status: u16) -> Arc<Self> {
        Self::with(Err(ProviderError::Api {
            status,
            message: format!("status {status}"),
        }))
    }

    pub fn with(outcome: Result<String, ProviderError>) -> Arc<Self> {
        Arc::new(Self {
            outcome: Mutex::new(Some(outcome)),
            prompts: Mutex::new(Vec::new()),
        })
    }

    pub fn calls(&self) -> usize {
        self.prompts.lock().unwrap().len()
    }

    pub fn last_prompt(&self) -> Option<String> {
        self.prompts.lock().unwrap().last().cloned()
    }
}

#[async_trait]
impl CompletionProvider for ScriptedProvider {
    async fn complete(&self, system: &str, prompt: &str) -> Result<String, ProviderError> {
        assert_eq!(system, OUTREACH_SYSTEM);
        self.prompts.lock().unwrap().push(prompt.to_string());
        self.outcome
            .lock()
            .unwrap()
            .take()
            .unwrap_or(Err(ProviderError::EmptyContent))
    }

    fn name(&self) -> &str {
        "scripted"
    }

    fn model(&self) -> &str {
        "test-model"
    }
}

#[derive(Default)]
pub struct MemoryStore {
    pub settings: UserSettings,
    pub templates: Vec<Template>,
    pub fail_archive: bool,
    pub extracted: Mutex<Vec<(Uuid, String)>>,
    pub messages: Mutex<Vec<MessageRecord>>,
}

#[async_trait]
impl ConfigLookup for MemoryStore {
    async fn load_settings(&self, _document_id: Uuid) -> Result<UserSettings> {
        Ok(self.settings.clone())
    }

    async fn load_template(&self, template_id: Uuid) -> Result<Option<Template>> {
        Ok(self.templates.iter().find(|t| t.id == template_id).cloned())
    }
}

#[async_trait]
impl Archive for MemoryStore {
    async fn store_extracted_text(&self, document_id: Uuid, text: &str) -> Result<()> {
        if self.fail_archive {
            anyhow::bail!("archive unavailable");
        }
        self.extracted
            .lock()
            .unwrap()
            .push((document_id, text.to_string()));
        Ok(())
    }

    async fn store_message(&self, record: &MessageRecord) -> Result<()> {
        if self.fail_archive {
            anyhow::bail!("archive unavailable");
        }
        self.messages.lock().unwrap().push(record.clone());
        Ok(())
    }
}
