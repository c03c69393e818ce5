//! In-memory remote channel for deterministic testing.
//!
//! Behaves like a single chat: uploaded documents can be pinned, resolved,
//! and downloaded again. Individual operations can be made to fail.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use readlater_telegram::mock::{MockOperation, MockRemoteChannel};
//!
//! let channel = MockRemoteChannel::new()
//!     .with_pinned_document("readlater_backup_2024-01-01.json", b"{\"todoList\": []}".to_vec())
//!     .with_failure(MockOperation::Pin);
//!
//! assert!(channel.pinned_message().is_some());
//! ```

use async_trait::async_trait;
use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex};

use readlater_core::{
    ChatState, Credentials, DocumentRef, Error, PinnedMessage, RemoteChannel, Result, SentMessage,
};

/// Remote channel operations, for failure injection and call assertions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MockOperation {
    SendText,
    SendDocument,
    Pin,
    GetChat,
    ResolveFile,
    Download,
}

impl MockOperation {
    /// Bot API method name the operation stands for.
    pub fn method(self) -> &'static str {
        match self {
            MockOperation::SendText => "sendMessage",
            MockOperation::SendDocument => "sendDocument",
            MockOperation::Pin => "pinChatMessage",
            MockOperation::GetChat => "getChat",
            MockOperation::ResolveFile => "getFile",
            MockOperation::Download => "downloadFile",
        }
    }
}

#[derive(Debug, Clone)]
pub struct MockCall {
    pub operation: MockOperation,
    pub chat_id: String,
    /// Message text, document file name, file id, or file path.
    pub input: String,
}

#[derive(Debug, Default)]
struct MockState {
    calls: Vec<MockCall>,
    failures: HashSet<MockOperation>,
    chat: ChatState,
    /// Documents by the message that carried them.
    documents: HashMap<i64, DocumentRef>,
    /// File id to download path.
    file_paths: HashMap<String, String>,
    /// Download path to content.
    blobs: HashMap<String, Vec<u8>>,
    next_message_id: i64,
}

impl MockState {
    fn store_document(&mut self, file_name: &str, content: Vec<u8>) -> i64 {
        self.next_message_id += 1;
        let message_id = self.next_message_id;
        let file_id = format!("file-{}", message_id);
        let path = format!("documents/{}", file_name);

        self.documents.insert(
            message_id,
            DocumentRef {
                file_id: file_id.clone(),
                file_name: Some(file_name.to_string()),
            },
        );
        self.file_paths.insert(file_id, path.clone());
        self.blobs.insert(path, content);
        message_id
    }
}

/// Mock remote channel for testing.
#[derive(Clone, Default)]
pub struct MockRemoteChannel {
    state: Arc<Mutex<MockState>>,
}

impl MockRemoteChannel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every call to `operation` fail with a remote API error.
    pub fn with_failure(self, operation: MockOperation) -> Self {
        self.set_failure(operation, true);
        self
    }

    /// Start with a pinned document holding `content`.
    pub fn with_pinned_document(self, file_name: &str, content: Vec<u8>) -> Self {
        {
            let mut state = self.state.lock().unwrap();
            let message_id = state.store_document(file_name, content);
            let document = state.documents.get(&message_id).cloned();
            state.chat.pinned_message = Some(PinnedMessage {
                message_id,
                document,
            });
        }
        self
    }

    /// Start with a pinned message that carries no document.
    pub fn with_pinned_text_message(self) -> Self {
        {
            let mut state = self.state.lock().unwrap();
            state.next_message_id += 1;
            let message_id = state.next_message_id;
            state.chat.pinned_message = Some(PinnedMessage {
                message_id,
                document: None,
            });
        }
        self
    }

    /// Forget the download path of every stored file.
    pub fn with_unresolvable_files(self) -> Self {
        self.state.lock().unwrap().file_paths.clear();
        self
    }

    pub fn set_failure(&self, operation: MockOperation, fail: bool) {
        let mut state = self.state.lock().unwrap();
        if fail {
            state.failures.insert(operation);
        } else {
            state.failures.remove(&operation);
        }
    }

    /// Get all logged calls for assertion.
    pub fn get_calls(&self) -> Vec<MockCall> {
        self.state.lock().unwrap().calls.clone()
    }

    pub fn call_count(&self, operation: MockOperation) -> usize {
        self.state
            .lock()
            .unwrap()
            .calls
            .iter()
            .filter(|c| c.operation == operation)
            .count()
    }

    /// Texts passed to `send_text_message`, in order.
    pub fn sent_texts(&self) -> Vec<String> {
        self.state
            .lock()
            .unwrap()
            .calls
            .iter()
            .filter(|c| c.operation == MockOperation::SendText)
            .map(|c| c.input.clone())
            .collect()
    }

    pub fn pinned_message(&self) -> Option<PinnedMessage> {
        self.state.lock().unwrap().chat.pinned_message.clone()
    }

    /// Content of the document carried by `message_id`.
    pub fn document_content(&self, message_id: i64) -> Option<Vec<u8>> {
        let state = self.state.lock().unwrap();
        let document = state.documents.get(&message_id)?;
        let path = state.file_paths.get(&document.file_id)?;
        state.blobs.get(path).cloned()
    }

    /// Log the call and return the injected failure, if any.
    fn enter(
        &self,
        operation: MockOperation,
        credentials: &Credentials,
        input: &str,
    ) -> Result<std::sync::MutexGuard<'_, MockState>> {
        let mut state = self.state.lock().unwrap();
        state.calls.push(MockCall {
            operation,
            chat_id: credentials.chat_id.clone(),
            input: input.to_string(),
        });
        if state.failures.contains(&operation) {
            return Err(Error::remote_api(operation.method(), 500, "injected failure"));
        }
        Ok(state)
    }
}

#[async_trait]
impl RemoteChannel for MockRemoteChannel {
    async fn send_text_message(&self, credentials: &Credentials, text: &str) -> Result<()> {
        let _state = self.enter(MockOperation::SendText, credentials, text)?;
        Ok(())
    }

    async fn send_document(
        &self,
        credentials: &Credentials,
        content: Vec<u8>,
        filename: &str,
        _caption: &str,
    ) -> Result<SentMessage> {
        let mut state = self.enter(MockOperation::SendDocument, credentials, filename)?;
        let message_id = state.store_document(filename, content);
        Ok(SentMessage { message_id })
    }

    async fn pin_message(&self, credentials: &Credentials, message_id: i64) -> Result<()> {
        let mut state = self.enter(MockOperation::Pin, credentials, &message_id.to_string())?;
        let document = state.documents.get(&message_id).cloned();
        state.chat.pinned_message = Some(PinnedMessage {
            message_id,
            document,
        });
        Ok(())
    }

    async fn get_chat_state(&self, credentials: &Credentials) -> Result<ChatState> {
        let state = self.enter(MockOperation::GetChat, credentials, "")?;
        Ok(state.chat.clone())
    }

    async fn resolve_file_path(
        &self,
        credentials: &Credentials,
        file_id: &str,
    ) -> Result<Option<String>> {
        let state = self.enter(MockOperation::ResolveFile, credentials, file_id)?;
        Ok(state.file_paths.get(file_id).cloned())
    }

    async fn download_file(&self, credentials: &Credentials, file_path: &str) -> Result<Vec<u8>> {
        let state = self.enter(MockOperation::Download, credentials, file_path)?;
        state
            .blobs
            .get(file_path)
            .cloned()
            .ok_or_else(|| Error::remote_api("downloadFile", 404, "Not Found"))
    }
}
