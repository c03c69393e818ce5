//! Bot API client implementing [`RemoteChannel`].

use async_trait::async_trait;
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::time::{Duration, Instant};
use tracing::{debug, field, info, instrument, warn, Span};

use readlater_core::defaults::TELEGRAM_PARSE_MODE;
use readlater_core::{logging, ChatState, Credentials, Error, RemoteChannel, Result, SentMessage};

use crate::config::TelegramConfig;
use crate::types::*;

/// Telegram Bot API client.
///
/// Holds no credentials; every call takes them from the caller, since they
/// live in the key-value namespace and may change between calls.
#[derive(Clone)]
pub struct TelegramClient {
    client: Client,
    config: TelegramConfig,
}

impl TelegramClient {
    /// Create a client with the given configuration.
    pub fn new(config: TelegramConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| Error::Config(format!("Failed to create HTTP client: {}", e)))?;

        info!(
            subsystem = "telegram",
            component = "client",
            base_url = %config.base_url,
            timeout_secs = config.timeout_secs,
            "Initializing Telegram client"
        );

        Ok(Self { client, config })
    }

    /// Create from environment variables.
    pub fn from_env() -> Result<Self> {
        Self::new(TelegramConfig::from_env())
    }

    pub fn with_defaults() -> Result<Self> {
        Self::new(TelegramConfig::default())
    }

    /// Get the current configuration.
    pub fn config(&self) -> &TelegramConfig {
        &self.config
    }

    fn method_url(&self, credentials: &Credentials, method: &str) -> String {
        format!(
            "{}/bot{}/{}",
            self.config.base_url.trim_end_matches('/'),
            credentials.bot_token,
            method
        )
    }

    fn file_url(&self, credentials: &Credentials, file_path: &str) -> String {
        format!(
            "{}/file/bot{}/{}",
            self.config.base_url.trim_end_matches('/'),
            credentials.bot_token,
            file_path.trim_start_matches('/')
        )
    }

    /// POST a JSON body to a Bot API method and unwrap the envelope.
    async fn call<B, T>(&self, credentials: &Credentials, method: &str, body: &B) -> Result<T>
    where
        B: Serialize + ?Sized + Sync,
        T: DeserializeOwned + Send,
    {
        let response = self
            .client
            .post(self.method_url(credentials, method))
            .json(body)
            .send()
            .await
            .map_err(transport_error)?;

        unwrap_envelope(method, response).await
    }
}

/// Transport failures never carry the request URL, which embeds the bot token.
fn transport_error(e: reqwest::Error) -> Error {
    Error::Request(e.without_url().to_string())
}

/// Decode the Bot API envelope, mapping `ok=false` and HTTP failures to
/// [`Error::RemoteApi`].
async fn unwrap_envelope<T>(method: &str, response: Response) -> Result<T>
where
    T: DeserializeOwned + Send,
{
    let status = response.status();
    let body = response.text().await.map_err(transport_error)?;

    let envelope: ApiResponse<T> = match serde_json::from_str(&body) {
        Ok(envelope) => envelope,
        Err(e) if status.is_success() => {
            return Err(Error::Serialization(format!(
                "Failed to parse {} response: {}",
                method, e
            )))
        }
        Err(_) => {
            return Err(Error::remote_api(
                method,
                status.as_u16(),
                format!("HTTP {}", status),
            ))
        }
    };

    if !envelope.ok || !status.is_success() {
        let code = envelope.error_code.unwrap_or(status.as_u16());
        let description = envelope
            .description
            .unwrap_or_else(|| "no description".to_string());
        warn!(
            subsystem = "telegram",
            op = method,
            status = code,
            error = %description,
            "Bot API call failed"
        );
        return Err(Error::remote_api(method, code, description));
    }

    envelope
        .result
        .ok_or_else(|| Error::remote_api(method, status.as_u16(), "response carried no result"))
}

fn record_duration(start: Instant) {
    Span::current().record(logging::DURATION_MS, start.elapsed().as_millis() as u64);
}

#[async_trait]
impl RemoteChannel for TelegramClient {
    #[instrument(
        skip(self, credentials, text),
        fields(subsystem = "telegram", component = "client", op = "sendMessage", chat_id = %credentials.chat_id, duration_ms = field::Empty)
    )]
    async fn send_text_message(&self, credentials: &Credentials, text: &str) -> Result<()> {
        let start = Instant::now();
        let request = SendMessageRequest {
            chat_id: &credentials.chat_id,
            text,
            parse_mode: TELEGRAM_PARSE_MODE,
        };
        let _: serde_json::Value = self.call(credentials, "sendMessage", &request).await?;
        record_duration(start);
        debug!(text_len = text.len(), "Message sent");
        Ok(())
    }

    #[instrument(
        skip(self, credentials, content, caption),
        fields(subsystem = "telegram", component = "client", op = "sendDocument", chat_id = %credentials.chat_id, byte_len = content.len(), message_id = field::Empty, duration_ms = field::Empty)
    )]
    async fn send_document(
        &self,
        credentials: &Credentials,
        content: Vec<u8>,
        filename: &str,
        caption: &str,
    ) -> Result<SentMessage> {
        let start = Instant::now();
        let document = reqwest::multipart::Part::bytes(content)
            .file_name(filename.to_string())
            .mime_str("application/json")
            .map_err(|e| Error::Internal(format!("Failed to create multipart: {}", e)))?;

        let form = reqwest::multipart::Form::new()
            .text("chat_id", credentials.chat_id.clone())
            .part("document", document)
            .text("caption", caption.to_string());

        let response = self
            .client
            .post(self.method_url(credentials, "sendDocument"))
            .multipart(form)
            .send()
            .await
            .map_err(transport_error)?;

        let sent: SentMessage = unwrap_envelope("sendDocument", response).await?;
        Span::current().record(logging::MESSAGE_ID, sent.message_id);
        record_duration(start);
        info!("Document uploaded");
        Ok(sent)
    }

    #[instrument(
        skip(self, credentials),
        fields(subsystem = "telegram", component = "client", op = "pinChatMessage", chat_id = %credentials.chat_id, duration_ms = field::Empty)
    )]
    async fn pin_message(&self, credentials: &Credentials, message_id: i64) -> Result<()> {
        let start = Instant::now();
        let request = PinMessageRequest {
            chat_id: &credentials.chat_id,
            message_id,
        };
        let _: bool = self.call(credentials, "pinChatMessage", &request).await?;
        record_duration(start);
        debug!("Message pinned");
        Ok(())
    }

    #[instrument(
        skip(self, credentials),
        fields(subsystem = "telegram", component = "client", op = "getChat", chat_id = %credentials.chat_id, duration_ms = field::Empty)
    )]
    async fn get_chat_state(&self, credentials: &Credentials) -> Result<ChatState> {
        let start = Instant::now();
        let request = GetChatRequest {
            chat_id: &credentials.chat_id,
        };
        let state: ChatState = self.call(credentials, "getChat", &request).await?;
        record_duration(start);
        debug!(has_pin = state.pinned_message.is_some(), "Chat state fetched");
        Ok(state)
    }

    #[instrument(
        skip(self, credentials),
        fields(subsystem = "telegram", component = "client", op = "getFile", duration_ms = field::Empty)
    )]
    async fn resolve_file_path(
        &self,
        credentials: &Credentials,
        file_id: &str,
    ) -> Result<Option<String>> {
        let start = Instant::now();
        let info: FileInfo = self
            .call(credentials, "getFile", &GetFileRequest { file_id })
            .await?;
        record_duration(start);
        Ok(info.file_path.filter(|p| !p.is_empty()))
    }

    #[instrument(
        skip(self, credentials),
        fields(subsystem = "telegram", component = "client", op = "downloadFile", byte_len = field::Empty, duration_ms = field::Empty)
    )]
    async fn download_file(&self, credentials: &Credentials, file_path: &str) -> Result<Vec<u8>> {
        let start = Instant::now();
        let response = self
            .client
            .get(self.file_url(credentials, file_path))
            .send()
            .await
            .map_err(transport_error)?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::remote_api(
                "downloadFile",
                status.as_u16(),
                format!("HTTP {}", status),
            ));
        }

        let bytes = response.bytes().await.map_err(transport_error)?;
        Span::current().record(logging::BYTE_LEN, bytes.len() as u64);
        record_duration(start);
        Ok(bytes.to_vec())
    }
}
