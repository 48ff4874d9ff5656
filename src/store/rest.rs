//! PostgREST client for the hosted notes table.
use std::time::Duration;

use async_trait::async_trait;
use log::{debug, info, trace};
use reqwest::{
    header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION},
    Client, RequestBuilder, Response,
};

use super::NoteStore;
use crate::{Config, NewNote, Note, NoteChanges, NoteError, Result};

const REST_PATH: &str = "rest/v1";
const SINGLE_OBJECT: &str = "application/vnd.pgrst.object+json";

/// Talks to a hosted Postgres table through its REST gateway.
#[derive(Debug, Clone)]
pub struct RestNoteStore {
    client: Client,
    table_url: String,
}

impl RestNoteStore {
    /// Builds a store client from the application configuration.
    pub fn new(config: &Config) -> Result<Self> {
        config.validate()?;

        let mut headers = HeaderMap::new();
        if let Some(key) = &config.api_key {
            headers.insert("apikey", header_value(key)?);
            headers.insert(AUTHORIZATION, header_value(&format!("Bearer {}", key))?);
        }

        let client = Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .default_headers(headers)
            .build()?;

        let table_url = format!(
            "{}/{}/{}",
            config.store_url.trim().trim_end_matches('/'),
            REST_PATH,
            config.table.trim()
        );

        info!("Initializing REST note store: url={}", table_url);

        Ok(Self { client, table_url })
    }

    /// URL of the notes table endpoint.
    pub fn table_url(&self) -> &str {
        &self.table_url
    }

    fn by_id(&self, builder: RequestBuilder, id: &str) -> RequestBuilder {
        builder.query(&[("id", format!("eq.{}", id))])
    }
}

fn header_value(value: &str) -> Result<HeaderValue> {
    HeaderValue::from_str(value).map_err(|e| NoteError::ConfigError {
        message: format!("api_key is not a valid header value: {}", e),
    })
}

/// Turns a non-success response into a `Store` error carrying the body.
async fn check_status(response: Response) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    Err(NoteError::Store {
        status: status.as_u16(),
        message: body,
    })
}

#[async_trait]
impl NoteStore for RestNoteStore {
    async fn list_notes(&self) -> Result<Vec<Note>> {
        debug!("GET {}", self.table_url);
        let response = self
            .client
            .get(&self.table_url)
            .query(&[("select", "*"), ("order", "created_at.desc")])
            .send()
            .await?;

        let notes: Vec<Note> = check_status(response).await?.json().await?;
        trace!("Store returned {} notes", notes.len());
        Ok(notes)
    }

    async fn insert_note(&self, note: &NewNote) -> Result<Note> {
        debug!("POST {}", self.table_url);
        let response = self
            .client
            .post(&self.table_url)
            .header("Prefer", "return=representation")
            .header(ACCEPT, SINGLE_OBJECT)
            .json(note)
            .send()
            .await?;

        let created: Note = check_status(response).await?.json().await?;
        trace!("Store assigned id {}", created.id);
        Ok(created)
    }

    async fn update_note(&self, id: &str, changes: &NoteChanges) -> Result<()> {
        debug!("PATCH {} id={}", self.table_url, id);
        let response = self
            .by_id(self.client.patch(&self.table_url), id)
            .header("Prefer", "return=minimal")
            .json(changes)
            .send()
            .await?;

        check_status(response).await?;
        Ok(())
    }

    async fn delete_note(&self, id: &str) -> Result<()> {
        debug!("DELETE {} id={}", self.table_url, id);
        let response = self
            .by_id(self.client.delete(&self.table_url), id)
            .send()
            .await?;

        check_status(response).await?;
        Ok(())
    }
}
