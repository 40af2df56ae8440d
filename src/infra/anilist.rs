use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::{json, Value};

use super::transport::{GraphQlRequest, GraphQlResponse, Transport, TransportError};

const SEARCH_MEDIA_QUERY: &str = r#"
query ($search: String) {
    Media (search: $search, type: ANIME) {
        id
        title { romaji english }
        mediaListEntry { progress }
    }
}
"#;

const SAVE_PROGRESS_MUTATION: &str = r#"
mutation ($mediaId: Int, $progress: Int) {
    SaveMediaListEntry (mediaId: $mediaId, progress: $progress, status: CURRENT) {
        id
        progress
        status
    }
}
"#;

const VIEWER_QUERY: &str = r#"
query {
    Viewer { id name }
}
"#;

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct Media {
    pub id: i64,
    pub title: MediaTitle,
    #[serde(rename = "mediaListEntry")]
    pub list_entry: Option<ListEntry>,
}

#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
pub struct MediaTitle {
    pub romaji: Option<String>,
    pub english: Option<String>,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct ListEntry {
    pub progress: Option<u32>,
}

impl Media {
    /// Title used for season matching: English first, romaji otherwise.
    pub fn match_title(&self) -> String {
        self.title
            .english
            .as_deref()
            .filter(|t| !t.is_empty())
            .or(self.title.romaji.as_deref())
            .unwrap_or_default()
            .to_lowercase()
    }

    pub fn display_title(&self) -> String {
        self.title
            .romaji
            .clone()
            .or_else(|| self.title.english.clone())
            .unwrap_or_else(|| format!("#{}", self.id))
    }

    pub fn recorded_progress(&self) -> u32 {
        self.list_entry
            .as_ref()
            .and_then(|entry| entry.progress)
            .unwrap_or(0)
    }
}

#[derive(Debug, Deserialize)]
struct SearchData {
    #[serde(rename = "Media")]
    media: Option<Media>,
}

#[derive(Debug, Deserialize)]
struct SaveData {
    #[serde(rename = "SaveMediaListEntry")]
    entry: Option<SavedEntry>,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct SavedEntry {
    pub id: i64,
    pub progress: Option<u32>,
    pub status: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ViewerData {
    #[serde(rename = "Viewer")]
    viewer: Option<Viewer>,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct Viewer {
    pub id: i64,
    pub name: String,
}

/// Result of a call that reached the service and got a GraphQL answer.
#[derive(Debug, Clone, PartialEq)]
pub enum Reply<T> {
    Data(T),
    Errors(Vec<String>),
}

pub struct AniListClient<T: Transport> {
    transport: T,
}

impl<T: Transport> AniListClient<T> {
    pub fn new(transport: T) -> Self {
        Self { transport }
    }

    #[cfg(test)]
    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Full-text anime search. `None` when the catalog has nothing for `search`,
    /// including AniList's "Not Found." error reply.
    pub fn search_media(&self, search: &str) -> Result<Option<Media>, TransportError> {
        let response = self.send(SEARCH_MEDIA_QUERY, json!({ "search": search }))?;
        let data: Option<SearchData> = decode(response.data)?;
        Ok(data.and_then(|d| d.media))
    }

    pub fn save_progress(
        &self,
        media_id: i64,
        progress: u32,
    ) -> Result<Reply<SavedEntry>, TransportError> {
        let response = self.send(
            SAVE_PROGRESS_MUTATION,
            json!({ "mediaId": media_id, "progress": progress }),
        )?;
        let errors = response.error_messages();
        let data: Option<SaveData> = decode(response.data)?;
        Ok(match data.and_then(|d| d.entry) {
            Some(entry) => Reply::Data(entry),
            None => Reply::Errors(errors),
        })
    }

    pub fn viewer(&self) -> Result<Reply<Viewer>, TransportError> {
        let response = self.send(VIEWER_QUERY, json!({}))?;
        let errors = response.error_messages();
        if !errors.is_empty() {
            return Ok(Reply::Errors(errors));
        }
        let data: Option<ViewerData> = decode(response.data)?;
        Ok(match data.and_then(|d| d.viewer) {
            Some(viewer) => Reply::Data(viewer),
            None => Reply::Errors(vec!["response carried no viewer".to_string()]),
        })
    }

    fn send(&self, query: &str, variables: Value) -> Result<GraphQlResponse, TransportError> {
        self.transport.execute(&GraphQlRequest {
            query: query.to_string(),
            variables,
        })
    }
}

fn decode<D: DeserializeOwned>(data: Option<Value>) -> Result<Option<D>, TransportError> {
    data.map(serde_json::from_value::<D>)
        .transpose()
        .map_err(TransportError::from)
}
