use std::fmt;

/// A single "episode watched" notification from the media server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WatchEvent {
    pub title: String,
    pub season: u32,
    pub episode: u32,
}

/// The catalog entry a watch event resolved to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogMatch {
    pub id: i64,
    pub display_title: String,
    /// Episodes already marked watched on the list, 0 when there is no entry.
    pub recorded_progress: u32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UpdateOutcome {
    AlreadyCurrent,
    Updated { progress: u32 },
    Rejected { errors: Vec<String> },
    TransportFailure { message: String },
}

impl fmt::Display for WatchEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "S{:02}E{:02} of '{}'",
            self.season, self.episode, self.title
        )
    }
}
