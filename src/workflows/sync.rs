use crate::domain::models::{UpdateOutcome, WatchEvent};
use crate::infra::anilist::AniListClient;
use crate::infra::transport::Transport;

use super::{progress, resolver};

/// One watch event end to end. `None` when no catalog entry was accepted.
pub fn sync_event<T: Transport>(
    client: &AniListClient<T>,
    event: &WatchEvent,
) -> Option<UpdateOutcome> {
    println!("Media server reported watch of {event}.");

    let found = resolver::resolve(client, &event.title, event.season)?;

    let outcome = progress::apply(client, found.id, event.episode, found.recorded_progress);
    match &outcome {
        UpdateOutcome::AlreadyCurrent => {
            println!("Progress on AniList is already up-to-date or ahead. No action needed.")
        }
        UpdateOutcome::Updated { progress } => {
            println!("Success! Progress updated to episode {progress} on AniList.")
        }
        UpdateOutcome::Rejected { errors } => {
            eprintln!("Failed to update progress on AniList: {errors:?}")
        }
        UpdateOutcome::TransportFailure { message } => {
            eprintln!("Error connecting to the AniList API during update: {message}")
        }
    }
    Some(outcome)
}
