use tracing::debug;

use crate::domain::models::UpdateOutcome;
use crate::infra::anilist::{AniListClient, Reply};
use crate::infra::transport::Transport;

/// Moves list progress forward to `observed_episode`, never backwards.
pub fn apply<T: Transport>(
    client: &AniListClient<T>,
    media_id: i64,
    observed_episode: u32,
    recorded_progress: u32,
) -> UpdateOutcome {
    if observed_episode <= recorded_progress {
        return UpdateOutcome::AlreadyCurrent;
    }
    println!(
        "New episode watched ({observed_episode}) is greater than recorded progress ({recorded_progress}). Updating..."
    );

    match client.save_progress(media_id, observed_episode) {
        Ok(Reply::Data(entry)) => {
            debug!(entry_id = entry.id, status = ?entry.status, "list entry saved");
            UpdateOutcome::Updated {
                progress: entry.progress.unwrap_or(observed_episode),
            }
        }
        Ok(Reply::Errors(errors)) => UpdateOutcome::Rejected { errors },
        Err(e) => UpdateOutcome::TransportFailure {
            message: e.to_string(),
        },
    }
}
