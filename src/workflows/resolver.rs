use tracing::debug;

use super::candidates::{base_title, candidate_patterns, is_season_consistent};
use crate::domain::models::CatalogMatch;
use crate::infra::anilist::AniListClient;
use crate::infra::transport::Transport;

/// Finds the catalog entry for a show title and season.
///
/// Candidates are tried strictly in order and the first season-consistent hit
/// wins. A transport failure ends the search right away.
pub fn resolve<T: Transport>(
    client: &AniListClient<T>,
    title: &str,
    season: u32,
) -> Option<CatalogMatch> {
    let base = base_title(title);
    let patterns = candidate_patterns(title, season);
    println!("Searching AniList with patterns: {patterns:?}");

    for pattern in &patterns {
        println!("Trying: '{pattern}'");

        let media = match client.search_media(pattern) {
            Ok(Some(media)) => media,
            Ok(None) => {
                debug!(%pattern, "no media for pattern");
                continue;
            }
            Err(e) => {
                eprintln!("Error connecting to the AniList API: {e}");
                return None;
            }
        };

        let found_title = media.match_title();
        if season > 1 && *pattern != base && !is_season_consistent(&found_title, season) {
            println!(
                "Result '{found_title}' found, but it doesn't seem to be Season {season}. Skipping."
            );
            continue;
        }

        let found = CatalogMatch {
            id: media.id,
            display_title: media.display_title(),
            recorded_progress: media.recorded_progress(),
        };
        println!(
            "Found '{}' (ID: {}) with {} episodes watched.",
            found.display_title, found.id, found.recorded_progress
        );
        return Some(found);
    }

    println!("Could not find '{title}' (S{season}) with any pattern.");
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infra::transport::fake::ScriptedTransport;
    use serde_json::{json, Value};

    fn media(id: i64, english: Option<&str>, romaji: &str, progress: Option<u32>) -> Value {
        json!({
            "Media": {
                "id": id,
                "title": { "romaji": romaji, "english": english },
                "mediaListEntry": progress.map(|p| json!({ "progress": p })),
            }
        })
    }

    fn not_found() -> Value {
        json!({ "Media": null })
    }

    #[test]
    fn test_first_candidate_accepted() {
        let transport = ScriptedTransport::new().reply(media(
            101,
            Some("Example Show Season 2"),
            "Example Show 2",
            Some(10),
        ));
        let client = AniListClient::new(transport);

        let found = resolve(&client, "Example Show Season 2", 2).unwrap();
        assert_eq!(
            found,
            CatalogMatch {
                id: 101,
                display_title: "Example Show 2".to_string(),
                recorded_progress: 10,
            }
        );
        assert_eq!(
            client.transport().searched_for(),
            vec!["Example Show Season 2"]
        );
    }

    #[test]
    fn test_inconsistent_result_moves_to_next_candidate() {
        let transport = ScriptedTransport::new()
            .reply(media(1, Some("Example Series"), "Example Series", Some(24)))
            .reply(not_found())
            .reply(media(3, None, "Example Series III", None));
        let client = AniListClient::new(transport);

        let found = resolve(&client, "Example Series", 3).unwrap();
        assert_eq!(found.id, 3);
        assert_eq!(found.recorded_progress, 0);
        assert_eq!(
            client.transport().searched_for(),
            vec![
                "Example Series Season 3",
                "Example Series 3",
                "Example Series III"
            ]
        );
    }

    #[test]
    fn test_english_title_takes_precedence_in_check() {
        let transport = ScriptedTransport::new()
            .reply(media(
                5,
                Some("Example Series"),
                "Example Series 2nd Season",
                None,
            ))
            .reply(media(6, Some("Example Series 2nd Season"), "Zoku", Some(3)));
        let client = AniListClient::new(transport);

        let found = resolve(&client, "Example Series", 2).unwrap();
        assert_eq!(found.id, 6);
        assert_eq!(found.recorded_progress, 3);
    }

    #[test]
    fn test_bare_base_title_skips_season_check() {
        let transport = ScriptedTransport::new()
            .reply(not_found())
            .reply(not_found())
            .reply(not_found())
            .reply(not_found())
            .reply(media(77, Some("Example Series"), "Example Series", Some(4)));
        let client = AniListClient::new(transport);

        let found = resolve(&client, "Example Series", 3).unwrap();
        assert_eq!(found.id, 77);
        assert_eq!(client.transport().searched_for().len(), 5);
    }

    #[test]
    fn test_raw_title_with_inline_season_is_still_checked() {
        // Lower-case "season" keeps the raw title distinct from the first
        // candidate, and it is not the base title, so the check still applies.
        let transport = ScriptedTransport::new()
            .reply(not_found())
            .reply(not_found())
            .reply(not_found())
            .reply(not_found())
            .reply(media(8, Some("Example Show"), "Example Show", Some(1)));
        let client = AniListClient::new(transport);

        assert_eq!(resolve(&client, "Example Show season 2", 2), None);
        assert_eq!(
            client.transport().searched_for().last().map(String::as_str),
            Some("Example Show season 2")
        );
    }

    #[test]
    fn test_first_season_takes_any_match() {
        let transport =
            ScriptedTransport::new().reply(media(9, None, "Example Show", Some(12)));
        let client = AniListClient::new(transport);

        let found = resolve(&client, "Example Show", 1).unwrap();
        assert_eq!(found.recorded_progress, 12);
    }

    #[test]
    fn test_all_candidates_miss() {
        let transport = ScriptedTransport::new()
            .reply(not_found())
            .reply_errors(Some(not_found()), &["Not Found."])
            .reply(media(1, Some("Other Thing"), "Other Thing", None))
            .reply(not_found())
            .reply(not_found());
        let client = AniListClient::new(transport);

        assert_eq!(resolve(&client, "Example Show", 3), None);
        assert_eq!(client.transport().searched_for().len(), 5);
    }

    #[test]
    fn test_transport_failure_aborts_search() {
        let transport = ScriptedTransport::new()
            .fail(502)
            .reply(media(1, Some("Example Show 2"), "Example Show 2", None));
        let client = AniListClient::new(transport);

        assert_eq!(resolve(&client, "Example Show", 2), None);
        assert_eq!(
            client.transport().searched_for(),
            vec!["Example Show Season 2"]
        );
    }
}
