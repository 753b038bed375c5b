//! YouTube Music API client.
//!
//! Talks to the reverse-engineered innertube endpoints that back
//! music.youtube.com, authenticated by replaying stored browser request
//! headers (see [`crate::auth`]).  Only the three operations the importer
//! needs are implemented: song search, playlist creation and batched
//! playlist item addition.
//!
//! The orchestrator consumes the [`MusicService`] trait so tests can swap
//! in a scripted fake without any network.

use std::error::Error;

use serde_json::{json, Value};

use crate::auth::AuthHeaders;

const BASE_URL: &str = "https://music.youtube.com/youtubei/v1";
const YTM_PARAMS: &str = "?alt=json";

/// Innertube web-remix client context sent with every request body.
const CLIENT_NAME: &str = "WEB_REMIX";
const CLIENT_VERSION: &str = "1.20240101.00.00";

/// Search `params` restricting results to the "songs" category.
const SEARCH_PARAMS_SONGS: &str = "EgWKAQIIAWoMEA4QChADEAQQCRAF";

/// One search result proposed by the remote service.
#[derive(Debug, Clone)]
pub struct SearchResult {
    pub title: String,
    pub video_id: String,
    /// Credited artist names, in display order.
    pub artists: Vec<String>,
}

/// The remote-service surface the import orchestrator consumes.
pub trait MusicService {
    /// Search the "songs" category; results in ranked order.
    fn search(&self, query: &str) -> Result<Vec<SearchResult>, Box<dyn Error>>;

    /// Create a playlist and return its id.
    fn create_playlist(&self, name: &str, description: &str) -> Result<String, Box<dyn Error>>;

    /// Add items to an existing playlist in one call.
    fn add_playlist_items(
        &self,
        playlist_id: &str,
        video_ids: &[String],
        allow_duplicates: bool,
    ) -> Result<(), Box<dyn Error>>;
}

/// An authenticated innertube session.
pub struct YtMusicSession {
    agent: ureq::Agent,
    headers: AuthHeaders,
}

impl YtMusicSession {
    /// Establish a session from stored headers, validating them against the
    /// cheap `guide` endpoint.  Rejected or expired credentials fail here,
    /// before any import work starts.
    pub fn connect(headers: AuthHeaders) -> Result<Self, Box<dyn Error>> {
        let session = YtMusicSession {
            agent: ureq::Agent::new(),
            headers,
        };

        session
            .post("guide", json!({}))
            .map_err(|e| format!("authentication rejected: {}", e))?;

        Ok(session)
    }

    /// POST a JSON body (plus the innertube context) to an endpoint,
    /// replaying all stored auth headers.
    fn post(&self, endpoint: &str, mut body: Value) -> Result<Value, Box<dyn Error>> {
        let url = format!("{}/{}{}", BASE_URL, endpoint, YTM_PARAMS);

        body["context"] = json!({
            "client": {
                "clientName": CLIENT_NAME,
                "clientVersion": CLIENT_VERSION,
            },
            "user": {},
        });

        let mut request = self.agent.post(&url);
        for (key, value) in self.headers.iter() {
            request = request.set(key, value);
        }

        let resp: Value = request.send_json(body)?.into_json()?;
        Ok(resp)
    }
}

impl MusicService for YtMusicSession {
    fn search(&self, query: &str) -> Result<Vec<SearchResult>, Box<dyn Error>> {
        let body = json!({
            "query": query,
            "params": SEARCH_PARAMS_SONGS,
        });
        let resp = self.post("search", body)?;
        Ok(parse_search_response(&resp))
    }

    fn create_playlist(&self, name: &str, description: &str) -> Result<String, Box<dyn Error>> {
        let body = json!({
            "title": name,
            "description": description,
            "privacyStatus": "PRIVATE",
        });
        let resp = self.post("playlist/create", body)?;

        resp.get("playlistId")
            .and_then(|v| v.as_str())
            .map(String::from)
            .ok_or_else(|| "playlist creation returned no playlistId".into())
    }

    fn add_playlist_items(
        &self,
        playlist_id: &str,
        video_ids: &[String],
        allow_duplicates: bool,
    ) -> Result<(), Box<dyn Error>> {
        let actions: Vec<Value> = video_ids
            .iter()
            .map(|id| {
                let mut action = json!({
                    "action": "ACTION_ADD_VIDEO",
                    "addedVideoId": id,
                });
                if allow_duplicates {
                    action["dedupeOption"] = json!("DEDUPE_OPTION_SKIP");
                }
                action
            })
            .collect();

        let body = json!({
            "playlistId": playlist_id,
            "actions": actions,
        });
        let resp = self.post("browse/edit_playlist", body)?;

        match resp.get("status").and_then(|v| v.as_str()) {
            Some("STATUS_SUCCEEDED") => Ok(()),
            Some(status) => Err(format!("edit_playlist failed with status {}", status).into()),
            None => Err("edit_playlist returned no status".into()),
        }
    }
}

// ── Response parsing ─────────────────────────────────────────────────────────

/// Walk the tabbed search response down to its music shelf and extract one
/// [`SearchResult`] per list item, preserving ranking order.  Anything the
/// response omits (no shelf, malformed item) degrades to fewer results, not
/// an error.
fn parse_search_response(resp: &Value) -> Vec<SearchResult> {
    let sections = resp
        .pointer("/contents/tabbedSearchResultsRenderer/tabs/0/tabRenderer/content/sectionListRenderer/contents")
        .and_then(|v| v.as_array());

    let mut results = Vec::new();
    let Some(sections) = sections else {
        return results;
    };

    for section in sections {
        let Some(items) = section
            .pointer("/musicShelfRenderer/contents")
            .and_then(|v| v.as_array())
        else {
            continue;
        };

        for item in items {
            let Some(renderer) = item.get("musicResponsiveListItemRenderer") else {
                continue;
            };
            if let Some(result) = parse_shelf_item(renderer) {
                results.push(result);
            }
        }
    }

    results
}

fn parse_shelf_item(renderer: &Value) -> Option<SearchResult> {
    let video_id = renderer
        .pointer("/playlistItemData/videoId")
        .and_then(|v| v.as_str())?
        .to_string();

    let title = renderer
        .pointer("/flexColumns/0/musicResponsiveListItemFlexColumnRenderer/text/runs/0/text")
        .and_then(|v| v.as_str())?
        .to_string();

    let runs = renderer
        .pointer("/flexColumns/1/musicResponsiveListItemFlexColumnRenderer/text/runs")
        .and_then(|v| v.as_array());

    // Artist runs carry a channel browse endpoint ("UC…"); separator runs
    // (" • ", album links, durations) do not.
    let mut artists = Vec::new();
    if let Some(runs) = runs {
        for run in runs {
            let browse_id = run
                .pointer("/navigationEndpoint/browseEndpoint/browseId")
                .and_then(|v| v.as_str());
            if let (Some(id), Some(text)) = (browse_id, run.get("text").and_then(|v| v.as_str())) {
                if id.starts_with("UC") {
                    artists.push(text.to_string());
                }
            }
        }
        // Some responses carry plain-text artist runs with no endpoint.
        if artists.is_empty() {
            if let Some(text) = runs.first().and_then(|r| r.get("text")).and_then(|v| v.as_str()) {
                if text != " • " {
                    artists.push(text.to_string());
                }
            }
        }
    }

    Some(SearchResult {
        title,
        video_id,
        artists,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn shelf_item(video_id: &str, title: &str, artists: &[&str]) -> Value {
        let mut runs = Vec::new();
        for (i, artist) in artists.iter().enumerate() {
            if i > 0 {
                runs.push(json!({"text": " • "}));
            }
            runs.push(json!({
                "text": artist,
                "navigationEndpoint": {"browseEndpoint": {"browseId": format!("UC{}", i)}},
            }));
        }
        json!({
            "musicResponsiveListItemRenderer": {
                "playlistItemData": {"videoId": video_id},
                "flexColumns": [
                    {"musicResponsiveListItemFlexColumnRenderer": {"text": {"runs": [{"text": title}]}}},
                    {"musicResponsiveListItemFlexColumnRenderer": {"text": {"runs": runs}}},
                ],
            }
        })
    }

    fn search_response(items: Vec<Value>) -> Value {
        json!({
            "contents": {
                "tabbedSearchResultsRenderer": {
                    "tabs": [{
                        "tabRenderer": {
                            "content": {
                                "sectionListRenderer": {
                                    "contents": [{"musicShelfRenderer": {"contents": items}}]
                                }
                            }
                        }
                    }]
                }
            }
        })
    }

    #[test]
    fn test_parse_search_preserves_order_and_artists() {
        let resp = search_response(vec![
            shelf_item("vid1", "Song One", &["Artist A", "Artist B"]),
            shelf_item("vid2", "Song Two", &["Artist C"]),
        ]);

        let results = parse_search_response(&resp);
        assert_eq!(results.len(), 2);
        assert_eq!(results[0].video_id, "vid1");
        assert_eq!(results[0].title, "Song One");
        assert_eq!(results[0].artists, vec!["Artist A", "Artist B"]);
        assert_eq!(results[1].video_id, "vid2");
    }

    #[test]
    fn test_parse_search_skips_malformed_items() {
        let resp = search_response(vec![
            json!({"musicResponsiveListItemRenderer": {"flexColumns": []}}),
            shelf_item("vid9", "Valid", &["X"]),
        ]);

        let results = parse_search_response(&resp);
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].video_id, "vid9");
    }

    #[test]
    fn test_parse_search_empty_response() {
        assert!(parse_search_response(&json!({})).is_empty());
        assert!(parse_search_response(&search_response(vec![])).is_empty());
    }
}
