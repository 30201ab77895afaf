use std::path::PathBuf;

use serde::Deserialize;

use crate::SourceError;
use crate::deck::{Deck, DeckFile};

// Relative layout shared by both source kinds.
const TEMPLATE_PATH: &str = "templates/card.html";
const DOCUMENT_PATH: &str = "cards.json";
const SAVE_PATH: &str = "save_cards";

/// Where the card template and the card document live.
#[derive(Debug, Clone)]
pub enum DeckSource {
    /// A dataset server speaking the fetch/save protocol.
    Server { base: String, client: reqwest::Client },
    /// A local site directory with the same relative layout. Saves rewrite
    /// `cards.json` in place.
    Dir(PathBuf),
}

/// The two resources fetched before anything renders.
#[derive(Debug, Clone)]
pub struct LoadedResources {
    pub template: String,
    pub deck: Deck,
}

/// Reply shape of the save endpoint.
#[derive(Debug, Deserialize)]
struct SaveReply {
    status: String,
    message: Option<String>,
}

fn join_url(base: &str, rel: &str) -> String {
    format!("{}/{}", base.trim_end_matches('/'), rel)
}

impl DeckSource {
    pub fn server(base: impl Into<String>) -> Self {
        DeckSource::Server {
            base: base.into(),
            client: reqwest::Client::new(),
        }
    }

    pub fn dir(path: impl Into<PathBuf>) -> Self {
        DeckSource::Dir(path.into())
    }

    pub fn describe(&self) -> String {
        match self {
            DeckSource::Server { base, .. } => base.clone(),
            DeckSource::Dir(path) => path.display().to_string(),
        }
    }

    /// Base URL under which the stylesheets and card images are reachable,
    /// with a trailing slash. Exported print sheets carry this as their
    /// `<base>`, so a sheet opened from anywhere still finds its assets.
    pub fn asset_base(&self) -> String {
        match self {
            DeckSource::Server { base, .. } => format!("{}/", base.trim_end_matches('/')),
            DeckSource::Dir(dir) => {
                let abs = std::fs::canonicalize(dir).unwrap_or_else(|_| dir.clone());
                let abs = abs.display().to_string();
                format!("file://{}/", abs.trim_end_matches('/'))
            }
        }
    }

    /// Fetches the card template and the card document concurrently. Both
    /// must succeed; on the first failure the whole load fails and nothing
    /// partial is kept. There is deliberately no timeout: a stalled source
    /// keeps the caller waiting rather than guessing.
    pub async fn load(&self) -> Result<LoadedResources, SourceError> {
        let (template, document) = match self {
            DeckSource::Server { base, client } => tokio::try_join!(
                fetch_text(client, join_url(base, TEMPLATE_PATH), "card template"),
                fetch_text(client, join_url(base, DOCUMENT_PATH), "card data"),
            )?,
            DeckSource::Dir(dir) => tokio::try_join!(
                read_text(dir.join(TEMPLATE_PATH)),
                read_text(dir.join(DOCUMENT_PATH)),
            )?,
        };
        let deck = Deck::from_document(&document)?;
        Ok(LoadedResources { template, deck })
    }

    /// Writes the full document back to the source.
    ///
    /// Server mode POSTs it to the save endpoint and accepts only a reply
    /// whose status field is `"success"`; the returned string is the
    /// server's message. Directory mode rewrites `cards.json` pretty-printed.
    /// No retry in either mode; the caller's in-memory state is untouched.
    pub async fn save(&self, file: &DeckFile) -> Result<String, SourceError> {
        match self {
            DeckSource::Server { base, client } => {
                let response = client
                    .post(join_url(base, SAVE_PATH))
                    .json(file)
                    .send()
                    .await?;
                let status = response.status();
                let reply: SaveReply = match response.json().await {
                    Ok(reply) => reply,
                    Err(_) => {
                        return Err(SourceError::SaveRejected(format!(
                            "server replied with status {status}"
                        )));
                    }
                };
                if status.is_success() && reply.status == "success" {
                    Ok(reply
                        .message
                        .unwrap_or_else(|| "Cards saved successfully".to_string()))
                } else {
                    Err(SourceError::SaveRejected(reply.message.unwrap_or_else(
                        || format!("server replied with status {status}"),
                    )))
                }
            }
            DeckSource::Dir(dir) => {
                let text = serde_json::to_string_pretty(file)?;
                tokio::fs::write(dir.join(DOCUMENT_PATH), text).await?;
                Ok("Cards saved successfully".to_string())
            }
        }
    }
}

async fn fetch_text(
    client: &reqwest::Client,
    url: String,
    what: &'static str,
) -> Result<String, SourceError> {
    let response = client.get(&url).send().await?;
    if !response.status().is_success() {
        return Err(SourceError::FetchStatus {
            what,
            status: response.status(),
        });
    }
    Ok(response.text().await?)
}

async fn read_text(path: PathBuf) -> Result<String, SourceError> {
    Ok(tokio::fs::read_to_string(path).await?)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn site_with(template: &str, document: &str) -> tempfile::TempDir {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir_all(dir.path().join("templates")).unwrap();
        std::fs::write(dir.path().join(TEMPLATE_PATH), template).unwrap();
        std::fs::write(dir.path().join(DOCUMENT_PATH), document).unwrap();
        dir
    }

    #[test]
    fn join_url_tolerates_trailing_slash() {
        assert_eq!(
            join_url("http://localhost:8000/", "cards.json"),
            "http://localhost:8000/cards.json"
        );
        assert_eq!(
            join_url("http://localhost:8000", "cards.json"),
            "http://localhost:8000/cards.json"
        );
    }

    #[test]
    fn asset_base_normalizes_both_source_kinds() {
        assert_eq!(
            DeckSource::server("http://localhost:8000").asset_base(),
            "http://localhost:8000/"
        );
        assert_eq!(
            DeckSource::server("http://localhost:8000/").asset_base(),
            "http://localhost:8000/"
        );

        let dir = tempfile::tempdir().unwrap();
        let base = DeckSource::dir(dir.path()).asset_base();
        assert!(base.starts_with("file:///"), "got: {base}");
        assert!(base.ends_with('/'));
    }

    #[tokio::test]
    async fn dir_load_reads_both_resources() {
        let dir = site_with(
            "<div>{{NAME}}</div>",
            r#"{"cards": {"Zephyr": {"speed": 4}}}"#,
        );
        let loaded = DeckSource::dir(dir.path()).load().await.unwrap();
        assert_eq!(loaded.template, "<div>{{NAME}}</div>");
        assert_eq!(loaded.deck.len(), 1);
        assert_eq!(loaded.deck.get("Zephyr").unwrap().speed, 4);
    }

    #[tokio::test]
    async fn dir_load_fails_when_a_resource_is_missing() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir_all(dir.path().join("templates")).unwrap();
        std::fs::write(dir.path().join(TEMPLATE_PATH), "<div></div>").unwrap();
        // no cards.json
        assert!(DeckSource::dir(dir.path()).load().await.is_err());
    }

    #[tokio::test]
    async fn dir_load_fails_on_unparseable_document() {
        let dir = site_with("<div></div>", "definitely not json");
        assert!(matches!(
            DeckSource::dir(dir.path()).load().await,
            Err(SourceError::BadDocument(_))
        ));
    }

    #[tokio::test]
    async fn dir_load_degrades_missing_cards_key_to_empty_deck() {
        let dir = site_with("<div></div>", r#"{"something": "else"}"#);
        let loaded = DeckSource::dir(dir.path()).load().await.unwrap();
        assert!(loaded.deck.is_empty());
    }

    #[tokio::test]
    async fn dir_save_round_trips_the_document() {
        let dir = site_with("<div></div>", r#"{"cards": {}}"#);
        let source = DeckSource::dir(dir.path());

        let mut deck = Deck::new();
        deck.add_starter("Comet").unwrap();
        deck.get_mut("Comet").unwrap().speed = 5;

        let message = source.save(&deck.to_file()).await.unwrap();
        assert_eq!(message, "Cards saved successfully");

        let reloaded = source.load().await.unwrap();
        assert_eq!(reloaded.deck, deck);
    }
}
