use std::sync::{Arc, atomic::{AtomicUsize, Ordering}};

use super::*;
use crate::assets::fetch::{FetchFuture, Fetched};

struct WikiFetcher {
    status: u16,
    body: &'static str,
    gets: AtomicUsize,
    last_url: Mutex<String>,
}

impl Fetcher for WikiFetcher {
    fn get<'a>(&'a self, url: &'a str, connection: Connection) -> FetchFuture<'a, Fetched> {
        Box::pin(async move {
            assert_eq!(connection, Connection::Close);
            self.gets.fetch_add(1, Ordering::SeqCst);
            *lock(&self.last_url) = url.to_owned();
            Ok(Fetched {
                status: self.status,
                body: self.body.as_bytes().to_vec(),
            })
        })
    }

    fn head<'a>(&'a self, _url: &'a str) -> FetchFuture<'a, u16> {
        Box::pin(async { Ok(404) })
    }
}

fn wiki(status: u16, body: &'static str) -> Arc<WikiFetcher> {
    Arc::new(WikiFetcher {
        status,
        body,
        gets: AtomicUsize::new(0),
        last_url: Mutex::new(String::new()),
    })
}

#[test]
fn query_url_encodes_the_filter() {
    let url = WikiLookup::query_url("bahamut").unwrap();
    assert!(url.starts_with("https://gbf.wiki/index.php?title=Special%3ACargoExport"));
    assert!(url.contains("table=summons"));
    assert!(url.contains("limit=1"));
    assert!(url.contains("bahamut"));
    assert!(!url.contains(' '));
}

#[tokio::test]
async fn resolves_and_memoizes_lowercase() {
    let fetcher = wiki(200, r#"[{"id": "2040003000", "name": "Bahamut", "jpname": "バハムート"}]"#);
    let lookup = WikiLookup::new();
    assert_eq!(
        lookup.summon_id(fetcher.as_ref(), "Bahamut").await.as_deref(),
        Some("2040003000")
    );
    assert_eq!(
        lookup.summon_id(fetcher.as_ref(), "BAHAMUT").await.as_deref(),
        Some("2040003000")
    );
    assert_eq!(fetcher.gets.load(Ordering::SeqCst), 1);
    assert!(lock(&fetcher.last_url).contains("bahamut"));
    assert_eq!(lookup.cached("bahamut").as_deref(), Some("2040003000"));
}

#[tokio::test]
async fn numeric_ids_are_accepted() {
    let fetcher = wiki(200, r#"[{"id": 2040056000, "name": "Lucifer", "jpname": "ルシフェル"}]"#);
    let lookup = WikiLookup::new();
    assert_eq!(
        lookup.summon_id(fetcher.as_ref(), "lucifer").await.as_deref(),
        Some("2040056000")
    );
}

#[tokio::test]
async fn failures_are_not_memoized() {
    let lookup = WikiLookup::new();
    let down = wiki(503, "");
    assert_eq!(lookup.summon_id(down.as_ref(), "Bahamut").await, None);
    let empty = wiki(200, "[]");
    assert_eq!(lookup.summon_id(empty.as_ref(), "Bahamut").await, None);
    let garbage = wiki(200, "<html>");
    assert_eq!(lookup.summon_id(garbage.as_ref(), "Bahamut").await, None);
    assert_eq!(lookup.cached("bahamut"), None);
}
