use std::sync::atomic::AtomicUsize;

use super::*;
use crate::assets::fetch::{Connection, FetchFuture, Fetched};

/// Answers 200 to HEAD requests whose URL contains one of `hits`.
struct ProbeFetcher {
    hits: Vec<&'static str>,
    heads: AtomicUsize,
}

impl Fetcher for ProbeFetcher {
    fn get<'a>(&'a self, _url: &'a str, _connection: Connection) -> FetchFuture<'a, Fetched> {
        Box::pin(async { Ok(Fetched::default()) })
    }

    fn head<'a>(&'a self, url: &'a str) -> FetchFuture<'a, u16> {
        Box::pin(async move {
            self.heads.fetch_add(1, Ordering::SeqCst);
            Ok(if self.hits.iter().any(|h| url.contains(h)) {
                200
            } else {
                404
            })
        })
    }
}

fn probe(hits: Vec<&'static str>) -> Arc<ProbeFetcher> {
    Arc::new(ProbeFetcher {
        hits,
        heads: AtomicUsize::new(0),
    })
}

fn temp_dir(name: &str) -> PathBuf {
    let nanos = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap()
        .as_nanos();
    std::env::temp_dir().join(format!("gbfpib_{name}_{}_{}", std::process::id(), nanos))
}

#[tokio::test]
async fn known_job_needs_no_probe() {
    let table = ClassTable::empty(temp_dir("classes_known").join(CLASS_TABLE_FILE));
    table.insert("150201", "sw");
    let fetcher = probe(vec![]);
    let dyn_fetcher: Arc<dyn Fetcher> = fetcher.clone();
    let look = table
        .job_portrait(&dyn_fetcher, "150201_sw_1_01", 150299)
        .await;
    assert_eq!(look.as_deref(), Some("150201_sw_1_01"));
    assert_eq!(fetcher.heads.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn probe_learns_first_kind_in_order() {
    let table = ClassTable::empty(temp_dir("classes_probe").join(CLASS_TABLE_FILE));
    let fetcher = probe(vec!["_gu_0_01", "_sp_0_01"]);
    let dyn_fetcher: Arc<dyn Fetcher> = fetcher.clone();
    let look = table
        .job_portrait(&dyn_fetcher, "410301_kn_0_01", 410301)
        .await;
    assert_eq!(look.as_deref(), Some("410301_sp_0_01"));
    assert_eq!(fetcher.heads.load(Ordering::SeqCst), JOB_WEAPON_KINDS.len());
    assert_eq!(table.get("410301").as_deref(), Some("sp"));
    assert!(table.is_modified());
}

#[tokio::test]
async fn unknown_job_stays_unknown() {
    let table = ClassTable::empty(temp_dir("classes_none").join(CLASS_TABLE_FILE));
    let dyn_fetcher: Arc<dyn Fetcher> = probe(vec![]);
    assert_eq!(table.job_portrait(&dyn_fetcher, "1_2_3", 999901).await, None);
    assert!(!table.is_modified());
    assert!(table.is_empty());
}

#[tokio::test]
async fn flush_writes_only_when_modified() {
    let dir = temp_dir("classes_flush");
    let table = ClassTable::load(&dir).await;
    assert!(table.is_empty());
    assert!(!table.flush().await.unwrap());
    assert!(!dir.join(CLASS_TABLE_FILE).exists());

    table.insert("100001", "sw");
    assert!(table.flush().await.unwrap());
    assert!(!table.is_modified());

    let reloaded = ClassTable::load(&dir).await;
    assert_eq!(reloaded.get("100001").as_deref(), Some("sw"));
    assert_eq!(reloaded.len(), 1);
    let _ = std::fs::remove_dir_all(&dir);
}

#[tokio::test]
async fn malformed_table_loads_empty() {
    let dir = temp_dir("classes_bad");
    std::fs::create_dir_all(&dir).unwrap();
    std::fs::write(dir.join(CLASS_TABLE_FILE), b"not json").unwrap();
    assert!(ClassTable::load(&dir).await.is_empty());
    let _ = std::fs::remove_dir_all(&dir);
}

#[tokio::test]
async fn failed_flush_keeps_entries_pending() {
    let dir = temp_dir("classes_flush_fail");
    std::fs::create_dir_all(&dir).unwrap();
    // a file where the table's parent directory should be
    let blocker = dir.join("blocked");
    std::fs::write(&blocker, b"").unwrap();
    let table = ClassTable::empty(blocker.join(CLASS_TABLE_FILE));
    table.insert("150201", "sw");
    assert!(table.flush().await.is_err());
    assert!(table.is_modified());
    std::fs::remove_dir_all(&dir).ok();
}

#[tokio::test]
async fn entries_added_after_a_flush_are_written_next_time() {
    let dir = temp_dir("classes_flush_again");
    let table = ClassTable::empty(dir.join(CLASS_TABLE_FILE));
    table.insert("150201", "sw");
    assert!(table.flush().await.unwrap());
    assert!(!table.is_modified());
    assert!(!table.flush().await.unwrap());

    table.insert("100001", "kn");
    assert!(table.is_modified());
    assert!(table.flush().await.unwrap());
    let reloaded = ClassTable::load(&dir).await;
    assert_eq!(reloaded.get("100001").as_deref(), Some("kn"));
    assert_eq!(reloaded.len(), 2);
    std::fs::remove_dir_all(&dir).ok();
}
