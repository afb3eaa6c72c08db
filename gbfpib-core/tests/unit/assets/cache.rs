use std::sync::atomic::AtomicUsize;

use base64::Engine as _;

use super::*;
use crate::assets::fetch::{FetchFuture, Fetched};

fn temp_dir(name: &str) -> PathBuf {
    std::env::temp_dir().join(format!(
        "gbfpib_{name}_{}_{}",
        std::process::id(),
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap()
            .as_nanos()
    ))
}

fn png() -> Vec<u8> {
    let img = image::RgbaImage::from_pixel(1, 1, image::Rgba([1, 2, 3, 255]));
    ImageHandle::from_rgba(img).to_png().unwrap()
}

#[derive(Default)]
struct CountingFetcher {
    gets: AtomicUsize,
    status: u16,
}

impl Fetcher for CountingFetcher {
    fn get<'a>(&'a self, _url: &'a str, _connection: Connection) -> FetchFuture<'a, Fetched> {
        Box::pin(async move {
            self.gets.fetch_add(1, Ordering::SeqCst);
            tokio::time::sleep(std::time::Duration::from_millis(20)).await;
            let status = if self.status == 0 { 200 } else { self.status };
            let body = if status == 200 { png() } else { Vec::new() };
            Ok(Fetched { status, body })
        })
    }

    fn head<'a>(&'a self, _url: &'a str) -> FetchFuture<'a, u16> {
        Box::pin(async { Ok(404) })
    }
}

fn cache(name: &str, disk: bool, fetcher: Arc<CountingFetcher>) -> (AssetCache, PathBuf) {
    let tmp = temp_dir(name);
    let config = CacheConfig {
        endpoint: "example.invalid/".to_owned(),
        asset_root: tmp.join("root"),
        data_dir: tmp.clone(),
        disk_cache: disk,
        limits: CacheLimits {
            max_entries: 2,
            max_side_entries: 80,
        },
    };
    (AssetCache::new(config, fetcher), tmp)
}

#[test]
fn disk_names_are_reversible_and_path_safe() {
    let key = "assets_en/img/sp/assets/npc/s/3040035000_02.jpg";
    let name = disk_cache_name(key);
    assert!(!name.contains('/'));
    let back = base64::engine::general_purpose::URL_SAFE
        .decode(name.as_bytes())
        .unwrap();
    assert_eq!(back, key.as_bytes());
}

#[test]
fn importance() {
    assert!(is_important("assets_en/img/sp/ui/icon/skill/skill_atk.png"));
    assert!(is_important("assets_en/img/sp/zenith/assets/ability/1.png"));
    assert!(is_important("assets/bg.png"));
    assert!(!is_important("assets_en/img/sp/assets/npc/s/1.jpg"));
}

#[test]
fn japanese_localization() {
    let (cache, _) = cache("cache_localize", false, Arc::default());
    let path = "assets_en/img/x_EN.png";
    assert_eq!(cache.localize(path, Origin::Remote), path);

    cache.set_language(Language::Japanese);
    assert_eq!(cache.localize(path, Origin::Remote), "assets/img/x_EN.png");
    assert_eq!(cache.localize("assets/skill_count_EN.png", Origin::Local), "assets/skill_count.png");
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_gets_fetch_once() {
    let fetcher = Arc::new(CountingFetcher::default());
    let (cache, tmp) = cache("cache_coalesce", false, Arc::clone(&fetcher));
    let cache = Arc::new(cache);

    let mut set = tokio::task::JoinSet::new();
    for _ in 0..8 {
        let cache = Arc::clone(&cache);
        set.spawn(async move { cache.remote("assets_en/a/b/c.png").await.map(|_| ()) });
    }
    while let Some(res) = set.join_next().await {
        res.unwrap().unwrap();
    }
    assert_eq!(fetcher.gets.load(Ordering::SeqCst), 1);
    assert_eq!(cache.len(), 1);
    std::fs::remove_dir_all(&tmp).ok();
}

#[tokio::test]
async fn force_download_bypasses_memory() {
    let fetcher = Arc::new(CountingFetcher::default());
    let (cache, tmp) = cache("cache_force", false, Arc::clone(&fetcher));
    cache.remote("assets_en/x/y.png").await.unwrap();
    cache.remote("assets_en/x/y.png").await.unwrap();
    cache.get("assets_en/x/y.png", Origin::Remote, true).await.unwrap();
    assert_eq!(fetcher.gets.load(Ordering::SeqCst), 2);
    std::fs::remove_dir_all(&tmp).ok();
}

#[tokio::test]
async fn http_failure_is_not_cached() {
    let fetcher = Arc::new(CountingFetcher {
        status: 404,
        ..Default::default()
    });
    let (cache, tmp) = cache("cache_404", true, Arc::clone(&fetcher));
    let err = cache.remote("assets_en/x/missing.png").await.unwrap_err();
    assert!(matches!(err, PibError::Http { status: 404, .. }));
    assert!(cache.is_empty());
    assert!(!cache.config().disk_dir().exists());

    // next call retries
    assert!(cache.remote("assets_en/x/missing.png").await.is_err());
    assert_eq!(fetcher.gets.load(Ordering::SeqCst), 2);
    std::fs::remove_dir_all(&tmp).ok();
}

#[tokio::test]
async fn local_assets_read_from_root() {
    let (cache, tmp) = cache("cache_local", false, Arc::default());
    std::fs::create_dir_all(tmp.join("root/assets")).unwrap();
    std::fs::write(tmp.join("root/assets/bg.png"), png()).unwrap();

    let img = cache.local("assets/bg.png").await.unwrap();
    assert_eq!(img.dimensions(), (1, 1));
    assert!(cache.contains("assets/bg.png"));
    assert!(cache.local("assets/none.png").await.is_err());
    std::fs::remove_dir_all(&tmp).ok();
}

#[tokio::test]
async fn trim_keeps_important_keys() {
    let (cache, tmp) = cache("cache_trim", false, Arc::default());
    for key in [
        "assets_en/img/sp/ui/icon/skill/a.png",
        "assets_en/img/sp/assets/npc/s/1.jpg",
        "assets_en/img/sp/assets/npc/s/2.jpg",
    ] {
        cache.remote(key).await.unwrap();
    }
    assert_eq!(cache.len(), 3);
    cache.trim();
    assert_eq!(cache.len(), 1);
    assert!(cache.contains("assets_en/img/sp/ui/icon/skill/a.png"));
    std::fs::remove_dir_all(&tmp).ok();
}
