#![allow(dead_code)]

use std::{
    path::{Path, PathBuf},
    sync::Mutex,
    time::Duration,
};

use gbfpib::{BUNDLED_ASSETS, Connection, FetchFuture, Fetched, Fetcher, ImageHandle, Settings};

pub fn temp_dir(name: &str) -> PathBuf {
    std::env::temp_dir().join(format!(
        "gbfpib_{name}_{}_{}",
        std::process::id(),
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap()
            .as_nanos()
    ))
}

pub fn png(rgba: [u8; 4]) -> Vec<u8> {
    let img = image::RgbaImage::from_pixel(1, 1, image::Rgba(rgba));
    ImageHandle::from_rgba(img).to_png().unwrap()
}

/// Serves a 1x1 PNG for every GET, 404 for URLs containing a `missing` pattern, the wiki and
/// every HEAD. Records each GET url.
pub struct MockFetcher {
    body: Vec<u8>,
    missing: Vec<String>,
    delay: Duration,
    gets: Mutex<Vec<String>>,
}

impl MockFetcher {
    pub fn new() -> Self {
        Self {
            body: png([200, 40, 40, 255]),
            missing: Vec::new(),
            delay: Duration::ZERO,
            gets: Mutex::new(Vec::new()),
        }
    }

    pub fn missing(mut self, pattern: &str) -> Self {
        self.missing.push(pattern.to_owned());
        self
    }

    pub fn delayed(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub fn gets(&self) -> Vec<String> {
        self.gets.lock().unwrap().clone()
    }

    pub fn count(&self, pattern: &str) -> usize {
        self.gets
            .lock()
            .unwrap()
            .iter()
            .filter(|u| u.contains(pattern))
            .count()
    }
}

impl Fetcher for MockFetcher {
    fn get<'a>(&'a self, url: &'a str, _connection: Connection) -> FetchFuture<'a, Fetched> {
        Box::pin(async move {
            self.gets.lock().unwrap().push(url.to_owned());
            if !self.delay.is_zero() {
                tokio::time::sleep(self.delay).await;
            }
            if url.contains("gbf.wiki") || self.missing.iter().any(|m| url.contains(m.as_str())) {
                return Ok(Fetched {
                    status: 404,
                    body: Vec::new(),
                });
            }
            Ok(Fetched {
                status: 200,
                body: self.body.clone(),
            })
        })
    }

    fn head<'a>(&'a self, _url: &'a str) -> FetchFuture<'a, u16> {
        Box::pin(async { Ok(404) })
    }
}

/// Temporary asset root, data directory and output directory.
pub struct Workspace {
    pub root: PathBuf,
}

impl Workspace {
    pub fn new(name: &str) -> Self {
        let root = temp_dir(name);
        let bytes = png([30, 30, 60, 255]);
        for asset in BUNDLED_ASSETS {
            let path = root.join(asset);
            std::fs::create_dir_all(path.parent().unwrap()).unwrap();
            std::fs::write(&path, &bytes).unwrap();
        }
        Self { root }
    }

    pub fn out(&self) -> PathBuf {
        self.root.join("out")
    }

    pub fn data(&self) -> PathBuf {
        self.root.join("data")
    }

    pub fn settings(&self) -> Settings {
        Settings {
            asset_root: self.root.clone(),
            data_dir: self.data(),
            output_dir: self.out(),
            ..Settings::default()
        }
    }

    /// Regular files in the output directory, temporary ones included.
    pub fn written(&self) -> Vec<String> {
        let mut names: Vec<String> = match std::fs::read_dir(self.out()) {
            Ok(dir) => dir
                .map(|e| e.unwrap())
                .filter(|e| e.file_type().unwrap().is_file())
                .map(|e| e.file_name().to_string_lossy().into_owned())
                .collect(),
            Err(_) => Vec::new(),
        };
        names.sort();
        names
    }
}

impl Drop for Workspace {
    fn drop(&mut self) {
        std::fs::remove_dir_all(&self.root).ok();
    }
}

pub fn read_png(path: &Path) -> ImageHandle {
    ImageHandle::from_bytes(std::fs::read(path).unwrap()).unwrap()
}

/// Five-slot party with one ally, a main summon, a mainhand and two modifiers.
pub fn standard_snapshot() -> serde_json::Value {
    serde_json::json!({
        "ver": 1.2,
        "lang": "en",
        "p": 150201,
        "pcjs": "150201_sw_1_01",
        "ps": ["Armor Break", null, null],
        "c": [3040001000i64, null, null, null, null],
        "ce": [1, null, null, null, null],
        "cn": ["Katalina", null, null, null, null],
        "cl": [100, null, null, null, null],
        "cs": [5, null, null, null, null],
        "cp": [99, null, null, null, null],
        "cb": [3, 4, null, null, null],
        "s": [2040003000i64, null, null, null, null, null, null],
        "sl": [150, null, null, null, null, null, null],
        "se": [5, null, null, null, null, null, null],
        "ss": ["2040003000", null, null, null, null, null, null],
        "qs": 0,
        "satk": "12000",
        "shp": "2000",
        "w": ["1040001000", null, null, null, null, null, null, null, null, null],
        "wl": [15, null, null, null, null, null, null, null, null, null],
        "wp": [99, null, null, null, null, null, null, null, null, null],
        "wsn": [["skill_atk_1", null, null], null, null, null, null, null, null, null, null, null],
        "watk": "40000",
        "whp": "5000",
        "est": [1, "123456", "234567"],
        "mods": [
            {"icon_img": "atk.png", "value": "+30%", "is_max": false},
            {"icon_img": "hp.png", "value": "+15%", "is_max": true}
        ],
        "spsid": 2040003000i64
    })
}
