use std::path::PathBuf;

use crate::store::SLOT_FILE;

#[derive(Debug, Clone)]
pub struct Config {
    pub data_dir: PathBuf,
    pub log_level: String,
}

impl Config {
    pub fn from_env() -> Self {
        let data_dir = std::env::var("KAPIAN_DATA_DIR")
            .map(PathBuf::from)
            .ok()
            .or_else(|| dirs::data_dir().map(|dir| dir.join("kapian")))
            .unwrap_or_else(|| PathBuf::from("./data"));

        let log_level = std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string());

        Self {
            data_dir,
            log_level,
        }
    }

    pub fn slot_path(&self) -> PathBuf {
        self.data_dir.join(SLOT_FILE)
    }
}
