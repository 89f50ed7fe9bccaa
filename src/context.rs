use std::fs::{File, OpenOptions};
use std::io::{Read, Write};
use std::path::Path;
use std::sync::{Arc, RwLock};
use std::collections::HashMap;

use directories::ProjectDirs;

use crate::opt::*;

const APP_NAME: &str = "qhosp";
const APP_AUTHOR: &str = "qhosp";
const APP_QUALIFIER: &str = "br";

const RUNTIME_FILE_NAME: &str = "runtime_data.json";

pub const LAST_NAME_FILTER_KEY: &str = "last_name_filter";
pub const LAST_LOCATION_FILTER_KEY: &str = "last_location_filter";

fn log(s: String) {
    log_if(s.as_str(), DbgFlg::Data);
}

/// Small key/value store persisted as JSON in the platform data directory.
pub struct Context {
    pub data: Arc<RwLock<HashMap<String, String>>>,
    runtime_file_path: String,
}

pub fn create_context() -> Res<Context> {
    let project_dirs = ProjectDirs::from(APP_QUALIFIER, APP_AUTHOR, APP_NAME)
        .ok_or("unable to resolve the project directory")?;

    let runtime_dir = project_dirs.data_local_dir();
    log(format!("Runtime directory: {:?}", runtime_dir));

    std::fs::create_dir_all(runtime_dir).err_to_str()?;

    let runtime_file_path = runtime_dir.join(RUNTIME_FILE_NAME);
    let runtime_file_path = runtime_file_path
        .to_str()
        .ok_or("runtime directory is not valid UTF-8")?;
    load_data_from_file(runtime_file_path)
}

pub fn load_data_from_file(runtime_file_path: &str) -> Res<Context> {
    let path = Path::new(runtime_file_path);
    let data = if path.exists() {
        let mut file = File::open(path).err_to_str()?;
        let mut contents = String::new();
        file.read_to_string(&mut contents).err_to_str()?;
        if contents.trim().is_empty() {
            HashMap::new()
        } else {
            serde_json::from_str::<HashMap<String, String>>(&contents).err_to_str()?
        }
    } else {
        HashMap::new()
    };

    Ok(Context {
        data: Arc::new(RwLock::new(data)),
        runtime_file_path: runtime_file_path.to_string(),
    })
}

impl Context {
    pub fn read_data(&self, key: &str) -> Option<String> {
        let data_read = self.data.read().ok()?;
        data_read.get(key).map(|s| s.to_string())
    }

    pub fn write_data(&self, key: &str, value: &str) -> Res<()> {
        let mut data_write = self.data.write().err_to_str()?;
        data_write.insert(key.to_string(), value.to_string());
        save_data(&self.runtime_file_path, &data_write)
    }

    pub fn last_filters(&self) -> Option<(String, String)> {
        let name = self.read_data(LAST_NAME_FILTER_KEY);
        let location = self.read_data(LAST_LOCATION_FILTER_KEY);
        if name.is_none() && location.is_none() {
            return None;
        }
        Some((name.unwrap_or_default(), location.unwrap_or_default()))
    }

    pub fn remember_filters(&self, name_filter: &str, location_filter: &str) -> Res<()> {
        self.write_data(LAST_NAME_FILTER_KEY, name_filter)?;
        self.write_data(LAST_LOCATION_FILTER_KEY, location_filter)
    }
}

fn save_data(runtime_file_path: &str, data: &HashMap<String, String>) -> Res<()> {
    let mut file = OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .open(runtime_file_path)
        .err_to_str()?;
    let content = serde_json::to_string(data).err_to_str()?;
    file.write_all(content.as_bytes()).err_to_str()
}
