use std::path::PathBuf;

use crate::{config, error::Result, types::DashboardData};

/// Reads and writes the dashboard snapshot file.
///
/// The file is overwritten on every fetch; it holds the latest snapshot only,
/// never a history of past ones.
pub struct DashboardDataManager {
    path: PathBuf,
    data: Option<DashboardData>,
}

impl DashboardDataManager {
    pub fn new(path: Option<PathBuf>, data: Option<DashboardData>) -> Self {
        Self {
            path: path.unwrap_or_else(config::data_path),
            data,
        }
    }

    pub async fn load(path: Option<PathBuf>) -> Result<Self> {
        let path = path.unwrap_or_else(config::data_path);
        let content = async_fs::read_to_string(&path).await?;
        let data: DashboardData = serde_json::from_str(&content)?;
        Ok(Self {
            path,
            data: Some(data),
        })
    }

    pub async fn persist(&self) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            async_fs::create_dir_all(parent).await?;
        }

        let json = serde_json::to_string_pretty(&self.data)?;
        async_fs::write(&self.path, json).await?;
        Ok(())
    }

    pub fn path(&self) -> &PathBuf {
        &self.path
    }

    pub fn data(&self) -> Option<&DashboardData> {
        self.data.as_ref()
    }
}
