//! 配置管理命令
//!
//! 用于管理 CLI 配置（默认设备地址、扫描参数等），保存在
//! `<config_dir>/ozo/config.toml`。

use anyhow::{Context, Result};
use clap::Subcommand;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// 配置文件路径
fn config_dir() -> Result<PathBuf> {
    let mut path = dirs::config_dir().ok_or_else(|| anyhow::anyhow!("无法确定配置目录"))?;

    path.push("ozo");
    Ok(path)
}

pub fn config_file() -> Result<PathBuf> {
    let mut path = config_dir()?;
    path.push("config.toml");
    Ok(path)
}

/// CLI 配置
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CliConfig {
    /// 默认设备地址
    pub address: Option<String>,

    /// 蓝牙适配器（如 hci0）
    pub adapter: Option<String>,

    /// 扫描时的名称前缀
    pub prefix: Option<String>,

    /// 扫描时长（秒）
    pub scan_timeout_secs: Option<u64>,

    /// 使用需要确认的写入方式
    pub write_with_response: Option<bool>,
}

impl CliConfig {
    /// 加载默认位置的配置
    pub fn load() -> Result<Self> {
        Self::load_from(&config_file()?)
    }

    /// 从指定文件加载配置（文件不存在时返回默认配置）
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path).context("读取配置文件失败")?;
        toml::from_str(&content).with_context(|| format!("解析配置文件失败: {}", path.display()))
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).context("创建配置目录失败")?;
        }

        let body = toml::to_string_pretty(self).context("序列化配置失败")?;
        let content = format!("# Ozo CLI Configuration\n\n{}", body);
        fs::write(path, content).context("写入配置文件失败")?;

        Ok(())
    }

    /// 按名称读取配置项
    pub fn get(&self, key: &str) -> Option<String> {
        match key {
            "address" => self.address.clone(),
            "adapter" => self.adapter.clone(),
            "prefix" => self.prefix.clone(),
            "scan_timeout_secs" => self.scan_timeout_secs.map(|v| v.to_string()),
            "write_with_response" => self.write_with_response.map(|v| v.to_string()),
            _ => None,
        }
    }

    /// 按名称设置配置项
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        match key {
            "address" => self.address = Some(value.to_string()),
            "adapter" => self.adapter = Some(value.to_string()),
            "prefix" => self.prefix = Some(value.to_string()),
            "scan_timeout_secs" => {
                let secs = value
                    .parse::<u64>()
                    .with_context(|| format!("无效的扫描时长: {}", value))?;
                self.scan_timeout_secs = Some(secs);
            },
            "write_with_response" => {
                let flag = value
                    .parse::<bool>()
                    .with_context(|| format!("无效的布尔值: {}", value))?;
                self.write_with_response = Some(flag);
            },
            _ => anyhow::bail!("未知配置项: {}（可用: {}）", key, KEYS.join(", ")),
        }
        Ok(())
    }

    fn print(&self) {
        println!("  地址: {:?}", self.address);
        println!("  适配器: {:?}", self.adapter);
        println!("  名称前缀: {:?}", self.prefix);
        println!("  扫描时长: {:?}", self.scan_timeout_secs);
        println!("  写入确认: {:?}", self.write_with_response);
    }
}

const KEYS: [&str; 5] = [
    "address",
    "adapter",
    "prefix",
    "scan_timeout_secs",
    "write_with_response",
];

/// 配置命令
#[derive(Subcommand, Debug)]
pub enum ConfigCommand {
    /// 设置配置项（如 `config set address AA:BB:CC:DD:EE:FF`）
    Set {
        /// 配置项名称
        key: String,

        /// 配置值
        value: String,
    },

    /// 获取配置项
    Get {
        /// 配置项名称
        #[arg(default_value = "all")]
        key: String,
    },

    /// 检查配置
    Check,
}

impl ConfigCommand {
    pub async fn execute(self) -> Result<()> {
        let path = config_file()?;
        self.execute_at(&path)
    }

    fn execute_at(self, path: &Path) -> Result<()> {
        match self {
            ConfigCommand::Set { key, value } => {
                let mut config = CliConfig::load_from(path)?;
                config.set(&key, &value)?;
                config.save_to(path)?;
                println!("✅ {} = {}", key, value);
                println!("   已保存: {}", path.display());
                Ok(())
            },

            ConfigCommand::Get { key } => {
                let config = CliConfig::load_from(path)?;
                if key == "all" {
                    println!("Ozo CLI 配置:");
                    config.print();
                } else if KEYS.contains(&key.as_str()) {
                    println!("{}", config.get(&key).unwrap_or_else(|| "(未设置)".to_string()));
                } else {
                    anyhow::bail!("未知配置项: {}（可用: {}）", key, KEYS.join(", "));
                }
                Ok(())
            },

            ConfigCommand::Check => {
                let config = CliConfig::load_from(path)?;
                println!("配置文件: {}", path.display());
                config.print();
                if config.address.is_none() {
                    println!("💡 未设置默认地址，连接时会先扫描");
                }
                Ok(())
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_is_default() {
        let dir = TempDir::new().unwrap();
        let config = CliConfig::load_from(&dir.path().join("config.toml")).unwrap();
        assert_eq!(config, CliConfig::default());
    }

    #[test]
    fn test_save_and_load() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("config.toml");
        let config = CliConfig {
            address: Some("AA:BB:CC:DD:EE:FF".to_string()),
            prefix: Some("Ozo".to_string()),
            scan_timeout_secs: Some(5),
            write_with_response: Some(true),
            ..Default::default()
        };
        config.save_to(&path).unwrap();

        let loaded = CliConfig::load_from(&path).unwrap();
        assert_eq!(loaded, config);
        assert_eq!(loaded.get("scan_timeout_secs").as_deref(), Some("5"));
        assert_eq!(loaded.get("adapter"), None);
    }

    #[test]
    fn test_partial_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "address = \"11:22:33:44:55:66\"\n").unwrap();

        let config = CliConfig::load_from(&path).unwrap();
        assert_eq!(config.address.as_deref(), Some("11:22:33:44:55:66"));
        assert_eq!(config.prefix, None);
    }

    #[test]
    fn test_invalid_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "scan_timeout_secs = \"soon\"\n").unwrap();
        assert!(CliConfig::load_from(&path).is_err());
    }

    #[test]
    fn test_set_merges_with_existing() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");

        let set = |key: &str, value: &str| ConfigCommand::Set {
            key: key.to_string(),
            value: value.to_string(),
        };
        set("address", "AA:AA:AA:AA:AA:AA").execute_at(&path).unwrap();
        set("adapter", "hci1").execute_at(&path).unwrap();
        set("scan_timeout_secs", "3").execute_at(&path).unwrap();

        let config = CliConfig::load_from(&path).unwrap();
        assert_eq!(config.address.as_deref(), Some("AA:AA:AA:AA:AA:AA"));
        assert_eq!(config.adapter.as_deref(), Some("hci1"));
        assert_eq!(config.scan_timeout_secs, Some(3));
    }

    #[test]
    fn test_set_validates_values() {
        let mut config = CliConfig::default();
        assert!(config.set("scan_timeout_secs", "soon").is_err());
        assert!(config.set("write_with_response", "maybe").is_err());
        assert!(config.set("interface", "can0").is_err());
        config.set("write_with_response", "true").unwrap();
        assert_eq!(config.write_with_response, Some(true));
    }

    #[test]
    fn test_get_unknown_key() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        let result = ConfigCommand::Get {
            key: "interface".to_string(),
        }
        .execute_at(&path);
        assert!(result.is_err());
    }
}
