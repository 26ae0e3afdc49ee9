//! 扫描命令

use anyhow::Result;
use ozo_sdk::ble::BleScanner;
use ozo_sdk::{SearchOptions, search};

/// 扫描附近设备（参数来自全局连接参数与配置文件）
#[derive(Debug, Clone)]
pub struct SearchCommand {
    pub options: SearchOptions,
}

impl SearchCommand {
    pub fn new(options: SearchOptions) -> Self {
        Self { options }
    }

    /// 扫描并按名称排序输出，返回找到的设备数量
    pub async fn execute<S: BleScanner + ?Sized>(&self, scanner: &S) -> Result<usize> {
        println!(
            "🔍 扫描名称以 {:?} 开头的设备（{} 秒）...",
            self.options.prefix,
            self.options.timeout.as_secs()
        );
        let found = search(scanner, &self.options).await?;

        if found.is_empty() {
            println!("(未找到设备)");
            return Ok(0);
        }

        let mut devices: Vec<_> = found.into_iter().collect();
        devices.sort();
        for (name, address) in &devices {
            println!("  {:<20} {}", name, address);
        }
        Ok(devices.len())
    }
}
