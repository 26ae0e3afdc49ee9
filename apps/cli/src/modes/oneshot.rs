//! One-shot 模式
//!
//! 每个命令独立执行：
//! 1. 读取配置（命令行参数优先于配置文件）
//! 2. 确定设备地址（未配置时扫描并选择第一个匹配设备）
//! 3. 连接机器人
//! 4. 执行操作
//! 5. 断开连接（操作失败时也会执行）

use anyhow::{Context, Result};
use clap::Args;
use ozo_sdk::ble::{BleScanner, BleTransport, BluezScanner, BluezTransport};
use ozo_sdk::client::{DEFAULT_PREFIX, DEFAULT_SCAN_TIMEOUT};
use ozo_sdk::{OzoBot, OzoBuilder, SearchOptions, WriteMode, search};
use std::time::Duration;
use tracing::{info, warn};

use crate::commands::RobotAction;
use crate::commands::config::CliConfig;

/// 连接参数（覆盖配置文件）
#[derive(Args, Debug, Clone, Default)]
pub struct ConnectArgs {
    /// 设备地址（如 AA:BB:CC:DD:EE:FF）
    #[arg(short, long, global = true)]
    pub address: Option<String>,

    /// 蓝牙适配器（如 hci0）
    #[arg(long, global = true)]
    pub adapter: Option<String>,

    /// 扫描时的名称前缀
    #[arg(long, global = true)]
    pub prefix: Option<String>,

    /// 扫描时长（秒）
    #[arg(long, global = true)]
    pub scan_timeout: Option<u64>,
}

/// One-shot 模式配置（参数与配置文件合并后的结果）
#[derive(Debug, Clone, PartialEq)]
pub struct OneShotConfig {
    pub address: Option<String>,
    pub adapter: Option<String>,
    pub search: SearchOptions,
    pub write_mode: WriteMode,
}

impl OneShotConfig {
    /// 合并命令行参数与配置文件
    pub fn from_sources(args: &ConnectArgs, file: &CliConfig) -> Self {
        let prefix = args
            .prefix
            .clone()
            .or_else(|| file.prefix.clone())
            .unwrap_or_else(|| DEFAULT_PREFIX.to_string());
        let timeout = args
            .scan_timeout
            .or(file.scan_timeout_secs)
            .map(Duration::from_secs)
            .unwrap_or(DEFAULT_SCAN_TIMEOUT);
        let write_mode = if file.write_with_response.unwrap_or(false) {
            WriteMode::WithResponse
        } else {
            WriteMode::WithoutResponse
        };

        Self {
            address: args.address.clone().or_else(|| file.address.clone()),
            adapter: args.adapter.clone().or_else(|| file.adapter.clone()),
            search: SearchOptions::new(prefix, timeout),
            write_mode,
        }
    }
}

/// One-shot 模式
pub struct OneShotMode {
    config: OneShotConfig,
}

impl OneShotMode {
    /// 加载配置文件并与参数合并
    pub fn new(args: &ConnectArgs) -> Result<Self> {
        let file = CliConfig::load()?;
        Ok(Self {
            config: OneShotConfig::from_sources(args, &file),
        })
    }

    pub fn config(&self) -> &OneShotConfig {
        &self.config
    }

    /// 扫描器（使用配置的适配器）
    pub fn scanner(&self) -> BluezScanner {
        match &self.config.adapter {
            Some(adapter) => BluezScanner::with_adapter(adapter),
            None => BluezScanner::new(),
        }
    }

    /// 确定设备地址
    pub async fn resolve_address(&self) -> Result<String> {
        if let Some(address) = &self.config.address {
            return Ok(address.clone());
        }
        pick_device(&self.scanner(), &self.config.search).await
    }

    /// 连接机器人
    pub async fn connect(&self) -> Result<OzoBot<BluezTransport>> {
        let address = self.resolve_address().await?;

        let mut builder = OzoBuilder::new()
            .address(&address)
            .write_mode(self.config.write_mode);
        if let Some(adapter) = &self.config.adapter {
            builder = builder.adapter(adapter);
        }

        println!("⏳ 连接到 {}...", address);
        let mut bot = builder.build()?;
        bot.connect()
            .await
            .with_context(|| format!("连接 {} 失败", address))?;
        println!("✅ 已连接");
        Ok(bot)
    }

    /// 连接 → 执行 → 断开
    ///
    /// Ctrl+C 会打断正在等待的运动指令并停止机器人。
    pub async fn run(&self, action: &RobotAction) -> Result<()> {
        let mut bot = self.connect().await?;

        let token = bot.cancel_token();
        if let Err(e) = ctrlc::set_handler(move || token.cancel()) {
            warn!("Failed to install Ctrl+C handler: {}", e);
        }

        let result = action.execute(&mut bot).await;
        finish(&mut bot, result).await
    }
}

/// 扫描并选择设备（按名称排序后的第一个）
pub async fn pick_device<S: BleScanner + ?Sized>(
    scanner: &S,
    options: &SearchOptions,
) -> Result<String> {
    println!(
        "🔍 扫描名称以 {:?} 开头的设备（{} 秒）...",
        options.prefix,
        options.timeout.as_secs()
    );
    let found = search(scanner, options).await?;

    let mut devices: Vec<(String, String)> = found.into_iter().collect();
    devices.sort();
    let Some((name, address)) = devices.into_iter().next() else {
        anyhow::bail!("未找到名称以 {:?} 开头的设备", options.prefix);
    };
    info!("Selected {} ({})", name, address);
    println!("📡 使用 {} ({})", name, address);
    Ok(address)
}

/// 断开连接；操作本身的错误优先返回
pub async fn finish<T: BleTransport>(bot: &mut OzoBot<T>, result: Result<()>) -> Result<()> {
    let closed = bot.disconnect().await;
    result?;
    closed.context("断开连接失败")?;
    println!("👋 已断开");
    Ok(())
}
