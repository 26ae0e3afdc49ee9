//! # Ozo BLE Transport Layer
//!
//! BLE 传输抽象层：会话打开/关闭、列出已发布的通道（GATT 特征值）、
//! 向指定通道写入不透明字节、限时扫描附近设备。
//!
//! 上层（`ozo-client`）只依赖这里的 trait，不关心具体的蓝牙栈。
//!
//! ## 后端
//!
//! - `bluez`（默认，仅 Linux）：基于 `bluer` 的 BlueZ 后端
//! - `mock`：记录所有写入的内存后端，用于测试

use async_trait::async_trait;
use std::time::Duration;
use thiserror::Error;

#[cfg(all(target_os = "linux", feature = "bluez"))]
pub mod bluez;

#[cfg(all(target_os = "linux", feature = "bluez"))]
pub use bluez::{BluezChannel, BluezConfig, BluezScanner, BluezTransport};

#[cfg(any(test, feature = "mock"))]
pub mod mock;

#[cfg(any(test, feature = "mock"))]
pub use mock::{MockChannel, MockScanner, MockTransport, WrittenPacket};

/// BLE 传输层统一错误类型
#[derive(Error, Debug)]
pub enum BleError {
    #[error("Device Error: {0}")]
    Device(#[from] BleDeviceError),
    #[error("Not connected")]
    NotConnected,
    #[error("Operation timeout")]
    Timeout,
}

/// 设备/后端错误的结构化分类
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BleDeviceErrorKind {
    Unknown,
    NotFound,
    NoAdapter,
    AccessDenied,
    Busy,
    InvalidAddress,
    Backend,
}

/// 结构化设备错误
#[derive(Error, Debug, Clone)]
#[error("{kind:?}: {message}")]
pub struct BleDeviceError {
    pub kind: BleDeviceErrorKind,
    pub message: String,
}

impl BleDeviceError {
    pub fn new(kind: BleDeviceErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

impl From<String> for BleDeviceError {
    fn from(message: String) -> Self {
        Self::new(BleDeviceErrorKind::Unknown, message)
    }
}

impl From<&str> for BleDeviceError {
    fn from(message: &str) -> Self {
        Self::new(BleDeviceErrorKind::Unknown, message)
    }
}

/// 写入方式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WriteMode {
    /// 需要设备确认（ATT Write Request）
    WithResponse,
    /// 无需确认（ATT Write Command），控制指令的默认方式
    #[default]
    WithoutResponse,
}

/// 扫描到的广播
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Advertisement {
    /// 广播名称（部分设备不广播名称）
    pub name: Option<String>,
    /// 设备地址（不透明标识）
    pub address: String,
}

impl Advertisement {
    pub fn new(name: Option<String>, address: impl Into<String>) -> Self {
        Self {
            name,
            address: address.into(),
        }
    }

    /// 带名称的广播
    pub fn named(name: impl Into<String>, address: impl Into<String>) -> Self {
        Self::new(Some(name.into()), address)
    }
}

/// 已发布的通道（GATT 特征值）
pub trait BleChannel: Clone + Send + Sync {
    /// 数值 ID（BlueZ 下为特征值句柄）
    fn id(&self) -> u16;
}

/// 单设备 BLE 会话
///
/// 同一会话的调用需要由调用方串行化（`&mut self`）。
#[async_trait]
pub trait BleTransport: Send {
    type Channel: BleChannel;

    /// 打开会话
    async fn connect(&mut self) -> Result<(), BleError>;

    /// 关闭会话（已关闭时应返回 `Ok`）
    async fn disconnect(&mut self) -> Result<(), BleError>;

    /// 传输层报告的连接状态
    async fn is_connected(&self) -> bool;

    /// 设备发布的所有通道
    async fn channels(&self) -> Result<Vec<Self::Channel>, BleError>;

    /// 向通道写入一段字节
    async fn write(
        &mut self,
        channel: &Self::Channel,
        data: &[u8],
        mode: WriteMode,
    ) -> Result<(), BleError>;
}

/// 附近设备扫描
#[async_trait]
pub trait BleScanner: Send + Sync {
    /// 扫描 `timeout` 时长，按发现顺序返回广播
    async fn scan(&self, timeout: Duration) -> Result<Vec<Advertisement>, BleError>;
}
