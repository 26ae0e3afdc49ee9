//! Client 层 Builder
//!
//! 链式设置设备地址、适配器与写入方式，构建 [`OzoBot`]。

use crate::robot::OzoBot;
use ozo_ble::{BleTransport, WriteMode};

#[cfg(all(target_os = "linux", feature = "bluez"))]
use crate::error::ClientError;
#[cfg(all(target_os = "linux", feature = "bluez"))]
use ozo_ble::{BleDeviceError, BleDeviceErrorKind, BleError, BluezConfig, BluezTransport};
#[cfg(all(target_os = "linux", feature = "bluez"))]
use std::time::Duration;

/// 句柄配置
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ClientConfig {
    /// 所有指令使用的写入方式（默认无需确认）
    pub write_mode: WriteMode,
}

/// OzoBot Builder
///
/// # Example
///
/// ```no_run
/// use ozo_client::OzoBuilder;
///
/// let bot = OzoBuilder::new()
///     .address("AA:BB:CC:DD:EE:FF")
///     .build()
///     .expect("invalid address");
/// ```
#[derive(Debug, Clone, Default)]
pub struct OzoBuilder {
    address: Option<String>,
    config: ClientConfig,
    #[cfg(all(target_os = "linux", feature = "bluez"))]
    bluez: BluezConfig,
}

impl OzoBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// 设置设备地址（如 `"AA:BB:CC:DD:EE:FF"`，通常来自扫描结果）
    pub fn address(mut self, address: impl Into<String>) -> Self {
        self.address = Some(address.into());
        self
    }

    /// 设置写入方式
    pub fn write_mode(mut self, mode: WriteMode) -> Self {
        self.config.write_mode = mode;
        self
    }

    /// 使用给定传输会话构建句柄（测试或自定义后端）
    pub fn build_with<T: BleTransport>(self, transport: T) -> OzoBot<T> {
        OzoBot::with_config(transport, self.config)
    }
}

#[cfg(all(target_os = "linux", feature = "bluez"))]
impl OzoBuilder {
    /// 指定蓝牙适配器（如 `"hci0"`，默认使用系统默认适配器）
    pub fn adapter(mut self, adapter: impl Into<String>) -> Self {
        self.bluez.adapter = Some(adapter.into());
        self
    }

    /// 连接后等待服务解析的超时（默认 10 秒）
    pub fn services_timeout(mut self, timeout: Duration) -> Self {
        self.bluez.services_timeout = timeout;
        self
    }

    /// 构建基于 BlueZ 的句柄（不会立即连接）
    pub fn build(self) -> Result<OzoBot<BluezTransport>, ClientError> {
        let address = self.address.ok_or_else(|| {
            ClientError::Connection(BleError::Device(BleDeviceError::new(
                BleDeviceErrorKind::InvalidAddress,
                "no device address configured",
            )))
        })?;
        let transport =
            BluezTransport::with_config(&address, self.bluez).map_err(ClientError::Connection)?;
        Ok(OzoBot::with_config(transport, self.config))
    }
}
