//! BlueZ 后端（Linux）
//!
//! 基于 `bluer` 通过 D-Bus 访问 bluetoothd。
//!
//! # 通道 ID
//!
//! BlueZ 在对象路径中以十六进制编码特征值句柄（如 `.../char0013`），
//! `bluer` 通过 `Characteristic::id()` 暴露该值，正好对应协议层的数值通道 ID
//! （`0x13` = 19 电机通道，`0x1e` = 30 默认通道）。

use crate::{
    Advertisement, BleChannel, BleDeviceError, BleDeviceErrorKind, BleError, BleScanner,
    BleTransport, WriteMode,
};
use async_trait::async_trait;
use bluer::gatt::WriteOp;
use bluer::gatt::remote::{Characteristic, CharacteristicWriteRequest};
use bluer::{Adapter, AdapterEvent, Address, AddressType, Device, ErrorKind, Session};
use futures_util::StreamExt;
use std::time::Duration;
use tracing::{debug, info, warn};

/// 等待 GATT 服务解析的轮询间隔
const SERVICES_POLL_INTERVAL: Duration = Duration::from_millis(100);

impl From<bluer::Error> for BleError {
    fn from(err: bluer::Error) -> Self {
        let kind = match err.kind {
            ErrorKind::NotFound => BleDeviceErrorKind::NotFound,
            ErrorKind::NotAuthorized | ErrorKind::NotPermitted => BleDeviceErrorKind::AccessDenied,
            ErrorKind::InProgress => BleDeviceErrorKind::Busy,
            ErrorKind::NotReady => BleDeviceErrorKind::NoAdapter,
            _ => BleDeviceErrorKind::Backend,
        };
        BleError::Device(BleDeviceError::new(kind, err.to_string()))
    }
}

/// BlueZ 后端配置
#[derive(Debug, Clone)]
pub struct BluezConfig {
    /// 适配器名称（如 "hci0"），`None` 使用默认适配器
    pub adapter: Option<String>,
    /// 设备地址类型（Evo 使用随机地址）
    pub address_type: AddressType,
    /// 连接后等待 GATT 服务解析的最长时间
    pub services_timeout: Duration,
}

impl Default for BluezConfig {
    fn default() -> Self {
        Self {
            adapter: None,
            address_type: AddressType::LeRandom,
            services_timeout: Duration::from_secs(10),
        }
    }
}

async fn open_adapter(name: Option<&str>) -> Result<Adapter, BleError> {
    let session = Session::new().await?;
    let adapter = match name {
        Some(name) => session.adapter(name)?,
        None => session.default_adapter().await?,
    };
    adapter.set_powered(true).await?;
    Ok(adapter)
}

fn parse_address(address: &str) -> Result<Address, BleError> {
    address.parse::<Address>().map_err(|e| {
        BleDeviceError::new(
            BleDeviceErrorKind::InvalidAddress,
            format!("{}: {}", address, e),
        )
        .into()
    })
}

/// BlueZ 通道（远端特征值）
#[derive(Debug, Clone)]
pub struct BluezChannel {
    id: u16,
    inner: Characteristic,
}

impl BleChannel for BluezChannel {
    fn id(&self) -> u16 {
        self.id
    }
}

/// BlueZ 单设备会话
pub struct BluezTransport {
    address: Address,
    config: BluezConfig,
    adapter: Option<Adapter>,
    device: Option<Device>,
}

impl BluezTransport {
    /// 以默认配置创建（不会立即连接）
    pub fn new(address: &str) -> Result<Self, BleError> {
        Self::with_config(address, BluezConfig::default())
    }

    pub fn with_config(address: &str, config: BluezConfig) -> Result<Self, BleError> {
        Ok(Self {
            address: parse_address(address)?,
            config,
            adapter: None,
            device: None,
        })
    }

    /// 设备地址
    pub fn address(&self) -> Address {
        self.address
    }

    async fn wait_services_resolved(&self, device: &Device) -> Result<(), BleError> {
        let deadline = tokio::time::Instant::now() + self.config.services_timeout;
        while !device.is_services_resolved().await? {
            if tokio::time::Instant::now() >= deadline {
                return Err(BleError::Timeout);
            }
            tokio::time::sleep(SERVICES_POLL_INTERVAL).await;
        }
        Ok(())
    }
}

#[async_trait]
impl BleTransport for BluezTransport {
    type Channel = BluezChannel;

    async fn connect(&mut self) -> Result<(), BleError> {
        let adapter = open_adapter(self.config.adapter.as_deref()).await?;
        info!("Connecting to {} via {}", self.address, adapter.name());

        // 已知设备直接连接；未扫描过的设备使用 ConnectDevice
        let known = adapter.device_addresses().await?.contains(&self.address);
        let device = if known {
            let device = adapter.device(self.address)?;
            if !device.is_connected().await? {
                device.connect().await?;
            }
            device
        } else {
            adapter
                .connect_device(self.address, self.config.address_type)
                .await?
        };

        if let Err(e) = self.wait_services_resolved(&device).await {
            warn!("GATT services of {} not resolved: {}", self.address, e);
            let _ = device.disconnect().await;
            return Err(e);
        }

        self.adapter = Some(adapter);
        self.device = Some(device);
        Ok(())
    }

    async fn disconnect(&mut self) -> Result<(), BleError> {
        let Some(device) = self.device.take() else {
            return Ok(());
        };
        self.adapter = None;

        // 设备侧已断开视为成功
        if !device.is_connected().await.unwrap_or(false) {
            return Ok(());
        }
        device.disconnect().await?;
        info!("Disconnected from {}", self.address);
        Ok(())
    }

    async fn is_connected(&self) -> bool {
        match &self.device {
            Some(device) => device.is_connected().await.unwrap_or(false),
            None => false,
        }
    }

    async fn channels(&self) -> Result<Vec<BluezChannel>, BleError> {
        let device = self.device.as_ref().ok_or(BleError::NotConnected)?;

        let mut channels = Vec::new();
        for service in device.services().await? {
            for characteristic in service.characteristics().await? {
                channels.push(BluezChannel {
                    id: characteristic.id(),
                    inner: characteristic,
                });
            }
        }
        debug!(
            "{} published channels: {:?}",
            self.address,
            channels.iter().map(|c| c.id).collect::<Vec<_>>()
        );
        Ok(channels)
    }

    async fn write(
        &mut self,
        channel: &BluezChannel,
        data: &[u8],
        mode: WriteMode,
    ) -> Result<(), BleError> {
        if self.device.is_none() {
            return Err(BleError::NotConnected);
        }

        let mut request = CharacteristicWriteRequest::default();
        request.op_type = match mode {
            WriteMode::WithResponse => WriteOp::Request,
            WriteMode::WithoutResponse => WriteOp::Command,
        };

        debug!("write char{:04x} <- {}", channel.id, hex::encode(data));
        channel.inner.write_ext(data, &request).await?;
        Ok(())
    }
}

/// BlueZ 扫描器
#[derive(Debug, Clone, Default)]
pub struct BluezScanner {
    adapter: Option<String>,
}

impl BluezScanner {
    pub fn new() -> Self {
        Self::default()
    }

    /// 指定适配器（如 "hci1"）
    pub fn with_adapter(adapter: impl Into<String>) -> Self {
        Self {
            adapter: Some(adapter.into()),
        }
    }
}

#[async_trait]
impl BleScanner for BluezScanner {
    async fn scan(&self, timeout: Duration) -> Result<Vec<Advertisement>, BleError> {
        let adapter = open_adapter(self.adapter.as_deref()).await?;
        info!("Scanning on {} for {:?}", adapter.name(), timeout);

        let mut addresses: Vec<Address> = Vec::new();
        {
            let events = adapter.discover_devices().await?;
            tokio::pin!(events);
            let deadline = tokio::time::sleep(timeout);
            tokio::pin!(deadline);

            loop {
                tokio::select! {
                    _ = &mut deadline => break,
                    event = events.next() => match event {
                        Some(AdapterEvent::DeviceAdded(addr)) => {
                            if !addresses.contains(&addr) {
                                addresses.push(addr);
                            }
                        }
                        Some(_) => {}
                        None => break,
                    },
                }
            }
            // 离开作用域时 drop 事件流，停止扫描
        }

        // 扫描结束后再读取名称：名称可能在 DeviceAdded 之后才到达
        let mut found = Vec::with_capacity(addresses.len());
        for addr in addresses {
            let name = match adapter.device(addr) {
                Ok(device) => device.name().await.unwrap_or(None),
                Err(_) => None,
            };
            found.push(Advertisement::new(name, addr.to_string()));
        }
        debug!("Scan finished, {} advertisements", found.len());
        Ok(found)
    }
}
