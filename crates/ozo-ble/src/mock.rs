//! Mock 传输后端
//!
//! 不依赖任何蓝牙硬件：记录所有写入，支持注入连接/写入失败。
//! `MockTransport` 可 `Clone`，克隆体共享同一份状态，测试中保留一份用于检查。

use crate::{
    Advertisement, BleChannel, BleDeviceError, BleDeviceErrorKind, BleError, BleScanner,
    BleTransport, WriteMode,
};
use async_trait::async_trait;
use parking_lot::Mutex;
use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;

/// Mock 通道
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MockChannel {
    id: u16,
}

impl BleChannel for MockChannel {
    fn id(&self) -> u16 {
        self.id
    }
}

/// 一次被记录的写入
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WrittenPacket {
    pub channel_id: u16,
    pub data: Vec<u8>,
    pub mode: WriteMode,
}

impl WrittenPacket {
    pub fn to_hex(&self) -> String {
        hex::encode(&self.data)
    }
}

#[derive(Debug, Default)]
struct MockState {
    connected: bool,
    connect_calls: usize,
    disconnect_calls: usize,
    writes: Vec<WrittenPacket>,
    fail_connect: bool,
    failing_channels: HashSet<u16>,
}

/// Mock BLE 会话
#[derive(Debug, Clone)]
pub struct MockTransport {
    channel_ids: Vec<u16>,
    state: Arc<Mutex<MockState>>,
}

impl MockTransport {
    /// 创建发布指定通道 ID 的 mock 会话（按给定顺序发布）
    pub fn new(channel_ids: impl IntoIterator<Item = u16>) -> Self {
        Self {
            channel_ids: channel_ids.into_iter().collect(),
            state: Arc::new(Mutex::new(MockState::default())),
        }
    }

    /// 下一次及之后的 `connect` 失败
    pub fn fail_connect(&self, fail: bool) {
        self.state.lock().fail_connect = fail;
    }

    /// 写入指定通道时失败
    pub fn fail_writes_on(&self, channel_id: u16) {
        self.state.lock().failing_channels.insert(channel_id);
    }

    /// 已记录的写入
    pub fn writes(&self) -> Vec<WrittenPacket> {
        self.state.lock().writes.clone()
    }

    /// 已记录写入的十六进制表示
    pub fn written_hex(&self) -> Vec<String> {
        self.state.lock().writes.iter().map(WrittenPacket::to_hex).collect()
    }

    /// 清空写入记录
    pub fn clear_writes(&self) {
        self.state.lock().writes.clear();
    }

    pub fn connect_calls(&self) -> usize {
        self.state.lock().connect_calls
    }

    pub fn disconnect_calls(&self) -> usize {
        self.state.lock().disconnect_calls
    }

    /// 模拟设备侧断开
    pub fn drop_link(&self) {
        self.state.lock().connected = false;
    }
}

#[async_trait]
impl BleTransport for MockTransport {
    type Channel = MockChannel;

    async fn connect(&mut self) -> Result<(), BleError> {
        let mut state = self.state.lock();
        state.connect_calls += 1;
        if state.fail_connect {
            return Err(
                BleDeviceError::new(BleDeviceErrorKind::NotFound, "mock: device unreachable").into(),
            );
        }
        state.connected = true;
        Ok(())
    }

    async fn disconnect(&mut self) -> Result<(), BleError> {
        let mut state = self.state.lock();
        state.disconnect_calls += 1;
        state.connected = false;
        Ok(())
    }

    async fn is_connected(&self) -> bool {
        self.state.lock().connected
    }

    async fn channels(&self) -> Result<Vec<MockChannel>, BleError> {
        if !self.state.lock().connected {
            return Err(BleError::NotConnected);
        }
        Ok(self.channel_ids.iter().map(|&id| MockChannel { id }).collect())
    }

    async fn write(
        &mut self,
        channel: &MockChannel,
        data: &[u8],
        mode: WriteMode,
    ) -> Result<(), BleError> {
        let mut state = self.state.lock();
        if !state.connected {
            return Err(BleError::NotConnected);
        }
        if state.failing_channels.contains(&channel.id) {
            return Err(BleDeviceError::new(
                BleDeviceErrorKind::Backend,
                format!("mock: write to channel {} rejected", channel.id),
            )
            .into());
        }
        state.writes.push(WrittenPacket {
            channel_id: channel.id,
            data: data.to_vec(),
            mode,
        });
        Ok(())
    }
}

/// Mock 扫描器：返回固定的广播列表
#[derive(Debug, Clone, Default)]
pub struct MockScanner {
    advertisements: Vec<Advertisement>,
    fail: bool,
}

impl MockScanner {
    pub fn new(advertisements: impl IntoIterator<Item = Advertisement>) -> Self {
        Self {
            advertisements: advertisements.into_iter().collect(),
            fail: false,
        }
    }

    /// 扫描总是失败（如无可用适配器）
    pub fn failing() -> Self {
        Self {
            advertisements: Vec::new(),
            fail: true,
        }
    }
}

#[async_trait]
impl BleScanner for MockScanner {
    async fn scan(&self, timeout: Duration) -> Result<Vec<Advertisement>, BleError> {
        if self.fail {
            return Err(
                BleDeviceError::new(BleDeviceErrorKind::NoAdapter, "mock: no adapter").into(),
            );
        }
        tokio::time::sleep(timeout).await;
        Ok(self.advertisements.clone())
    }
}
