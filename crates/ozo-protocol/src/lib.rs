//! # Ozo Protocol
//!
//! Ozobot Evo BLE 指令协议定义（无硬件依赖）
//!
//! ## 模块
//!
//! - `ids`: 特征值（通道）ID 与操作码常量
//! - `led`: LED 选择位掩码
//! - `emotion`: 表情动画枚举及其固定字节表
//! - `control`: 控制指令构建（LED、电机、停止、连接初始化）
//!
//! ## 字节序
//!
//! 协议中的多字节字段（LED 选择器、电机持续时间）均为大端字节序。
//!
//! ## 纯函数
//!
//! 本 crate 中的所有编码函数都是确定性的，不做任何 IO。
//! 真正的写入由上层（`ozo-client`）路由到对应通道后完成。

pub mod control;
pub mod emotion;
pub mod ids;
pub mod led;

// 重新导出常用类型
pub use control::*;
pub use emotion::Emotion;
pub use ids::*;
pub use led::LedSelector;

use bytes::Bytes;
use thiserror::Error;

/// 一条已编码、待写入的指令
///
/// # 设计目的
///
/// `OzoCommand` 是协议层与传输层之间的中间抽象：
/// - 协议层只负责生成 `data`，不关心具体的 BLE 实现
/// - `channel` 决定由哪个特征值（通道）写出
///
/// 固定字面量指令（停止、表情、初始化）使用 `Bytes::from_static`，不产生堆分配。
///
/// ```rust
/// use ozo_protocol::{Channel, OzoCommand};
///
/// let cmd = OzoCommand::from_static(Channel::Motor, &[0x45]);
/// assert_eq!(cmd.channel, Channel::Motor);
/// assert_eq!(cmd.as_bytes(), &[0x45]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OzoCommand {
    /// 目标通道
    pub channel: Channel,
    /// 指令字节
    pub data: Bytes,
}

impl OzoCommand {
    /// 由动态构建的字节创建指令
    pub fn new(channel: Channel, data: impl Into<Bytes>) -> Self {
        Self {
            channel,
            data: data.into(),
        }
    }

    /// 由静态字面量创建指令（零拷贝）
    pub const fn from_static(channel: Channel, data: &'static [u8]) -> Self {
        Self {
            channel,
            data: Bytes::from_static(data),
        }
    }

    /// 获取指令字节
    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    /// 十六进制表示（用于日志）
    pub fn to_hex(&self) -> String {
        hex::encode(&self.data)
    }
}

/// 协议层错误类型
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ProtocolError {
    #[error("Unknown emotion selector: {0}")]
    UnknownEmotion(u8),

    #[error("Unknown emotion name: {0:?}")]
    UnknownEmotionName(String),

    #[error("Unknown LED name: {0:?}")]
    UnknownLed(String),
}
