//! 客户端层错误类型定义

use ozo_ble::BleError;
use ozo_protocol::{Channel, ProtocolError};
use thiserror::Error;

/// 客户端层错误类型
#[derive(Error, Debug)]
pub enum ClientError {
    /// 传输会话无法打开/关闭
    #[error("Connection error: {0}")]
    Connection(#[source] BleError),

    /// 必需的通道未在设备发布的列表中找到
    ///
    /// 对该句柄是致命的：之后的所有发送都会立即失败，而不是写到错误的通道。
    #[error("Endpoint resolution failed: {channel} (id {id}) not published by device")]
    EndpointResolution { channel: Channel, id: u16 },

    /// 无效参数（如未知的表情选择器）
    #[error("Invalid argument: {0}")]
    InvalidArgument(#[from] ProtocolError),

    /// 底层写入失败
    #[error("Transport write to {channel} failed: {source}")]
    TransportWrite {
        channel: Channel,
        #[source]
        source: BleError,
    },

    /// 扫描失败
    #[error("Discovery error: {0}")]
    Discovery(#[source] BleError),

    /// 尚未连接
    #[error("Not connected")]
    NotConnected,

    /// 等待期间收到中断，已发送停止指令
    #[error("Interrupted (movement stopped)")]
    Interrupted,
}

impl ClientError {
    pub(crate) fn unresolved(channel: Channel) -> Self {
        ClientError::EndpointResolution {
            channel,
            id: channel.id(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_error_display() {
        let err = ClientError::unresolved(Channel::Motor);
        assert_eq!(
            format!("{}", err),
            "Endpoint resolution failed: motor(19) (id 19) not published by device"
        );

        let err = ClientError::TransportWrite {
            channel: Channel::Default,
            source: BleError::NotConnected,
        };
        let msg = format!("{}", err);
        assert!(msg.contains("default(30)") && msg.contains("Not connected"));

        assert_eq!(format!("{}", ClientError::NotConnected), "Not connected");
    }

    #[test]
    fn test_from_protocol_error() {
        let err: ClientError = ProtocolError::UnknownEmotion(7).into();
        match err {
            ClientError::InvalidArgument(ProtocolError::UnknownEmotion(v)) => assert_eq!(v, 7),
            _ => panic!("Expected InvalidArgument variant"),
        }
    }
}
