//! Prelude - 常用类型的便捷导入
//!
//! ```rust
//! use ozo_sdk::prelude::*;
//! ```

// 客户端层（推荐使用）
pub use ozo_client::{CancelToken, ClientConfig, OzoBot, OzoBuilder, SearchOptions, search};

// 协议层
pub use ozo_protocol::{Channel, Emotion, LedCommand, LedSelector, MotorCommand, OzoCommand};

// 传输层（常用 Trait）
pub use ozo_ble::{BleScanner, BleTransport, WriteMode};

#[cfg(all(target_os = "linux", feature = "bluez"))]
pub use ozo_ble::{BluezScanner, BluezTransport};

// 错误类型
pub use ozo_ble::BleError;
pub use ozo_client::ClientError;
pub use ozo_protocol::ProtocolError;
