//! 客户端接口模块
//!
//! 本模块提供 Ozobot Evo 的用户友好接口，包括：
//! - 连接流程（打开会话、解析通道、初始化序列）
//! - LED、电机、旋转、停止、表情等高层指令
//! - 等待型指令的计时与中断（[`CancelToken`]）
//! - 附近设备扫描（[`discovery`]）
//!
//! # 使用场景
//!
//! 这是大多数用户应该使用的模块。如果只需要生成指令字节，
//! 可以直接使用 `ozo-protocol`；如果需要自定义传输后端，实现 `ozo_ble::BleTransport` 即可。

pub mod builder;
pub mod cancel;
pub mod discovery;
pub mod endpoint;
pub mod error;
pub mod robot;

// 重新导出常用类型
pub use builder::{ClientConfig, OzoBuilder};
pub use cancel::CancelToken;
pub use discovery::{DEFAULT_PREFIX, DEFAULT_SCAN_TIMEOUT, SearchOptions, search};
pub use error::ClientError;
pub use robot::{EMOTION_WAIT, OzoBot};
