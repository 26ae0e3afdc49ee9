//! Ozo SDK - Ozobot Evo Rust SDK
//!
//! 通过蓝牙低功耗（BLE）控制 Ozobot Evo 小车：LED、电机、原地旋转、表情动画。
//!
//! # 架构设计
//!
//! 本 SDK 采用分层架构，从底层到高层：
//!
//! - **协议层** (`protocol`): 与硬件逐位一致的指令编码，无 IO
//! - **传输层** (`ble`): BLE 会话抽象，支持 BlueZ 与 Mock
//! - **客户端层** (`client`): 连接流程、指令路由、等待与中断
//!
//! # 快速开始
//!
//! ```no_run
//! use ozo_sdk::prelude::*;
//!
//! # async fn demo() -> Result<(), ClientError> {
//! let mut bot = OzoBuilder::new().address("AA:BB:CC:DD:EE:FF").build()?;
//! bot.connect().await?;
//! bot.set_leds(LedSelector::ALL, 0, 255, 0).await?;
//! bot.disconnect().await?;
//! # Ok(())
//! # }
//! ```

pub use ozo_ble as ble;
pub use ozo_client as client;
pub use ozo_protocol as protocol;

pub mod prelude;

// 客户端层（普通用户使用）- 这是推荐的入口点
pub use ozo_client::{
    CancelToken, ClientConfig, ClientError, OzoBot, OzoBuilder, SearchOptions, search,
};

// 协议层常用类型
pub use ozo_protocol::{Emotion, LedSelector, MotorCommand, ProtocolError};

// 传输层
pub use ozo_ble::{BleError, BleScanner, BleTransport, WriteMode};

#[cfg(all(target_os = "linux", feature = "bluez"))]
pub use ozo_ble::{BluezScanner, BluezTransport};

/// 初始化日志
///
/// - `RUST_LOG` 未设置时使用 `default_directive`（如 `"info"`、`"ozo_client=debug"`）
/// - 通过 `tracing-log` 把 `log` 宏的输出也转发到 tracing
///
/// 重复调用是安全的，后续调用不生效。
pub fn init_logger(default_directive: &str) {
    let _ = tracing_log::LogTracer::init_with_filter(log::LevelFilter::Trace);

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_directive));
    let subscriber = tracing_subscriber::fmt().with_env_filter(filter).finish();
    let _ = tracing::subscriber::set_global_default(subscriber);
}
