//! 机器人句柄
//!
//! `OzoBot` 持有一个传输会话，负责：
//! - 连接时打开会话、解析两个通道并发送初始化序列
//! - 把协议层生成的指令路由到对应通道
//! - 等待型运动指令的计时与中断
//!
//! 所有操作都需要 `&mut self`，同一句柄上的写入天然串行。

use crate::builder::ClientConfig;
use crate::cancel::CancelToken;
use crate::endpoint::Endpoints;
use crate::error::ClientError;
use ozo_ble::BleTransport;
use ozo_protocol::{
    Channel, Emotion, LedCommand, LedSelector, MotorCommand, OzoCommand, encode_connect_init,
    stop_command,
};
use std::time::Duration;
use tracing::{debug, info, trace, warn};

/// 表情播放后的等待时长
pub const EMOTION_WAIT: Duration = Duration::from_secs(1);

/// 句柄的连接状态
#[derive(Debug)]
enum LinkState<C> {
    /// 未连接（初始状态，或已断开）
    Disconnected,
    /// 已连接且两个通道均已解析
    Connected(Endpoints<C>),
    /// 连接过程中通道解析失败；之后的发送全部失败
    Unresolved { channel: Channel },
}

/// Ozobot Evo 句柄
///
/// # Example
///
/// ```no_run
/// # async fn demo() -> Result<(), ozo_client::ClientError> {
/// use ozo_client::OzoBuilder;
/// use ozo_protocol::{Emotion, LedSelector, MotorCommand};
///
/// let mut bot = OzoBuilder::new().address("AA:BB:CC:DD:EE:FF").build()?;
/// bot.connect().await?;
/// bot.set_leds(LedSelector::ALL, 0, 255, 0).await?;
/// bot.control_motors(MotorCommand::drive(10, 5.0), true).await?;
/// bot.play_emotion(Emotion::Happy, true).await?;
/// bot.disconnect().await?;
/// # Ok(())
/// # }
/// ```
pub struct OzoBot<T: BleTransport> {
    transport: T,
    state: LinkState<T::Channel>,
    config: ClientConfig,
    cancel: CancelToken,
}

impl<T: BleTransport> OzoBot<T> {
    /// 使用默认配置创建句柄（不会立即连接）
    pub fn new(transport: T) -> Self {
        Self::with_config(transport, ClientConfig::default())
    }

    pub fn with_config(transport: T, config: ClientConfig) -> Self {
        Self {
            transport,
            state: LinkState::Disconnected,
            config,
            cancel: CancelToken::new(),
        }
    }

    /// 底层传输会话
    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// 中断令牌
    ///
    /// 克隆后交给其他任务或信号处理函数，用于打断正在等待的运动指令。
    pub fn cancel_token(&self) -> CancelToken {
        self.cancel.clone()
    }

    /// 打开会话并完成初始化
    ///
    /// 顺序：打开会话 → 解析电机通道与默认通道 → 依次发送
    /// 关闭自主待机、初始化电机、初始化声音 三条指令。
    ///
    /// 已连接时直接返回 `Ok`。任一步失败都会尽力关闭会话。
    pub async fn connect(&mut self) -> Result<(), ClientError> {
        if matches!(self.state, LinkState::Connected(_)) && self.transport.is_connected().await {
            debug!("Already connected, skipping connect");
            return Ok(());
        }

        self.transport
            .connect()
            .await
            .map_err(ClientError::Connection)?;

        let channels = match self.transport.channels().await {
            Ok(channels) => channels,
            Err(e) => {
                self.state = LinkState::Disconnected;
                self.close_quietly().await;
                return Err(ClientError::Connection(e));
            },
        };
        trace!("Device published {} channel(s)", channels.len());

        let endpoints = match Endpoints::resolve(&channels) {
            Ok(endpoints) => endpoints,
            Err(channel) => {
                warn!("Required channel {} not published by device", channel);
                self.state = LinkState::Unresolved { channel };
                self.close_quietly().await;
                return Err(ClientError::unresolved(channel));
            },
        };
        self.state = LinkState::Connected(endpoints);

        for command in encode_connect_init() {
            if let Err(e) = self.send(&command).await {
                warn!("Initialization failed: {}", e);
                self.state = LinkState::Disconnected;
                self.close_quietly().await;
                return Err(e);
            }
        }

        info!("Connected and initialized");
        Ok(())
    }

    /// 停止运动并关闭会话
    ///
    /// 可以重复调用。停止指令失败只记录警告，会话关闭总会执行。
    pub async fn disconnect(&mut self) -> Result<(), ClientError> {
        if matches!(self.state, LinkState::Connected(_)) {
            if let Err(e) = self.stop_movement().await {
                warn!("Failed to stop movement before disconnect: {}", e);
            }
        }
        self.state = LinkState::Disconnected;
        self.transport
            .disconnect()
            .await
            .map_err(ClientError::Connection)?;
        info!("Disconnected");
        Ok(())
    }

    /// 传输层报告的连接状态
    pub async fn is_connected(&self) -> bool {
        self.transport.is_connected().await
    }

    /// 设置 LED 颜色
    pub async fn set_leds(
        &mut self,
        selector: LedSelector,
        red: u8,
        green: u8,
        blue: u8,
    ) -> Result<(), ClientError> {
        let command = LedCommand::new(selector, red, green, blue).to_command();
        self.send(&command).await
    }

    /// 发送电机指令
    ///
    /// `wait = true` 时在发送后等待（钳位后的）持续时间；
    /// 等待期间中断令牌被触发会立即发送停止指令并返回 [`ClientError::Interrupted`]。
    pub async fn control_motors(
        &mut self,
        command: MotorCommand,
        wait: bool,
    ) -> Result<(), ClientError> {
        self.send(&command.to_command()).await?;
        if wait {
            let duration = Duration::from_secs_f64(command.clamped_duration());
            self.wait_or_stop(duration).await?;
        }
        Ok(())
    }

    /// 原地左转约 90°
    pub async fn rotate_left(&mut self, wait: bool) -> Result<(), ClientError> {
        self.control_motors(MotorCommand::rotate_left(), wait).await
    }

    /// 原地右转约 90°
    pub async fn rotate_right(&mut self, wait: bool) -> Result<(), ClientError> {
        self.control_motors(MotorCommand::rotate_right(), wait).await
    }

    /// 停止所有运动
    pub async fn stop_movement(&mut self) -> Result<(), ClientError> {
        self.send(&stop_command()).await
    }

    /// 播放表情动画
    ///
    /// 依次发送三条固定指令；`wait = true` 时之后等待 1 秒（可被中断提前结束）。
    pub async fn play_emotion(&mut self, emotion: Emotion, wait: bool) -> Result<(), ClientError> {
        debug!("Playing emotion {}", emotion);
        for command in emotion.commands() {
            self.send(&command).await?;
        }
        if wait {
            self.sleep_unless_cancelled(EMOTION_WAIT).await;
        }
        Ok(())
    }

    /// 按数值选择器播放表情（1-4）
    pub async fn play_emotion_raw(&mut self, selector: u8, wait: bool) -> Result<(), ClientError> {
        let emotion = Emotion::try_from(selector)?;
        self.play_emotion(emotion, wait).await
    }

    /// 把指令写到对应通道
    async fn send(&mut self, command: &OzoCommand) -> Result<(), ClientError> {
        let endpoints = match &self.state {
            LinkState::Connected(endpoints) => endpoints,
            LinkState::Unresolved { channel } => return Err(ClientError::unresolved(*channel)),
            LinkState::Disconnected => return Err(ClientError::NotConnected),
        };
        let target = endpoints.get(command.channel);
        debug!("TX {} {}", command.channel, command.to_hex());
        self.transport
            .write(target, command.as_bytes(), self.config.write_mode)
            .await
            .map_err(|source| ClientError::TransportWrite {
                channel: command.channel,
                source,
            })
    }

    /// 等待 `duration`；被中断时发送停止指令
    async fn wait_or_stop(&mut self, duration: Duration) -> Result<(), ClientError> {
        if self.sleep_unless_cancelled(duration).await {
            return Ok(());
        }
        info!("Wait interrupted, stopping movement");
        self.stop_movement().await?;
        Err(ClientError::Interrupted)
    }

    /// 返回 `true` 表示完整等待，`false` 表示被中断
    ///
    /// 中断被观察到后即清除，只作用于当前这一次等待。
    async fn sleep_unless_cancelled(&self, duration: Duration) -> bool {
        tokio::select! {
            _ = tokio::time::sleep(duration) => true,
            _ = self.cancel.cancelled() => {
                self.cancel.reset();
                false
            },
        }
    }

    async fn close_quietly(&mut self) {
        if let Err(e) = self.transport.disconnect().await {
            warn!("Failed to close session: {}", e);
        }
    }
}

impl<T: BleTransport> std::fmt::Debug for OzoBot<T>
where
    T::Channel: std::fmt::Debug,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OzoBot")
            .field("state", &self.state)
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}
