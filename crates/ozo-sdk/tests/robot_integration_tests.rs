//! 端到端集成测试
//!
//! 使用 `MockTransport` / `MockScanner` 驱动完整的 SDK 流程：
//! - 扫描与前缀过滤
//! - 连接初始化序列
//! - 指令路由（电机通道 / 默认通道）
//! - 等待与中断
//! - 断开
//!
//! **注意：** 这些测试不需要蓝牙硬件。

use ozo_sdk::ble::{Advertisement, MockScanner, MockTransport, WrittenPacket};
use ozo_sdk::prelude::*;
use std::time::Duration;

const MOTOR: u16 = 19;
const DEFAULT: u16 = 30;
const STOP_HEX: &str = "6800015cad020000000000000000ffffffff";

fn transport() -> MockTransport {
    // 真实设备会发布很多特征值，两个目标通道夹在中间
    MockTransport::new([3, 5, 8, MOTOR, 22, 25, DEFAULT, 33])
}

fn hex_on(writes: &[WrittenPacket], channel_id: u16) -> Vec<String> {
    writes
        .iter()
        .filter(|w| w.channel_id == channel_id)
        .map(WrittenPacket::to_hex)
        .collect()
}

#[tokio::test(start_paused = true)]
async fn test_full_demo_sequence() {
    let scanner = MockScanner::new([
        Advertisement::named("OzoBlue", "AA:00:00:00:00:01"),
        Advertisement::named("Printer", "AA:00:00:00:00:02"),
    ]);
    let found = search(&scanner, &SearchOptions::default()).await.unwrap();
    assert_eq!(found.len(), 1);
    assert_eq!(found["OzoBlue"], "AA:00:00:00:00:01");

    let mock = transport();
    let mut bot = OzoBuilder::new().build_with(mock.clone());
    bot.connect().await.unwrap();
    bot.set_leds(LedSelector::ALL, 0, 255, 0).await.unwrap();
    bot.control_motors(MotorCommand::drive(10, 5.0), true)
        .await
        .unwrap();
    bot.control_motors(MotorCommand::drive(10, 5.0).with_turn_left(50), true)
        .await
        .unwrap();
    bot.play_emotion(Emotion::Happy, true).await.unwrap();
    bot.disconnect().await.unwrap();

    let writes = mock.writes();
    assert_eq!(
        hex_on(&writes, MOTOR),
        vec![
            "45".to_string(),
            "68000000000000000a000000000000140000".to_string(),
            "68000000000000000a000000320000140000".to_string(),
        ]
    );

    let default = hex_on(&writes, DEFAULT);
    assert_eq!(default.first().map(String::as_str), Some("780000000000"));
    assert_eq!(default[1], "03000c6000000c006d2f617564696f2f30313031");
    assert_eq!(default[2], "6e00ff0000ff0000");
    let happy: Vec<String> = Emotion::Happy.commands().iter().map(|c| c.to_hex()).collect();
    assert_eq!(&default[3..6], happy.as_slice());
    assert_eq!(default.last().map(String::as_str), Some(STOP_HEX));
    assert!(!bot.is_connected().await);
}

#[tokio::test]
async fn test_init_precedes_every_other_write() {
    let mock = transport();
    let mut bot = OzoBot::new(mock.clone());
    bot.connect().await.unwrap();
    bot.stop_movement().await.unwrap();

    let ids: Vec<u16> = mock.writes().iter().map(|w| w.channel_id).collect();
    assert_eq!(ids, vec![DEFAULT, MOTOR, DEFAULT, DEFAULT]);
}

#[tokio::test]
async fn test_missing_default_channel() {
    let mock = MockTransport::new([MOTOR, 31]);
    let mut bot = OzoBot::new(mock.clone());
    let err = bot.connect().await.unwrap_err();
    assert!(matches!(
        err,
        ClientError::EndpointResolution {
            channel: Channel::Default,
            id: 30
        }
    ));
    assert!(matches!(
        bot.control_motors(MotorCommand::default(), false).await,
        Err(ClientError::EndpointResolution { .. })
    ));
    assert!(mock.writes().is_empty());
}

#[tokio::test(start_paused = true)]
async fn test_ctrl_c_style_interrupt() {
    let mock = transport();
    let mut bot = OzoBot::new(mock.clone());
    bot.connect().await.unwrap();
    mock.clear_writes();

    let token = bot.cancel_token();
    let canceller = tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(500)).await;
        token.cancel();
    });

    let start = tokio::time::Instant::now();
    let err = bot.rotate_right(true).await.unwrap_err();
    assert!(matches!(err, ClientError::Interrupted));
    assert!(start.elapsed() < Duration::from_millis(1250));
    canceller.await.unwrap();

    assert_eq!(mock.written_hex().last().map(String::as_str), Some(STOP_HEX));

    // 中断只作用于被打断的那次等待
    assert!(!bot.cancel_token().is_cancelled());
    bot.rotate_left(true).await.unwrap();
}

#[tokio::test]
async fn test_disconnect_idempotent() {
    let mock = transport();
    let mut bot = OzoBot::new(mock.clone());
    bot.connect().await.unwrap();
    bot.disconnect().await.unwrap();
    bot.disconnect().await.unwrap();

    let stops = mock.written_hex().iter().filter(|h| *h == STOP_HEX).count();
    assert_eq!(stops, 1);
}

#[tokio::test]
async fn test_disconnect_without_connect() {
    let mock = transport();
    let mut bot = OzoBot::new(mock.clone());
    bot.disconnect().await.unwrap();
    assert!(mock.writes().is_empty());
}

#[tokio::test]
async fn test_out_of_range_motor_values_are_clamped() {
    let mock = transport();
    let mut bot = OzoBot::new(mock.clone());
    bot.connect().await.unwrap();
    mock.clear_writes();

    let cmd = MotorCommand::drive(-1000, 99999.0)
        .with_turn_left(-7)
        .with_turn_right(4096);
    bot.control_motors(cmd, false).await.unwrap();

    let data = &mock.writes()[0].data;
    assert_eq!(data.len(), 18);
    assert_eq!(data[8], 0xFF);
    assert_eq!(data[9], 0xFF);
    assert_eq!(data[12], 0);
    assert_eq!(data[13], 255);
    assert_eq!(&data[14..16], &[0x00, 0x00]);
}

#[tokio::test]
async fn test_write_mode_is_applied() {
    let mock = transport();
    let mut bot = OzoBuilder::new()
        .write_mode(WriteMode::WithResponse)
        .build_with(mock.clone());
    bot.connect().await.unwrap();
    assert!(
        mock.writes()
            .iter()
            .all(|w| w.mode == WriteMode::WithResponse)
    );
}
