//! 设备发现
//!
//! 限时扫描附近设备，按名称前缀（不区分大小写）过滤，返回 名称 → 地址 映射。
//! 名称重复时后发现的覆盖先发现的。

use crate::error::ClientError;
use ozo_ble::{Advertisement, BleScanner};
use std::collections::HashMap;
use std::time::Duration;
use tracing::{debug, info};

/// 默认名称前缀
pub const DEFAULT_PREFIX: &str = "Ozo";

/// 默认扫描时长
pub const DEFAULT_SCAN_TIMEOUT: Duration = Duration::from_secs(10);

/// 扫描参数
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchOptions {
    /// 设备名称前缀（不区分大小写）
    pub prefix: String,
    /// 扫描时长（只约束扫描本身）
    pub timeout: Duration,
}

impl Default for SearchOptions {
    fn default() -> Self {
        Self {
            prefix: DEFAULT_PREFIX.to_string(),
            timeout: DEFAULT_SCAN_TIMEOUT,
        }
    }
}

impl SearchOptions {
    pub fn new(prefix: impl Into<String>, timeout: Duration) -> Self {
        Self {
            prefix: prefix.into(),
            timeout,
        }
    }
}

/// 按前缀过滤广播
///
/// 未广播名称的设备被忽略。
pub fn filter_by_prefix(
    advertisements: impl IntoIterator<Item = Advertisement>,
    prefix: &str,
) -> HashMap<String, String> {
    let prefix = prefix.to_lowercase();
    let mut results = HashMap::new();
    for adv in advertisements {
        let Some(name) = adv.name else {
            continue;
        };
        if name.to_lowercase().starts_with(&prefix) {
            if let Some(previous) = results.insert(name.clone(), adv.address) {
                debug!("Duplicate name {:?}, replacing {}", name, previous);
            }
        }
    }
    results
}

/// 扫描附近的机器人
///
/// # Example
///
/// ```no_run
/// # async fn demo(scanner: impl ozo_ble::BleScanner) -> Result<(), ozo_client::ClientError> {
/// use ozo_client::discovery::{search, SearchOptions};
///
/// let robots = search(&scanner, &SearchOptions::default()).await?;
/// for (name, address) in &robots {
///     println!("{} => {}", name, address);
/// }
/// # Ok(())
/// # }
/// ```
pub async fn search<S: BleScanner + ?Sized>(
    scanner: &S,
    options: &SearchOptions,
) -> Result<HashMap<String, String>, ClientError> {
    info!(
        "Searching for devices with prefix {:?} ({:?})",
        options.prefix, options.timeout
    );
    let advertisements = scanner
        .scan(options.timeout)
        .await
        .map_err(ClientError::Discovery)?;
    let results = filter_by_prefix(advertisements, &options.prefix);
    info!("Found {} matching device(s)", results.len());
    Ok(results)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ozo_ble::MockScanner;

    #[test]
    fn test_filter_case_insensitive() {
        let ads = vec![
            Advertisement::named("OzoBlue", "AA:AA:AA:AA:AA:01"),
            Advertisement::named("ozogreen", "AA:AA:AA:AA:AA:02"),
            Advertisement::named("Other", "AA:AA:AA:AA:AA:03"),
            Advertisement::new(None, "AA:AA:AA:AA:AA:04"),
        ];
        let results = filter_by_prefix(ads, "Ozo");
        assert_eq!(results.len(), 2);
        assert_eq!(results["OzoBlue"], "AA:AA:AA:AA:AA:01");
        assert_eq!(results["ozogreen"], "AA:AA:AA:AA:AA:02");
        assert!(!results.contains_key("Other"));
    }

    #[test]
    fn test_filter_last_write_wins() {
        let ads = vec![
            Advertisement::named("OzoBlue", "first"),
            Advertisement::named("OzoBlue", "second"),
        ];
        let results = filter_by_prefix(ads, "ozo");
        assert_eq!(results.len(), 1);
        assert_eq!(results["OzoBlue"], "second");
    }

    #[test]
    fn test_empty_prefix_keeps_all_named() {
        let ads = vec![
            Advertisement::named("A", "1"),
            Advertisement::named("B", "2"),
            Advertisement::new(None, "3"),
        ];
        assert_eq!(filter_by_prefix(ads, "").len(), 2);
    }

    #[test]
    fn test_default_options() {
        let options = SearchOptions::default();
        assert_eq!(options.prefix, "Ozo");
        assert_eq!(options.timeout, Duration::from_secs(10));
    }

    #[tokio::test(start_paused = true)]
    async fn test_search_with_scanner() {
        let scanner = MockScanner::new([
            Advertisement::named("OzoBlue", "01"),
            Advertisement::named("ozogreen", "02"),
            Advertisement::named("Other", "03"),
        ]);
        let results = search(&scanner, &SearchOptions::default()).await.unwrap();
        assert!(results.contains_key("OzoBlue"));
        assert!(results.contains_key("ozogreen"));
        assert!(!results.contains_key("Other"));
    }

    #[tokio::test]
    async fn test_search_scan_failure() {
        let scanner = MockScanner::failing();
        let err = search(&scanner, &SearchOptions::default()).await.unwrap_err();
        assert!(matches!(err, ClientError::Discovery(_)));
    }
}
