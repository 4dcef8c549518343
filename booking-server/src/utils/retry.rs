//! Bounded Retry
//!
//! 对瞬态故障做有界指数退避重试。调用方通过 `is_transient`
//! 区分可重试错误；非瞬态错误立即返回。

use std::future::Future;
use std::time::Duration;

use tracing::warn;

/// 重试策略：尝试次数 + 退避基准 (逐次翻倍)
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    attempts: u32,
    base_delay: Duration,
}

impl RetryPolicy {
    pub fn new(attempts: u32, base_delay: Duration) -> Self {
        Self {
            // 至少执行一次
            attempts: attempts.max(1),
            base_delay,
        }
    }

    /// 执行 `op`，瞬态错误按退避序列重试，直至成功或次数耗尽
    pub async fn run<T, E, F, Fut>(
        &self,
        what: &str,
        is_transient: fn(&E) -> bool,
        mut op: F,
    ) -> Result<T, E>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T, E>>,
        E: std::fmt::Display,
    {
        let mut delay = self.base_delay;

        for attempt in 1..=self.attempts {
            match op().await {
                Ok(value) => return Ok(value),
                Err(e) if attempt < self.attempts && is_transient(&e) => {
                    warn!(
                        operation = what,
                        attempt,
                        error = %e,
                        "Transient failure, retrying in {:?}",
                        delay
                    );
                    tokio::time::sleep(delay).await;
                    delay *= 2;
                }
                Err(e) => return Err(e),
            }
        }

        unreachable!("retry loop returns on final attempt")
    }
}
