//! 优雅关闭
//! 收到信号后立即开始排空，排空超时则强制结束

use std::future::Future;
use std::time::Duration;
use tokio::sync::oneshot;

/// 运行服务器直到排空完成
///
/// `shutdown_started` 在关闭信号到达时收到通知；此后若排空
/// 超过 `timeout` 仍未完成，放弃等待并强制结束。
pub async fn run_with_forced_timeout<F, E>(
    server: F,
    shutdown_started: oneshot::Receiver<()>,
    timeout: Duration,
) -> Result<(), E>
where
    F: Future<Output = Result<(), E>>,
{
    tokio::pin!(server);

    tokio::select! {
        result = &mut server => result,
        _ = async {
            // 信号未到达前不启动计时
            let _ = shutdown_started.await;
            tokio::time::sleep(timeout).await;
        } => {
            tracing::warn!("Graceful shutdown timeout reached, forcing exit");
            Ok(())
        }
    }
}
