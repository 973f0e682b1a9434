// GUI用ユーティリティ関数

use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

use crate::gui::config_manager::{LogConfig, WindowConfig};

/// ログ初期化
///
/// `RUST_LOG` が設定されていればそれを優先する。ファイル出力が有効な場合は
/// 返されたガードを `main` の終わりまで保持すること。
pub fn init_logging(config: &LogConfig) -> anyhow::Result<Option<WorkerGuard>> {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.log_level))
        .or_else(|_| EnvFilter::try_new("info"))?;

    let stdout_layer = tracing_subscriber::fmt::layer()
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .compact();

    let log_dir = config
        .resolve_log_dir()
        .filter(|_| config.enable_file_logging);

    let (file_layer, guard) = match log_dir {
        Some(dir) => {
            std::fs::create_dir_all(&dir)?;
            let appender = tracing_appender::rolling::daily(&dir, &config.log_file_prefix);
            let (writer, guard) = tracing_appender::non_blocking(appender);
            let layer = tracing_subscriber::fmt::layer()
                .with_ansi(false)
                .with_target(true)
                .with_writer(writer)
                .boxed();
            (Some(layer), Some((guard, dir)))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(env_filter)
        .with(stdout_layer)
        .with(file_layer)
        .try_init()?;

    let guard = match guard {
        Some((guard, dir)) => {
            info!("📝 Logging to {}", dir.display());
            if config.auto_cleanup_enabled {
                cleanup_old_logs(&dir, &config.log_file_prefix, config.max_log_files as usize);
            }
            Some(guard)
        }
        None => None,
    };

    Ok(guard)
}

/// 古いログファイルを削除し、新しいものから `keep` 件だけ残す
pub fn cleanup_old_logs(dir: &Path, prefix: &str, keep: usize) -> usize {
    let pattern = dir.join(format!("{}*", prefix));
    let Some(pattern) = pattern.to_str() else {
        warn!("⚠️ Log directory is not valid UTF-8: {}", dir.display());
        return 0;
    };

    let mut files: Vec<PathBuf> = match glob::glob(pattern) {
        Ok(paths) => paths.filter_map(Result::ok).filter(|p| p.is_file()).collect(),
        Err(e) => {
            warn!("⚠️ Invalid log file pattern {}: {}", pattern, e);
            return 0;
        }
    };

    if files.len() <= keep {
        return 0;
    }

    // ローテーション名は日付接尾辞なので名前順が古い順
    files.sort();
    let excess = files.len() - keep;
    let mut removed = 0;
    for path in files.into_iter().take(excess) {
        match std::fs::remove_file(&path) {
            Ok(()) => {
                debug!("🗑️ Removed old log file: {}", path.display());
                removed += 1;
            }
            Err(e) => warn!("⚠️ Failed to remove {}: {}", path.display(), e),
        }
    }
    removed
}

/// ウィンドウ設定の最低限の補正
pub fn validate_window_bounds(config: &mut WindowConfig) {
    if config.x < 0 {
        config.x = 100;
    }
    if config.y < 0 {
        config.y = 100;
    }
    if config.width < 640 {
        config.width = 640;
    }
    if config.height < 480 {
        config.height = 480;
    }
}
