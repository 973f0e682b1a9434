use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use clap::Parser;
use dioxus::prelude::*;
use smartsupport::{
    gui::{
        components::MainWindow,
        config_manager::{self, ConfigManager},
        hooks::ClientServices,
        utils,
    },
    ClientSettings, HttpSupportApi, SupportError, SupportResult,
};

/// ウィンドウ設定の保存用
static LAST_WINDOW_CONFIG: Mutex<Option<config_manager::WindowConfig>> = Mutex::new(None);

/// SmartSupport desk client
#[derive(Parser, Debug)]
#[command(version, about = "SmartSupport ticket triage desk client")]
struct Args {
    /// Backend base URL (overrides the config file)
    #[arg(long)]
    server_url: Option<String>,

    /// Log level: trace, debug, info, warn, error
    #[arg(long)]
    log_level: Option<String>,

    /// Path to an alternative config.toml
    #[arg(long)]
    config: Option<PathBuf>,
}

fn app() -> Element {
    let window = dioxus::desktop::use_window();

    // ウィンドウ状態を定期的に記録
    use_effect({
        let window = window.clone();
        move || {
            let window = window.clone();
            spawn(async move {
                let mut interval = tokio::time::interval(tokio::time::Duration::from_secs(1));
                loop {
                    interval.tick().await;

                    let current_size = window.inner_size();
                    let current_position = window.outer_position().unwrap_or_default();

                    let window_config = config_manager::WindowConfig {
                        width: current_size.width,
                        height: current_size.height,
                        x: current_position.x,
                        y: current_position.y,
                        maximized: window.is_maximized(),
                    };

                    if let Ok(mut last_config) = LAST_WINDOW_CONFIG.lock() {
                        *last_config = Some(window_config);
                    }
                }
            });
        }
    });

    rsx! {
        div {
            class: "app",
            MainWindow {}
        }
    }
}

fn main() -> SupportResult<()> {
    let args = Args::parse();

    let config_manager = match &args.config {
        Some(path) => ConfigManager::with_path(path)?,
        None => ConfigManager::new()?,
    };
    let mut config = config_manager.load_config().unwrap_or_else(|e| {
        eprintln!("⚠️ Failed to load config, using defaults: {:#}", e);
        config_manager::AppConfig::default()
    });

    if let Some(level) = args.log_level {
        config.log.log_level = level;
    }
    if let Some(url) = args.server_url {
        config.server.base_url = url;
    }

    // tokio-consoleの初期化（プロファイリング用）
    #[cfg(feature = "debug-tokio")]
    console_subscriber::init();

    #[cfg(not(feature = "debug-tokio"))]
    let _log_guard =
        utils::init_logging(&config.log).map_err(|e| SupportError::logging(format!("{:#}", e)))?;

    tracing::info!("🎬 Starting SmartSupport desk client");
    tracing::info!("🌐 Backend: {}", config.server.base_url);

    let api = HttpSupportApi::new(&config.server.base_url, config.server.request_timeout())?;
    let services = ClientServices {
        api: Arc::new(api),
        settings: ClientSettings::from(&config.ui),
    };

    utils::validate_window_bounds(&mut config.window);
    tracing::info!(
        "🪟 Window: {}x{} at ({}, {}), maximized: {}",
        config.window.width,
        config.window.height,
        config.window.x,
        config.window.y,
        config.window.maximized
    );

    let launch_builder = dioxus::LaunchBuilder::desktop()
        .with_cfg(
            dioxus::desktop::Config::new().with_window(
                dioxus::desktop::tao::window::WindowBuilder::new()
                    .with_title("SmartSupport")
                    .with_inner_size(dioxus::desktop::tao::dpi::LogicalSize::new(
                        config.window.width as f64,
                        config.window.height as f64,
                    ))
                    .with_position(dioxus::desktop::tao::dpi::LogicalPosition::new(
                        config.window.x as f64,
                        config.window.y as f64,
                    ))
                    .with_maximized(config.window.maximized)
                    .with_resizable(true),
            ),
        )
        .with_context(services);

    // Ctrl+Cシグナルハンドラー
    let exit_config_manager = config_manager.clone();
    ctrlc::set_handler(move || {
        tracing::info!("🛑 Received termination signal");
        save_window_config_on_exit(&exit_config_manager);
        std::process::exit(0);
    })
    .map_err(|e| SupportError::configuration(format!("Failed to set signal handler: {}", e)))?;

    launch_builder.launch(app);

    // 正常終了時の設定保存
    save_window_config_on_exit(&config_manager);

    tracing::info!("👋 SmartSupport shutting down");
    Ok(())
}

/// 終了時にウィンドウ設定を保存
fn save_window_config_on_exit(config_manager: &ConfigManager) {
    let last_config = LAST_WINDOW_CONFIG
        .lock()
        .ok()
        .and_then(|guard| guard.clone());
    let Some(window_config) = last_config else {
        tracing::debug!("No window state recorded, skipping save");
        return;
    };

    match config_manager.save_window(&window_config) {
        Ok(()) => tracing::info!(
            "💾 Window settings saved: {}x{} at ({}, {}), maximized: {}",
            window_config.width,
            window_config.height,
            window_config.x,
            window_config.y,
            window_config.maximized
        ),
        Err(e) => tracing::error!("❌ Failed to save window settings: {:#}", e),
    }
}
