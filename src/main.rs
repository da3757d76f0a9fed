//! radioplay - 广播剧混音服务
//!
//! - Domain: audio/, mix/
//! - Application: commands, ports, workspace
//! - Infrastructure: http, adapters

use std::sync::Arc;

use radioplay::application::{GenerateContentHandler, MixAudioHandler};
use radioplay::config::{load_config, print_config, AppConfig};
use radioplay::infrastructure::adapters::{
    FileBackgroundTrack, FileStaging, HttpGeminiClient, HttpGeminiClientConfig, SymphoniaDecoder,
};
use radioplay::infrastructure::http::{AppState, HttpServer, ServerConfig};

fn init_tracing(config: &AppConfig) {
    let log_filter = format!(
        "{},radioplay={},tower_http=debug",
        config.log.level, config.log.level
    );
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&log_filter));

    if config.log.json {
        tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 加载配置（优先级：环境变量 > 配置文件 > 默认值）
    let config = load_config().map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))?;

    init_tracing(&config);

    tracing::info!("radioplay - 广播剧混音服务");
    print_config(&config);

    // 解码器（片段与背景音乐共用）
    let decoder = Arc::new(SymphoniaDecoder::new());

    // 请求工作区
    let staging = Arc::new(FileStaging::new(&config.mix.staging_dir).await?);

    // 背景音乐（每次请求重新读取）
    let background = Arc::new(FileBackgroundTrack::new(
        config.mix.background_location(),
        decoder.clone(),
    ));
    if !background.path().is_file() {
        tracing::warn!(
            path = %background.path().display(),
            "Background track not found, responses will contain narration only"
        );
    }

    let mix_audio_handler =
        MixAudioHandler::new(staging, decoder, background, config.mix.settings());

    // 生成模型代理
    let gemini_client = HttpGeminiClient::new(
        HttpGeminiClientConfig::new(&config.gemini.base_url)
            .with_timeout(config.gemini.timeout_secs),
    )?;
    let api_keys = config.gemini.keys();
    if api_keys.is_empty() {
        tracing::warn!("No Gemini API keys configured, /api/gemini will fail");
    }
    let generate_content_handler = GenerateContentHandler::new(Arc::new(gemini_client), api_keys);

    // 创建 HTTP 服务器
    let server_config = ServerConfig::new(&config.server.host, config.server.port)
        .with_body_limit(config.server.body_limit_bytes);
    let state = AppState::new(mix_audio_handler, generate_content_handler);
    let server = HttpServer::new(server_config, state);

    // 启动服务器（带优雅关闭）
    server
        .run_with_shutdown(async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                tracing::error!(error = %e, "Failed to listen for ctrl-c");
                return;
            }
            tracing::info!("Received shutdown signal");
        })
        .await?;

    tracing::info!("Server shutdown complete");

    Ok(())
}
