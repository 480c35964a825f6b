/// 日志工具模块
///
/// 初始化 tracing 订阅器，并记录启动信息
use tracing::info;
use tracing_subscriber::EnvFilter;

/// 初始化日志
///
/// 优先使用 `RUST_LOG`，否则按 `verbose` 选择 debug / info。
/// 日志输出到 stderr，题目卡片占用 stdout。
pub fn init(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

/// 记录程序启动信息
///
/// # 参数
/// - `data_folder`: 数据集文件夹
/// - `advice_enabled`: 是否可以使用 AI 建议
pub fn log_startup(data_folder: &str, advice_enabled: bool) {
    info!("{}", "=".repeat(60));
    info!(
        "🚀 测量士考试题库启动 - {}",
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S")
    );
    info!("📁 数据文件夹: {}", data_folder);
    if advice_enabled {
        info!("🤖 AI 建议: 已启用");
    } else {
        info!("🤖 AI 建议: 未配置 API Key，已禁用");
    }
    info!("{}", "=".repeat(60));
}
