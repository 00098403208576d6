//! 日志在配置加载之前初始化，之后再调整级别

use interview_qa::logger;

#[test]
fn test_log_level_raised_after_config_load() {
    // RUST_LOG 优先于配置，设置时跳过
    if std::env::var_os("RUST_LOG").is_some() {
        return;
    }

    let handle = logger::init().expect("first init installs the subscriber");
    assert!(tracing::enabled!(tracing::Level::WARN));
    assert!(tracing::enabled!(tracing::Level::INFO));

    handle.set_verbose(true);
    assert!(tracing::enabled!(tracing::Level::DEBUG));

    // 已安装时再次初始化不返回句柄
    assert!(logger::init().is_none());
}
