use crate::config::loader::{ConfigLoader, Environment};
use crate::config::types::ApplicationConfig;
use crate::config::validation::Validator;
use config::ConfigError;
use once_cell::sync::OnceCell;
use tracing::{debug, warn};

// 全局配置實例
static CONFIG: OnceCell<ApplicationConfig> = OnceCell::new();

/// 獲取應用程序配置實例；尚未初始化時返回 None
pub fn get_config() -> Option<&'static ApplicationConfig> {
    CONFIG.get()
}

/// 初始化配置（在應用程序啟動時調用）
///
/// 重複呼叫時保留第一次載入的配置。
pub fn init_config() -> Result<&'static ApplicationConfig, ConfigError> {
    if let Some(config) = CONFIG.get() {
        warn!("配置已經被初始化，跳過重複初始化");
        return Ok(config);
    }

    let app_config = ApplicationConfig::load_from_env()?;
    Ok(CONFIG.get_or_init(|| app_config))
}

/// ApplicationConfig 加載方法實現
impl ApplicationConfig {
    /// 從環境變數指定的環境加載配置
    pub fn load_from_env() -> Result<Self, ConfigError> {
        let env = Environment::from_env();
        debug!("從環境加載配置: {:?}", env);
        Self::load(env)
    }

    /// 從指定環境加載配置並驗證
    pub fn load(env: Environment) -> Result<Self, ConfigError> {
        let app_config: ApplicationConfig = ConfigLoader::load(env)?.try_deserialize()?;
        app_config.checked()
    }

    /// 驗證配置，失敗時轉為 ConfigError
    pub fn checked(self) -> Result<Self, ConfigError> {
        self.validate()
            .map_err(|e| ConfigError::Message(format!("配置驗證失敗: {}", e)))?;
        debug!("配置驗證通過");
        Ok(self)
    }
}
