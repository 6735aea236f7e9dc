use pchem::engine::config::VibrationalConfig;
use std::path::PathBuf;

pub struct AppConfig {
    pub core_config: VibrationalConfig,
    pub report_path: Option<PathBuf>,
    pub samples_path: Option<PathBuf>,
}
