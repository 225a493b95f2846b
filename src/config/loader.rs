//! 設定ファイルの読み込み関数

use std::path::Path;

use super::{
    ConfigError,
    TableSettings,
};

/// ワークスペースのルートで探す設定ファイル名
pub const CONFIG_FILE_NAME: &str = ".translation-tables.json";

/// ワークスペースから設定を読み込む
///
/// `.translation-tables.json` ファイルを探して読み込む
///
/// # Arguments
/// * `workspace_root` - ワークスペースのルートパス
///
/// # Returns
/// - `Ok(Some(settings))`: 設定ファイルが見つかり、読み込みに成功
/// - `Ok(None)`: 設定ファイルが見つからない
///
/// # Errors
/// - ファイル読み込みエラー
/// - JSON パースエラー
pub(super) fn load_from_workspace(
    workspace_root: &Path,
) -> Result<Option<TableSettings>, ConfigError> {
    let config_path = workspace_root.join(CONFIG_FILE_NAME);

    if !config_path.exists() {
        tracing::debug!("Configuration file not found: {:?}", config_path);
        return Ok(None);
    }

    load_from_file(&config_path).map(Some)
}

/// 指定されたファイルから設定を読み込む
///
/// ワークスペースからの読み込みと違い、ファイルが存在しない場合もエラーになる
///
/// # Errors
/// - ファイル読み込みエラー
/// - JSON パースエラー
pub(super) fn load_from_file(config_path: &Path) -> Result<TableSettings, ConfigError> {
    tracing::debug!("Loading configuration from: {:?}", config_path);

    let content = std::fs::read_to_string(config_path)?;
    let settings: TableSettings = serde_json::from_str(&content)?;

    Ok(settings)
}
