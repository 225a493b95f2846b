//! 設定管理を行うモジュール

use std::path::{
    Path,
    PathBuf,
};

use super::{
    ConfigError,
    TableSettings,
    loader,
};
use crate::store::TableContext;

/// 設定管理を行う
#[derive(Default, Debug, Clone)]
pub struct ConfigManager {
    /// 現在の設定（常にバリデーション済み）
    current_settings: TableSettings,

    /// ワークスペースのルートパス
    workspace_root: Option<PathBuf>,
}

impl ConfigManager {
    /// 新しい設定マネージャーを作成
    #[must_use]
    pub fn new() -> Self {
        Self { current_settings: TableSettings::default(), workspace_root: None }
    }

    /// 設定を読み込む
    ///
    /// ルートまたは設定ファイルがない場合はデフォルト値を使う
    ///
    /// # Arguments
    /// * `workspace_root` - ワークスペースのルートパス
    ///
    /// # Errors
    /// - ファイル読み込みエラー
    /// - JSON パースエラー
    /// - バリデーションエラー
    pub fn load_settings(&mut self, workspace_root: Option<PathBuf>) -> Result<(), ConfigError> {
        tracing::debug!("Loading settings for workspace: {:?}", workspace_root);

        // ワークスペースの設定を読み込み
        let settings = if let Some(root) = &workspace_root {
            loader::load_from_workspace(root)?.map_or_else(TableSettings::default, |ws| {
                tracing::debug!("Loaded workspace settings: {:?}", ws);
                ws
            })
        } else {
            TableSettings::default()
        };

        // バリデーション
        settings.validate().map_err(ConfigError::ValidationErrors)?;

        // 設定を保存
        self.current_settings = settings;
        self.workspace_root = workspace_root;
        tracing::debug!("Settings loaded successfully: {:?}", self.current_settings);

        Ok(())
    }

    /// 指定されたファイルから設定を読み込む
    ///
    /// # Errors
    /// - ファイル読み込みエラー（ファイルが存在しない場合を含む）
    /// - JSON パースエラー
    /// - バリデーションエラー
    pub fn load_file(&mut self, config_path: &Path) -> Result<(), ConfigError> {
        let settings = loader::load_from_file(config_path)?;
        self.update_settings(settings)
    }

    /// 設定を更新する
    ///
    /// # Errors
    /// バリデーションエラー（以前の設定が維持される）
    pub fn update_settings(&mut self, new_settings: TableSettings) -> Result<(), ConfigError> {
        tracing::debug!("Updating settings...");

        new_settings.validate().map_err(ConfigError::ValidationErrors)?;

        self.current_settings = new_settings;
        tracing::debug!("Settings updated successfully");

        Ok(())
    }

    /// 現在の設定を取得
    #[must_use]
    pub const fn get_settings(&self) -> &TableSettings {
        &self.current_settings
    }

    /// ワークスペースルートを取得
    #[must_use]
    pub const fn workspace_root(&self) -> Option<&PathBuf> {
        self.workspace_root.as_ref()
    }

    /// 現在の設定からテーブルコンテキストを作成
    #[must_use]
    pub fn table_context(&self) -> TableContext {
        TableContext::from_settings(&self.current_settings)
    }
}
