use std::sync::Arc;

use chrono::NaiveDate;
use shared::models::PlanCatalog;

use crate::core::{Config, Result, ServerError};
use crate::db::DbService;
use crate::db::repository::{MemberRepository, SqliteMemberRepository};
use crate::notify::{DeepLinkDispatcher, NotificationDispatcher};
use crate::utils::time::today_in;

/// 服务器状态 - 所有 handler 共享
///
/// 只保存协作者的句柄；会员数据始终从仓储读取，不在内存中缓存。
#[derive(Clone)]
pub struct ServerState {
    pub config: Config,
    pub members: Arc<dyn MemberRepository>,
    pub plans: Arc<PlanCatalog>,
    pub dispatcher: Arc<dyn NotificationDispatcher>,
}

impl ServerState {
    pub fn new(
        config: Config,
        members: Arc<dyn MemberRepository>,
        plans: Arc<PlanCatalog>,
        dispatcher: Arc<dyn NotificationDispatcher>,
    ) -> Self {
        Self {
            config,
            members,
            plans,
            dispatcher,
        }
    }

    /// 打开数据库、加载套餐目录、构建提醒渠道
    pub async fn initialize(config: &Config) -> Result<Self> {
        let db = DbService::new(&config.database_path())
            .await
            .map_err(|e| ServerError::Database(e.message))?;

        let plans = match &config.plan_catalog_path {
            Some(path) => {
                let catalog = PlanCatalog::from_json_file(path).map_err(|e| {
                    ServerError::Config(format!("Failed to load plan catalog {path}: {e}"))
                })?;
                tracing::info!(path = %path, plans = catalog.plans().len(), "Plan catalog loaded");
                catalog
            }
            None => PlanCatalog::default(),
        };

        if config.reminder_channels.is_empty() {
            tracing::warn!("No reminder channels enabled, sending reminders will fail");
        }
        let dispatcher = DeepLinkDispatcher::new(config.reminder_channels.iter().copied());

        Ok(Self::new(
            config.clone(),
            Arc::new(SqliteMemberRepository::new(db.pool)),
            Arc::new(plans),
            Arc::new(dispatcher),
        ))
    }

    /// 业务时区的今天
    pub fn today(&self) -> NaiveDate {
        today_in(self.config.timezone)
    }
}
