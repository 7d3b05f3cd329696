// ABOUTME: Shared server resources handed to every route through axum State
// ABOUTME: Built once at startup from the configuration and the opened database
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use crate::admin::SessionTokenManager;
use crate::config::ServerConfig;
use crate::database::{AdminRepository, Database};
use crate::middleware::AdminAuthMiddleware;
use crate::uploads::UploadStore;
use std::sync::Arc;

/// Centralized resource container for dependency injection
///
/// Immutable after construction; routes receive it as `Arc<ServerResources>`.
#[derive(Clone)]
pub struct ServerResources {
    pub config: Arc<ServerConfig>,
    pub database: Arc<Database>,
    pub admin_repository: Arc<dyn AdminRepository>,
    pub token_manager: Arc<SessionTokenManager>,
    pub auth_middleware: Arc<AdminAuthMiddleware>,
    pub uploads: Arc<UploadStore>,
}

impl ServerResources {
    /// Assemble resources using the database as the administrator store
    #[must_use]
    pub fn new(config: ServerConfig, database: Database) -> Self {
        let admin_repository: Arc<dyn AdminRepository> = Arc::new(database.admins());
        Self::with_admin_repository(config, database, admin_repository)
    }

    /// Assemble resources with an explicit administrator store
    #[must_use]
    pub fn with_admin_repository(
        config: ServerConfig,
        database: Database,
        admin_repository: Arc<dyn AdminRepository>,
    ) -> Self {
        let token_manager = Arc::new(SessionTokenManager::from_config(&config.auth));
        let auth_middleware = Arc::new(AdminAuthMiddleware::new(
            token_manager.clone(),
            admin_repository.clone(),
        ));
        let uploads = Arc::new(UploadStore::from_config(&config.uploads));

        Self {
            config: Arc::new(config),
            database: Arc::new(database),
            admin_repository,
            token_manager,
            auth_middleware,
            uploads,
        }
    }
}
