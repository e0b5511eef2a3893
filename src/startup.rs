//! Application Startup
//!
//! Application building and server initialization.

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use axum::Router;
use sqlx::PgPool;
use tokio::net::TcpListener;

use crate::application::services::{
    ChatService, ChatServiceImpl, MessageService, MessageServiceImpl, UserService, UserServiceImpl,
};
use crate::config::Settings;
use crate::domain::{
    ChatGuard, ChatRepository, MembershipGuard, MembershipRepository, MessageRepository,
    UserRepository,
};
use crate::infrastructure::database;
use crate::infrastructure::repositories::{
    PgChatRepository, PgMembershipRepository, PgMessageRepository, PgUserRepository,
};
use crate::presentation::http::routes;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub db: PgPool,
    pub users: Arc<dyn UserService>,
    pub chats: Arc<dyn ChatService>,
    pub messages: Arc<dyn MessageService>,
    pub guard: Arc<dyn ChatGuard>,
    pub settings: Arc<Settings>,
}

impl AppState {
    /// Wire the services over the given repositories.
    pub fn new<U, C, M, Msg>(
        db: PgPool,
        settings: Settings,
        user_repo: Arc<U>,
        chat_repo: Arc<C>,
        membership_repo: Arc<M>,
        message_repo: Arc<Msg>,
    ) -> Self
    where
        U: UserRepository + 'static,
        C: ChatRepository + 'static,
        M: MembershipRepository + 'static,
        Msg: MessageRepository + 'static,
    {
        let edit_policy = settings.messages.edit_policy;

        Self {
            db,
            users: Arc::new(UserServiceImpl::new(user_repo.clone(), chat_repo.clone())),
            chats: Arc::new(ChatServiceImpl::new(
                chat_repo.clone(),
                user_repo.clone(),
                membership_repo.clone(),
            )),
            messages: Arc::new(MessageServiceImpl::new(
                message_repo,
                chat_repo.clone(),
                user_repo,
                edit_policy,
            )),
            guard: Arc::new(MembershipGuard::new(chat_repo, membership_repo)),
            settings: Arc::new(settings),
        }
    }

    /// State backed by the PostgreSQL repositories.
    pub fn with_postgres(db: PgPool, settings: Settings) -> Self {
        Self::new(
            db.clone(),
            settings,
            Arc::new(PgUserRepository::new(db.clone())),
            Arc::new(PgChatRepository::new(db.clone())),
            Arc::new(PgMembershipRepository::new(db.clone())),
            Arc::new(PgMessageRepository::new(db)),
        )
    }
}

/// Application instance
pub struct Application {
    listener: TcpListener,
    router: Router,
}

impl Application {
    /// Build the application from settings
    pub async fn build(settings: Settings) -> Result<Self> {
        // Create database pool
        let db = database::create_pool(&settings.database).await?;
        tracing::info!("Database connection pool created");

        if settings.database.run_migrations {
            database::run_migrations(&db).await?;
            tracing::info!("Database migrations applied");
        }

        let addr = settings.server_addr();
        let state = AppState::with_postgres(db, settings);
        let router = routes::create_router(state);

        // Bind to address
        let listener = TcpListener::bind(&addr).await?;
        tracing::info!("Listening on {}", addr);

        Ok(Self { listener, router })
    }

    /// Run the server until stopped
    pub async fn run_until_stopped(self) -> Result<()> {
        axum::serve(self.listener, self.router)
            .with_graceful_shutdown(shutdown_signal())
            .await?;
        Ok(())
    }

    /// Get the bound address
    pub fn local_addr(&self) -> std::io::Result<SocketAddr> {
        self.listener.local_addr()
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        return;
    }
    tracing::info!("Shutdown signal received");
}
