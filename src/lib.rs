//! # Chat Backend Library
//!
//! This crate provides the data-access and authorization layer of a
//! messaging backend, exposed through a REST API:
//! - Users, chats, chat memberships and messages in PostgreSQL
//! - Membership and ownership checks before chat-scoped operations
//! - Partial updates through explicit patch objects
//!
//! ## Architecture
//!
//! The crate follows Clean Architecture principles:
//!
//! - **Domain Layer**: Core entities, repository traits and the chat guard
//! - **Application Layer**: Access layer services and DTOs
//! - **Infrastructure Layer**: PostgreSQL repositories, migrations and metrics
//! - **Presentation Layer**: HTTP handlers, extractors and middleware
//!
//! ## Module Structure
//!
//! ```text
//! chat_backend/
//! +-- config/         Configuration management
//! +-- domain/         Domain entities, repository traits, guard
//! +-- application/    Application services and DTOs
//! +-- infrastructure/ Database repositories and metrics
//! +-- presentation/   HTTP routes and middleware
//! +-- shared/         Common utilities (errors, ids, validation)
//! ```

// Configuration module
pub mod config;

// Domain layer - Core business logic
pub mod domain;

// Application layer - Business services
pub mod application;

// Infrastructure layer - External implementations
pub mod infrastructure;

// Presentation layer - HTTP handlers
pub mod presentation;

// Shared utilities
pub mod shared;

// Application startup and state management
pub mod startup;

// Telemetry and observability
pub mod telemetry;
