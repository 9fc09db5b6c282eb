// Medrecall - Clinical-education backend core
// Copyright (c) 2025 Medrecall Contributors
// Licensed under the MIT License

//! # Medrecall - clinical encounters in, quizzes out
//!
//! Medrecall is the backend core of a clinical-education tool: physicians
//! log patient encounters, and the system generates quizzes from those
//! encounters to test recall and understanding.
//!
//! ## Overview
//!
//! This library provides the core functionality for:
//! - **Redacting** personally identifying text from clinical notes before
//!   they are persisted in plain form
//! - **Sealing** the original, unredacted note with authenticated
//!   encryption for audit and recovery
//! - **Generating** structured multiple-choice quizzes from clinical
//!   records via an external generative-text provider
//! - **Grading** quiz submissions and aggregating score statistics
//!
//! HTTP routing, session management, and database drivers are deliberately
//! out of scope: the surrounding service layer calls into this crate
//! through the services in [`core`] and the traits in [`adapters`].
//!
//! ## Architecture
//!
//! Medrecall follows a layered architecture:
//!
//! - [`core`] - business logic (record and quiz services)
//! - [`quiz`] - quiz generation, grading, and statistics
//! - [`redaction`] - PII scrubbing for free-text notes
//! - [`vault`] - authenticated encryption of original notes
//! - [`adapters`] - external boundaries (generative-text provider,
//!   persistence collaborator)
//! - [`domain`] - core domain types and models
//! - [`config`] - configuration management
//! - [`logging`] - structured logging
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use medrecall::adapters::provider::OpenAiProvider;
//! use medrecall::adapters::store::InMemoryStore;
//! use medrecall::config::load_config;
//! use medrecall::core::{QuizService, RecordService};
//! use medrecall::quiz::QuizGenerator;
//! use medrecall::vault::EncryptionVault;
//! use std::sync::Arc;
//! use std::time::Duration;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = load_config("medrecall.toml")?;
//!
//! let store = Arc::new(InMemoryStore::new());
//! let vault = EncryptionVault::new(&config.security.encryption_key)?;
//! let provider = Arc::new(OpenAiProvider::new(&config.provider));
//! let generator = QuizGenerator::new(
//!     provider,
//!     Duration::from_secs(config.provider.timeout_seconds),
//! );
//!
//! let records = RecordService::new(store.clone(), vault);
//! let quizzes = QuizService::new(store.clone(), store.clone(), store, generator);
//! # Ok(())
//! # }
//! ```
//!
//! ## Error Handling
//!
//! Medrecall uses the [`domain::MedRecallError`] type for all errors. Core
//! operations fail closed: ill-formed input or a collaborator failure
//! yields a typed error, never a partial result.
//!
//! ```rust,no_run
//! use medrecall::domain::MedRecallError;
//!
//! fn example() -> Result<(), MedRecallError> {
//!     let config = medrecall::config::load_config("medrecall.toml")?;
//!     Ok(())
//! }
//! ```
//!
//! ## Logging
//!
//! Medrecall uses structured logging with the `tracing` crate:
//!
//! ```rust,no_run
//! use tracing::{info, warn};
//!
//! info!("Starting quiz generation");
//! warn!(record_count = 0, "No records matched the selection");
//! ```

pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod logging;
pub mod quiz;
pub mod redaction;
pub mod vault;
