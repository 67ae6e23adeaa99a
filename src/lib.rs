//! Kakebo - Terminal-based Kakebo budgeting assistant
//!
//! This library provides the core functionality for the Kakebo budgeting
//! assistant. Every expense is sorted into one of a few fixed envelopes
//! (Survival, Leisure & Vices, Culture & Study, Extras); when essential
//! spending eats too much of the monthly revenue, the Guardian steps in with
//! guidance, and at the end of a cycle it writes a narrative report.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `config`: Configuration and path management
//! - `error`: Custom error types
//! - `logging`: Tracing subscriber setup
//! - `models`: Core data models (money, categories, transactions, savings)
//! - `services`: Ledger, threshold monitor, guidance dialogs and the session
//! - `reports`: Collaborator input assembly and prompt rendering
//! - `gateway`: Classification, advice and report collaborators
//! - `display`: Terminal formatting
//! - `export`: JSON, YAML, CSV and text export
//! - `cli`: The interactive shell
//!
//! # Example
//!
//! ```rust,ignore
//! use kakebo::config::{KakeboPaths, Settings};
//! use kakebo::gateway::CollaboratorGateway;
//! use kakebo::services::BudgetSession;
//!
//! let paths = KakeboPaths::new()?;
//! let settings = Settings::load_or_create(&paths)?;
//! let gateway = CollaboratorGateway::from_settings(&settings)?;
//! let mut session = BudgetSession::with_settings(gateway, &settings);
//! session.declare_revenue("5000").await;
//! session.add_expense("Rent", "3200").await;
//! ```

pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod export;
pub mod gateway;
pub mod logging;
pub mod models;
pub mod reports;
pub mod services;

pub use error::{KakeboError, KakeboResult};
