//! # codeq Core
//!
//! Core engine for codeq, a heuristic code quality analyzer.
//!
//! This crate provides the analysis pipeline and its collaborators:
//! - Lexical sanitizing and per-language heuristic checks
//! - Complexity metrics and suggestions
//! - Precise JavaScript/TypeScript parsing
//! - Optional AI review through an injected reviewer
//! - Configuration discovery and debounced re-analysis

pub mod ai;
pub mod analysis;
pub mod config;
pub mod debounce;
pub mod engine;

// Re-export commonly used types
pub use codeq_shared::*;

pub use ai::{AiError, AiReview, AiReviewer, ExplainRequest, OpenAiReviewer, ReviewRequest};
pub use analysis::{AnalysisReport, CodeAnalyzer};
pub use config::ConfigManager;
pub use debounce::{DEFAULT_DEBOUNCE, Debouncer};
pub use engine::QualityEngine;
