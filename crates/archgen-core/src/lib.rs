//! Archgen Core - Hexagonal Architecture Implementation
//!
//! This crate provides the domain and application layers for archetype
//! property resolution, following hexagonal (ports and adapters) architecture.
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │           archgen-cli (CLI)             │
//! │     (Implements Driving Ports)          │
//! └──────────────────┬──────────────────────┘
//!                    │ calls
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │         Application Services            │
//! │ (ArchetypeConfigurator, PropertyResolver│
//! │  ArchetypeSelector, ArchetypeService)   │
//! └──────────────────┬──────────────────────┘
//!                    │ uses
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │      Application Ports (Traits)         │
//! │ (Evaluator, Store, Queryer, Prompter)   │
//! └──────────────────┬──────────────────────┘
//!                    │ implemented by
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │    archgen-adapters (Infrastructure)    │
//! │ (InterpolatingEvaluator, InMemoryStore) │
//! └─────────────────────────────────────────┘
//!                    │
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │         Domain Layer (Pure Logic)       │
//! │ (RequiredProperty, ArchetypeDescriptor, │
//! │   Properties, GenerationRequest)        │
//! └─────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use archgen_core::prelude::*;
//!
//! let configurator = ArchetypeConfigurator::new(store, evaluator, queryer);
//!
//! let mut request = GenerationRequest::for_archetype(coordinates);
//! configurator.configure_archetype(&mut request, ResolutionMode::Batch, &overrides)?;
//!
//! println!("groupId = {:?}", request.group_id);
//! ```

pub mod domain;

pub mod application;

pub mod error;

// Public API - what external crates should use
pub mod prelude {
    pub use crate::application::{
        ArchetypeConfigurator, ArchetypeSelector, ArchetypeService, ArchetypeSummary,
        DefaultQueryer, PropertyResolver,
        ports::{ArchetypeStore, ExpressionEvaluator, GenerationQueryer, Prompter, SelectionQueryer},
    };
    pub use crate::domain::{
        ArchetypeCoordinates, ArchetypeDescriptor, GenerationRequest, Properties, RequiredProperty,
        ResolutionMode, ResolutionRequest,
    };
    pub use crate::error::{ArchgenError, ArchgenResult};
}

// Version info
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
