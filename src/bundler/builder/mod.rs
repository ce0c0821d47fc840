//! Build orchestration and coordination.
//!
//! This module provides the [`Bundler`] that turns a script entry point into
//! a single-file executable by driving the packaging tool.
//!
//! # Overview
//!
//! A build:
//! 1. Verifies the packaging tool and host runtime ([`preflight`])
//! 2. Verifies the source inputs ([`preflight`])
//! 3. Assembles the packaging tool arguments ([`PackagingInvocation`])
//! 4. Runs the tool, streaming its output
//! 5. Locates the artifact and prints usage instructions ([`report`])
//!
//! # Module Organization
//!
//! - [`invocation`] - Pure argument list construction
//! - [`orchestrator`] - Main [`Bundler`] struct and [`BuildOutcome`]
//! - [`preflight`] - Dependency and source checks
//! - [`report`] - Artifact discovery and usage text

mod invocation;
mod orchestrator;
pub mod preflight;
pub mod report;

pub use invocation::PackagingInvocation;
pub use orchestrator::{BuildOutcome, Bundler};
