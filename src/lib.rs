//! This crate exposes the internal functionality of the CyberEye username
//! reconnaissance tool.
//!
//! CyberEye takes a username and checks a fixed set of social platforms for
//! a public profile under that name. Every platform is probed at the same
//! time, so a full scan takes about as long as the slowest platform.
//!
//! ## Architecture Overview
//!
//! The scanning behaviour is managed by [`Scanner`](crate::scanner::Scanner),
//! which probes the [`Target`](crate::registry::Target)s of the
//! [registry](crate::registry):
//!
//! 1. **Registry**: a fixed, ordered list of platforms and profile URL templates
//! 2. **Probing**: one HTTP GET per platform with its own timeout and a
//!    browser-like identity
//! 3. **Classification**: the response is judged by
//!    [`classify`](crate::classifier::classify), which knows about soft-404 pages
//! 4. **Aggregation**: outcomes are folded back in registry order into a
//!    [`ScanResult`](crate::aggregate::ScanResult)
//! 5. **Reporting**: the binary renders the result for the terminal or as
//!    HTML and keeps the latest scan on disk
//!
//! A probe never fails the scan. Unreachable platforms, timeouts and
//! unreadable responses are reported as "not found", with the reason kept on
//! the outcome.
//!
//! ## Basic Usage Example
//!
//! ```rust,no_run
//! use cybereye::scanner::search_targets;
//!
//! # async fn scan() -> anyhow::Result<()> {
//! let result = search_targets("alice123").await?;
//!
//! println!("Found {} profiles:", result.total_found);
//! for outcome in result.found() {
//!     println!("  {}: {:?}", outcome.platform_name, outcome.url);
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ## Custom targets and transports
//!
//! [`Scanner`](crate::scanner::Scanner) accepts any target list and any
//! [`HttpTransport`](crate::scanner::HttpTransport), which is how the tests
//! drive it without a network:
//!
//! ```rust,no_run
//! use std::{sync::Arc, time::Duration};
//!
//! use cybereye::registry::select_targets;
//! use cybereye::scanner::{ReqwestTransport, Scanner};
//!
//! # async fn scan() -> anyhow::Result<()> {
//! let targets = select_targets(&["Facebook".to_owned()]);
//! let scanner = Scanner::new(
//!     &targets,
//!     Arc::new(ReqwestTransport::new()?),
//!     Duration::from_secs(10), // Per-platform timeout
//!     2,                       // Tries for platforms that time out
//!     64,                      // Probes in flight at once
//! )
//! .with_deadline(Some(Duration::from_secs(30)));
//!
//! let result = scanner.run("alice123").await;
//! assert_eq!(result.outcomes.len(), targets.len());
//! # Ok(())
//! # }
//! ```
#![warn(missing_docs)]

pub mod tui;

pub mod input;

pub mod registry;

pub mod classifier;

pub mod scanner;

pub mod aggregate;

pub mod report;

pub mod snapshot;
