//! Core library for devtools
//!
//! This crate implements the **Functional Core** of the devtools application,
//! following the Functional Core - Imperative Shell architectural pattern.
//!
//! # Architecture Overview
//!
//! The devtools project uses a two-crate architecture to enforce separation of concerns:
//!
//! - **`devtools_core`** (this crate): Utility algorithms as plain functions with typed errors
//! - **`devtools`**: CLI, REST and MCP surfaces (the Imperative Shell)
//!
//! ## Functional Core Principles
//!
//! All functions in this crate adhere to these principles:
//!
//! - **Pure functions**: Same input always produces the same output
//! - **No shared state**: Every call builds its result from caller-owned inputs,
//!   so functions are safe to call from any number of threads at once
//! - **Typed failures**: Invalid input is reported through [`Error`], never logged or swallowed
//!
//! The single exception is [`password::generate_password`], which draws from the
//! operating system's secure random source. Its deterministic counterpart
//! [`password::generate`] takes the RNG as a parameter.
//!
//! # Module Organization
//!
//! - [`color`]: HEX/RGB/HSL parsing, conversion and shade/tint palettes
//! - [`password`]: Strength scoring, entropy estimation and secure generation
//! - [`json`]: Validation, canonical formatting and top-level diffing
//! - [`error`]: The error taxonomy shared by every module
//!
//! # Example Usage
//!
//! ```rust
//! use devtools_core::{convert_color, diff_json};
//!
//! let color = convert_color("#FF0000")?;
//! assert_eq!(color.hsl, "hsl(0, 100%, 50%)");
//!
//! let diff = diff_json(r#"{"a":1,"b":2}"#, r#"{"b":3,"c":4}"#)?;
//! assert!(diff.added.contains_key("c"));
//! assert!(diff.removed.contains_key("a"));
//! assert!(diff.modified.contains_key("b"));
//! # Ok::<(), devtools_core::Error>(())
//! ```

pub mod color;
pub mod error;
pub mod json;
pub mod password;

pub use color::{convert_color, generate_palette};
pub use error::{Error, Result};
pub use json::{diff_json, validate_json};
pub use password::{analyze as check_password_strength, generate_password};
