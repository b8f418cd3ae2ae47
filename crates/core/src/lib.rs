//! Core library for devkit
//!
//! This crate implements the **Functional Core** of the devkit application,
//! following the Functional Core - Imperative Shell architectural pattern.
//!
//! # Architecture Overview
//!
//! The devkit project uses a two-crate architecture to enforce separation of concerns:
//!
//! - **`devkit_core`** (this crate): Pure transformation functions with zero I/O
//! - **`devkit`**: argument parsing, stdin/file reading, rendering and the MCP server
//!
//! ## Functional Core Principles
//!
//! All functions in this crate adhere to these principles:
//!
//! - **Pure functions**: Same input always produces the same output
//! - **No side effects**: No I/O operations, no external state mutations
//! - **Deterministic**: the current time and random identifiers are the only
//!   exceptions, and "now" is always passed in by the caller
//! - **Testable**: Can be tested with simple fixture data, no mocking required
//!
//! # Module Organization
//!
//! One module per tool:
//!
//! - [`cron`]: cron expression parsing, next-run simulation and descriptions
//! - [`subnet`]: IPv4 CIDR arithmetic and subnet splitting
//! - [`useragent`]: User-Agent string classification
//! - [`chmod`]: Unix permission bits in octal and symbolic form
//! - [`numwords`]: numbers to English words
//! - [`password`]: password entropy and strength scoring
//! - [`codec`]: Base64, URL percent-encoding and radix conversion
//! - [`digest`]: hashes and HMAC signatures
//! - [`jwt`]: HS256/384/512 JSON Web Tokens
//! - [`json`]: JSON formatting and JSON/CSV/YAML conversion
//! - [`color`]: hex, RGB and HSL colours
//! - [`timestamp`]: Unix timestamps and date strings
//! - [`uuid`]: v4 UUID generation and inspection
//! - [`pattern`]: regular expression testing
//! - [`http_status`]: HTTP status code reference
//! - [`bcrypt_hash`]: bcrypt password hashing and verification
//! - [`xml`]: XML to JSON conversion
//! - [`typescript`]: TypeScript interfaces from sample JSON
//! - [`diff`]: line diffs and unified patches
//! - [`lorem`]: placeholder text
//!
//! # Example Usage
//!
//! ```rust
//! use devkit_core::subnet::calculate_str;
//!
//! let info = calculate_str("192.168.1.0/24").unwrap();
//! assert_eq!(info.broadcast_address.to_string(), "192.168.1.255");
//! assert_eq!(info.usable_hosts, 254);
//! ```

pub mod bcrypt_hash;
pub mod chmod;
pub mod codec;
pub mod color;
pub mod cron;
pub mod diff;
pub mod digest;
pub mod http_status;
pub mod json;
pub mod jwt;
pub mod lorem;
pub mod numwords;
pub mod password;
pub mod pattern;
pub mod subnet;
pub mod timestamp;
pub mod typescript;
pub mod useragent;
pub mod uuid;
pub mod xml;
