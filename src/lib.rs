//! azrm - command-line management of Azure Resource Manager resources
//!
//! - [`arm`] - REST client, authentication and endpoint modules
//! - [`commands`] - argument validation and the operations behind each command
//! - [`lab`] - DevTest Labs wire types

pub mod arm;
pub mod commands;
pub mod config;
pub mod error;
pub mod lab;
pub mod output;
pub mod prompt;
