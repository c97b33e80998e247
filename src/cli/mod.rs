//! CLI infrastructure for the treeseek toolkit
//!
//! This module provides the command-line interface for rolling out
//! baseline policies, tracing single episodes, and inspecting generated
//! search trees.

pub mod commands;
pub mod output;
