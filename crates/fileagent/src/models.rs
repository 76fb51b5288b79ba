//! These models represent the objects passed around by the agent
//!
//! There are a few related formats we need to interact with:
//! - openai-compatible messages/tools, sent from the agent to the LLM
//! - tool requests, sent from the agent to the tool registry
//! - console output, rendered by the cli
//!
//! We always immediately convert those data models into the internal structs using
//! to/from helpers, so the internal models are not an exact match to any of these formats.
pub mod content;
pub mod message;
pub mod role;
pub mod tool;
