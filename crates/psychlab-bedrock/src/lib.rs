//! psychlab-bedrock
//!
//! The report request pipeline: prompt assembly, the response schema, strict
//! decoding of the model reply, and Bedrock Converse invocation.

pub mod client;
pub mod converse;
pub mod decode;
pub mod document;
pub mod error;
pub mod generate;
pub mod prompt;
pub mod schema;
