//! Client-facing interface of the Glitter lock program: instruction data,
//! account layout and custom error codes
#![deny(missing_docs)]
#![forbid(unsafe_code)]

pub mod error;
pub mod instruction;
pub mod pack_utils;
pub mod state;
