// Copyright(C) Mundis.
pub mod contract;
pub mod deploy;
pub mod messages;

#[cfg(test)]
#[path = "tests/common.rs"]
mod common;
