//! Affected-module resolution: which published libraries transitively depend
//! on a target library family, and through which chain.

pub mod accumulator;
pub mod context;
pub mod memo;
pub mod resolver;
