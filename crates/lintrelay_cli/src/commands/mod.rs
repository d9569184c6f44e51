//! Command implementations

pub mod init;
pub mod lint;
pub mod normalize;
pub mod serve;
