pub mod cluster;
pub mod keyword;
