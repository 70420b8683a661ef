pub mod cli;
pub mod monkey;
pub mod packet;
pub mod parser;
pub mod signal;
