#![deny(warnings)]
pub mod belief;
pub mod board;
