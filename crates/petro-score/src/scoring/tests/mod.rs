mod boundaries;
mod common;
mod engine;
