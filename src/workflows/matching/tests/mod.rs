mod cache;
mod common;
mod ranking;
