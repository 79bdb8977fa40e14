#![allow(async_fn_in_trait)]
pub mod aoi;
pub mod catalog;
pub mod cli;
pub mod collections;
pub mod date_range;
pub mod error;
pub mod export;
