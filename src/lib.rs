// ABOUTME: Library crate for scopewise exposing the questionnaire wizard for the binary and tests

#![allow(missing_docs)]

pub mod app;
pub mod cli;
pub mod components;
pub mod config;
pub mod models;
pub mod wizard;
