//! Transit widget server.
//!
//! Resolves a widget's configured stations, fetches upcoming trips between
//! them and selects the few that fit on the widget.

pub mod backend;
pub mod domain;
pub mod mock;
pub mod pipeline;
pub mod selection;
pub mod settings;
pub mod stations;
pub mod tripplanner;
pub mod web;
pub mod widget;
