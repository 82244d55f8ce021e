//! Widget configuration: identifiers, documents, colors and their store.

mod color;
mod config;
mod id;
pub mod lines;
mod store;

pub use color::{ColorScheme, HexColor, InvalidColor};
pub use config::WidgetConfig;
pub use id::{InvalidWidgetId, WidgetId};
pub use store::{ConfigError, ConfigSource, ConfigStore, LoadedConfig, StoredWidget};
