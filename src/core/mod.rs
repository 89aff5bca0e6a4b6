// Core business logic module

pub mod config;
pub mod destination;
pub mod downloader;
pub mod probe;
pub mod relocator;
pub mod url_collector;

// Re-export commonly used items
pub use config::{DownloaderSettings, Settings};
pub use destination::{Destination, DestinationMenu, MenuEntry, NameError, SelectionError};
pub use downloader::DownloadInvoker;
pub use probe::{SystemProbe, ToolProbe};
pub use relocator::{relocate, MovedFile};
pub use url_collector::{classify_line, extract_url, LineVerdict};
