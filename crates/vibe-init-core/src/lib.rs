//! # vibe-init-core
//!
//! Library behind the `vibe-init` CLI providing:
//! - Exclusion rules for template entries (literal names and globs)
//! - Filtered recursive copying that keeps permissions and timestamps
//! - README generation and manifest name patching
//! - Layered settings (defaults, `.vibe-init.yaml`, `VIBE_INIT_*` env)
//!
//! # Example
//!
//! ```no_run
//! use std::io;
//! use vibe_init_core::{InitOptions, InitSettings, ProjectInitializer, Prompt};
//!
//! struct NoInput;
//!
//! impl Prompt for NoInput {
//!     fn read_line(&mut self, _prompt: &str) -> io::Result<String> {
//!         Ok(String::new())
//!     }
//! }
//!
//! # fn example() -> vibe_init_core::Result<()> {
//! let init = ProjectInitializer::new("/work/fastapi-vibe-template", InitSettings::default())?;
//! let options = InitOptions {
//!     name: Some("my-app".to_string()),
//!     force: false,
//! };
//! let report = init.run(&options, &mut NoInput)?;
//! println!("created {}", report.target_dir.display());
//! # Ok(())
//! # }
//! ```

pub mod copy;
pub mod error;
pub mod filters;
pub mod initializer;
pub mod manifest;
pub mod readme;
pub mod settings;

pub use copy::{CopyStats, EntryKind, TemplateCopier};
pub use error::{Error, Result};
pub use filters::{ExclusionSet, DEFAULT_EXCLUDE};
pub use initializer::{
    resolve_name, CopiedEntry, InitOptions, InitReport, ProjectInitializer, Prompt, NAME_PROMPT,
};
pub use manifest::{ManifestOutcome, ManifestPatch};
pub use readme::{render_readme, write_readme, README_FILE_NAME};
pub use settings::{InitSettings, SettingsLoader, SETTINGS_FILE_NAME};
