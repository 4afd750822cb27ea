//! Unified plugin for dsvedit.

use bevy::prelude::*;

use dsvedit_core::{DsveditCorePlugin, EditorConfig};

#[cfg(feature = "tmx")]
use dsvedit_tmx::DsveditTmxPlugin;

/// Unified plugin that adds all enabled dsvedit functionality.
///
/// This plugin automatically includes:
/// - Selection and compositing ([`DsveditCorePlugin`])
/// - Tiled interchange when the `tmx` feature is enabled
///
/// # Example
///
/// ```rust,no_run
/// use bevy::prelude::*;
/// use dsvedit::prelude::*;
///
/// App::new()
///     .add_plugins(DsveditPlugin::default().with_core(EditorConfig::new("/work")))
///     .run();
/// ```
#[derive(Default)]
pub struct DsveditPlugin {
    /// Core configuration
    pub core: EditorConfig,
}

impl DsveditPlugin {
    /// Create with custom core configuration
    pub fn with_core(mut self, config: EditorConfig) -> Self {
        self.core = config;
        self
    }
}

impl Plugin for DsveditPlugin {
    fn build(&self, app: &mut App) {
        app.add_plugins(DsveditCorePlugin::new(self.core.clone()));

        #[cfg(feature = "tmx")]
        app.add_plugins(DsveditTmxPlugin);

        info!("DsveditPlugin initialized");
    }
}
