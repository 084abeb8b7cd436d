use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use tracing::{debug, info};

use crate::ico;
use crate::render::IconCompositor;

/// A display surface that accepts encoded icons.
///
/// `install` transfers ownership of the icon binary to the sink; the sink
/// releases whatever it displayed before installing the new one.
pub trait DisplaySink {
    fn install(&mut self, icon: Vec<u8>, label: &str) -> Result<()>;
}

/// Writes each installed icon to a fixed path, replacing the previous file.
pub struct FileSink {
    path: PathBuf,
}

impl FileSink {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl DisplaySink for FileSink {
    fn install(&mut self, icon: Vec<u8>, label: &str) -> Result<()> {
        std::fs::write(&self.path, &icon)
            .with_context(|| format!("failed to write icon to {}", self.path.display()))?;
        debug!(
            "installed {} ({} bytes) at {}",
            label,
            icon.len(),
            self.path.display()
        );
        Ok(())
    }
}

/// Renders and installs icons, skipping values already on display.
///
/// Holds the last installed value explicitly, so re-renders happen only
/// on change.
pub struct IconUpdater {
    compositor: IconCompositor,
    last_value: Option<u32>,
}

impl IconUpdater {
    pub fn new(compositor: IconCompositor) -> Self {
        Self {
            compositor,
            last_value: None,
        }
    }

    /// Renders, encodes and installs `value` unless it is already on
    /// display. Returns whether a new icon was installed.
    pub fn update(&mut self, value: u32, sink: &mut impl DisplaySink) -> Result<bool> {
        if self.last_value == Some(value) {
            return Ok(false);
        }

        let canvas = self.compositor.render(value);
        let icon = ico::encode(&canvas)?;
        sink.install(icon, &format!("{}%", value))?;

        self.last_value = Some(value);
        Ok(true)
    }
}

/// Blocking poll loop: reads a percentage from `value_source` every
/// `interval` and installs changed values into `sink`. A `None` from the
/// source stops the loop.
pub fn run<ValueSource, Sink>(
    compositor: IconCompositor,
    interval: Duration,
    mut value_source: ValueSource,
    sink: &mut Sink,
) -> Result<()>
where
    ValueSource: FnMut() -> Option<u32>,
    Sink: DisplaySink,
{
    let mut updater = IconUpdater::new(compositor);

    while let Some(value) = value_source() {
        if updater.update(value, sink)? {
            info!("battery at {}%", value);
        }
        std::thread::sleep(interval);
    }

    Ok(())
}
