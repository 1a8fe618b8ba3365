//! End-to-end timeline processing.
//!
//! Source text → validated events → layout → markup. A source error ends
//! the pass with an inline error element; nothing is partially rendered.

use tracing::debug;

use crate::engine::LayoutEngine;
use crate::models::Layout;
use crate::render::HtmlRenderer;
use crate::settings::TimelineSettings;
use crate::source::{parse_events, SourceError};

/// Runs the timeline pipeline for one source block.
///
/// # Example
///
/// ```
/// use u_timeline::processor::TimelineProcessor;
/// use u_timeline::settings::TimelineSettings;
///
/// let processor = TimelineProcessor::new(&TimelineSettings::default());
/// let html = processor.process("- {name: X, start: 0, end: 5}\n- {name: Y, start: 5, end: 10}");
/// assert_eq!(html.matches(r#"class="timeline-track""#).count(), 1);
///
/// let html = processor.process("not: [a list");
/// assert!(html.contains("Timeline parse error"));
/// ```
#[derive(Debug, Clone, Default)]
pub struct TimelineProcessor {
    engine: LayoutEngine,
    renderer: HtmlRenderer,
}

impl TimelineProcessor {
    /// Creates a processor using the given settings.
    pub fn new(settings: &TimelineSettings) -> Self {
        Self {
            engine: LayoutEngine::new(),
            renderer: HtmlRenderer::from_settings(settings),
        }
    }

    /// Replaces the layout engine.
    pub fn with_engine(mut self, engine: LayoutEngine) -> Self {
        self.engine = engine;
        self
    }

    /// Reads and lays out a source block without rendering.
    pub fn layout(&self, source: &str) -> Result<Layout, SourceError> {
        let events = parse_events(source)?;
        Ok(self.engine.layout(&events))
    }

    /// Renders a source block, or the error that stopped it.
    pub fn process(&self, source: &str) -> String {
        match self.layout(source) {
            Ok(layout) => self.renderer.render(&layout),
            Err(err) => {
                debug!(error = %err, "timeline source rejected");
                self.renderer.render_error(&err)
            }
        }
    }
}
