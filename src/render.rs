//! HTML rendering of a computed layout.
//!
//! Produces one lane element per track and one capsule per event,
//! positioned with the layout's percentages:
//!
//! ```text
//! div.timeline-container.timeline-theme-<theme>
//! └─ div.timeline-tracks-container
//!    └─ div.timeline-track            (one per track, index order)
//!       └─ div.timeline-event         style="left: L%; width: W%;"
//!          └─ div.timeline-capsule
//!             ├─ span.timeline-name   event name
//!             └─ span.timeline-time   "start ~ end"
//! ```

use crate::models::{LaidOutEvent, Layout};
use crate::settings::TimelineSettings;
use crate::source::SourceError;

/// Renders layouts and source errors as HTML markup.
#[derive(Debug, Clone)]
pub struct HtmlRenderer {
    theme: String,
}

impl HtmlRenderer {
    /// Creates a renderer with the default theme.
    pub fn new() -> Self {
        Self::from_settings(&TimelineSettings::default())
    }

    /// Creates a renderer from user settings.
    pub fn from_settings(settings: &TimelineSettings) -> Self {
        Self {
            theme: settings.theme.clone(),
        }
    }

    /// Sets the theme.
    pub fn with_theme(mut self, theme: impl Into<String>) -> Self {
        self.theme = theme.into();
        self
    }

    /// Renders a layout.
    ///
    /// # Example
    ///
    /// ```
    /// use u_timeline::engine::LayoutEngine;
    /// use u_timeline::models::Event;
    /// use u_timeline::render::HtmlRenderer;
    ///
    /// let layout = LayoutEngine::new().layout(&[Event::new("A", 0.0, 10.0)]);
    /// let html = HtmlRenderer::new().render(&layout);
    /// assert!(html.contains(r#"style="left: 0%; width: 100%;""#));
    /// assert!(html.contains("0 ~ 10"));
    /// ```
    pub fn render(&self, layout: &Layout) -> String {
        let mut out = String::new();
        out.push_str(&format!(
            r#"<div class="timeline-container timeline-theme-{}">"#,
            theme_class(&self.theme)
        ));
        out.push_str(r#"<div class="timeline-tracks-container">"#);
        for lane in layout.tracks() {
            out.push_str(r#"<div class="timeline-track">"#);
            for event in lane {
                render_event(&mut out, event);
            }
            out.push_str("</div>");
        }
        out.push_str("</div></div>");
        out
    }

    /// Renders a source error as an inline error element.
    pub fn render_error(&self, err: &SourceError) -> String {
        let text = if err.is_parse_failure() {
            format!("Timeline parse error: {err}")
        } else {
            "Timeline: no valid events found.".to_string()
        };
        format!(r#"<div class="timeline-error">{}</div>"#, escape(&text))
    }
}

impl Default for HtmlRenderer {
    fn default() -> Self {
        Self::new()
    }
}

fn render_event(out: &mut String, event: &LaidOutEvent) {
    out.push_str(&format!(
        r#"<div class="timeline-event" style="left: {}%; width: {}%;">"#,
        event.left_percent, event.width_percent
    ));
    out.push_str(r#"<div class="timeline-capsule">"#);
    out.push_str(&format!(
        r#"<span class="timeline-name">{}</span>"#,
        escape(event.name())
    ));
    out.push_str(&format!(
        r#"<span class="timeline-time">{}</span>"#,
        escape(&event.event.interval_label())
    ));
    out.push_str("</div></div>");
}

/// Keeps only characters valid in a class name.
fn theme_class(theme: &str) -> String {
    theme
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || *c == '-' || *c == '_')
        .collect()
}

fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}
