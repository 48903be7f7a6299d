//! Diagram rendering collaborators.
//!
//! A renderer turns a flow line such as `A -> B -> C` into encoded image
//! bytes. Rendering failures are expected (no renderer installed, service
//! down) and are reported as [`DiagramOutcome::Unavailable`] instead of
//! errors.

mod graphviz;

pub use graphviz::{flow_to_dot, GraphvizRenderer};

use crate::error::Result;
use crate::model::Resource;
use crate::parser::extract_flow_line;

/// Turns a flow description into an image.
pub trait DiagramRenderer: Send + Sync {
    /// Render `flow` to encoded image bytes (PNG, JPEG, GIF, BMP or TIFF).
    fn render(&self, flow: &str) -> Result<Vec<u8>>;

    /// Human-readable renderer name for logs.
    fn name(&self) -> &str {
        "diagram renderer"
    }
}

impl<F> DiagramRenderer for F
where
    F: Fn(&str) -> Result<Vec<u8>> + Send + Sync,
{
    fn render(&self, flow: &str) -> Result<Vec<u8>> {
        self(flow)
    }
}

/// Result of asking for a diagram.
#[derive(Debug, Clone)]
pub enum DiagramOutcome {
    /// A decoded, embeddable image
    Image(Resource),

    /// No image; the reason is for logs only
    Unavailable(String),
}

impl DiagramOutcome {
    /// Check if an image was produced.
    pub fn is_image(&self) -> bool {
        matches!(self, DiagramOutcome::Image(_))
    }
}

/// Produce a diagram for a flow-diagram section.
///
/// Extracts the flow line from `content`, hands it to `renderer`, and
/// validates the returned bytes. Every failure becomes `Unavailable`.
pub fn render_flow_diagram(
    renderer: Option<&dyn DiagramRenderer>,
    content: Option<&str>,
) -> DiagramOutcome {
    let Some(content) = content.filter(|c| !c.trim().is_empty()) else {
        return DiagramOutcome::Unavailable("section has no content".to_string());
    };
    let Some(flow) = extract_flow_line(content) else {
        return DiagramOutcome::Unavailable("no flow line found".to_string());
    };
    let Some(renderer) = renderer else {
        return DiagramOutcome::Unavailable("no diagram renderer configured".to_string());
    };

    log::debug!("Rendering flow '{}' with {}", flow, renderer.name());
    let bytes = match renderer.render(flow) {
        Ok(bytes) if bytes.is_empty() => {
            log::warn!("{} returned no image data", renderer.name());
            return DiagramOutcome::Unavailable("renderer returned no data".to_string());
        }
        Ok(bytes) => bytes,
        Err(e) => {
            log::warn!("Flow diagram error from {}: {}", renderer.name(), e);
            return DiagramOutcome::Unavailable(e.to_string());
        }
    };

    match Resource::image(bytes) {
        Ok(resource) => {
            let filename = format!("flow_diagram.{}", resource.extension());
            DiagramOutcome::Image(resource.with_filename(filename))
        }
        Err(e) => {
            log::warn!("{} returned unusable image data: {}", renderer.name(), e);
            DiagramOutcome::Unavailable(e.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::testdata::PNG_4X2;

    fn png_renderer(_flow: &str) -> Result<Vec<u8>> {
        Ok(PNG_4X2.to_vec())
    }

    fn failing_renderer(_flow: &str) -> Result<Vec<u8>> {
        Err(Error::Diagram("service unavailable".to_string()))
    }

    #[test]
    fn test_image_outcome() {
        let outcome = render_flow_diagram(Some(&png_renderer), Some("A -> B -> C"));
        match outcome {
            DiagramOutcome::Image(resource) => {
                assert_eq!(resource.width, 4);
                assert_eq!(resource.filename.as_deref(), Some("flow_diagram.png"));
            }
            DiagramOutcome::Unavailable(reason) => panic!("unexpected: {}", reason),
        }
    }

    #[test]
    fn test_renderer_receives_flow_line() {
        let check = |flow: &str| -> Result<Vec<u8>> {
            assert_eq!(flow, "Start -> Stop");
            Ok(PNG_4X2.to_vec())
        };
        let outcome = render_flow_diagram(Some(&check), Some("Flow:\nStart -> Stop\n"));
        assert!(outcome.is_image());
    }

    #[test]
    fn test_failures_become_unavailable() {
        assert!(!render_flow_diagram(Some(&failing_renderer), Some("A -> B")).is_image());
        assert!(!render_flow_diagram(None, Some("A -> B")).is_image());
        assert!(!render_flow_diagram(Some(&png_renderer), None).is_image());
        assert!(!render_flow_diagram(Some(&png_renderer), Some("no arrows")).is_image());

        let empty = |_: &str| -> Result<Vec<u8>> { Ok(Vec::new()) };
        assert!(!render_flow_diagram(Some(&empty), Some("A -> B")).is_image());

        let garbage = |_: &str| -> Result<Vec<u8>> { Ok(b"<svg></svg> not raster".to_vec()) };
        assert!(!render_flow_diagram(Some(&garbage), Some("A -> B")).is_image());
    }
}
