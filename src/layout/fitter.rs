//! Font fitting against a measurement surface.
//!
//! Text is rendered into a temporary node that sits outside page flow
//! (absolutely positioned, zero opacity), measured, and the node is removed
//! again. The node lives in a guard so it is released on every exit path.

use log::{debug, warn};

use crate::error::{Result, VizError};
use crate::svg::styles::{estimate_text_width, FontWeights, LINE_HEIGHT_RATIO};

/// Rendered size of a piece of text, in px
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextBox {
    pub width: f64,
    pub height: f64,
}

/// A single fitting question: how large can `text` be inside this box?
#[derive(Debug, Clone, Copy)]
pub struct FitRequest<'a> {
    pub text: &'a str,
    pub max_width: f64,
    pub max_height: f64,
    pub style_class: &'a str,
}

/// Finds the largest font size at which a text fits a box.
pub trait TextFitter {
    fn fit_font_size(&mut self, request: &FitRequest<'_>) -> Result<f64>;
}

/// Off-document place where text can be rendered and measured.
pub trait MeasurementSurface {
    type Node;

    /// Create a hidden container carrying `style_class`.
    fn attach(&mut self, style_class: &str) -> Result<Self::Node>;

    fn measure(&mut self, node: &Self::Node, text: &str, font_size: f64) -> Result<TextBox>;

    fn detach(&mut self, node: Self::Node);

    /// Number of temporary nodes currently attached
    fn attached_nodes(&self) -> usize;
}

/// Scoped temporary container. Dropping it detaches the node.
struct TemporaryNode<'s, S: MeasurementSurface> {
    surface: &'s mut S,
    node: Option<S::Node>,
}

impl<'s, S: MeasurementSurface> TemporaryNode<'s, S> {
    fn attach(surface: &'s mut S, style_class: &str) -> Result<Self> {
        let node = surface.attach(style_class)?;
        Ok(Self {
            surface,
            node: Some(node),
        })
    }

    fn measure(&mut self, text: &str, font_size: f64) -> Result<TextBox> {
        let Self { surface, node } = self;
        match node {
            Some(node) => surface.measure(node, text, font_size),
            None => Err(VizError::MeasurementFailure("node already released".to_string())),
        }
    }
}

impl<S: MeasurementSurface> Drop for TemporaryNode<'_, S> {
    fn drop(&mut self) {
        if let Some(node) = self.node.take() {
            self.surface.detach(node);
        }
    }
}

/// Binary search over whole pixel sizes in `[1, floor(max_height)]`.
///
/// Assumes the measured box grows with the font size. Returns 0 when the
/// text does not fit even at 1px.
pub struct SearchingFitter<S> {
    surface: S,
}

impl<S: MeasurementSurface> SearchingFitter<S> {
    pub fn new(surface: S) -> Self {
        Self { surface }
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }
}

impl<S: MeasurementSurface> TextFitter for SearchingFitter<S> {
    fn fit_font_size(&mut self, request: &FitRequest<'_>) -> Result<f64> {
        if request.text.is_empty() || request.max_width <= 0.0 || request.max_height < 1.0 {
            return Ok(0.0);
        }

        let mut node = TemporaryNode::attach(&mut self.surface, request.style_class)?;
        let mut lo: i64 = 0;
        // saturates at i64::MAX for absurdly tall boxes
        let mut hi: i64 = request.max_height.floor() as i64;
        while lo < hi {
            // round up without forming hi + 1; lo >= 0 so hi - lo cannot overflow
            let span = hi - lo;
            let mid = lo + span / 2 + span % 2;
            let measured = node.measure(request.text, mid as f64)?;
            if measured.width <= request.max_width && measured.height <= request.max_height {
                lo = mid;
            } else {
                hi = mid - 1;
            }
        }
        drop(node);

        if lo == 0 {
            warn!(
                "{:?} does not fit {}x{} in .{}",
                request.text, request.max_width, request.max_height, request.style_class
            );
        } else {
            debug!(
                "fitted .{} {:?} at {}px in {}x{}",
                request.style_class, request.text, lo, request.max_width, request.max_height
            );
        }
        Ok(lo as f64)
    }
}

/// Headless surface driven by average glyph metrics.
///
/// `header-line` text is measured bold, everything else light, both with a
/// `1em` line height.
#[derive(Debug, Default)]
pub struct EstimatedSurface {
    next_id: usize,
    attached: Vec<(usize, String)>,
}

impl EstimatedSurface {
    pub fn new() -> Self {
        Self::default()
    }

    fn weight_for(style_class: &str) -> u32 {
        match style_class {
            "header-line" => FontWeights::HEADER,
            "subheader-line" => FontWeights::SUBHEADER,
            _ => FontWeights::BODY,
        }
    }
}

impl MeasurementSurface for EstimatedSurface {
    type Node = usize;

    fn attach(&mut self, style_class: &str) -> Result<usize> {
        let id = self.next_id;
        self.next_id += 1;
        self.attached.push((id, style_class.to_string()));
        Ok(id)
    }

    fn measure(&mut self, node: &usize, text: &str, font_size: f64) -> Result<TextBox> {
        let class = self
            .attached
            .iter()
            .find(|(id, _)| id == node)
            .map(|(_, class)| class.as_str())
            .ok_or_else(|| VizError::MeasurementFailure(format!("node {} is not attached", node)))?;
        Ok(TextBox {
            width: estimate_text_width(text, font_size, Self::weight_for(class)),
            height: font_size * LINE_HEIGHT_RATIO,
        })
    }

    fn detach(&mut self, node: usize) {
        self.attached.retain(|(id, _)| *id != node);
    }

    fn attached_nodes(&self) -> usize {
        self.attached.len()
    }
}
