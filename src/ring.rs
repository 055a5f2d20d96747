//! Progress ring component for the focus timer.
//!
//! The ring mirrors an SVG circular progress indicator: it owns a radius,
//! a circumference computed once at construction (`2 * PI * radius`), and a
//! stroke-dash offset that encodes how much of the ring is revealed. The
//! timer controller drives it exclusively through the
//! [`ProgressSink`](crate::sink::ProgressSink) contract; rendering converts
//! the dash geometry back into a filled fraction and draws a bar in the
//! terminal.
//!
//! # Basic Usage
//!
//! ```rust
//! use focus_timer::ring::{new, with_radius, with_width};
//!
//! // A ring with default geometry
//! let ring = new(&[]);
//! assert_eq!(ring.percent(), 100.0);
//!
//! // Custom geometry and width
//! let ring = new(&[with_radius(54.0), with_width(30)]);
//! ```

use lipgloss_extras::prelude::*;
use std::f64::consts::PI;

use crate::sink::ProgressSink;

const DEFAULT_WIDTH: i32 = 40;
const DEFAULT_RADIUS: f64 = 90.0;
const DEFAULT_FULL_COLOR: &str = "#7571F9";
const DEFAULT_EMPTY_COLOR: &str = "#606060";

/// Configuration options for the progress ring.
pub enum RingOption {
    /// Sets the ring radius the circumference is computed from.
    WithRadius(f64),
    /// Sets the rendered width in terminal cells.
    WithWidth(i32),
    /// Sets a solid fill color for the revealed portion.
    WithSolidFill(String),
    /// Customizes the characters for the revealed and hidden portions.
    WithFillCharacters(char, char),
    /// Hides the numeric percentage readout.
    WithoutPercentage,
}

impl RingOption {
    fn apply(&self, m: &mut Model) {
        match self {
            RingOption::WithRadius(radius) => m.radius = *radius,
            RingOption::WithWidth(width) => m.width = *width,
            RingOption::WithSolidFill(color) => m.full_color = color.clone(),
            RingOption::WithFillCharacters(full, empty) => {
                m.full = *full;
                m.empty = *empty;
            }
            RingOption::WithoutPercentage => m.show_percentage = false,
        }
    }
}

/// Option setting the ring radius.
pub fn with_radius(radius: f64) -> RingOption {
    RingOption::WithRadius(radius)
}

/// Option setting the rendered width in terminal cells.
pub fn with_width(width: i32) -> RingOption {
    RingOption::WithWidth(width)
}

/// Option setting a solid fill color (hex or named color string).
pub fn with_solid_fill(color: String) -> RingOption {
    RingOption::WithSolidFill(color)
}

/// Option customizing the fill characters (revealed, hidden).
pub fn with_fill_characters(full: char, empty: char) -> RingOption {
    RingOption::WithFillCharacters(full, empty)
}

/// Option hiding the percentage readout.
pub fn without_percentage() -> RingOption {
    RingOption::WithoutPercentage
}

/// The progress ring model.
///
/// A fresh ring starts fully revealed (offset `0`, 100%). Geometry is
/// fixed after construction; only the offset moves at runtime.
#[derive(Debug, Clone)]
pub struct Model {
    /// Radius the circumference was computed from.
    radius: f64,
    /// `2 * PI * radius`, fixed at construction.
    circumference: f64,
    /// Dash pattern length, announced by the controller at init.
    dash_array: f64,
    /// Current dash offset in `[0, dash_array]`.
    offset: f64,

    /// Rendered width in terminal cells.
    pub width: i32,
    /// Character for the revealed portion.
    pub full: char,
    /// Color for the revealed portion.
    pub full_color: String,
    /// Character for the hidden portion.
    pub empty: char,
    /// Color for the hidden portion.
    pub empty_color: String,
    /// Whether the numeric percentage is rendered after the bar.
    pub show_percentage: bool,
}

/// Creates a new progress ring with the given options.
pub fn new(opts: &[RingOption]) -> Model {
    let mut m = Model {
        radius: DEFAULT_RADIUS,
        circumference: 0.0,
        dash_array: 0.0,
        offset: 0.0,
        width: DEFAULT_WIDTH,
        full: '█',
        full_color: DEFAULT_FULL_COLOR.to_string(),
        empty: '░',
        empty_color: DEFAULT_EMPTY_COLOR.to_string(),
        show_percentage: true,
    };

    for opt in opts {
        opt.apply(&mut m);
    }

    m.circumference = 2.0 * PI * m.radius;
    m.dash_array = m.circumference;
    m
}

impl Model {
    /// The circumference computed at construction.
    pub fn circumference(&self) -> f64 {
        self.circumference
    }

    /// The current dash offset.
    pub fn offset(&self) -> f64 {
        self.offset
    }

    /// The revealed fraction as a percentage in `[0, 100]`.
    pub fn percent(&self) -> f64 {
        if self.dash_array <= 0.0 {
            return 0.0;
        }
        (1.0 - self.offset / self.dash_array).clamp(0.0, 1.0) * 100.0
    }

    /// Renders the ring as a styled bar with an optional percentage.
    pub fn view(&self) -> String {
        // The percentage readout is plain text, so its char count is its
        // visible width.
        let percent_view = self.percentage_view();
        let text_width = percent_view.chars().count() as i32;
        let bar_view = self.bar_view(text_width);
        format!("{}{}", bar_view, percent_view)
    }

    fn bar_view(&self, text_width: i32) -> String {
        let tw = std::cmp::max(0, self.width - text_width);
        let fraction = self.percent() / 100.0;
        let fw = std::cmp::max(
            0,
            std::cmp::min(tw, ((tw as f64) * fraction).round() as i32),
        );

        let full_styled = Style::new()
            .foreground(Color::from(self.full_color.as_str()))
            .render(&self.full.to_string());
        let empty_styled = Style::new()
            .foreground(Color::from(self.empty_color.as_str()))
            .render(&self.empty.to_string());

        let mut result = String::new();
        result.push_str(&full_styled.repeat(fw as usize));
        result.push_str(&empty_styled.repeat((tw - fw) as usize));
        result
    }

    fn percentage_view(&self) -> String {
        if !self.show_percentage {
            return String::new();
        }
        format!(" {:3.0}%", self.percent())
    }
}

impl ProgressSink for Model {
    fn radius(&self) -> f64 {
        self.radius
    }

    fn set_stroke_dasharray(&mut self, circumference: f64) {
        self.dash_array = circumference;
    }

    fn set_stroke_dashoffset(&mut self, offset: f64) {
        self.offset = offset.clamp(0.0, self.dash_array.max(0.0));
    }
}

impl Default for Model {
    fn default() -> Self {
        new(&[])
    }
}
