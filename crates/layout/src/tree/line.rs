//! A single row of inline content and the runs placed on it.

use super::{ComponentId, RegionId};
use folio_style::{TextAlign, TextOptions, VerticalAlign};
use folio_traits::FontMetrics;
use serde::Serialize;
use std::sync::Arc;

/// Word spaces receive this many times the extra spacing of a single character.
pub const WORD_SPACE_WEIGHT: f32 = 10.0;

/// Opens a run of text on a line. Every line holding text starts with one.
#[derive(Debug, Clone)]
pub struct TextBegin {
    pub owner: Option<ComponentId>,
    pub options: Arc<TextOptions>,
    pub metrics: FontMetrics,
    pub line_height: f32,
    /// Extra horizontal offset accumulated from justification of the runs before this one.
    pub line_inset: f32,
    /// True when this begins the second or later line of the same text.
    pub continuation: bool,
    pub x: f32,
}

#[derive(Debug, Clone)]
pub struct TextChars {
    pub text: String,
    pub width: f32,
    pub height: f32,
    /// Advance of a single space in this run's font.
    pub space_width: f32,
    pub x: f32,
    /// Extra width added by justification, spread across the run's characters and spaces.
    pub extra_space: f32,
    pub char_space: f32,
    pub word_space: f32,
}

#[derive(Debug, Clone)]
pub struct NewLine {
    /// Hard breaks come from explicit line breaks or the end of a paragraph, soft ones from wrapping.
    pub hard: bool,
    pub height: f32,
    /// Horizontal shift accumulated from justification.
    pub offset: f32,
    pub x: f32,
}

#[derive(Debug, Clone)]
pub struct ComponentRun {
    pub owner: Option<ComponentId>,
    pub width: f32,
    pub height: f32,
    pub x: f32,
}

/// Marks where an inline span opens or closes. The width holds the span's own edge insets.
#[derive(Debug, Clone)]
pub struct InlineMarker {
    pub owner: Option<ComponentId>,
    pub width: f32,
    pub x: f32,
}

#[derive(Debug, Clone)]
pub struct PositionedRun {
    pub region: RegionId,
    pub x: f32,
}

#[derive(Debug, Clone)]
pub struct FormObjectRun {
    pub owner: Option<ComponentId>,
    pub region: RegionId,
    pub width: f32,
    pub height: f32,
    pub x: f32,
}

#[derive(Debug, Clone)]
pub enum Run {
    TextBegin(TextBegin),
    TextChars(TextChars),
    NewLine(NewLine),
    TextEnd { x: f32 },
    Component(ComponentRun),
    InlineBegin(InlineMarker),
    InlineEnd(InlineMarker),
    Positioned(PositionedRun),
    FormObject(FormObjectRun),
}

impl Run {
    pub fn width(&self) -> f32 {
        match self {
            Run::TextChars(t) => t.width,
            Run::Component(c) => c.width,
            Run::InlineBegin(m) | Run::InlineEnd(m) => m.width,
            Run::FormObject(f) => f.width,
            Run::TextBegin(_) | Run::NewLine(_) | Run::TextEnd { .. } | Run::Positioned(_) => 0.0,
        }
    }

    pub fn height(&self) -> f32 {
        match self {
            Run::TextBegin(t) => t.line_height,
            Run::TextChars(t) => t.height,
            Run::NewLine(n) => n.height,
            Run::Component(c) => c.height,
            Run::FormObject(f) => f.height,
            Run::TextEnd { .. } | Run::InlineBegin(_) | Run::InlineEnd(_) | Run::Positioned(_) => 0.0,
        }
    }

    pub fn x(&self) -> f32 {
        match self {
            Run::TextBegin(t) => t.x,
            Run::TextChars(t) => t.x,
            Run::NewLine(n) => n.x,
            Run::TextEnd { x } => *x,
            Run::Component(c) => c.x,
            Run::InlineBegin(m) | Run::InlineEnd(m) => m.x,
            Run::Positioned(p) => p.x,
            Run::FormObject(f) => f.x,
        }
    }

    fn x_mut(&mut self) -> &mut f32 {
        match self {
            Run::TextBegin(t) => &mut t.x,
            Run::TextChars(t) => &mut t.x,
            Run::NewLine(n) => &mut n.x,
            Run::TextEnd { x } => x,
            Run::Component(c) => &mut c.x,
            Run::InlineBegin(m) | Run::InlineEnd(m) => &mut m.x,
            Run::Positioned(p) => &mut p.x,
            Run::FormObject(f) => &mut f.x,
        }
    }

    /// Distance from the top of the run to its baseline, for runs that sit on the baseline.
    pub fn ascent(&self) -> Option<f32> {
        match self {
            Run::TextBegin(t) => {
                let leading = (t.line_height - (t.metrics.ascent + t.metrics.descent)).max(0.0);
                Some(t.metrics.ascent + leading / 2.0)
            }
            Run::Component(c) => Some(c.height),
            Run::FormObject(f) => Some(f.height),
            _ => None,
        }
    }

    fn extra_space(&self) -> f32 {
        match self {
            Run::TextChars(t) => t.extra_space,
            _ => 0.0,
        }
    }

    /// True for runs that put visible content on the line.
    pub fn is_content(&self) -> bool {
        matches!(
            self,
            Run::TextChars(_) | Run::Component(_) | Run::FormObject(_)
        )
    }
}

/// The spacing computed when a line is justified.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct JustifySpacing {
    /// The leftover width that was distributed.
    pub available: f32,
    /// `spaces * 10 + chars`: the number of spacing units the leftover was split into.
    pub full: f32,
    pub char_space: f32,
    pub word_space: f32,
}

#[derive(Debug, Clone)]
pub struct Line {
    pub(crate) parent: RegionId,
    pub(crate) closed: bool,
    pub full_width: f32,
    pub offset_y: f32,
    pub line_index: usize,
    pub h_align: TextAlign,
    pub v_align: VerticalAlign,
    /// Horizontal shift applied by center or right alignment.
    pub align_offset: f32,
    pub runs: Vec<Run>,
    pub spacing: Option<JustifySpacing>,
    trailing_trimmed: bool,
}

impl Line {
    pub(crate) fn new(
        parent: RegionId,
        full_width: f32,
        offset_y: f32,
        line_index: usize,
        h_align: TextAlign,
        v_align: VerticalAlign,
    ) -> Self {
        Self {
            parent,
            closed: false,
            full_width,
            offset_y,
            line_index,
            h_align,
            v_align,
            align_offset: 0.0,
            runs: Vec::new(),
            spacing: None,
            trailing_trimmed: false,
        }
    }

    pub fn parent(&self) -> RegionId {
        self.parent
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }

    /// Sum of the measured run widths, excluding any justification spacing.
    pub fn width(&self) -> f32 {
        self.runs.iter().map(Run::width).sum()
    }

    pub fn height(&self) -> f32 {
        self.runs.iter().map(Run::height).fold(0.0, f32::max)
    }

    pub fn available_width(&self) -> f32 {
        self.full_width - self.width()
    }

    /// Width including justification spacing: what the line occupies once rendered.
    pub fn visual_width(&self) -> f32 {
        self.width() + self.runs.iter().map(Run::extra_space).sum::<f32>()
    }

    pub fn baseline_offset(&self) -> f32 {
        self.runs.iter().filter_map(Run::ascent).fold(0.0, f32::max)
    }

    pub fn has_content(&self) -> bool {
        self.runs.iter().any(Run::is_content)
    }

    /// Appends a run at the current end of the line.
    pub(crate) fn push_run(&mut self, mut run: Run) {
        *run.x_mut() = self.visual_width();
        self.runs.push(run);
    }

    /// Shrinks the line to at most `width`. Widths never grow back.
    ///
    /// A closed line is re-aligned against its new width.
    pub fn set_max_width(&mut self, width: f32) {
        if width < self.full_width {
            self.full_width = width.max(0.0);
            if self.closed {
                self.apply_alignment();
            }
        }
    }

    /// A line is justified unless it is the last line of its paragraph, which is marked by
    /// anything other than a soft line break at its end.
    pub fn should_justify(&self) -> bool {
        matches!(self.runs.last(), Some(Run::NewLine(n)) if !n.hard)
    }

    /// Applies the line's horizontal alignment. Called once when the line closes, and again only
    /// if the line is later narrowed.
    pub(crate) fn apply_alignment(&mut self) {
        self.align_offset = 0.0;
        match self.h_align {
            TextAlign::Left => {}
            TextAlign::Center => self.align_offset = (self.available_width() / 2.0).max(0.0),
            TextAlign::Right => self.align_offset = self.available_width().max(0.0),
            TextAlign::Justify => {
                if self.should_justify() {
                    self.justify();
                }
            }
        }
    }

    /// Distributes the leftover width across the characters and spaces of the line.
    ///
    /// A single trailing space is dropped first, at most once per line. Runs whose text options
    /// carry explicit word or character spacing are left untouched.
    pub fn justify(&mut self) -> Option<JustifySpacing> {
        if !self.trailing_trimmed {
            self.trim_trailing_space();
        }

        let mut chars = 0usize;
        let mut spaces = 0usize;
        let mut opted_out = false;
        for run in &self.runs {
            match run {
                Run::TextBegin(begin) => opted_out = begin.options.has_explicit_spacing(),
                Run::TextChars(text) if !opted_out => {
                    let (c, s) = count_letters_and_spaces(&text.text);
                    chars += c;
                    spaces += s;
                }
                _ => {}
            }
        }

        let available = self.full_width - self.width();
        let full = spaces as f32 * WORD_SPACE_WEIGHT + chars as f32;
        if full <= 0.0 || available <= 0.0 {
            self.spacing = None;
            self.clear_spacing();
            return None;
        }

        let char_space = available / full;
        let word_space = char_space * WORD_SPACE_WEIGHT;
        let mut opted_out = false;
        for run in &mut self.runs {
            match run {
                Run::TextBegin(begin) => opted_out = begin.options.has_explicit_spacing(),
                Run::TextChars(text) => {
                    if opted_out {
                        text.extra_space = 0.0;
                        text.char_space = 0.0;
                        text.word_space = 0.0;
                    } else {
                        let (c, s) = count_letters_and_spaces(&text.text);
                        text.extra_space = word_space * s as f32 + char_space * c as f32;
                        text.char_space = char_space;
                        text.word_space = word_space;
                    }
                }
                _ => {}
            }
        }
        self.reposition_runs();

        let spacing = JustifySpacing {
            available,
            full,
            char_space,
            word_space,
        };
        self.spacing = Some(spacing);
        Some(spacing)
    }

    fn trim_trailing_space(&mut self) {
        let last_text = self.runs.iter_mut().rev().find_map(|r| match r {
            Run::TextChars(t) => Some(t),
            _ => None,
        });
        if let Some(text) = last_text {
            if text.text.ends_with(' ') {
                text.text.pop();
                text.width = (text.width - text.space_width).max(0.0);
                self.trailing_trimmed = true;
            }
        }
        self.reposition_runs();
    }

    fn clear_spacing(&mut self) {
        for run in &mut self.runs {
            if let Run::TextChars(text) = run {
                text.extra_space = 0.0;
                text.char_space = 0.0;
                text.word_space = 0.0;
            }
        }
        self.reposition_runs();
    }

    /// Recomputes every run's x position from the widths and spacing before it, so each run
    /// carries the cumulative shift of everything to its left.
    fn reposition_runs(&mut self) {
        let mut cursor = 0.0;
        let mut shift = 0.0;
        for run in &mut self.runs {
            *run.x_mut() = cursor;
            match run {
                Run::TextBegin(begin) => begin.line_inset = shift,
                Run::NewLine(newline) => newline.offset = shift,
                _ => {}
            }
            let extra = run.extra_space();
            shift += extra;
            cursor += run.width() + extra;
        }
    }

    /// True for the first line of a text block that continues on later lines, when the line is
    /// not top aligned. Those lines are not offset vertically.
    pub fn suppresses_vertical_alignment(&self) -> bool {
        if self.v_align == VerticalAlign::Top {
            return false;
        }
        let starts_text = self
            .runs
            .iter()
            .any(|r| matches!(r, Run::TextBegin(b) if !b.continuation));
        starts_text && matches!(self.runs.last(), Some(Run::NewLine(_)))
    }

    /// Vertical offset of a run within the line for the line's vertical alignment.
    pub fn run_offset(&self, run: &Run) -> f32 {
        if self.suppresses_vertical_alignment() {
            return 0.0;
        }
        let diff = (self.height() - run.height()).max(0.0);
        match self.v_align {
            VerticalAlign::Top => 0.0,
            VerticalAlign::Middle => diff / 2.0,
            VerticalAlign::Bottom => diff,
        }
    }
}

/// Counts letters (anything that is neither whitespace nor a control character) and spaces.
pub fn count_letters_and_spaces(text: &str) -> (usize, usize) {
    text.chars().fold((0, 0), |(chars, spaces), c| {
        if c.is_whitespace() {
            (chars, spaces + 1)
        } else if c.is_control() {
            (chars, spaces)
        } else {
            (chars + 1, spaces)
        }
    })
}
