use super::{LayoutEngine, LayoutOutcome};
use crate::context::LayoutContext;
use crate::tree::{ComponentId, LineId, NewLine, Run, TextBegin, TextChars};
use crate::LayoutError;
use folio_idf::Node;
use folio_style::{ElementStyle, TextOptions};
use folio_traits::FontMetrics;
use folio_types::geometry::EPSILON;
use std::sync::Arc;

#[derive(Debug, Clone, Copy, Default)]
pub struct TextEngine;

impl LayoutEngine for TextEngine {
    fn layout(&self, ctx: &mut LayoutContext, node: &Node) -> Result<LayoutOutcome, LayoutError> {
        let Node::Text { content, .. } = node else {
            return Ok(LayoutOutcome::Continue);
        };
        let owner = ctx.register_component(node);
        layout_text(ctx, Some(owner), node.style(), content)
    }
}

/// Splits text into words, each carrying the single space that preceded it. Runs of whitespace
/// collapse to one space, and a trailing space is kept on the last word.
fn collapse_whitespace(text: &str) -> Vec<String> {
    let leading = text.starts_with(char::is_whitespace);
    let trailing = text.ends_with(char::is_whitespace);
    let mut pieces: Vec<String> = text
        .split_whitespace()
        .enumerate()
        .map(|(i, word)| {
            if i > 0 || leading {
                format!(" {word}")
            } else {
                word.to_string()
            }
        })
        .collect();
    match pieces.last_mut() {
        Some(last) if trailing => last.push(' '),
        None if !text.is_empty() => pieces.push(" ".to_string()),
        _ => {}
    }
    pieces
}

struct TextState {
    options: Arc<TextOptions>,
    metrics: FontMetrics,
    line_height: f32,
    space_width: f32,
    owner: Option<ComponentId>,
    buffer: String,
    buffer_width: f32,
}

impl TextState {
    fn measure(&self, ctx: &LayoutContext, text: &str) -> Result<f32, LayoutError> {
        let mut width = ctx.measure(&self.options.font, text)?;
        let (chars, spaces) = crate::tree::count_letters_and_spaces(text);
        if let Some(spacing) = self.options.char_spacing {
            width += spacing * chars as f32;
        }
        if let Some(spacing) = self.options.word_spacing {
            width += spacing * spaces as f32;
        }
        Ok(width)
    }

    fn begin(&self, ctx: &mut LayoutContext, line: LineId, continuation: bool) {
        ctx.tree.line_mut(line).push_run(Run::TextBegin(TextBegin {
            owner: self.owner,
            options: self.options.clone(),
            metrics: self.metrics,
            line_height: self.line_height,
            line_inset: 0.0,
            continuation,
            x: 0.0,
        }));
    }

    fn flush(&mut self, ctx: &mut LayoutContext, line: LineId) {
        if self.buffer.is_empty() {
            return;
        }
        ctx.tree.line_mut(line).push_run(Run::TextChars(TextChars {
            text: std::mem::take(&mut self.buffer),
            width: self.buffer_width,
            height: self.line_height,
            space_width: self.space_width,
            x: 0.0,
            extra_space: 0.0,
            char_space: 0.0,
            word_space: 0.0,
        }));
        self.buffer_width = 0.0;
    }
}

/// Flows `content` onto lines in the current region, wrapping at spaces.
///
/// The text continues the line that is open, if any, and leaves its last line open so following
/// inline content joins it. A word wider than a whole line gets a line of its own.
pub fn layout_text(
    ctx: &mut LayoutContext,
    owner: Option<ComponentId>,
    style: &ElementStyle,
    content: &str,
) -> Result<LayoutOutcome, LayoutError> {
    let options = Arc::new(style.text_options(&ctx.config.default_font));
    let metrics = ctx.font_metrics(&options.font)?;
    let line_height = options.line_height.unwrap_or(metrics.line_height);
    let space_width = ctx.measure(&options.font, " ")?;
    let mut state = TextState {
        options,
        metrics,
        line_height,
        space_width,
        owner,
        buffer: String::new(),
        buffer_width: 0.0,
    };

    let Some(mut line) = ctx.ensure_line(line_height)? else {
        return abandon_text(ctx, line_height);
    };
    state.begin(ctx, line, false);

    for piece in collapse_whitespace(content) {
        let at_line_start = state.buffer.is_empty() && !ctx.tree.line(line).has_content();
        let mut piece = if at_line_start {
            piece.trim_start().to_string()
        } else {
            piece
        };
        if piece.is_empty() {
            continue;
        }
        let mut width = state.measure(ctx, &piece)?;
        let available = ctx.tree.line(line).available_width() - state.buffer_width;
        if at_line_start || width <= available + EPSILON {
            state.buffer.push_str(&piece);
            state.buffer_width += width;
            continue;
        }

        state.flush(ctx, line);
        ctx.tree.line_mut(line).push_run(Run::NewLine(NewLine {
            hard: false,
            height: line_height,
            offset: 0.0,
            x: 0.0,
        }));
        ctx.tree.close_line(line)?;

        line = match ctx.ensure_line(line_height)? {
            Some(next) => next,
            None => return abandon_text(ctx, line_height),
        };
        state.begin(ctx, line, true);

        let trimmed = piece.trim_start();
        if trimmed.len() != piece.len() {
            piece = trimmed.to_string();
            width = state.measure(ctx, &piece)?;
        }
        state.buffer = piece;
        state.buffer_width = width;
    }

    state.flush(ctx, line);
    ctx.tree.line_mut(line).push_run(Run::TextEnd { x: 0.0 });
    Ok(LayoutOutcome::Continue)
}

fn abandon_text(ctx: &mut LayoutContext, line_height: f32) -> Result<LayoutOutcome, LayoutError> {
    let available = ctx
        .current_region()
        .map(|r| ctx.tree.region(r).remaining_height())
        .unwrap_or(0.0);
    ctx.abandon("text", line_height, available)
}

#[cfg(test)]
mod tests {
    use super::collapse_whitespace;

    #[test]
    fn collapses_runs_of_whitespace() {
        assert_eq!(
            collapse_whitespace("  hello   big\n world "),
            vec![" hello", " big", " world "]
        );
        assert_eq!(collapse_whitespace("one"), vec!["one"]);
        assert_eq!(collapse_whitespace("   "), vec![" "]);
        assert!(collapse_whitespace("").is_empty());
    }
}
