//! Converts the closed layout tree into absolute page coordinates.
//!
//! Every block, region and line stores its bounds relative to its parent. The arrangement pass
//! walks each page top-down, accumulating origins, and emits drawable elements along with one
//! [`Arrangement`] record per component occurrence.

use crate::output::{LaidOutPage, LayoutElement, PositionedElement, TextElement};
use crate::tree::{
    BlockId, ComponentId, LayoutTree, LineId, RegionContent, RegionId, RegionKind, Run, TextBegin,
};
use folio_style::{PositionMode, TextAlign, TextDecoration, VerticalAlign};
use folio_types::{Point, Rect};
use serde::Serialize;
use std::collections::{BTreeMap, HashMap, HashSet};

/// The final bounds of one component occurrence on a page.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Arrangement {
    pub component: ComponentId,
    pub id: Option<String>,
    pub kind: &'static str,
    pub page_index: usize,
    pub bounds: Rect,
    pub repeat_index: usize,
}

/// Receives each component's bounds once they are final.
pub trait ArrangementSink {
    fn arranged(&mut self, arrangement: Arrangement);
}

impl ArrangementSink for Vec<Arrangement> {
    fn arranged(&mut self, arrangement: Arrangement) {
        self.push(arrangement);
    }
}

/// Arranges every page of `tree`, reporting component bounds to `sink`.
pub fn arrange(tree: &LayoutTree, sink: &mut dyn ArrangementSink) -> Vec<LaidOutPage> {
    tree.pages()
        .iter()
        .map(|page| {
            let mut arranger = Arranger {
                tree,
                sink: &mut *sink,
                page_index: page.index,
                elements: Vec::new(),
                text_bounds: BTreeMap::new(),
                open_spans: Vec::new(),
                content_origins: HashMap::new(),
                placed: HashSet::new(),
            };
            arranger.block(page.root, Point::default());
            arranger.flush_text_arrangements();
            LaidOutPage {
                index: page.index,
                size: page.size,
                elements: arranger.elements,
            }
        })
        .collect()
}

struct Arranger<'a> {
    tree: &'a LayoutTree,
    sink: &'a mut dyn ArrangementSink,
    page_index: usize,
    elements: Vec<PositionedElement>,
    /// Text components may span many lines; their bounds are merged and reported once per page.
    text_bounds: BTreeMap<ComponentId, Rect>,
    /// Inline spans still open at the end of the previous line.
    open_spans: Vec<ComponentId>,
    /// Content origins of the blocks arranged so far on this page.
    content_origins: HashMap<BlockId, Point>,
    /// Positioned regions already drawn through their marker run.
    placed: HashSet<RegionId>,
}

impl Arranger<'_> {
    fn component_id(&self, owner: Option<ComponentId>) -> Option<String> {
        owner.and_then(|c| self.tree.component(c).id.clone())
    }

    fn report(&mut self, owner: ComponentId, bounds: Rect, repeat_index: usize) {
        let info = self.tree.component(owner);
        self.sink.arranged(Arrangement {
            component: owner,
            id: info.id.clone(),
            kind: info.kind,
            page_index: self.page_index,
            bounds,
            repeat_index,
        });
    }

    fn block(&mut self, id: BlockId, origin: Point) {
        let b = self.tree.block(id);
        let total = b.total_bounds.translate(origin.x, origin.y);

        if !b.is_page {
            let border_box = total.deflate(&b.position.margins);
            if let Some(owner) = b.owner {
                let kind = self.tree.component(owner).kind;
                let element = if kind == "image" {
                    LayoutElement::Image
                } else {
                    LayoutElement::Block {
                        kind,
                        repeat_index: b.repeat_index,
                    }
                };
                self.elements.push(PositionedElement::new(
                    border_box,
                    self.component_id(Some(owner)),
                    element,
                ));
                self.report(owner, border_box, b.repeat_index);
            }
        }

        let content = Point::new(total.x + b.available_bounds.x, total.y + b.available_bounds.y);
        self.content_origins.insert(id, content);
        for column in &b.columns {
            self.region(*column, content);
        }
        // Floats, and any positioned region whose marker did not end up on this page.
        for region in &b.positioned {
            if self.placed.contains(region) {
                continue;
            }
            match self.tree.region(*region).kind {
                RegionKind::Positioned {
                    mode: PositionMode::Absolute,
                    ..
                } => self.region(*region, Point::default()),
                RegionKind::Positioned { .. } => self.region(*region, content),
                // Form regions are placed by the run that shows them.
                _ => {}
            }
        }
    }

    /// Draws a relative or absolute region at the point its marker run is met.
    fn positioned(&mut self, id: RegionId) {
        let r = self.tree.region(id);
        let Some(content) = self.content_origins.get(&r.parent()).copied() else {
            return;
        };
        if !self.placed.insert(id) {
            return;
        }
        let origin = if r.is_absolute() {
            Point::default()
        } else {
            content
        };
        self.region(id, origin);
    }

    fn region(&mut self, id: RegionId, origin: Point) {
        let r = self.tree.region(id);
        let mut region_origin = Point::new(origin.x + r.total_bounds.x, origin.y + r.total_bounds.y);
        if r.is_flow() {
            let free = (r.total_bounds.height - r.used.height).max(0.0);
            region_origin.y += match r.v_align {
                VerticalAlign::Top => 0.0,
                VerticalAlign::Middle => free / 2.0,
                VerticalAlign::Bottom => free,
            };
        }

        for content in &r.contents {
            match *content {
                RegionContent::Line(line) => self.line(line, region_origin),
                RegionContent::Block(block) => {
                    let free = (r.total_bounds.width - self.tree.block(block).total_bounds.width)
                        .max(0.0);
                    let dx = match r.h_align {
                        TextAlign::Center => free / 2.0,
                        TextAlign::Right => free,
                        TextAlign::Left | TextAlign::Justify => 0.0,
                    };
                    self.block(block, Point::new(region_origin.x + dx, region_origin.y));
                }
            }
        }
    }

    fn line(&mut self, id: LineId, origin: Point) {
        let line = self.tree.line(id);
        let region = self.tree.region(line.parent());
        let x0 = origin.x + region.left_inset(line.offset_y, 0.0) + line.align_offset;
        let y0 = origin.y + line.offset_y;
        let baseline = y0 + line.baseline_offset();
        let height = line.height();

        let mut span_starts: Vec<(ComponentId, f32)> =
            self.open_spans.drain(..).map(|c| (c, x0)).collect();
        let mut text: Option<&TextBegin> = None;

        for run in &line.runs {
            let x = x0 + run.x();
            let y = y0 + line.run_offset(run);
            match run {
                Run::TextBegin(begin) => text = Some(begin),
                Run::TextChars(chars) => {
                    let Some(begin) = text else { continue };
                    let bounds = Rect::new(x, y, chars.width + chars.extra_space, chars.height);
                    let run_baseline = y + (baseline - y0);
                    self.elements.push(PositionedElement::new(
                        bounds,
                        self.component_id(begin.owner),
                        LayoutElement::Text(TextElement {
                            content: chars.text.clone(),
                            font_family: begin.options.font.family.clone(),
                            font_size: begin.options.font.size,
                            baseline: run_baseline,
                            char_space: chars.char_space,
                            word_space: chars.word_space,
                            decoration: begin.options.decoration,
                        }),
                    ));
                    self.decorate(begin, bounds, run_baseline);
                    if let Some(owner) = begin.owner {
                        self.text_bounds
                            .entry(owner)
                            .and_modify(|r| *r = union(*r, bounds))
                            .or_insert(bounds);
                    }
                }
                Run::Component(component) => {
                    let bounds = Rect::new(x, y, component.width, component.height);
                    self.elements.push(PositionedElement::new(
                        bounds,
                        self.component_id(component.owner),
                        LayoutElement::Image,
                    ));
                    if let Some(owner) = component.owner {
                        self.report(owner, bounds, 0);
                    }
                }
                Run::InlineBegin(marker) => {
                    if let Some(owner) = marker.owner {
                        span_starts.push((owner, x));
                    }
                }
                Run::InlineEnd(marker) => {
                    let Some(owner) = marker.owner else { continue };
                    if let Some(pos) = span_starts.iter().rposition(|(c, _)| *c == owner) {
                        let (_, start) = span_starts.remove(pos);
                        let bounds = Rect::new(start, y0, x + marker.width - start, height);
                        self.push_span(owner, bounds);
                    }
                }
                Run::FormObject(form) => {
                    let bounds = Rect::new(x, y, form.width, form.height);
                    self.elements.push(PositionedElement::new(
                        bounds,
                        self.component_id(form.owner),
                        LayoutElement::FormObject,
                    ));
                    if let Some(owner) = form.owner {
                        self.report(owner, bounds, 0);
                    }
                    self.region(form.region, Point::new(x, y));
                }
                Run::Positioned(marker) => self.positioned(marker.region),
                Run::NewLine(_) | Run::TextEnd { .. } => {}
            }
        }

        // Spans that continue on the next line are drawn up to the end of this one.
        let line_end = x0 + line.visual_width();
        for (owner, start) in span_starts {
            self.push_span(owner, Rect::new(start, y0, line_end - start, height));
            self.open_spans.push(owner);
        }
    }

    fn push_span(&mut self, owner: ComponentId, bounds: Rect) {
        self.elements.push(PositionedElement::new(
            bounds,
            self.component_id(Some(owner)),
            LayoutElement::InlineSpan,
        ));
        self.report(owner, bounds, 0);
    }

    fn decorate(&mut self, begin: &TextBegin, bounds: Rect, baseline: f32) {
        let metrics = begin.metrics;
        let y = match begin.options.decoration {
            TextDecoration::None => return,
            TextDecoration::Underline => baseline + metrics.underline_position,
            TextDecoration::LineThrough => baseline - metrics.ascent / 3.0,
        };
        self.elements.push(PositionedElement::new(
            Rect::new(bounds.x, y, bounds.width, metrics.underline_thickness),
            self.component_id(begin.owner),
            LayoutElement::Decoration {
                decoration: begin.options.decoration,
            },
        ));
    }

    fn flush_text_arrangements(&mut self) {
        for (owner, bounds) in std::mem::take(&mut self.text_bounds) {
            self.report(owner, bounds, 0);
        }
    }
}

fn union(a: Rect, b: Rect) -> Rect {
    let x = a.x.min(b.x);
    let y = a.y.min(b.y);
    Rect::new(x, y, a.right().max(b.right()) - x, a.bottom().max(b.bottom()) - y)
}
