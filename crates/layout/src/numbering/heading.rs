use super::ListNumbering;
use crate::LayoutError;
use folio_style::ListOptions;
use std::collections::BTreeMap;
use std::ops::Bound;

/// Outline numbering for headings.
///
/// Each heading depth registers the numbering group it uses. The route records the depths
/// visited on the way to the current heading; it decides which groups make up a label such as
/// "2.3.1".
#[derive(Debug, Default)]
pub struct HeadingNumbers {
    registry: BTreeMap<u8, (String, ListOptions)>,
    route: Vec<u8>,
}

impl HeadingNumbers {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn route(&self) -> &[u8] {
        &self.route
    }

    /// Numbers a heading at `level` in the group `name` and returns its composite label.
    ///
    /// Groups registered for deeper levels restart, since a shallower heading begins a new
    /// section. The numbering stack of any enclosing list is left as it was.
    pub fn begin_heading(
        &mut self,
        level: u8,
        name: &str,
        options: &ListOptions,
        numbering: &mut ListNumbering,
    ) -> Result<String, LayoutError> {
        self.registry
            .insert(level, (name.to_string(), options.clone()));
        for (deeper, _) in self
            .registry
            .range((Bound::Excluded(level), Bound::Unbounded))
            .map(|(_, group)| group)
        {
            numbering.reset_group(deeper);
        }

        self.route.retain(|depth| *depth < level);
        self.route.push(level);

        let saved = numbering.take_stack();
        for depth in &self.route {
            if let Some((group, opts)) = self.registry.get(depth) {
                numbering.push_group(Some(group), opts);
            }
        }
        let result = numbering.increment();
        let label = numbering.composite_label(".");
        numbering.restore_stack(saved);
        result.map(|_| label)
    }
}
