//! Document-wide counters for ordered lists and numbered headings.
//!
//! Groups live for the whole document. Lists push a group when they start and pop it when they
//! end; named groups are kept after popping so a later list with the same name resumes the count.

mod format;
mod heading;

pub use format::{
    format_value, int_to_lower_alpha, int_to_lower_roman, int_to_upper_alpha, int_to_upper_roman,
};
pub use heading::HeadingNumbers;

use crate::LayoutError;
use folio_style::{ListOptions, NumberingStyle};
use itertools::Itertools;
use std::collections::HashMap;

#[derive(Debug, Clone, PartialEq)]
pub struct NumberGroup {
    pub name: Option<String>,
    pub style: NumberingStyle,
    pub prefix: String,
    pub postfix: String,
    pub concat: bool,
    pub start: u32,
    next: u32,
}

impl NumberGroup {
    fn new(name: Option<String>, options: &ListOptions) -> Self {
        Self {
            name,
            style: options.style,
            prefix: options.prefix.clone(),
            postfix: options.postfix.clone(),
            concat: options.concat,
            start: options.start,
            next: options.start,
        }
    }

    /// The value most recently handed out, or one less than the start when nothing was.
    pub fn current(&self) -> u32 {
        self.next.saturating_sub(1)
    }

    pub fn increment(&mut self) -> u32 {
        let value = self.next;
        self.next += 1;
        value
    }

    pub fn reset(&mut self) {
        self.next = self.start;
    }
}

#[derive(Debug, Default)]
pub struct ListNumbering {
    groups: Vec<NumberGroup>,
    named: HashMap<String, usize>,
    stack: Vec<usize>,
}

impl ListNumbering {
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes a group current. A name that was seen before reuses that group and its count.
    pub fn push_group(&mut self, name: Option<&str>, options: &ListOptions) {
        let existing = name.and_then(|n| self.named.get(n).copied());
        let index = match existing {
            Some(index) => index,
            None => {
                let index = self.groups.len();
                self.groups
                    .push(NumberGroup::new(name.map(str::to_string), options));
                if let Some(name) = name {
                    self.named.insert(name.to_string(), index);
                }
                index
            }
        };
        self.stack.push(index);
    }

    pub fn pop_group(&mut self) -> Result<(), LayoutError> {
        self.stack.pop().map(|_| ()).ok_or(LayoutError::NoNumberingGroup)
    }

    pub fn has_current_group(&self) -> bool {
        !self.stack.is_empty()
    }

    pub fn current_group(&self) -> Option<&NumberGroup> {
        self.stack.last().map(|i| &self.groups[*i])
    }

    pub fn group(&self, name: &str) -> Option<&NumberGroup> {
        self.named.get(name).map(|i| &self.groups[*i])
    }

    pub fn depth(&self) -> usize {
        self.stack.len()
    }

    /// Advances the current group and returns its marker text.
    ///
    /// When the current group concatenates, the labels of the enclosing groups are prepended,
    /// back to the nearest group that does not concatenate.
    pub fn increment(&mut self) -> Result<String, LayoutError> {
        let last = self.stack.len().checked_sub(1).ok_or(LayoutError::NoNumberingGroup)?;
        let mut first = last;
        while first > 0 && self.groups[self.stack[first]].concat {
            first -= 1;
        }

        let mut label = String::new();
        for depth in first..=last {
            let group = &mut self.groups[self.stack[depth]];
            if depth == last {
                group.increment();
            }
            label.push_str(&group.prefix);
            label.push_str(&format_value(group.current(), depth, group.style));
            label.push_str(&group.postfix);
        }
        Ok(label)
    }

    /// Restarts a named group from its start value.
    pub fn reset_group(&mut self, name: &str) {
        if let Some(index) = self.named.get(name) {
            self.groups[*index].reset();
        }
    }

    pub fn clear_stack(&mut self) {
        self.stack.clear();
    }

    pub(crate) fn take_stack(&mut self) -> Vec<usize> {
        std::mem::take(&mut self.stack)
    }

    pub(crate) fn restore_stack(&mut self, stack: Vec<usize>) {
        self.stack = stack;
    }

    /// The current value of every group on the stack, outermost first, formatted in each group's
    /// style and joined with `separator`.
    pub fn composite_label(&self, separator: &str) -> String {
        self.stack
            .iter()
            .enumerate()
            .map(|(depth, i)| {
                let group = &self.groups[*i];
                format_value(group.current(), depth, group.style)
            })
            .filter(|value| !value.is_empty())
            .join(separator)
    }
}
