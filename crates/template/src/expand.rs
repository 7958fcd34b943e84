// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Cartesian expansion of a template over its bindings.

use crate::placeholder::PLACEHOLDER_PATTERN;
use crate::values::Bindings;

/// Piece of a template split at placeholder boundaries.
#[derive(Debug, Clone, Copy)]
enum Segment<'a> {
    Literal(&'a str),
    /// Index into the first-seen name list.
    Slot(usize),
}

/// Expand `template` into every concrete command.
///
/// Placeholders are substituted leftmost first and every occurrence of a
/// name takes the same value, so the outer loop follows the first
/// placeholder seen and inner loops follow later ones. A placeholder with no
/// values prunes its whole branch. Substituted values are inserted verbatim
/// and never rescanned for placeholders.
pub fn expand(template: &str, bindings: &Bindings) -> Vec<String> {
    let (segments, names) = split(template);
    let mut commands = Vec::new();
    let mut chosen: Vec<&str> = Vec::with_capacity(names.len());
    expand_into(&segments, &names, bindings, &mut chosen, &mut commands);
    commands
}

fn split(template: &str) -> (Vec<Segment<'_>>, Vec<&str>) {
    let mut segments = Vec::new();
    let mut names: Vec<&str> = Vec::new();
    let mut last = 0;

    for caps in PLACEHOLDER_PATTERN.captures_iter(template) {
        let (Some(whole), Some(name)) = (caps.get(0), caps.get(1)) else {
            continue;
        };
        if whole.start() > last {
            segments.push(Segment::Literal(&template[last..whole.start()]));
        }
        let slot = match names.iter().position(|n| *n == name.as_str()) {
            Some(slot) => slot,
            None => {
                names.push(name.as_str());
                names.len() - 1
            }
        };
        segments.push(Segment::Slot(slot));
        last = whole.end();
    }
    if last < template.len() {
        segments.push(Segment::Literal(&template[last..]));
    }

    (segments, names)
}

fn expand_into<'a>(
    segments: &[Segment<'_>],
    names: &[&str],
    bindings: &'a Bindings,
    chosen: &mut Vec<&'a str>,
    out: &mut Vec<String>,
) {
    let depth = chosen.len();
    let Some(name) = names.get(depth) else {
        out.push(render(segments, chosen));
        return;
    };

    for value in bindings.get(name) {
        chosen.push(value);
        expand_into(segments, names, bindings, chosen, out);
        chosen.pop();
    }
}

fn render(segments: &[Segment<'_>], chosen: &[&str]) -> String {
    let mut command = String::new();
    for segment in segments {
        match *segment {
            Segment::Literal(text) => command.push_str(text),
            Segment::Slot(slot) => command.push_str(chosen.get(slot).copied().unwrap_or_default()),
        }
    }
    command
}

#[cfg(test)]
#[path = "expand_tests.rs"]
mod tests;
