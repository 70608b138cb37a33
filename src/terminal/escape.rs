//! Escape sequence generation for attribute transitions.
//!
//! Two forms are produced:
//!
//! - **full**: reset, both colors, then every set style flag. Valid whatever
//!   the terminal currently shows.
//! - **delta**: only what differs from the previously emitted word. Cheaper
//!   for the terminal, at the cost of a few comparisons here.

use super::Capabilities;
use crate::buffer::{Attr, Style};

/// Append the full sequence establishing `attr`.
pub fn full_sequence(caps: &Capabilities, attr: Attr, out: &mut String) {
    out.push_str(&caps.style_reset);
    out.push_str(&caps.fg256[usize::from(attr.fg())]);
    out.push_str(&caps.bg256[usize::from(attr.bg())]);

    let style = attr.style();
    for (flag, codes) in caps.styles() {
        if style.contains(flag) {
            out.push_str(&codes.on);
        }
    }
}

/// Append the minimal sequence turning `last` into `attr`.
pub fn delta_sequence(caps: &Capabilities, attr: Attr, last: Attr, out: &mut String) {
    if attr.fg() != last.fg() {
        out.push_str(&caps.fg256[usize::from(attr.fg())]);
    }
    if attr.bg() != last.bg() {
        out.push_str(&caps.bg256[usize::from(attr.bg())]);
    }

    let style = attr.style();
    let last_style = last.style();

    // Terminals clear bold and dim with the same code
    let intensity = style & Style::BOLD_DIM;
    let last_intensity = last_style & Style::BOLD_DIM;
    if intensity != last_intensity {
        let dropped = !last_intensity.difference(intensity).is_empty();
        let apply = if dropped {
            out.push_str(&caps.bold.off);
            intensity
        } else {
            intensity.difference(last_intensity)
        };
        if apply.contains(Style::BOLD) {
            out.push_str(&caps.bold.on);
        }
        if apply.contains(Style::DIM) {
            out.push_str(&caps.dim.on);
        }
    }

    for (flag, codes) in caps.styles() {
        if Style::BOLD_DIM.contains(flag) || style.contains(flag) == last_style.contains(flag) {
            continue;
        }
        out.push_str(if style.contains(flag) { &codes.on } else { &codes.off });
    }
}

/// Append whatever sequence moves the terminal from `last` to `attr`.
///
/// Uses the delta form only when the terminal supports it and a previous word
/// is known; otherwise the full form.
#[inline]
pub fn transition(caps: &Capabilities, attr: Attr, last: Option<Attr>, out: &mut String) {
    match last {
        Some(last) if caps.delta_escape => delta_sequence(caps, attr, last, out),
        _ => full_sequence(caps, attr, out),
    }
}
