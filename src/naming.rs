// src/naming.rs
//! Output filename generation.

use std::path::PathBuf;

/// Default output filename template.
pub const DEFAULT_NAME_TEMPLATE: &str = "split-%02d.raw";

/// Generates the path for each output segment from a printf-style template.
///
/// The template contains one integer placeholder (`%d`, `%3d` for
/// space-padding, `%03d` for zero-padding); `%%` renders a literal percent
/// sign. The segment counter starts at 1 and is post-incremented on every
/// call to [`next_path`](SegmentNamer::next_path).
///
/// # Example
///
/// ```
/// use bsplit_rs::SegmentNamer;
///
/// let mut namer = SegmentNamer::new("part-%03d.bin");
/// assert_eq!(namer.next_path().to_str(), Some("part-001.bin"));
/// assert_eq!(namer.next_path().to_str(), Some("part-002.bin"));
/// ```
#[derive(Debug, Clone)]
pub struct SegmentNamer {
    template: String,
    next_index: u32,
}

impl SegmentNamer {
    pub fn new(template: impl Into<String>) -> Self {
        SegmentNamer {
            template: template.into(),
            next_index: 1,
        }
    }

    /// The 1-based counter the next call to `next_path` will use.
    pub fn next_index(&self) -> u32 {
        self.next_index
    }

    /// Render the path for the current counter value and advance the counter.
    pub fn next_path(&mut self) -> PathBuf {
        let path = render(&self.template, self.next_index);
        self.next_index += 1;
        PathBuf::from(path)
    }
}

impl Default for SegmentNamer {
    fn default() -> Self {
        SegmentNamer::new(DEFAULT_NAME_TEMPLATE)
    }
}

/// Substitute every integer placeholder in `template` with `index`.
///
/// A template without a placeholder renders verbatim, in which case every
/// segment resolves to the same path and later segments overwrite earlier
/// ones. Unrecognized conversions are passed through unchanged.
fn render(template: &str, index: u32) -> String {
    let mut out = String::with_capacity(template.len() + 8);
    let mut chars = template.chars().peekable();

    while let Some(c) = chars.next() {
        if c != '%' {
            out.push(c);
            continue;
        }
        if chars.peek() == Some(&'%') {
            chars.next();
            out.push('%');
            continue;
        }

        let mut width_spec = String::new();
        while let Some(&d) = chars.peek() {
            if !d.is_ascii_digit() {
                break;
            }
            width_spec.push(d);
            chars.next();
        }

        if chars.peek() == Some(&'d') {
            chars.next();
            let width = width_spec.parse::<usize>().unwrap_or(0);
            if width_spec.starts_with('0') {
                out.push_str(&format!("{index:0width$}"));
            } else {
                out.push_str(&format!("{index:width$}"));
            }
        } else {
            // Not an integer conversion; emit what was consumed.
            out.push('%');
            out.push_str(&width_spec);
        }
    }

    out
}
