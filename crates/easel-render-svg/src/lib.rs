// File: crates/easel-render-svg/src/lib.rs
// Summary: Renders an easel-core Scene to an SVG document (string or file).

use std::fmt::Write as _;
use std::path::Path;

use anyhow::{Context, Result};
use easel_core::color::Rgba;
use easel_core::scene::{Anchor, Node, Scene};

/// Serialize a scene as a standalone SVG document.
pub fn to_svg(scene: &Scene) -> String {
    let mut out = String::new();
    let _ = write!(
        out,
        "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{w}\" height=\"{h}\" viewBox=\"0 0 {w} {h}\">",
        w = num(scene.width),
        h = num(scene.height),
    );
    let _ = write!(
        out,
        "<rect x=\"0\" y=\"0\" width=\"{}\" height=\"{}\"{}/>",
        num(scene.width),
        num(scene.height),
        fill_attrs(scene.background),
    );
    for node in &scene.nodes {
        write_node(&mut out, node);
    }
    out.push_str("</svg>\n");
    out
}

/// Write the document to `path`, creating parent directories as needed.
pub fn write_svg(scene: &Scene, path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("creating {}", parent.display()))?;
    }
    std::fs::write(path, to_svg(scene)).with_context(|| format!("writing {}", path.display()))?;
    Ok(())
}

fn write_node(out: &mut String, node: &Node) {
    match node {
        Node::Rect { rect, fill, stroke } => {
            let _ = write!(
                out,
                "<rect x=\"{}\" y=\"{}\" width=\"{}\" height=\"{}\"{}{}/>",
                num(rect.x),
                num(rect.y),
                num(rect.width),
                num(rect.height),
                fill_attrs(*fill),
                stroke.map(|s| stroke_attrs(s, 1.0)).unwrap_or_default(),
            );
        }
        Node::Circle { cx, cy, r, fill } => {
            let _ = write!(
                out,
                "<circle cx=\"{}\" cy=\"{}\" r=\"{}\"{}/>",
                num(*cx),
                num(*cy),
                num(*r),
                fill_attrs(*fill),
            );
        }
        Node::Line { x1, y1, x2, y2, stroke, width } => {
            let _ = write!(
                out,
                "<line x1=\"{}\" y1=\"{}\" x2=\"{}\" y2=\"{}\"{}/>",
                num(*x1),
                num(*y1),
                num(*x2),
                num(*y2),
                stroke_attrs(*stroke, *width),
            );
        }
        Node::Path { points, stroke, width, fill } => {
            let mut d = String::new();
            for (i, (x, y)) in points.iter().enumerate() {
                let op = if i == 0 { 'M' } else { 'L' };
                let _ = write!(d, "{}{} {} ", op, num(*x), num(*y));
            }
            let fill = match fill {
                Some(c) => fill_attrs(*c),
                None => " fill=\"none\"".to_string(),
            };
            let _ = write!(
                out,
                "<path d=\"{}\"{}{}/>",
                d.trim_end(),
                fill,
                stroke_attrs(*stroke, *width),
            );
        }
        Node::Text { x, y, content, size, fill, anchor, rotate } => {
            let anchor = match anchor {
                Anchor::Start => "start",
                Anchor::Middle => "middle",
                Anchor::End => "end",
            };
            let transform = match rotate {
                Some(deg) => format!(" transform=\"rotate({} {} {})\"", num(*deg), num(*x), num(*y)),
                None => String::new(),
            };
            let _ = write!(
                out,
                "<text x=\"{}\" y=\"{}\" font-size=\"{}\" text-anchor=\"{}\"{}{}>{}</text>",
                num(*x),
                num(*y),
                num(*size),
                anchor,
                fill_attrs(*fill),
                transform,
                escape(content),
            );
        }
        Node::Group { dx, dy, children } => {
            let _ = write!(out, "<g transform=\"translate({} {})\">", num(*dx), num(*dy));
            for child in children {
                write_node(out, child);
            }
            out.push_str("</g>");
        }
    }
}

fn fill_attrs(c: Rgba) -> String {
    if c.a == 255 {
        format!(" fill=\"{}\"", c.to_css())
    } else {
        format!(" fill=\"{}\" fill-opacity=\"{}\"", c.to_css(), num(c.opacity()))
    }
}

fn stroke_attrs(c: Rgba, width: f64) -> String {
    let mut s = format!(" stroke=\"{}\" stroke-width=\"{}\"", c.to_css(), num(width));
    if c.a != 255 {
        let _ = write!(s, " stroke-opacity=\"{}\"", num(c.opacity()));
    }
    s
}

/// Up to two decimal places, trailing zeros trimmed.
fn num(v: f64) -> String {
    let mut s = format!("{v:.2}");
    while s.ends_with('0') {
        s.pop();
    }
    if s.ends_with('.') {
        s.pop();
    }
    if s == "-0" {
        s = "0".to_string();
    }
    s
}

fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(ch),
        }
    }
    out
}
