//! Embedded images in rendered SVG.
//!
//! Labels may start with an `{img:name}` token, e.g. use-case actors are
//! labelled `{img:actor} Customer`. After the layout engine has produced SVG,
//! every `<text>` element carrying such a token is replaced by a drawing of
//! the named image at the text anchor, followed by the remaining label text
//! shifted below it.

use std::sync::OnceLock;

use log::{debug, warn};
use regex::{Captures, NoExpand, Regex};

/// A stick figure, centered on its anchor.
const ACTOR: &str = r#"<circle cx="0" cy="-20" r="7.5" />
<line x1="0" y1="-12.5" x2="0" y2="5" />
<line x1="-15" y1="-5" x2="15" y2="-5" />
<line x1="0" y1="5" x2="-15" y2="17" />
<line x1="0" y1="5" x2="15" y2="17" />"#;

/// A drawable image and the offset applied to the text that follows it.
struct Image {
    body: &'static str,
    dx: f64,
    dy: f64,
}

fn lookup_image(name: &str) -> Option<Image> {
    match name {
        "actor" => Some(Image {
            body: ACTOR,
            dx: 0.0,
            dy: 25.0,
        }),
        _ => None,
    }
}

static IMAGE_TEXT: OnceLock<Regex> = OnceLock::new();
static ANCHOR_X: OnceLock<Regex> = OnceLock::new();
static ANCHOR_Y: OnceLock<Regex> = OnceLock::new();

fn image_text() -> &'static Regex {
    IMAGE_TEXT.get_or_init(|| {
        Regex::new(r"<text\s([^>]*)>\{img:([^}]*)\}([^<]*)</text>")
            .expect("image text regex must compile")
    })
}

fn anchor_x() -> &'static Regex {
    ANCHOR_X.get_or_init(|| Regex::new(r#"\sx="(-?[0-9.]+)""#).expect("x regex must compile"))
}

fn anchor_y() -> &'static Regex {
    ANCHOR_Y.get_or_init(|| Regex::new(r#"\sy="(-?[0-9.]+)""#).expect("y regex must compile"))
}

/// Replaces `{img:name}` text tokens in `svg` with inline drawings.
///
/// Unknown image names are dropped from the text. Text elements without a
/// numeric `x` and `y` anchor are left untouched.
pub fn embed_images(svg: &str, dark: bool) -> String {
    let ink = if dark { "white" } else { "black" };
    let mut replaced = 0usize;

    let out = image_text().replace_all(svg, |caps: &Captures<'_>| {
        let attrs = format!(" {}", &caps[1]);
        let text = caps[3].trim();

        let Some(image) = lookup_image(&caps[2]) else {
            warn!(image = &caps[2]; "Unknown embedded image");
            return format!("<text{attrs}>{text}</text>");
        };
        let (Some(x), Some(y)) = (anchor(anchor_x(), &attrs), anchor(anchor_y(), &attrs)) else {
            return caps[0].to_string();
        };

        replaced += 1;
        let shifted = shift(&attrs, anchor_x(), 'x', x.1 + image.dx);
        let shifted = shift(&shifted, anchor_y(), 'y', y.1 + image.dy);
        format!(
            "<g transform=\"translate({}, {})\" style=\"fill:none;stroke:{ink};stroke-width:1px\">\
             {}</g>\n<text{shifted}>{text}</text>",
            x.0, y.0, image.body
        )
    });

    debug!(replaced; "Embedded images");
    out.into_owned()
}

/// The raw and parsed value of an anchor attribute.
fn anchor<'a>(pattern: &Regex, attrs: &'a str) -> Option<(&'a str, f64)> {
    let raw = pattern.captures(attrs)?.get(1)?.as_str();
    raw.parse().ok().map(|value| (raw, value))
}

/// Rewrites the anchor attribute `name` to `value`.
fn shift(attrs: &str, pattern: &Regex, name: char, value: f64) -> String {
    let replacement = format!(" {name}=\"{value}\"");
    pattern.replace(attrs, NoExpand(&replacement)).into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    const RENDERED: &str = r#"<g id="node1" class="node">
<text text-anchor="middle" x="27" y="-14.3" font-family="Helvetica,sans-Serif" font-size="10.00">{img:actor} Customer</text>
</g>"#;

    #[test]
    fn test_actor_is_drawn_above_shifted_text() {
        let out = embed_images(RENDERED, false);

        assert!(out.contains(
            r#"<g transform="translate(27, -14.3)" style="fill:none;stroke:black;stroke-width:1px"><circle"#
        ));
        assert!(out.contains(r#"x="27" y="10.7""#));
        assert!(out.contains(">Customer</text>"));
        assert!(!out.contains("{img:"));
    }

    #[test]
    fn test_dark_ink() {
        let out = embed_images(RENDERED, true);
        assert!(out.contains("stroke:white"));
    }

    #[test]
    fn test_unknown_image_is_dropped() {
        let svg = r#"<text x="1" y="2">{img:robot} Bender</text>"#;
        assert_eq!(embed_images(svg, false), r#"<text x="1" y="2">Bender</text>"#);
    }

    #[test]
    fn test_text_without_anchor_is_kept() {
        let svg = r#"<text class="label">{img:actor} Nobody</text>"#;
        assert_eq!(embed_images(svg, false), svg);
    }

    #[test]
    fn test_plain_text_untouched() {
        let svg = r#"<text x="1" y="2">Order</text>"#;
        assert_eq!(embed_images(svg, false), svg);
    }
}
