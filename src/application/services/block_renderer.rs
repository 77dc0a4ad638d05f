//! Turns an email-builder layout into a single sendable HTML document.

use crate::domain::models::{Align, BlockStyle, ContentBlock};

const DOCUMENT_HEAD: &str = concat!(
    "<!DOCTYPE html>\n",
    "<html>\n",
    "<head>\n",
    "<meta charset=\"UTF-8\">\n",
    "<meta name=\"viewport\" content=\"width=device-width, initial-scale=1.0\">\n",
    "</head>\n",
    "<body style=\"margin: 0; padding: 0; background-color: #f4f4f5; font-family: Arial, Helvetica, sans-serif;\">\n",
    "<div style=\"max-width: 600px; margin: 0 auto; padding: 32px; background-color: #ffffff;\">\n",
);

const DOCUMENT_TAIL: &str = "</div>\n</body>\n</html>\n";

const DEFAULT_TEXT_COLOR: &str = "#1f2937";
const DEFAULT_BUTTON_COLOR: &str = "#ffffff";
const DEFAULT_BUTTON_BACKGROUND: &str = "#2563eb";
const DEFAULT_DIVIDER_COLOR: &str = "#e5e7eb";

/// Pure: the same blocks always produce byte-identical output.
pub fn render(blocks: &[ContentBlock]) -> String {
    let body: String = blocks.iter().filter_map(render_block).collect();
    wrap_document(&body)
}

pub fn wrap_document(body: &str) -> String {
    let mut document =
        String::with_capacity(DOCUMENT_HEAD.len() + body.len() + DOCUMENT_TAIL.len());
    document.push_str(DOCUMENT_HEAD);
    document.push_str(body);
    document.push_str(DOCUMENT_TAIL);
    document
}

fn render_block(block: &ContentBlock) -> Option<String> {
    let fragment = match block {
        ContentBlock::Heading {
            content,
            level,
            style,
        } => {
            let level = level.unwrap_or(2).clamp(1, 6);
            let size = style.font_size.unwrap_or(heading_size(level));
            format!(
                "<h{level} style=\"margin: 0 0 16px 0; text-align: {}; color: {}; font-size: {size}px;\">{content}</h{level}>\n",
                align(style, Align::Left),
                attribute(text_color(style)),
            )
        }
        ContentBlock::Paragraph { content, style } => format!(
            "<p style=\"margin: 0 0 16px 0; line-height: 1.6; text-align: {}; color: {}; font-size: {}px;\">{content}</p>\n",
            align(style, Align::Left),
            attribute(text_color(style)),
            style.font_size.unwrap_or(16),
        ),
        ContentBlock::Button { text, url, style } => format!(
            "<div style=\"margin: 24px 0; text-align: {};\"><a href=\"{}\" style=\"display: inline-block; padding: 12px 24px; border-radius: 6px; background-color: {}; color: {}; font-size: {}px; font-weight: bold; text-decoration: none;\">{text}</a></div>\n",
            align(style, Align::Center),
            attribute(url),
            attribute(
                style
                    .background_color
                    .as_deref()
                    .unwrap_or(DEFAULT_BUTTON_BACKGROUND)
            ),
            attribute(style.color.as_deref().unwrap_or(DEFAULT_BUTTON_COLOR)),
            style.font_size.unwrap_or(16),
        ),
        ContentBlock::Image {
            src,
            alt,
            width,
            style,
        } => format!(
            "<div style=\"margin: 16px 0; text-align: {};\"><img src=\"{}\" alt=\"{}\" style=\"display: inline-block; max-width: 100%; width: {}; height: auto; border: 0;\"></div>\n",
            align(style, Align::Center),
            attribute(src),
            attribute(alt),
            attribute(width.as_deref().unwrap_or("100%")),
        ),
        ContentBlock::Divider { thickness, style } => format!(
            "<hr style=\"margin: 24px 0; border: none; border-top: {}px solid {};\">\n",
            thickness.unwrap_or(1),
            attribute(style.color.as_deref().unwrap_or(DEFAULT_DIVIDER_COLOR)),
        ),
        ContentBlock::Spacer { height } => {
            let height = height.unwrap_or(24);
            format!(
                "<div style=\"height: {height}px; line-height: {height}px; font-size: 1px;\">&nbsp;</div>\n"
            )
        }
        ContentBlock::Unknown => return None,
    };
    Some(fragment)
}

fn heading_size(level: u8) -> u32 {
    match level {
        1 => 32,
        2 => 26,
        3 => 22,
        4 => 18,
        5 => 16,
        _ => 14,
    }
}

fn align(style: &BlockStyle, default: Align) -> &'static str {
    style.align.unwrap_or(default).as_str()
}

fn text_color(style: &BlockStyle) -> &str {
    style.color.as_deref().unwrap_or(DEFAULT_TEXT_COLOR)
}

fn attribute(value: &str) -> String {
    value.replace('"', "&quot;")
}

/// Escapes caller text for HTML element content.
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
