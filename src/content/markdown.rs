//! Markdown to styled ratatui lines for article bodies.
//!
//! Handles headings, bold, italic, inline code, bullet lists and links.
//! Paragraphs and headings are separated by one blank line.

use pulldown_cmark::{Event, Options, Parser, Tag, TagEnd};
use ratatui::{
    style::{Color, Modifier, Style},
    text::{Line, Span},
};

const STYLE_HEADING: Style = Style::new().fg(Color::Cyan).add_modifier(Modifier::BOLD);
const STYLE_INLINE_CODE: Style = Style::new().fg(Color::Cyan);

/// Render `text` to styled lines.
pub fn render_markdown(text: &str) -> Vec<Line<'static>> {
    let mut options = Options::empty();
    options.insert(Options::ENABLE_STRIKETHROUGH);

    let parser = Parser::new_ext(text, options);
    let mut lines: Vec<Line<'static>> = Vec::new();
    let mut current_spans: Vec<Span<'static>> = Vec::new();

    // Style stack for nested formatting
    let mut style_stack: Vec<Style> = vec![Style::default()];

    for event in parser {
        match event {
            Event::Start(tag) => match tag {
                Tag::Heading { .. } => {
                    push_separator(&mut lines);
                    style_stack.push(STYLE_HEADING);
                }
                Tag::Strong => {
                    let current = *style_stack.last().unwrap_or(&Style::default());
                    style_stack.push(current.add_modifier(Modifier::BOLD));
                }
                Tag::Emphasis => {
                    let current = *style_stack.last().unwrap_or(&Style::default());
                    style_stack.push(current.add_modifier(Modifier::ITALIC));
                }
                Tag::Strikethrough => {
                    let current = *style_stack.last().unwrap_or(&Style::default());
                    style_stack.push(current.add_modifier(Modifier::CROSSED_OUT));
                }
                Tag::Paragraph => push_separator(&mut lines),
                Tag::List(_) => push_separator(&mut lines),
                Tag::Item => {
                    if !current_spans.is_empty() {
                        lines.push(Line::from(std::mem::take(&mut current_spans)));
                    }
                    let current = *style_stack.last().unwrap_or(&Style::default());
                    current_spans.push(Span::styled("• ".to_string(), current));
                }
                Tag::Link { .. } => {
                    let current = *style_stack.last().unwrap_or(&Style::default());
                    style_stack.push(current.fg(Color::Blue).add_modifier(Modifier::UNDERLINED));
                }
                _ => {}
            },
            Event::End(tag_end) => match tag_end {
                TagEnd::Heading(_) => {
                    flush(&mut lines, &mut current_spans);
                    style_stack.pop();
                }
                TagEnd::Strong | TagEnd::Emphasis | TagEnd::Strikethrough | TagEnd::Link => {
                    style_stack.pop();
                }
                TagEnd::Paragraph | TagEnd::Item => flush(&mut lines, &mut current_spans),
                _ => {}
            },
            Event::Text(text) => {
                let current = *style_stack.last().unwrap_or(&Style::default());
                current_spans.push(Span::styled(text.to_string(), current));
            }
            Event::Code(code) => {
                current_spans.push(Span::styled(code.to_string(), STYLE_INLINE_CODE));
            }
            Event::SoftBreak => current_spans.push(Span::raw(" ")),
            Event::HardBreak => {
                lines.push(Line::from(std::mem::take(&mut current_spans)));
            }
            _ => {}
        }
    }

    flush(&mut lines, &mut current_spans);

    if lines.is_empty() {
        lines.push(Line::from(""));
    }
    lines
}

fn flush(lines: &mut Vec<Line<'static>>, spans: &mut Vec<Span<'static>>) {
    if !spans.is_empty() {
        lines.push(Line::from(std::mem::take(spans)));
    }
}

/// Blank line between blocks, never at the top and never doubled.
fn push_separator(lines: &mut Vec<Line<'static>>) {
    if lines.last().is_some_and(|l| l.width() > 0) {
        lines.push(Line::from(""));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text_of(line: &Line) -> String {
        line.spans.iter().map(|s| s.content.as_ref()).collect()
    }

    #[test]
    fn test_empty_input_gives_one_line() {
        assert_eq!(render_markdown("").len(), 1);
    }

    #[test]
    fn test_heading_is_styled() {
        let lines = render_markdown("## Sleep");
        assert_eq!(text_of(&lines[0]), "Sleep");
        assert_eq!(lines[0].spans[0].style, STYLE_HEADING);
    }

    #[test]
    fn test_bold_and_italic() {
        let lines = render_markdown("a **b** *c*");
        let spans = &lines[0].spans;
        let bold = spans.iter().find(|s| s.content == "b").unwrap();
        assert!(bold.style.add_modifier.contains(Modifier::BOLD));
        let italic = spans.iter().find(|s| s.content == "c").unwrap();
        assert!(italic.style.add_modifier.contains(Modifier::ITALIC));
    }

    #[test]
    fn test_list_items_get_bullets() {
        let lines = render_markdown("Intro\n\n- one\n- two");
        let texts: Vec<String> = lines.iter().map(text_of).collect();
        assert_eq!(texts, vec!["Intro", "", "• one", "• two"]);
    }

    #[test]
    fn test_paragraphs_are_separated() {
        let lines = render_markdown("First\n\nSecond");
        let texts: Vec<String> = lines.iter().map(text_of).collect();
        assert_eq!(texts, vec!["First", "", "Second"]);
    }

    #[test]
    fn test_soft_break_joins_lines() {
        let lines = render_markdown("one\ntwo");
        assert_eq!(text_of(&lines[0]), "one two");
    }
}
