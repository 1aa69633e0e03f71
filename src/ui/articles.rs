//! Health article list and reader.

use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph, Wrap},
    Frame,
};

use crate::app::screen_state::{BlogDetailState, BlogsState};
use crate::content;
use crate::models::BlogPost;

use super::components::{render_selectable_list, render_status, ListRow, StatusView};
use super::theme::{COLOR_ACCENT, COLOR_BORDER, COLOR_HEADER, COLOR_MUTED};

pub(crate) fn article_row(post: &BlogPost) -> ListRow {
    ListRow::new(post.title.clone()).subtitle(format!(
        "{} · {}",
        post.category, post.publisher_name
    ))
}

pub fn render_blogs(frame: &mut Frame, area: Rect, state: &BlogsState) {
    let rows: Vec<ListRow> = content::all().iter().map(article_row).collect();
    if rows.is_empty() {
        render_status(frame, area, &StatusView::Empty("No articles yet"));
        return;
    }
    render_selectable_list(frame, area, "Health Articles", &rows, state.selected);
}

/// Title, byline and the rendered Markdown body.
pub fn article_lines(post: &BlogPost) -> Vec<Line<'static>> {
    let mut lines = vec![
        Line::from(Span::styled(
            post.title.clone(),
            Style::default()
                .fg(COLOR_HEADER)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(vec![
            Span::styled(post.category.clone(), Style::default().fg(COLOR_ACCENT)),
            Span::styled(
                format!(" · by {}", post.publisher_name),
                Style::default().fg(COLOR_MUTED),
            ),
        ]),
        Line::from(""),
    ];
    lines.extend(content::render_markdown(&post.description));
    lines
}

pub fn render_blog_detail(frame: &mut Frame, area: Rect, id: u32, state: &BlogDetailState) {
    let Some(post) = content::find(id) else {
        render_status(frame, area, &StatusView::Empty(content::NOT_FOUND));
        return;
    };

    let lines = article_lines(post);
    let max_scroll = (lines.len() as u16).saturating_sub(1);
    let paragraph = Paragraph::new(lines)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .border_style(Style::default().fg(COLOR_BORDER)),
        )
        .wrap(Wrap { trim: false })
        .scroll((state.scroll.min(max_scroll), 0));
    frame.render_widget(paragraph, area);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_article_lines_start_with_byline() {
        let post = &content::all()[0];
        let lines = article_lines(post);
        assert_eq!(lines[0].to_string(), post.title);
        assert!(lines[1].to_string().contains(&post.publisher_name));
        assert!(lines.len() > 3);
    }

    #[test]
    fn test_article_row() {
        let post = &content::all()[0];
        let row = article_row(post);
        assert_eq!(row.title, post.title);
        assert!(row.subtitle.unwrap().starts_with(&post.category));
    }
}
