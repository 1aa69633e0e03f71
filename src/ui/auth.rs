//! Login and signup forms.

use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::app::screen_state::{LoginFocus, LoginState, SignupFocus, SignupState};
use crate::widgets::TextFieldWidget;

use super::helpers::spinner_frame;
use super::layout::LayoutContext;
use super::theme::{COLOR_ACCENT, COLOR_DIM, COLOR_HEADER, COLOR_MUTED, COLOR_SELECTED_BG};

const FORM_MAX_WIDTH: u16 = 60;

/// A one-line button; focused buttons are filled.
pub fn button_line(label: &str, focused: bool) -> Line<'static> {
    let style = if focused {
        Style::default()
            .fg(COLOR_HEADER)
            .bg(COLOR_ACCENT)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(COLOR_ACCENT)
    };
    Line::from(Span::styled(format!("[ {} ]", label), style))
}

fn link_line(prompt: &str, link: &str, focused: bool) -> Line<'static> {
    let link_style = if focused {
        Style::default()
            .fg(COLOR_ACCENT)
            .bg(COLOR_SELECTED_BG)
            .add_modifier(Modifier::UNDERLINED)
    } else {
        Style::default()
            .fg(COLOR_ACCENT)
            .add_modifier(Modifier::UNDERLINED)
    };
    Line::from(vec![
        Span::styled(format!("{} ", prompt), Style::default().fg(COLOR_MUTED)),
        Span::styled(link.to_string(), link_style),
    ])
}

fn busy_line(text: &str, tick: u64) -> Line<'static> {
    Line::from(Span::styled(
        format!("{} {}", spinner_frame(tick), text),
        Style::default().fg(COLOR_DIM),
    ))
}

/// Center a column of fixed-height rows in `area`.
fn form_rows<const N: usize>(area: Rect, heights: [u16; N]) -> [Rect; N] {
    let ctx = LayoutContext::from_rect(area);
    let width = ctx.bounded_width(80, 20, FORM_MAX_WIDTH);
    let total: u16 = heights.iter().sum();
    let x = area.x + area.width.saturating_sub(width) / 2;
    let y = area.y + area.height.saturating_sub(total) / 2;
    let column = Rect::new(x, y, width.min(area.width), total.min(area.height));
    Layout::vertical(heights.map(Constraint::Length)).areas(column)
}

fn title_line(title: &str, subtitle: &str) -> Vec<Line<'static>> {
    vec![
        Line::from(Span::styled(
            title.to_string(),
            Style::default()
                .fg(COLOR_HEADER)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            subtitle.to_string(),
            Style::default().fg(COLOR_MUTED),
        )),
    ]
}

pub fn render_login(frame: &mut Frame, area: Rect, state: &LoginState, tick: u64) {
    let [title, email, password, _, submit, google, _, link] =
        form_rows(area, [3, 3, 3, 1, 1, 1, 1, 1]);

    frame.render_widget(
        Paragraph::new(title_line("Welcome back", "Sign in to your account")),
        title,
    );
    frame.render_widget(
        TextFieldWidget::new(&state.email, " Email ", state.focus == LoginFocus::Email),
        email,
    );
    frame.render_widget(
        TextFieldWidget::new(
            &state.password,
            " Password ",
            state.focus == LoginFocus::Password,
        ),
        password,
    );

    let submit_line = if state.submit.is_submitting() {
        busy_line("Signing in...", tick)
    } else {
        button_line("Login", state.focus == LoginFocus::Submit)
    };
    frame.render_widget(Paragraph::new(submit_line), submit);

    let google_line = if state.google.is_submitting() {
        busy_line("Waiting for Google sign-in in your browser...", tick)
    } else {
        button_line("Continue with Google", state.focus == LoginFocus::Google)
    };
    frame.render_widget(Paragraph::new(google_line), google);

    frame.render_widget(
        Paragraph::new(link_line(
            "Don't have an account?",
            "Sign up",
            state.focus == LoginFocus::SignupLink,
        )),
        link,
    );
}

pub fn render_signup(frame: &mut Frame, area: Rect, state: &SignupState, tick: u64) {
    let [title, name, email, password, _, submit, _, link] =
        form_rows(area, [3, 3, 3, 3, 1, 1, 1, 1]);

    frame.render_widget(
        Paragraph::new(title_line("Create account", "Book appointments in minutes")),
        title,
    );
    frame.render_widget(
        TextFieldWidget::new(&state.name, " Name ", state.focus == SignupFocus::Name),
        name,
    );
    frame.render_widget(
        TextFieldWidget::new(&state.email, " Email ", state.focus == SignupFocus::Email),
        email,
    );
    frame.render_widget(
        TextFieldWidget::new(
            &state.password,
            " Password ",
            state.focus == SignupFocus::Password,
        ),
        password,
    );

    let submit_line = if state.submit.is_submitting() {
        busy_line("Creating account...", tick)
    } else {
        button_line("Sign Up", state.focus == SignupFocus::Submit)
    };
    frame.render_widget(Paragraph::new(submit_line), submit);

    frame.render_widget(
        Paragraph::new(link_line(
            "Already have an account?",
            "Log in",
            state.focus == SignupFocus::LoginLink,
        )),
        link,
    );
}
