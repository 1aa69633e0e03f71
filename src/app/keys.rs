//! Keyboard and paste handling.
//!
//! Global keys are handled first (quit, back, refresh, alert dismissal);
//! the rest go to the current screen. Screen handlers only touch their own
//! state and return an [`Intent`] for anything that needs the whole app.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::content;
use crate::widgets::TextField;

use super::navigation::{NavAction, Route};
use super::screen_state::{
    AppointmentDetailState, BookAppointmentState, BookingFocus, HomeItem, HomeState, LoginFocus,
    LoginState, ScreenState, SignupFocus, SignupState,
};
use super::App;

/// Lines scrolled by PageUp/PageDown in an article.
const PAGE_SCROLL: u16 = 10;

/// App-level work requested by a screen's key handler.
#[derive(Debug, PartialEq)]
enum Intent {
    None,
    Navigate(NavAction),
    OpenAccount,
    SubmitBooking,
    SubmitReview,
    SubmitLogin,
    SubmitSignup,
    GoogleSignIn,
    Logout,
}

impl App {
    /// Handle a key press.
    pub fn handle_key(&mut self, key: KeyEvent) {
        self.mark_dirty();

        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            self.quit();
            return;
        }

        if self.alert.is_some() {
            if matches!(key.code, KeyCode::Enter | KeyCode::Esc) {
                self.dismiss_alert();
            }
            return;
        }

        let text_input = self.current_route().takes_text_input();
        match key.code {
            KeyCode::Esc => {
                self.navigate(NavAction::Back);
                return;
            }
            KeyCode::F(5) => {
                self.refresh();
                return;
            }
            KeyCode::Char('q') if !text_input => {
                self.quit();
                return;
            }
            KeyCode::Char('r') if !text_input => {
                self.refresh();
                return;
            }
            _ => {}
        }

        let entry = self.router.current_mut();
        let route = entry.route.clone();
        let intent = match &mut entry.state {
            ScreenState::Home(state) => home_key(state, key),
            ScreenState::Specialties(list) => {
                list_key(list, key, |s| Route::SpecialtyDoctors { id: s.id.clone() })
            }
            ScreenState::SpecialtyDoctors(state) => match key.code {
                KeyCode::Down | KeyCode::Char('j') => {
                    state.select_next();
                    Intent::None
                }
                KeyCode::Up | KeyCode::Char('k') => {
                    state.select_previous();
                    Intent::None
                }
                KeyCode::Enter => state
                    .selected_doctor()
                    .map(|d| push(Route::DoctorDetail { id: d.id.clone() }))
                    .unwrap_or(Intent::None),
                _ => Intent::None,
            },
            ScreenState::Doctors(list) => {
                list_key(list, key, |d| Route::DoctorDetail { id: d.id.clone() })
            }
            ScreenState::DoctorDetail(state) => match key.code {
                KeyCode::Enter | KeyCode::Char('b') => match (&route, state.doctor.value()) {
                    (Route::DoctorDetail { id }, Some(_)) => push(Route::BookAppointment {
                        doctor_id: id.clone(),
                    }),
                    _ => Intent::None,
                },
                _ => Intent::None,
            },
            ScreenState::BookAppointment(state) => booking_key(state, key),
            ScreenState::ConfirmBooking(state) => match key.code {
                KeyCode::Enter => {
                    if state.detail.value().is_some() {
                        Intent::SubmitBooking
                    } else {
                        Intent::None
                    }
                }
                _ => {
                    edit_field(&mut state.reason, key);
                    Intent::None
                }
            },
            ScreenState::Confirmed => match key.code {
                KeyCode::Enter | KeyCode::Char('h') => Intent::Navigate(NavAction::Reset),
                _ => Intent::None,
            },
            ScreenState::AppointmentDetail(state) => review_key(state, key),
            ScreenState::Profile(state) => match key.code {
                KeyCode::Down | KeyCode::Char('j') => {
                    state.appointments.select_next();
                    Intent::None
                }
                KeyCode::Up | KeyCode::Char('k') => {
                    state.appointments.select_previous();
                    Intent::None
                }
                KeyCode::Enter => state
                    .appointments
                    .selected_item()
                    .map(|a| {
                        push(Route::AppointmentDetail {
                            id: a.appointment_id.clone(),
                        })
                    })
                    .unwrap_or(Intent::None),
                KeyCode::Char('o') => Intent::Logout,
                _ => Intent::None,
            },
            ScreenState::Login(state) => login_key(state, key),
            ScreenState::Signup(state) => signup_key(state, key),
            ScreenState::Blogs(state) => {
                let count = content::all().len();
                match key.code {
                    KeyCode::Down | KeyCode::Char('j') => {
                        if state.selected + 1 < count {
                            state.selected += 1;
                        }
                        Intent::None
                    }
                    KeyCode::Up | KeyCode::Char('k') => {
                        state.selected = state.selected.saturating_sub(1);
                        Intent::None
                    }
                    KeyCode::Enter => content::all()
                        .get(state.selected)
                        .map(|post| push(Route::BlogDetail { id: post.id }))
                        .unwrap_or(Intent::None),
                    _ => Intent::None,
                }
            }
            ScreenState::BlogDetail(state) => {
                match key.code {
                    KeyCode::Down | KeyCode::Char('j') => {
                        state.scroll = state.scroll.saturating_add(1)
                    }
                    KeyCode::Up | KeyCode::Char('k') => {
                        state.scroll = state.scroll.saturating_sub(1)
                    }
                    KeyCode::PageDown | KeyCode::Char(' ') => {
                        state.scroll = state.scroll.saturating_add(PAGE_SCROLL)
                    }
                    KeyCode::PageUp => state.scroll = state.scroll.saturating_sub(PAGE_SCROLL),
                    KeyCode::Home | KeyCode::Char('g') => state.scroll = 0,
                    _ => {}
                }
                Intent::None
            }
        };

        self.apply_intent(intent);
    }

    /// Insert pasted text into the focused field, if any.
    pub fn handle_paste(&mut self, text: &str) {
        if self.alert.is_some() {
            return;
        }
        let field = match &mut self.router.current_mut().state {
            ScreenState::Login(state) => state.focused_field(),
            ScreenState::Signup(state) => state.focused_field(),
            ScreenState::ConfirmBooking(state) => Some(&mut state.reason),
            ScreenState::AppointmentDetail(state) if state.accepts_review() => {
                Some(&mut state.comment)
            }
            _ => None,
        };
        if let Some(field) = field {
            field.insert_str(text);
            self.mark_dirty();
        }
    }

    fn apply_intent(&mut self, intent: Intent) {
        match intent {
            Intent::None => {}
            Intent::Navigate(action) => self.navigate(action),
            Intent::OpenAccount => self.open_account(),
            Intent::SubmitBooking => self.submit_booking(),
            Intent::SubmitReview => self.submit_review(),
            Intent::SubmitLogin => self.submit_login(),
            Intent::SubmitSignup => self.submit_signup(),
            Intent::GoogleSignIn => self.start_google_sign_in(),
            Intent::Logout => self.logout(),
        }
    }
}

fn push(route: Route) -> Intent {
    Intent::Navigate(NavAction::Push(route))
}

fn home_key(state: &mut HomeState, key: KeyEvent) -> Intent {
    match key.code {
        KeyCode::Down | KeyCode::Char('j') => {
            state.select_next();
            Intent::None
        }
        KeyCode::Up | KeyCode::Char('k') => {
            state.select_previous();
            Intent::None
        }
        KeyCode::Char('s') => push(Route::Specialties),
        KeyCode::Char('d') => push(Route::Doctors),
        KeyCode::Char('b') => push(Route::Blogs),
        KeyCode::Char('p') => Intent::OpenAccount,
        KeyCode::Enter => match state.selected_item() {
            Some(HomeItem::Doctors) => push(Route::Doctors),
            Some(HomeItem::Specialties) => push(Route::Specialties),
            Some(HomeItem::Specialty { id, .. }) => push(Route::SpecialtyDoctors { id }),
            Some(HomeItem::Articles) => push(Route::Blogs),
            Some(HomeItem::Article { id, .. }) => push(Route::BlogDetail { id }),
            None => Intent::None,
        },
        _ => Intent::None,
    }
}

fn list_key<T>(
    list: &mut super::screen_state::ListState<T>,
    key: KeyEvent,
    open: impl FnOnce(&T) -> Route,
) -> Intent {
    match key.code {
        KeyCode::Down | KeyCode::Char('j') => {
            list.select_next();
            Intent::None
        }
        KeyCode::Up | KeyCode::Char('k') => {
            list.select_previous();
            Intent::None
        }
        KeyCode::Enter => list
            .selected_item()
            .map(|item| push(open(item)))
            .unwrap_or(Intent::None),
        _ => Intent::None,
    }
}

fn booking_key(state: &mut BookAppointmentState, key: KeyEvent) -> Intent {
    match key.code {
        KeyCode::Tab => {
            state.focus = match state.focus {
                BookingFocus::Dates => BookingFocus::Slots,
                BookingFocus::Slots => BookingFocus::Dates,
            };
            Intent::None
        }
        KeyCode::Left | KeyCode::Char('h') => {
            state.previous_date();
            Intent::None
        }
        KeyCode::Right | KeyCode::Char('l') => {
            state.next_date();
            Intent::None
        }
        KeyCode::Up | KeyCode::Char('k') => {
            match state.focus {
                BookingFocus::Dates => state.previous_date(),
                BookingFocus::Slots => state.previous_slot(),
            }
            Intent::None
        }
        KeyCode::Down | KeyCode::Char('j') => {
            match state.focus {
                BookingFocus::Dates => state.next_date(),
                BookingFocus::Slots => state.next_slot(),
            }
            Intent::None
        }
        KeyCode::Enter => match state.focus {
            BookingFocus::Dates => {
                state.focus = BookingFocus::Slots;
                Intent::None
            }
            BookingFocus::Slots => match state.selected_slot() {
                Some(slot) if !slot.is_booked => push(Route::ConfirmBooking {
                    slot_id: slot.id.clone(),
                }),
                _ => Intent::None,
            },
        },
        _ => Intent::None,
    }
}

fn review_key(state: &mut AppointmentDetailState, key: KeyEvent) -> Intent {
    if !state.accepts_review() || state.submit.is_submitting() {
        return Intent::None;
    }
    match key.code {
        KeyCode::Enter => Intent::SubmitReview,
        KeyCode::Left => {
            let rating = state.review.rating.saturating_sub(1);
            state.review.set_rating(rating);
            Intent::None
        }
        KeyCode::Right => {
            let rating = state.review.rating.saturating_add(1);
            state.review.set_rating(rating);
            Intent::None
        }
        _ => {
            edit_field(&mut state.comment, key);
            Intent::None
        }
    }
}

fn login_key(state: &mut LoginState, key: KeyEvent) -> Intent {
    match key.code {
        KeyCode::Tab | KeyCode::Down => {
            state.focus = state.focus.next();
            Intent::None
        }
        KeyCode::BackTab | KeyCode::Up => {
            state.focus = state.focus.previous();
            Intent::None
        }
        KeyCode::Enter => match state.focus {
            LoginFocus::Email => {
                state.focus = LoginFocus::Password;
                Intent::None
            }
            LoginFocus::Password | LoginFocus::Submit => Intent::SubmitLogin,
            LoginFocus::Google => Intent::GoogleSignIn,
            LoginFocus::SignupLink => push(Route::Signup),
        },
        _ => {
            if let Some(field) = state.focused_field() {
                edit_field(field, key);
            }
            Intent::None
        }
    }
}

fn signup_key(state: &mut SignupState, key: KeyEvent) -> Intent {
    match key.code {
        KeyCode::Tab | KeyCode::Down => {
            state.focus = state.focus.next();
            Intent::None
        }
        KeyCode::BackTab | KeyCode::Up => {
            state.focus = state.focus.previous();
            Intent::None
        }
        KeyCode::Enter => match state.focus {
            SignupFocus::Name | SignupFocus::Email => {
                state.focus = state.focus.next();
                Intent::None
            }
            SignupFocus::Password | SignupFocus::Submit => Intent::SubmitSignup,
            SignupFocus::LoginLink => push(Route::Login),
        },
        _ => {
            if let Some(field) = state.focused_field() {
                edit_field(field, key);
            }
            Intent::None
        }
    }
}

/// Apply an editing key to `field`. Other keys are ignored.
fn edit_field(field: &mut TextField, key: KeyEvent) {
    match key.code {
        KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
            field.insert_char(c)
        }
        KeyCode::Backspace => field.backspace(),
        KeyCode::Delete => field.delete_char(),
        KeyCode::Left => field.move_cursor_left(),
        KeyCode::Right => field.move_cursor_right(),
        KeyCode::Home => field.move_cursor_home(),
        KeyCode::End => field.move_cursor_end(),
        _ => {}
    }
}
