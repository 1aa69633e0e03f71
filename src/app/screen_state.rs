//! Per-screen view state.
//!
//! Every fetch a screen makes is tracked as a [`FetchState`]; every
//! submission as a [`SubmitState`]. Screen-specific structs hold those plus
//! selection and form fields.

use crate::api::ApiError;
use crate::booking::{available_dates, first_free_index, slots_on, ReviewDraft};
use crate::content;
use crate::error::ErrorCategory;
use crate::models::{
    AppointmentDetail, AppointmentSummary, Doctor, DoctorDetails, SlotBooking, Specialty,
    SpecialtyDoctor, TimeSlot, UserProfile,
};
use crate::widgets::TextField;

use super::navigation::Route;

/// A failed fetch, as shown to the user.
#[derive(Debug, Clone, PartialEq)]
pub struct LoadError {
    pub message: String,
    pub category: ErrorCategory,
}

impl LoadError {
    pub fn new(message: impl Into<String>, category: ErrorCategory) -> Self {
        Self {
            message: message.into(),
            category,
        }
    }
}

impl From<ApiError> for LoadError {
    fn from(err: ApiError) -> Self {
        Self::new(err.user_message(), err.category())
    }
}

/// Lifecycle of one fetch.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum FetchState<T> {
    #[default]
    Loading,
    Loaded(T),
    /// Re-fetching while the previous value stays visible.
    Refreshing(T),
    Failed(LoadError),
}

impl<T> FetchState<T> {
    pub fn value(&self) -> Option<&T> {
        match self {
            FetchState::Loaded(v) | FetchState::Refreshing(v) => Some(v),
            _ => None,
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, FetchState::Loading)
    }

    pub fn is_refreshing(&self) -> bool {
        matches!(self, FetchState::Refreshing(_))
    }

    /// Loading or refreshing.
    pub fn is_busy(&self) -> bool {
        self.is_loading() || self.is_refreshing()
    }

    pub fn error(&self) -> Option<&LoadError> {
        match self {
            FetchState::Failed(e) => Some(e),
            _ => None,
        }
    }

    /// Enter the re-fetch state: refreshing when a value is present,
    /// loading otherwise.
    pub fn begin_refresh(&mut self) {
        *self = match std::mem::take(self) {
            FetchState::Loaded(v) | FetchState::Refreshing(v) => FetchState::Refreshing(v),
            FetchState::Loading | FetchState::Failed(_) => FetchState::Loading,
        };
    }

    pub fn finish(&mut self, result: Result<T, LoadError>) {
        *self = match result {
            Ok(v) => FetchState::Loaded(v),
            Err(e) => FetchState::Failed(e),
        };
    }
}

/// Whether a submission is in flight. The trigger is disabled meanwhile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SubmitState {
    #[default]
    Idle,
    Submitting,
}

impl SubmitState {
    pub fn is_submitting(&self) -> bool {
        matches!(self, SubmitState::Submitting)
    }
}

/// A fetched list with a cursor.
#[derive(Debug, Clone, PartialEq)]
pub struct ListState<T> {
    pub items: FetchState<Vec<T>>,
    pub selected: usize,
}

impl<T> Default for ListState<T> {
    fn default() -> Self {
        Self {
            items: FetchState::Loading,
            selected: 0,
        }
    }
}

impl<T> ListState<T> {
    pub fn len(&self) -> usize {
        self.items.value().map_or(0, Vec::len)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn select_next(&mut self) {
        if self.selected + 1 < self.len() {
            self.selected += 1;
        }
    }

    pub fn select_previous(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    pub fn selected_item(&self) -> Option<&T> {
        self.items.value().and_then(|items| items.get(self.selected))
    }

    /// Store a result, keeping the cursor in range.
    pub fn finish(&mut self, result: Result<Vec<T>, LoadError>) {
        self.items.finish(result);
        self.selected = self.selected.min(self.len().saturating_sub(1));
    }
}

// ============================================================================
// Home
// ============================================================================

/// Something selectable on the home screen.
#[derive(Debug, Clone, PartialEq)]
pub enum HomeItem {
    Doctors,
    Specialties,
    Specialty { id: String, name: String },
    Articles,
    Article { id: u32, title: String },
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct HomeState {
    pub specialties: FetchState<Vec<Specialty>>,
    pub selected: usize,
}

impl HomeState {
    /// Selectable entries, top to bottom.
    pub fn items(&self) -> Vec<HomeItem> {
        let mut items = vec![HomeItem::Doctors, HomeItem::Specialties];
        if let Some(specialties) = self.specialties.value() {
            items.extend(specialties.iter().map(|s| HomeItem::Specialty {
                id: s.id.clone(),
                name: s.specialty.clone(),
            }));
        }
        items.push(HomeItem::Articles);
        items.extend(content::home_selection().iter().map(|post| HomeItem::Article {
            id: post.id,
            title: post.title.clone(),
        }));
        items
    }

    pub fn selected_item(&self) -> Option<HomeItem> {
        self.items().into_iter().nth(self.selected)
    }

    pub fn select_next(&mut self) {
        if self.selected + 1 < self.items().len() {
            self.selected += 1;
        }
    }

    pub fn select_previous(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }
}

// ============================================================================
// Doctors and specialties
// ============================================================================

/// A specialty with its doctors. The specialty itself is optional; the
/// doctors list is what the screen needs.
#[derive(Debug, Clone, PartialEq)]
pub struct SpecialtyDoctors {
    pub specialty: Option<Specialty>,
    pub doctors: Vec<SpecialtyDoctor>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct SpecialtyDoctorsState {
    pub data: FetchState<SpecialtyDoctors>,
    pub selected: usize,
}

impl SpecialtyDoctorsState {
    fn len(&self) -> usize {
        self.data.value().map_or(0, |d| d.doctors.len())
    }

    pub fn select_next(&mut self) {
        if self.selected + 1 < self.len() {
            self.selected += 1;
        }
    }

    pub fn select_previous(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    pub fn selected_doctor(&self) -> Option<&SpecialtyDoctor> {
        self.data.value().and_then(|d| d.doctors.get(self.selected))
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct DoctorDetailState {
    pub doctor: FetchState<DoctorDetails>,
}

// ============================================================================
// Booking
// ============================================================================

/// A doctor with their slots, fetched together.
#[derive(Debug, Clone, PartialEq)]
pub struct Schedule {
    pub doctor: DoctorDetails,
    pub slots: Vec<TimeSlot>,
}

/// Which list the arrow keys move in on the booking screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BookingFocus {
    #[default]
    Dates,
    Slots,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct BookAppointmentState {
    pub schedule: FetchState<Schedule>,
    pub date_index: usize,
    pub slot_index: usize,
    pub focus: BookingFocus,
}

impl BookAppointmentState {
    pub fn dates(&self) -> Vec<String> {
        self.schedule
            .value()
            .map(|s| available_dates(&s.slots))
            .unwrap_or_default()
    }

    pub fn selected_date(&self) -> Option<String> {
        self.dates().into_iter().nth(self.date_index)
    }

    /// Slots on the selected date, earliest first.
    pub fn visible_slots(&self) -> Vec<&TimeSlot> {
        match (self.schedule.value(), self.selected_date()) {
            (Some(schedule), Some(date)) => slots_on(&schedule.slots, &date),
            _ => Vec::new(),
        }
    }

    pub fn selected_slot(&self) -> Option<&TimeSlot> {
        self.visible_slots().get(self.slot_index).copied()
    }

    /// Choose the date at `index` and put the cursor on its first free slot.
    pub fn select_date(&mut self, index: usize) {
        let count = self.dates().len();
        if count == 0 {
            return;
        }
        self.date_index = index.min(count - 1);
        self.slot_index = first_free_index(&self.visible_slots()).unwrap_or(0);
    }

    pub fn next_date(&mut self) {
        self.select_date(self.date_index + 1);
    }

    pub fn previous_date(&mut self) {
        self.select_date(self.date_index.saturating_sub(1));
    }

    pub fn next_slot(&mut self) {
        if self.slot_index + 1 < self.visible_slots().len() {
            self.slot_index += 1;
        }
    }

    pub fn previous_slot(&mut self) {
        self.slot_index = self.slot_index.saturating_sub(1);
    }

    pub fn finish(&mut self, result: Result<Schedule, LoadError>) {
        self.schedule.finish(result);
        let keep = self.date_index;
        self.date_index = 0;
        self.select_date(keep);
    }
}

#[derive(Debug, Clone, Default)]
pub struct ConfirmBookingState {
    pub detail: FetchState<SlotBooking>,
    pub reason: TextField,
    pub submit: SubmitState,
}

#[derive(Debug, Clone, Default)]
pub struct AppointmentDetailState {
    pub appointment: FetchState<AppointmentDetail>,
    pub review: ReviewDraft,
    pub comment: TextField,
    pub submit: SubmitState,
}

impl AppointmentDetailState {
    /// Whether the review form is shown.
    pub fn accepts_review(&self) -> bool {
        self.appointment
            .value()
            .is_some_and(|a| a.status.accepts_review())
    }

    /// The draft as it will be submitted.
    pub fn draft(&self) -> ReviewDraft {
        ReviewDraft {
            rating: self.review.rating,
            comment: self.comment.value().to_string(),
        }
    }

    pub fn clear_review(&mut self) {
        self.review.reset();
        self.comment.clear();
    }
}

// ============================================================================
// Profile
// ============================================================================

/// Profile and appointment history load independently.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProfileState {
    pub profile: FetchState<UserProfile>,
    pub appointments: ListState<AppointmentSummary>,
}

// ============================================================================
// Auth forms
// ============================================================================

/// Focusable parts of the login screen, in tab order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoginFocus {
    #[default]
    Email,
    Password,
    Submit,
    Google,
    SignupLink,
}

impl LoginFocus {
    const ORDER: [LoginFocus; 5] = [
        LoginFocus::Email,
        LoginFocus::Password,
        LoginFocus::Submit,
        LoginFocus::Google,
        LoginFocus::SignupLink,
    ];

    pub fn next(self) -> Self {
        cycle(&Self::ORDER, self, 1)
    }

    pub fn previous(self) -> Self {
        cycle(&Self::ORDER, self, Self::ORDER.len() - 1)
    }
}

#[derive(Debug, Clone)]
pub struct LoginState {
    pub email: TextField,
    pub password: TextField,
    pub focus: LoginFocus,
    pub submit: SubmitState,
    pub google: SubmitState,
}

impl Default for LoginState {
    fn default() -> Self {
        Self {
            email: TextField::new(),
            password: TextField::masked(),
            focus: LoginFocus::default(),
            submit: SubmitState::Idle,
            google: SubmitState::Idle,
        }
    }
}

impl LoginState {
    pub fn is_busy(&self) -> bool {
        self.submit.is_submitting() || self.google.is_submitting()
    }

    pub fn focused_field(&mut self) -> Option<&mut TextField> {
        match self.focus {
            LoginFocus::Email => Some(&mut self.email),
            LoginFocus::Password => Some(&mut self.password),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SignupFocus {
    #[default]
    Name,
    Email,
    Password,
    Submit,
    LoginLink,
}

impl SignupFocus {
    const ORDER: [SignupFocus; 5] = [
        SignupFocus::Name,
        SignupFocus::Email,
        SignupFocus::Password,
        SignupFocus::Submit,
        SignupFocus::LoginLink,
    ];

    pub fn next(self) -> Self {
        cycle(&Self::ORDER, self, 1)
    }

    pub fn previous(self) -> Self {
        cycle(&Self::ORDER, self, Self::ORDER.len() - 1)
    }
}

#[derive(Debug, Clone)]
pub struct SignupState {
    pub name: TextField,
    pub email: TextField,
    pub password: TextField,
    pub focus: SignupFocus,
    pub submit: SubmitState,
}

impl Default for SignupState {
    fn default() -> Self {
        Self {
            name: TextField::new(),
            email: TextField::new(),
            password: TextField::masked(),
            focus: SignupFocus::default(),
            submit: SubmitState::Idle,
        }
    }
}

impl SignupState {
    pub fn focused_field(&mut self) -> Option<&mut TextField> {
        match self.focus {
            SignupFocus::Name => Some(&mut self.name),
            SignupFocus::Email => Some(&mut self.email),
            SignupFocus::Password => Some(&mut self.password),
            _ => None,
        }
    }
}

fn cycle<T: Copy + PartialEq>(order: &[T], current: T, step: usize) -> T {
    let index = order.iter().position(|f| *f == current).unwrap_or(0);
    order[(index + step) % order.len()]
}

// ============================================================================
// Articles
// ============================================================================

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BlogsState {
    pub selected: usize,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BlogDetailState {
    pub scroll: u16,
}

// ============================================================================
// Screen state
// ============================================================================

/// View state of one mounted screen.
#[derive(Debug, Clone)]
pub enum ScreenState {
    Home(HomeState),
    Specialties(ListState<Specialty>),
    SpecialtyDoctors(SpecialtyDoctorsState),
    Doctors(ListState<Doctor>),
    DoctorDetail(DoctorDetailState),
    BookAppointment(BookAppointmentState),
    ConfirmBooking(ConfirmBookingState),
    Confirmed,
    AppointmentDetail(AppointmentDetailState),
    Profile(ProfileState),
    Login(LoginState),
    Signup(SignupState),
    Blogs(BlogsState),
    BlogDetail(BlogDetailState),
}

impl ScreenState {
    /// Fresh state for a newly mounted `route`.
    pub fn for_route(route: &Route) -> Self {
        match route {
            Route::Home => ScreenState::Home(HomeState::default()),
            Route::Specialties => ScreenState::Specialties(ListState::default()),
            Route::SpecialtyDoctors { .. } => {
                ScreenState::SpecialtyDoctors(SpecialtyDoctorsState::default())
            }
            Route::Doctors => ScreenState::Doctors(ListState::default()),
            Route::DoctorDetail { .. } => ScreenState::DoctorDetail(DoctorDetailState::default()),
            Route::BookAppointment { .. } => {
                ScreenState::BookAppointment(BookAppointmentState::default())
            }
            Route::ConfirmBooking { .. } => {
                ScreenState::ConfirmBooking(ConfirmBookingState::default())
            }
            Route::Confirmed => ScreenState::Confirmed,
            Route::AppointmentDetail { .. } => {
                ScreenState::AppointmentDetail(AppointmentDetailState::default())
            }
            Route::Profile { .. } => ScreenState::Profile(ProfileState::default()),
            Route::Login => ScreenState::Login(LoginState::default()),
            Route::Signup => ScreenState::Signup(SignupState::default()),
            Route::Blogs => ScreenState::Blogs(BlogsState::default()),
            Route::BlogDetail { .. } => ScreenState::BlogDetail(BlogDetailState::default()),
        }
    }

    /// Whether anything on this screen is waiting on the network.
    pub fn is_busy(&self) -> bool {
        match self {
            ScreenState::Home(s) => s.specialties.is_busy(),
            ScreenState::Specialties(s) => s.items.is_busy(),
            ScreenState::SpecialtyDoctors(s) => s.data.is_busy(),
            ScreenState::Doctors(s) => s.items.is_busy(),
            ScreenState::DoctorDetail(s) => s.doctor.is_busy(),
            ScreenState::BookAppointment(s) => s.schedule.is_busy(),
            ScreenState::ConfirmBooking(s) => s.detail.is_busy() || s.submit.is_submitting(),
            ScreenState::AppointmentDetail(s) => {
                s.appointment.is_busy() || s.submit.is_submitting()
            }
            ScreenState::Profile(s) => s.profile.is_busy() || s.appointments.items.is_busy(),
            ScreenState::Login(s) => s.is_busy(),
            ScreenState::Signup(s) => s.submit.is_submitting(),
            ScreenState::Confirmed | ScreenState::Blogs(_) | ScreenState::BlogDetail(_) => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn slot(id: &str, date: &str, start: &str, booked: bool) -> TimeSlot {
        TimeSlot {
            id: id.to_string(),
            doctor_id: "d1".to_string(),
            date: date.to_string(),
            start_time: start.to_string(),
            end_time: start.to_string(),
            is_booked: booked,
        }
    }

    fn doctor() -> DoctorDetails {
        serde_json::from_value(serde_json::json!({"id": "d1", "name": "Dr. Rao"})).unwrap()
    }

    #[test]
    fn test_fetch_state_refresh_keeps_value() {
        let mut state = FetchState::Loaded(vec![1, 2]);
        state.begin_refresh();
        assert_eq!(state, FetchState::Refreshing(vec![1, 2]));
        assert_eq!(state.value(), Some(&vec![1, 2]));
        assert!(state.is_busy());
    }

    #[test]
    fn test_fetch_state_retry_after_failure_loads() {
        let mut state: FetchState<u32> =
            FetchState::Failed(LoadError::new("down", ErrorCategory::Network));
        state.begin_refresh();
        assert!(state.is_loading());
    }

    #[test]
    fn test_fetch_state_finish() {
        let mut state: FetchState<u32> = FetchState::Loading;
        state.finish(Ok(3));
        assert_eq!(state.value(), Some(&3));

        state.finish(Err(LoadError::new("gone", ErrorCategory::Server)));
        assert_eq!(state.error().map(|e| e.message.as_str()), Some("gone"));
        assert!(state.value().is_none());
    }

    #[test]
    fn test_load_error_from_api_error() {
        let err = LoadError::from(ApiError::Server {
            status: 404,
            message: "Doctor not found".to_string(),
        });
        assert_eq!(err.message, "Doctor not found");
        assert_eq!(err.category, ErrorCategory::Server);
    }

    #[test]
    fn test_list_state_selection_bounds() {
        let mut list: ListState<u32> = ListState::default();
        list.select_next();
        assert_eq!(list.selected, 0);

        list.finish(Ok(vec![10, 20, 30]));
        list.select_next();
        list.select_next();
        list.select_next();
        assert_eq!(list.selected_item(), Some(&30));

        list.finish(Ok(vec![10]));
        assert_eq!(list.selected, 0);
    }

    #[test]
    fn test_home_items_include_articles() {
        let home = HomeState::default();
        let items = home.items();
        assert_eq!(items[0], HomeItem::Doctors);
        assert!(items.contains(&HomeItem::Articles));
        let articles = items
            .iter()
            .filter(|i| matches!(i, HomeItem::Article { .. }))
            .count();
        assert_eq!(articles, content::home_selection().len());
    }

    #[test]
    fn test_booking_selects_first_free_slot_of_first_date() {
        let mut state = BookAppointmentState::default();
        state.finish(Ok(Schedule {
            doctor: doctor(),
            slots: vec![
                slot("3", "2025-03-05", "09:00", false),
                slot("1", "2025-03-04", "09:00", true),
                slot("2", "2025-03-04", "10:00", false),
            ],
        }));

        assert_eq!(state.dates(), vec!["2025-03-04", "2025-03-05"]);
        assert_eq!(state.selected_slot().map(|s| s.id.as_str()), Some("2"));

        state.next_date();
        assert_eq!(state.selected_date().as_deref(), Some("2025-03-05"));
        assert_eq!(state.selected_slot().map(|s| s.id.as_str()), Some("3"));

        state.next_date();
        assert_eq!(state.date_index, 1);
    }

    #[test]
    fn test_booking_with_no_slots() {
        let mut state = BookAppointmentState::default();
        state.finish(Ok(Schedule {
            doctor: doctor(),
            slots: vec![],
        }));
        assert!(state.dates().is_empty());
        assert!(state.selected_slot().is_none());
        state.next_date();
        state.next_slot();
        assert!(state.selected_slot().is_none());
    }

    #[test]
    fn test_login_focus_cycles() {
        assert_eq!(LoginFocus::Email.next(), LoginFocus::Password);
        assert_eq!(LoginFocus::SignupLink.next(), LoginFocus::Email);
        assert_eq!(LoginFocus::Email.previous(), LoginFocus::SignupLink);
        assert_eq!(SignupFocus::LoginLink.next(), SignupFocus::Name);
    }

    #[test]
    fn test_login_password_is_masked() {
        let state = LoginState::default();
        assert!(state.password.is_masked());
        assert!(!state.email.is_masked());
    }

    #[test]
    fn test_for_route_matches_route() {
        assert!(matches!(
            ScreenState::for_route(&Route::Doctors),
            ScreenState::Doctors(_)
        ));
        assert!(matches!(
            ScreenState::for_route(&Route::Confirmed),
            ScreenState::Confirmed
        ));
    }
}
