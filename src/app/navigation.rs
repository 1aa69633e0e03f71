//! Screen stack.
//!
//! Each entry owns the view state of one mounted screen and the handles of
//! the tasks fetching for it. Removing an entry aborts those tasks, and the
//! entry's [`ScreenId`] is never reused, so a result that arrives for a
//! removed screen finds no owner and is dropped.

use std::fmt;
use tokio::task::JoinHandle;

/// Identity of one mounted screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ScreenId(u64);

impl fmt::Display for ScreenId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "screen#{}", self.0)
    }
}

/// Where a screen entry points.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Home,
    Specialties,
    SpecialtyDoctors { id: String },
    Doctors,
    DoctorDetail { id: String },
    BookAppointment { doctor_id: String },
    ConfirmBooking { slot_id: String },
    Confirmed,
    AppointmentDetail { id: String },
    Profile { id: String },
    Login,
    Signup,
    Blogs,
    BlogDetail { id: u32 },
}

impl Route {
    /// Title shown in the header.
    pub fn title(&self) -> &'static str {
        match self {
            Route::Home => "Home",
            Route::Specialties => "Specialties",
            Route::SpecialtyDoctors { .. } => "Specialty",
            Route::Doctors => "Doctors",
            Route::DoctorDetail { .. } => "Doctor",
            Route::BookAppointment { .. } => "Book Appointment",
            Route::ConfirmBooking { .. } => "Confirm Appointment",
            Route::Confirmed => "Appointment Confirmed",
            Route::AppointmentDetail { .. } => "Appointment",
            Route::Profile { .. } => "Profile",
            Route::Login => "Login",
            Route::Signup => "Sign Up",
            Route::Blogs => "Health Articles",
            Route::BlogDetail { .. } => "Article",
        }
    }

    /// Screens whose keys mostly go to a text field.
    pub fn takes_text_input(&self) -> bool {
        matches!(
            self,
            Route::Login
                | Route::Signup
                | Route::ConfirmBooking { .. }
                | Route::AppointmentDetail { .. }
        )
    }
}

/// A requested transition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavAction {
    Push(Route),
    /// Swap the top entry.
    Replace(Route),
    Back,
    /// Drop everything and start again at `Home`.
    Reset,
    /// Go back one entry (when possible), then replace the new top.
    PopReplace(Route),
}

/// One mounted screen.
pub struct ScreenEntry<S> {
    pub id: ScreenId,
    pub route: Route,
    pub state: S,
    tasks: Vec<JoinHandle<()>>,
}

impl<S> ScreenEntry<S> {
    /// Keep `handle` so it can be aborted when this screen goes away.
    pub fn track(&mut self, handle: JoinHandle<()>) {
        self.tasks.retain(|task| !task.is_finished());
        self.tasks.push(handle);
    }

    /// Tasks still running for this screen.
    pub fn pending_tasks(&self) -> usize {
        self.tasks.iter().filter(|task| !task.is_finished()).count()
    }

    fn abort_tasks(&mut self) {
        for task in self.tasks.drain(..) {
            task.abort();
        }
    }
}

impl<S> Drop for ScreenEntry<S> {
    fn drop(&mut self) {
        self.abort_tasks();
    }
}

impl<S: fmt::Debug> fmt::Debug for ScreenEntry<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ScreenEntry")
            .field("id", &self.id)
            .field("route", &self.route)
            .field("state", &self.state)
            .field("tasks", &self.tasks.len())
            .finish()
    }
}

/// Stack of mounted screens. Never empty.
#[derive(Debug)]
pub struct Router<S> {
    stack: Vec<ScreenEntry<S>>,
    next_id: u64,
}

impl<S> Router<S> {
    pub fn new(route: Route, state: S) -> Self {
        let mut router = Self {
            stack: Vec::new(),
            next_id: 0,
        };
        let entry = router.entry(route, state);
        router.stack.push(entry);
        router
    }

    fn entry(&mut self, route: Route, state: S) -> ScreenEntry<S> {
        let id = ScreenId(self.next_id);
        self.next_id += 1;
        ScreenEntry {
            id,
            route,
            state,
            tasks: Vec::new(),
        }
    }

    pub fn push(&mut self, route: Route, state: S) -> ScreenId {
        let entry = self.entry(route, state);
        let id = entry.id;
        self.stack.push(entry);
        id
    }

    /// Replace the top entry, unmounting it.
    pub fn replace(&mut self, route: Route, state: S) -> ScreenId {
        let entry = self.entry(route, state);
        let id = entry.id;
        if let Some(top) = self.stack.last_mut() {
            *top = entry;
        } else {
            self.stack.push(entry);
        }
        id
    }

    /// Pop the top entry. Returns false at the root, which is kept.
    pub fn back(&mut self) -> bool {
        if self.can_go_back() {
            self.stack.pop();
            true
        } else {
            false
        }
    }

    /// Unmount everything and mount a single entry.
    pub fn reset(&mut self, route: Route, state: S) -> ScreenId {
        self.stack.clear();
        self.push(route, state)
    }

    pub fn can_go_back(&self) -> bool {
        self.stack.len() > 1
    }

    pub fn depth(&self) -> usize {
        self.stack.len()
    }

    pub fn current(&self) -> &ScreenEntry<S> {
        // The stack is never empty: every removal path keeps or re-adds one.
        &self.stack[self.stack.len() - 1]
    }

    pub fn current_mut(&mut self) -> &mut ScreenEntry<S> {
        let last = self.stack.len() - 1;
        &mut self.stack[last]
    }

    /// The entry for `id`, if it is still mounted.
    pub fn get_mut(&mut self, id: ScreenId) -> Option<&mut ScreenEntry<S>> {
        self.stack.iter_mut().find(|entry| entry.id == id)
    }

    pub fn contains(&self, id: ScreenId) -> bool {
        self.stack.iter().any(|entry| entry.id == id)
    }

    /// Routes from the root to the top.
    pub fn routes(&self) -> Vec<&Route> {
        self.stack.iter().map(|entry| &entry.route).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn router() -> Router<()> {
        Router::new(Route::Home, ())
    }

    #[test]
    fn test_new_router_has_root() {
        let router = router();
        assert_eq!(router.depth(), 1);
        assert_eq!(router.current().route, Route::Home);
        assert!(!router.can_go_back());
    }

    #[test]
    fn test_push_and_back() {
        let mut router = router();
        router.push(Route::Doctors, ());
        assert_eq!(router.current().route, Route::Doctors);
        assert!(router.back());
        assert_eq!(router.current().route, Route::Home);
    }

    #[test]
    fn test_back_at_root_is_noop() {
        let mut router = router();
        assert!(!router.back());
        assert_eq!(router.depth(), 1);
    }

    #[test]
    fn test_replace_swaps_top() {
        let mut router = router();
        router.push(Route::Login, ());
        let old = router.current().id;
        let new = router.replace(Route::Signup, ());
        assert_ne!(old, new);
        assert!(!router.contains(old));
        assert_eq!(router.routes(), vec![&Route::Home, &Route::Signup]);
    }

    #[test]
    fn test_reset_leaves_single_entry() {
        let mut router = router();
        router.push(Route::Doctors, ());
        router.push(
            Route::DoctorDetail {
                id: "1".to_string(),
            },
            (),
        );
        router.reset(Route::Home, ());
        assert_eq!(router.depth(), 1);
        assert_eq!(router.current().route, Route::Home);
    }

    #[test]
    fn test_ids_are_never_reused() {
        let mut router = router();
        let first = router.push(Route::Blogs, ());
        router.back();
        let second = router.push(Route::Blogs, ());
        assert_ne!(first, second);
        assert!(router.get_mut(first).is_none());
        assert!(router.get_mut(second).is_some());
    }

    #[test]
    fn test_takes_text_input() {
        assert!(Route::Login.takes_text_input());
        assert!(!Route::Doctors.takes_text_input());
    }

    #[tokio::test]
    async fn test_popping_aborts_tasks() {
        let mut router = router();
        let id = router.push(Route::Doctors, ());
        let handle = tokio::spawn(async {
            tokio::time::sleep(std::time::Duration::from_secs(60)).await;
        });
        let abort = handle.abort_handle();
        router.get_mut(id).unwrap().track(handle);
        assert_eq!(router.current().pending_tasks(), 1);

        router.back();
        for _ in 0..100 {
            if abort.is_finished() {
                break;
            }
            tokio::task::yield_now().await;
        }
        assert!(abort.is_finished());
    }
}
