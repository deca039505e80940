use vrs_core::{AppointmentDay, Location};

/// The day/time pick made during one reschedule cycle.
///
/// A day is only ever recorded together with the location that offered
/// it; the time arrives later, once the slot listing has been checked.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Selection {
    pub location: Location,
    pub day: AppointmentDay,
    pub time: Option<String>,
}

/// Ephemeral identifiers for one authenticated portal session.
///
/// Single instance, owned by the orchestration, passed by `&mut` into
/// each cycle. Never shared across concurrent work; the whole design
/// is one sequential session.
#[derive(Debug, Default)]
pub struct SessionContext {
    action_id: Option<String>,
    csrf_token: Option<String>,
    selection: Option<Selection>,
}

impl SessionContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stable for the authenticated session; set once after navigation.
    pub fn set_action_id(&mut self, id: String) {
        self.action_id = Some(id);
    }

    pub fn action_id(&self) -> Option<&str> {
        self.action_id.as_deref()
    }

    /// The portal rotates the token, so this is refreshed at the start
    /// of every cycle.
    pub fn set_csrf_token(&mut self, token: Option<String>) {
        self.csrf_token = token;
    }

    pub fn csrf_token(&self) -> Option<&str> {
        self.csrf_token.as_deref()
    }

    pub fn select_day(&mut self, location: Location, day: AppointmentDay) {
        self.selection = Some(Selection {
            location,
            day,
            time: None,
        });
    }

    /// Records the chosen time on the current selection. Without a
    /// selected day there is nothing to attach the time to.
    pub fn select_time(&mut self, time: String) {
        if let Some(selection) = self.selection.as_mut() {
            selection.time = Some(time);
        }
    }

    pub fn selection(&self) -> Option<&Selection> {
        self.selection.as_ref()
    }

    /// Clears the day/time pick but keeps the action id, which stays
    /// valid for the authenticated session.
    pub fn reset(&mut self) {
        self.csrf_token = None;
        self.selection = None;
    }

    /// Full reset for a fresh login; drops the action id too.
    pub fn reset_session(&mut self) {
        self.action_id = None;
        self.reset();
    }
}
