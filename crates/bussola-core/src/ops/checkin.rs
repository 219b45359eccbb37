//! Check-in and priority mutations.
//!
//! Each function returns the next snapshot and leaves its input untouched.
//! Unknown check-in or priority ids yield an unchanged copy.

use tracing::warn;

use crate::model::{AppData, CheckinDraft, CheckinPatch, DailyCheckin, Priority};

/// Clone `data` and run `f` on the check-in with `checkin_id`, if any.
fn with_checkin(data: &AppData, checkin_id: &str, f: impl FnOnce(&mut DailyCheckin)) -> AppData {
    let mut next = data.clone();
    if let Some(checkin) = next.checkins.iter_mut().find(|c| c.id == checkin_id) {
        f(checkin);
    }
    next
}

fn recount(checkin: &mut DailyCheckin) {
    checkin.tarefas_completadas = checkin.completed_count();
}

/// Append a check-in for `draft.date`, owned by the current user.
///
/// A date that already has a check-in is left alone: the collection keeps
/// at most one check-in per day.
pub fn add_checkin(data: &AppData, draft: CheckinDraft, id: impl Into<String>) -> AppData {
    let mut next = data.clone();
    if next.checkins.iter().any(|c| c.date == draft.date) {
        warn!(date = %draft.date, "check-in for this date already exists, ignoring add");
        return next;
    }
    let checkin = draft.into_checkin(id.into(), next.user.id.clone());
    next.checkins.push(checkin);
    next
}

pub fn update_checkin(data: &AppData, checkin_id: &str, patch: &CheckinPatch) -> AppData {
    with_checkin(data, checkin_id, |c| patch.apply_to(c))
}

/// Flip one priority and recount completed tasks from the resulting list.
pub fn toggle_priority(data: &AppData, checkin_id: &str, priority_id: &str) -> AppData {
    with_checkin(data, checkin_id, |c| {
        let Some(priority) = c.prioridades.iter_mut().find(|p| p.id == priority_id) else {
            return;
        };
        priority.completed = !priority.completed;
        recount(c);
    })
}

/// Replace a priority's text. Blank text is ignored.
pub fn edit_priority(data: &AppData, checkin_id: &str, priority_id: &str, new_text: &str) -> AppData {
    if new_text.trim().is_empty() {
        return data.clone();
    }
    with_checkin(data, checkin_id, |c| {
        let Some(priority) = c.prioridades.iter_mut().find(|p| p.id == priority_id) else {
            return;
        };
        priority.text = new_text.to_string();
    })
}

/// Append an open priority. Blank text is ignored; the per-day cap is
/// checked by [`crate::Store::add_priority`], not here.
pub fn add_priority(data: &AppData, checkin_id: &str, priority: Priority) -> AppData {
    if priority.text.trim().is_empty() {
        return data.clone();
    }
    with_checkin(data, checkin_id, |c| {
        c.prioridades.push(Priority {
            completed: false,
            ..priority
        });
    })
}

pub fn remove_priority(data: &AppData, checkin_id: &str, priority_id: &str) -> AppData {
    with_checkin(data, checkin_id, |c| {
        let before = c.prioridades.len();
        c.prioridades.retain(|p| p.id != priority_id);
        if c.prioridades.len() == before {
            return;
        }
        recount(c);
    })
}

/// Move the priority at `from` to position `to`, shifting the ones between.
/// Out-of-range indices leave the list unchanged.
pub fn reorder_priorities(data: &AppData, checkin_id: &str, from: usize, to: usize) -> AppData {
    with_checkin(data, checkin_id, |c| {
        let len = c.prioridades.len();
        if from >= len || to >= len || from == to {
            return;
        }
        let moved = c.prioridades.remove(from);
        c.prioridades.insert(to, moved);
    })
}
