use learn_core::model::{Course, EntryId};
use learn_core::progress::ProgressTracker;

pub const LOCKED_TOAST: &str = "Please complete previous lessons first.";
pub const FINAL_ASSESSMENT: &str = "Final Assessment";

/// Which panel fills the content area.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Panel {
    Welcome,
    Entry(EntryId),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NavEntryVm {
    pub id: EntryId,
    pub title: String,
    pub unlocked: bool,
    pub completed: bool,
}

impl NavEntryVm {
    #[must_use]
    pub fn class(&self, active: bool) -> String {
        let mut class = String::from("lesson-link");
        if !self.unlocked {
            class.push_str(" disabled");
        }
        if active {
            class.push_str(" active");
        }
        class
    }
}

/// A module heading and its lessons; the quiz sits in its own trailing section.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NavSectionVm {
    pub title: String,
    pub entries: Vec<NavEntryVm>,
}

#[must_use]
pub fn map_course_nav(course: &Course, tracker: ProgressTracker<'_>) -> Vec<NavSectionVm> {
    let entry = |id: &EntryId, title: &str| NavEntryVm {
        id: id.clone(),
        title: title.to_owned(),
        unlocked: tracker.is_unlocked(id),
        completed: tracker.is_complete(id),
    };

    let mut sections: Vec<NavSectionVm> = course
        .modules()
        .iter()
        .map(|module| NavSectionVm {
            title: module.module_title.clone(),
            entries: module
                .lessons
                .iter()
                .map(|lesson| entry(&lesson.id, &lesson.title))
                .collect(),
        })
        .collect();

    let quiz = course.quiz();
    sections.push(NavSectionVm {
        title: FINAL_ASSESSMENT.to_owned(),
        entries: vec![entry(&quiz.id, &quiz.title)],
    });
    sections
}

/// Open `id` if it is unlocked, otherwise the toast to show instead.
///
/// # Errors
///
/// Returns the locked-entry toast text when `id` is not yet reachable.
pub fn open_entry(tracker: ProgressTracker<'_>, id: &EntryId) -> Result<Panel, &'static str> {
    if tracker.is_unlocked(id) {
        Ok(Panel::Entry(id.clone()))
    } else {
        Err(LOCKED_TOAST)
    }
}

/// "Start Now" target: the first entry still reachable.
#[must_use]
pub fn start_panel(tracker: ProgressTracker<'_>) -> Panel {
    tracker.first_unlocked().map_or(Panel::Welcome, Panel::Entry)
}

/// Toast shown after a lesson is completed and where to go next.
#[must_use]
pub fn completion_notice(
    course: &Course,
    tracker: ProgressTracker<'_>,
    lesson: &EntryId,
) -> (String, Option<EntryId>) {
    match tracker.next_unlocked_after(lesson) {
        Some(next) => {
            let title = course.entry_title(&next).unwrap_or(next.as_str());
            (
                format!("Lesson completed! Redirecting to \"{title}\"..."),
                Some(next),
            )
        }
        None => ("Lesson completed!".to_owned(), None),
    }
}

#[must_use]
pub fn progress_label(percent: u8) -> String {
    format!("{percent}%")
}
