mod certificate_vm;
mod course_vm;
mod history_vm;
mod quiz_vm;
mod start_vm;
mod time_fmt;

pub use certificate_vm::{ExportState, SubmissionStatus};
pub use course_vm::{
    FINAL_ASSESSMENT, LOCKED_TOAST, NavEntryVm, NavSectionVm, Panel, completion_notice,
    map_course_nav, open_entry, progress_label, start_panel,
};
pub use history_vm::{HistoryRowVm, map_history_rows};
pub use quiz_vm::{PASSED_MESSAGE, QuestionVm, feedback_class, map_questions, score_line};
pub use start_vm::{CourseOptionVm, OnboardingForm, map_course_options};
