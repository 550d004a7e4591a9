mod catalog;
pub mod completion;
pub mod content;
mod course;
mod ids;
mod learner;
mod question;

pub use catalog::{CatalogEntry, CourseManifest};
pub use completion::{AttemptSummary, CompletionRecord};
pub use content::{ActionBlock, ContentError, ContentItem, DownloadLink, TipBox};
pub use course::{Course, CourseError, CourseFile, CourseOutline, Lesson, Module, Quiz};
pub use ids::{CourseId, EntryId, ParseIdError, QuestionId};
pub use learner::{Learner, LearnerError};
pub use question::{ChoiceQuestion, EssayQuestion, Question, QuestionError};
