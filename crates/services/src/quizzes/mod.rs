mod generator;
mod library;
mod view;

// Public API of the quiz subsystem.
pub use crate::error::{QuizGenError, QuizLibraryError};
pub use generator::{GeneratedQuizDraft, GeneratorConfig, QuizGeneratorService};
pub use library::QuizLibraryService;
pub use view::{LibraryStats, QuizListItem};
