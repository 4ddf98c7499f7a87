pub mod lessonbox;
pub use lessonbox::{layout, Content, ContentBlock, LessonBox, LessonBoxState, Scroll};

pub mod navigation;
pub use navigation::{Navigation, NavigationState};

pub mod statusbar;
pub use statusbar::StatusBar;
