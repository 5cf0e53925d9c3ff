pub mod note;
pub mod people;
pub mod winner;
pub mod account;
pub mod section;

pub use note::{GiverType, Note, NoteAction, NoteStatus, ReceiverType, note_weight};
pub use people::{Staff, Teacher};
pub use winner::{NewWinner, Winner, WinnerCategory};
pub use account::{Account, Role};
pub use section::ClassSection;
