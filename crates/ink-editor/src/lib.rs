pub mod home;
pub mod input;
pub mod session;
pub mod tools;

pub use home::{Home, HomeConfig, NullTypesetter, Typesetter};
pub use input::InputEvent;
pub use session::{CanvasConfig, Session, SolveOutcome, SolveTicket};
pub use tools::PenTool;
