pub mod content;
pub mod severity;
pub mod specialty;
