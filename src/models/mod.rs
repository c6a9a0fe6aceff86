pub mod alert;
pub mod page;

pub use alert::*;
pub use page::*;
