pub mod pagination;
pub mod room;
pub mod validation;
