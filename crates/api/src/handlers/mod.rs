pub mod notification;
pub mod zone;
