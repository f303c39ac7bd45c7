mod notification;
mod notification_type;

pub use notification::Notification;
pub use notification_type::NotificationType;
