//! Business logic behind the dashboard routes.

pub mod dashboard;
pub mod mailer;
pub mod notification;

pub use dashboard::{DashboardView, compose_dashboard};
pub use mailer::{MailError, MailTransport, OutboundEmail, SmtpMailer};
pub use notification::{NotificationError, send_install_dates};
