mod alert;
mod badge;
mod spinner;

pub(crate) use alert::Alert;
pub(crate) use badge::Badge;
pub(crate) use spinner::Spinner;
