use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DomainError {
    #[error("unknown screen '{0}'")]
    UnknownScreen(String),
    #[error("unsupported language '{0}'; expected 'en' or 'ar'")]
    UnsupportedLanguage(String),
    #[error("unknown admin role '{0}'; expected superadmin, admin or moderator")]
    UnknownAdminRole(String),
}
