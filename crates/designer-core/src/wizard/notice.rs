//! User-facing notices raised by the wizard.

use std::fmt;

use crate::error::DesignerError;

/// A message shown to the user instead of an error page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    /// The session has no valid identity
    SignInRequired,
    /// The user may not read or edit this plan
    PermissionDenied,
    /// The plan does not exist (any more)
    PlanNotFound(String),
    /// The plan could not be loaded; the page shows empty values
    LoadFailed(String),
    /// Backend or storage failure; the form keeps its edits
    ServerError(String),
}

impl Notice {
    /// Maps a store error onto the notice shown for it.
    pub fn from_error(error: &DesignerError) -> Self {
        match error {
            DesignerError::NotAuthenticated => Notice::SignInRequired,
            DesignerError::NotAuthorized { .. } => Notice::PermissionDenied,
            DesignerError::PlanNotFound { id } => Notice::PlanNotFound(id.clone()),
            other => Notice::ServerError(other.to_string()),
        }
    }

    /// Maps an error raised while loading the plan.
    pub fn from_load_error(error: &DesignerError) -> Self {
        match Self::from_error(error) {
            Notice::ServerError(message) => Notice::LoadFailed(message),
            notice => notice,
        }
    }
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Notice::SignInRequired => write!(f, "Please sign in to continue."),
            Notice::PermissionDenied => {
                write!(f, "You do not have permission to edit this plan.")
            }
            Notice::PlanNotFound(id) => write!(f, "Plan {id} could not be found."),
            Notice::LoadFailed(message) => {
                write!(f, "The plan could not be loaded, showing empty values: {message}")
            }
            Notice::ServerError(message) => {
                write!(f, "Your changes could not be saved: {message}")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_mapping() {
        assert_eq!(
            Notice::from_error(&DesignerError::NotAuthenticated),
            Notice::SignInRequired
        );
        assert_eq!(
            Notice::from_error(&DesignerError::NotAuthorized {
                id: "p1".to_string()
            }),
            Notice::PermissionDenied
        );
        assert_eq!(
            Notice::from_error(&DesignerError::PlanNotFound {
                id: "p1".to_string()
            }),
            Notice::PlanNotFound("p1".to_string())
        );
        assert!(matches!(
            Notice::from_error(&DesignerError::Server {
                message: "boom".to_string()
            }),
            Notice::ServerError(_)
        ));
    }

    #[test]
    fn test_load_error_mapping() {
        let error = DesignerError::Server {
            message: "boom".to_string(),
        };
        let notice = Notice::from_load_error(&error);
        assert!(matches!(notice, Notice::LoadFailed(_)));
        assert!(!notice.to_string().contains("could not be saved"));
        assert_eq!(
            Notice::from_load_error(&DesignerError::NotAuthenticated),
            Notice::SignInRequired
        );
    }
}
