use std::fmt;

/// An error meant for the user, shown in the error overlay.
#[derive(Debug, Clone, PartialEq)]
pub struct UserError {
    pub title: &'static str,
    pub message: Box<str>,
}

impl fmt::Display for UserError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.title, self.message)
    }
}

impl From<(&'static str, &str)> for UserError {
    fn from(value: (&'static str, &str)) -> Self {
        Self { title: value.0, message: value.1.into() }
    }
}

impl From<(&'static str, String)> for UserError {
    fn from(value: (&'static str, String)) -> Self {
        Self { title: value.0, message: value.1.into_boxed_str() }
    }
}

impl From<(&'static str, anyhow::Error)> for UserError {
    fn from(value: (&'static str, anyhow::Error)) -> Self {
        // alternate form keeps the context chain on one line
        Self { title: value.0, message: format!("{:#}", value.1).into_boxed_str() }
    }
}

#[cfg(test)]
mod tests {
    use anyhow::Context;

    use super::*;

    #[test]
    fn test_from_anyhow_keeps_context() {
        let err = Err::<(), _>(anyhow::anyhow!("no such file"))
            .context("Fail to read file `a.yaml`")
            .unwrap_err();
        let user: UserError = ("Reload failed", err).into();
        assert_eq!(user.title, "Reload failed");
        assert_eq!(&*user.message, "Fail to read file `a.yaml`: no such file");
        assert_eq!(user.to_string(), "Reload failed: Fail to read file `a.yaml`: no such file");
    }
}
