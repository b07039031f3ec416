//! Expansion of `${VAR}` references and `~` in book config values.
//!
//! Product fields are logical paths inside the book, so they only get
//! variable expansion. `context_dir` is a filesystem path and may also start
//! with `~` for the user's home directory.

use std::env::VarError;

use shellexpand::LookupError;

use crate::ConfigError;

/// Expand `${VAR}` and `${VAR:-default}` in a product field.
///
/// Values without `${` come back unchanged, so bare `$draft` segments and
/// leading `~` survive.
pub(crate) fn expand_env(value: &str, field: &str) -> Result<String, ConfigError> {
    if !value.contains("${") {
        return Ok(value.to_owned());
    }

    shellexpand::env_with_context(value, lookup)
        .map(std::borrow::Cow::into_owned)
        .map_err(|e| lookup_error(&e, field))
}

/// Expand variables and a leading `~` in the book's context directory.
pub(crate) fn expand_context_dir(value: &str, field: &str) -> Result<String, ConfigError> {
    expand_with_home(value, field, std::env::var("HOME").ok())
}

fn expand_with_home(
    value: &str,
    field: &str,
    home: Option<String>,
) -> Result<String, ConfigError> {
    if !value.starts_with('~') {
        return expand_env(value, field);
    }
    let Some(home) = home else {
        return Err(ConfigError::EnvVar {
            field: field.to_owned(),
            message: "~ used but HOME not set".to_owned(),
        });
    };

    let expanded = if value.contains("${") {
        shellexpand::full_with_context(value, || Some(home), lookup)
            .map_err(|e| lookup_error(&e, field))?
    } else {
        shellexpand::tilde_with_context(value, || Some(home))
    };
    Ok(expanded.into_owned())
}

fn lookup(var: &str) -> Result<Option<String>, VarError> {
    std::env::var(var).map(Some)
}

fn lookup_error(e: &LookupError<VarError>, field: &str) -> ConfigError {
    let message = match e.cause {
        VarError::NotPresent => format!("${{{}}} not set", e.var_name),
        VarError::NotUnicode(_) => format!("${{{}}} is not valid unicode", e.var_name),
    };
    ConfigError::EnvVar {
        field: field.to_owned(),
        message,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn home() -> Option<String> {
        Some("/home/writer".to_owned())
    }

    #[test]
    fn test_expand_book_dir() {
        // SAFETY: test runs single-threaded per test function
        unsafe {
            std::env::set_var("BW_TEST_BOOK_DIR", "/books/gemfire");
        }
        let result = expand_env("${BW_TEST_BOOK_DIR}/output", "context_dir").unwrap();
        assert_eq!(result, "/books/gemfire/output");
        unsafe {
            std::env::remove_var("BW_TEST_BOOK_DIR");
        }
    }

    #[test]
    fn test_expand_with_default_uses_default() {
        // SAFETY: test runs single-threaded per test function
        unsafe {
            std::env::remove_var("BW_TEST_UNSET_DIR");
        }
        let result = expand_env("${BW_TEST_UNSET_DIR:-.}", "context_dir").unwrap();
        assert_eq!(result, ".");
    }

    #[test]
    fn test_expand_missing_var_error() {
        // SAFETY: test runs single-threaded per test function
        unsafe {
            std::env::remove_var("BW_TEST_MISSING_VAR");
        }
        let err = expand_env("${BW_TEST_MISSING_VAR}", "products[0].pdf_config").unwrap_err();
        assert!(matches!(err, ConfigError::EnvVar { .. }));
        assert!(err.to_string().contains("BW_TEST_MISSING_VAR"));
        assert!(err.to_string().contains("products[0].pdf_config"));
    }

    #[test]
    fn test_bare_dollar_not_expanded() {
        let result = expand_env("docs/$draft/index", "products[0].subnav_root").unwrap();
        assert_eq!(result, "docs/$draft/index");
    }

    #[test]
    fn test_product_field_keeps_tilde() {
        let result = expand_env("~/docs/index", "products[0].subnav_root").unwrap();
        assert_eq!(result, "~/docs/index");
    }

    #[test]
    fn test_context_dir_tilde() {
        assert_eq!(
            expand_with_home("~/books/gemfire", "context_dir", home()).unwrap(),
            "/home/writer/books/gemfire"
        );
        assert_eq!(expand_with_home("~", "context_dir", home()).unwrap(), "/home/writer");
    }

    #[test]
    fn test_context_dir_tilde_with_var() {
        // SAFETY: test runs single-threaded per test function
        unsafe {
            std::env::set_var("BW_TEST_BOOK_NAME", "gemfire");
        }
        let result = expand_with_home("~/books/${BW_TEST_BOOK_NAME}", "context_dir", home());
        assert_eq!(result.unwrap(), "/home/writer/books/gemfire");
        unsafe {
            std::env::remove_var("BW_TEST_BOOK_NAME");
        }
    }

    #[test]
    fn test_context_dir_inner_tilde_untouched() {
        assert_eq!(
            expand_with_home("books/~draft", "context_dir", home()).unwrap(),
            "books/~draft"
        );
    }

    #[test]
    fn test_context_dir_tilde_without_home_error() {
        let err = expand_with_home("~/books", "context_dir", None).unwrap_err();
        assert!(matches!(err, ConfigError::EnvVar { .. }));
        assert!(err.to_string().contains("context_dir"));
    }
}
