use crate::domain::models::{ErrorBody, JsonErr, JsonOut};
use crate::error::GuardError;
use serde::Serialize;

/// Success output for one command: the `{ok: true, data}` envelope in JSON
/// mode, `text(&data)` otherwise.
pub fn render_ok<T: Serialize>(
    json: bool,
    data: T,
    text: impl FnOnce(&T) -> String,
) -> anyhow::Result<String> {
    if json {
        Ok(serde_json::to_string_pretty(&JsonOut { ok: true, data })?)
    } else {
        Ok(text(&data))
    }
}

/// One text row per item, or `empty` when there is nothing to list. JSON mode
/// always emits the array, empty or not.
pub fn render_list<T: Serialize>(
    json: bool,
    items: &[T],
    empty: &str,
    row: impl Fn(&T) -> String,
) -> anyhow::Result<String> {
    render_ok(json, items, |items| {
        if items.is_empty() {
            empty.to_string()
        } else {
            items.iter().map(&row).collect::<Vec<_>>().join("\n")
        }
    })
}

pub fn print_one<T: Serialize>(
    json: bool,
    data: T,
    text: impl FnOnce(&T) -> String,
) -> anyhow::Result<()> {
    println!("{}", render_ok(json, data, text)?);
    Ok(())
}

pub fn print_list<T: Serialize>(
    json: bool,
    items: &[T],
    empty: &str,
    row: impl Fn(&T) -> String,
) -> anyhow::Result<()> {
    println!("{}", render_list(json, items, empty, row)?);
    Ok(())
}

/// Body of a failed command: the taxonomy kind for domain errors, `internal`
/// for anything else.
pub fn error_body(err: &anyhow::Error) -> ErrorBody {
    let kind = err
        .downcast_ref::<GuardError>()
        .map(GuardError::kind)
        .unwrap_or("internal");
    ErrorBody {
        kind: kind.to_string(),
        message: err.to_string(),
    }
}

pub fn print_error(json: bool, err: &anyhow::Error) {
    let body = error_body(err);
    if json {
        let out = JsonErr { ok: false, error: body };
        match serde_json::to_string_pretty(&out) {
            Ok(s) => println!("{}", s),
            Err(_) => eprintln!("error: {}", err),
        }
    } else {
        eprintln!("error: {}", body.message);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn guard_errors_keep_their_kind() {
        let err = anyhow::Error::new(GuardError::PolicyConflict(
            "example.com is already blocked".to_string(),
        ));
        let body = error_body(&err);
        assert_eq!(body.kind, "policy_conflict");
        assert_eq!(body.message, "example.com is already blocked");
    }

    #[test]
    fn lists_render_rows_or_empty_message() {
        let domains = vec!["youtube.com".to_string(), "reddit.com".to_string()];
        let text = render_list(false, &domains, "nothing", |d| d.to_string()).unwrap();
        assert_eq!(text, "youtube.com\nreddit.com");

        let none: Vec<String> = Vec::new();
        assert_eq!(render_list(false, &none, "nothing", |d| d.to_string()).unwrap(), "nothing");

        let json: serde_json::Value =
            serde_json::from_str(&render_list(true, &none, "nothing", |d| d.to_string()).unwrap())
                .unwrap();
        assert_eq!(json, serde_json::json!({"ok": true, "data": []}));
    }

    #[test]
    fn other_errors_are_internal() {
        let err = anyhow::anyhow!("boom");
        assert_eq!(error_body(&err).kind, "internal");
    }
}
