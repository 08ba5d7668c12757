use client::StatusCode;

/// User facing text for a failed command.
pub fn describe(error: &anyhow::Error) -> String {
    match error.downcast_ref::<client::Error>() {
        Some(api_error) => describe_api_error(api_error),
        None => format!("{error:#}"),
    }
}

pub fn describe_api_error(error: &client::Error) -> String {
    match error {
        client::Error::Network(_) => "cannot reach the store, check --api-url".to_owned(),
        client::Error::Http { status, .. } => describe_status(*status, error),
        client::Error::Json(source) => format!("the store sent an unexpected response: {source}"),
        client::Error::SessionStore(source) => format!(
            "cannot access the saved session: {source}, `storefront logout` resets it"
        ),
        client::Error::InvalidPath { path, .. } => format!("invalid request path: {path}"),
    }
}

fn describe_status(status: StatusCode, error: &client::Error) -> String {
    let detail = error.server_message();
    match status {
        StatusCode::BAD_REQUEST | StatusCode::UNPROCESSABLE_ENTITY => {
            match error.validation_errors() {
                Some(fields) if !fields.is_empty() => {
                    let mut lines = vec!["the request was rejected:".to_owned()];
                    for (field, messages) in fields {
                        for message in messages {
                            lines.push(format!("  {field}: {message}"));
                        }
                    }
                    lines.join("\n")
                }
                _ => with_detail("the request was rejected", detail),
            }
        }
        StatusCode::UNAUTHORIZED => with_detail("not authorized, sign in first", detail),
        StatusCode::FORBIDDEN => with_detail("you are not allowed to do that", detail),
        StatusCode::NOT_FOUND => with_detail("not found", detail),
        StatusCode::CONFLICT => with_detail("conflict", detail),
        status if status.is_server_error() => {
            format!("the store failed to process the request ({status})")
        }
        status => with_detail(&format!("unexpected response {status}"), detail),
    }
}

fn with_detail(summary: &str, detail: Option<&str>) -> String {
    match detail {
        Some(detail) if !detail.is_empty() => format!("{summary}: {detail}"),
        _ => summary.to_owned(),
    }
}
