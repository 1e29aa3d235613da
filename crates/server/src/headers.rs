//! Headers attached to the answers of mutating requests.
//!
//! Every create, update and delete carries `X-<app>-alert`, naming what
//! happened (`<app>.<entity>.created`), and `X-<app>-params` with the id of
//! the record. Creates also carry `Location`.

use axum::http::{HeaderMap, HeaderName, HeaderValue, header::LOCATION};

#[derive(Clone, Copy, Debug)]
pub(crate) enum Alert {
    Created,
    Updated,
    Deleted,
}

impl Alert {
    fn as_str(self) -> &'static str {
        match self {
            Alert::Created => "created",
            Alert::Updated => "updated",
            Alert::Deleted => "deleted",
        }
    }
}

pub(crate) fn entity_alert(app_name: &str, entity: &str, alert: Alert, param: &str) -> HeaderMap {
    let mut headers = HeaderMap::new();
    insert(
        &mut headers,
        &format!("x-{app_name}-alert"),
        &format!("{app_name}.{entity}.{}", alert.as_str()),
    );
    insert(&mut headers, &format!("x-{app_name}-params"), param);
    headers
}

pub(crate) fn with_location(mut headers: HeaderMap, location: &str) -> HeaderMap {
    match HeaderValue::from_str(location) {
        Ok(value) => {
            headers.insert(LOCATION, value);
        }
        Err(_) => tracing::warn!("skipping invalid location header {location}"),
    }
    headers
}

fn insert(headers: &mut HeaderMap, name: &str, value: &str) {
    match (
        HeaderName::from_bytes(name.as_bytes()),
        HeaderValue::from_str(value),
    ) {
        (Ok(name), Ok(value)) => {
            headers.insert(name, value);
        }
        _ => tracing::warn!("skipping invalid response header {name}"),
    }
}
