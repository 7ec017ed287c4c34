// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use std::sync::Arc;

use log::error;
use percent_encoding::percent_decode_str;
use warp::http::StatusCode;
use warp::reply::Response;
use warp::{Filter, Rejection, Reply};

use crate::error::PageError;
use crate::http::HttpClient;
use crate::site::Site;

fn error_page(status: StatusCode) -> String {
    let reason = status.canonical_reason().unwrap_or("Error");
    format!(
        "<!DOCTYPE html>\n<html lang=\"pt-BR\">\n<head><meta charset=\"utf-8\"><title>{} | Podcastr</title></head>\n<body><main><h1>{} {}</h1><p><a href=\"/\">Voltar</a></p></main></body>\n</html>\n",
        reason,
        status.as_u16(),
        reason
    )
}

fn status_for(err: &PageError) -> StatusCode {
    if err.is_not_found() {
        return StatusCode::NOT_FOUND;
    }
    match err {
        PageError::Api(_) => StatusCode::BAD_GATEWAY,
        PageError::Format(_) | PageError::Render(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

fn respond(route: &str, result: Result<Arc<str>, PageError>) -> Response {
    match result {
        Ok(html) => warp::reply::html(html.to_string()).into_response(),
        Err(e) => {
            let status = status_for(&e);
            error!("{route}: page generation failed ({status}): {e}");
            warp::reply::with_status(warp::reply::html(error_page(status)), status).into_response()
        }
    }
}

/// `GET /` and `GET /episodes/{id}`
pub fn routes<C>(
    site: Arc<Site<C>>,
) -> impl Filter<Extract = (impl Reply,), Error = Rejection> + Clone
where
    C: HttpClient + 'static,
{
    let with_site = warp::any().map(move || Arc::clone(&site));

    let home = warp::path::end()
        .and(warp::get())
        .and(with_site.clone())
        .then(|site: Arc<Site<C>>| async move { respond("/", site.home().await) });

    let episode = warp::path!("episodes" / String)
        .and(warp::get())
        .and(with_site)
        .then(|segment: String, site: Arc<Site<C>>| async move {
            let id = percent_decode_str(&segment).decode_utf8_lossy().into_owned();
            respond(&format!("/episodes/{segment}"), site.episode(&id).await)
        });

    home.or(episode).with(warp::log("podcastr::server"))
}
