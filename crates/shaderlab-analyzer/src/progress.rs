//! Work-done progress for long requests such as workspace symbol scans.
//!
//! The server creates a token with `window/workDoneProgress/create`, then
//! sends `$/progress` `Begin` and `End` notifications around the work.

use std::{
    panic::AssertUnwindSafe,
    sync::atomic::{AtomicU64, Ordering},
};

use futures::FutureExt;
use tower_lsp::{Client, lsp_types::*};
use tracing::{debug, warn};

static NEXT_PROGRESS_ID: AtomicU64 = AtomicU64::new(1);
const PROGRESS_TITLE_PREFIX: &str = "shaderlab-analyzer:";

/// An active progress session. Dropping it without [`end`](Self::end)
/// still closes the session on the client, with a "Cancelled" message.
pub struct ProgressToken {
    client: Option<Client>,
    token: Option<NumberOrString>,
}

impl ProgressToken {
    /// Start a session. A failing create request is only logged; the
    /// begin notification is sent regardless.
    pub async fn begin(
        client: &Client,
        title: &str,
        message: Option<String>,
    ) -> Self {
        let id = NEXT_PROGRESS_ID.fetch_add(1, Ordering::Relaxed);
        let token = NumberOrString::String(progress_token_name(title, id));
        let display_title = prefixed_progress_title(title);

        // The create response is awaited off the request path; dropping its
        // receiver early panics inside tower-lsp.
        let create_client = client.clone();
        let create_token = token.clone();
        tokio::spawn(async move {
            let result = AssertUnwindSafe(create_client.send_request::<request::WorkDoneProgressCreate>(
                WorkDoneProgressCreateParams {
                    token: create_token,
                },
            ))
            .catch_unwind()
            .await;
            match result {
                Ok(Ok(())) => {},
                Ok(Err(error)) => debug!("workDoneProgress/create failed: {error}"),
                Err(_) => warn!("workDoneProgress/create panicked (client may have disconnected)"),
            }
        });

        let send_ok = AssertUnwindSafe(client.send_notification::<notification::Progress>(ProgressParams {
            token: token.clone(),
            value: ProgressParamsValue::WorkDone(WorkDoneProgress::Begin(WorkDoneProgressBegin {
                title: display_title.clone(),
                cancellable: Some(false),
                message,
                percentage: None,
            })),
        }))
        .catch_unwind()
        .await;

        if send_ok.is_err() {
            warn!("progress begin notification panicked (client may have disconnected)");
            return Self {
                client: None,
                token: None,
            };
        }

        debug!("progress begin: {display_title}");

        Self {
            client: Some(client.clone()),
            token: Some(token),
        }
    }

    pub async fn end(
        mut self,
        message: Option<String>,
    ) {
        let Some(client) = self.client.take() else {
            return;
        };
        let Some(token) = self.token.take() else {
            return;
        };

        debug!("progress end: {token:?}");

        let _ = AssertUnwindSafe(client.send_notification::<notification::Progress>(ProgressParams {
            token,
            value: ProgressParamsValue::WorkDone(WorkDoneProgress::End(WorkDoneProgressEnd {
                message,
            })),
        }))
        .catch_unwind()
        .await;
    }
}

impl Drop for ProgressToken {
    fn drop(&mut self) {
        if let (Some(client), Some(token)) = (self.client.take(), self.token.take()) {
            debug!("progress cancelled (drop): {token:?}");
            tokio::spawn(async move {
                let _ = AssertUnwindSafe(client.send_notification::<notification::Progress>(ProgressParams {
                    token,
                    value: ProgressParamsValue::WorkDone(WorkDoneProgress::End(WorkDoneProgressEnd {
                        message: Some("Cancelled".to_string()),
                    })),
                }))
                .catch_unwind()
                .await;
            });
        }
    }
}

fn progress_token_name(
    title: &str,
    id: u64,
) -> String {
    format!("shaderlabAnalyzer/{}/{id}", title.trim())
}

fn prefixed_progress_title(title: &str) -> String {
    let trimmed = title.trim();
    if trimmed.starts_with(PROGRESS_TITLE_PREFIX) {
        return trimmed.to_owned();
    }
    format!("{PROGRESS_TITLE_PREFIX} {trimmed}")
}

/// Wrap `work` in a begin/end pair. `work` yields its result and the
/// message shown when the session ends.
pub async fn run_with_progress<F, T>(
    client: &Client,
    title: &str,
    begin_message: Option<String>,
    work: F,
) -> T
where
    F: std::future::Future<Output = (T, Option<String>)>,
{
    let token = ProgressToken::begin(client, title, begin_message).await;
    let (result, end_message) = work.await;
    token.end(end_message).await;
    result
}

#[cfg(test)]
#[path = "../tests/src/progress_tests.rs"]
mod tests;
