//! Performing a configured request.
//!
//! The wire request is dispatched on its own tokio task, and the caller waits
//! on the first of three events: the dispatch result, the request timeout, or
//! the cancellation signal. Whatever loses is dropped; a late result is simply
//! discarded.

use std::time::Duration;

use base64::Engine;
use bytes::Bytes;
use tokio::sync::oneshot;
use tracing::{Instrument, debug, info_span, warn};
use url::Url;

use crate::{Decode, Error, HttpClient, Request, Response, Result, Rekwest, decode};

impl<C> Rekwest<C>
where
    C: HttpClient + Clone + 'static,
{
    /// Perform the request and decode the response into every destination.
    ///
    /// Each destination gets the whole body, decoded according to the
    /// configured [`crate::ResponseFormat`]. Decoding failures don't stop the
    /// remaining destinations; they are all reported together.
    ///
    /// # Errors
    ///
    /// - the errors recorded while configuring, without sending anything
    /// - [`Error::RequestTimeout`], [`Error::Canceled`] or
    ///   [`Error::DeadlineExceeded`] when the response came too late
    /// - any transport error
    /// - [`Error::Http`] for a status of 400 or more
    /// - the accumulated decode errors, as an [`Error::Multiple`]
    pub async fn execute(&mut self, destinations: &mut [&mut dyn Decode]) -> Result<()> {
        let span = info_span!("http_request", method = %self.method, url = %self.url);
        self.perform(destinations).instrument(span).await
    }

    async fn perform(&mut self, destinations: &mut [&mut dyn Decode]) -> Result<()> {
        if let Some(err) = self.errors.as_error() {
            debug!(error = %err, "invalid configuration, request not sent");
            return Err(err);
        }

        let response = self.dispatch().await?;

        if response.is_error() {
            let message = String::from_utf8_lossy(response.body()).into_owned();
            warn!(status = response.status(), "request failed");
            return Err(Error::http_with_body(
                response.status(),
                message,
                response.into_body(),
            ));
        }

        self.decode_into(&response, destinations);
        self.errors.to_result()
    }

    async fn dispatch(&self) -> Result<Response<Bytes>> {
        let request = self.wire_request();
        let client = self.client.clone();
        let (tx, rx) = oneshot::channel();

        debug!("dispatching request");
        tokio::spawn(async move {
            let result = match request {
                Ok(request) => client.execute(request).await,
                Err(err) => Err(err),
            };
            // Nobody is listening anymore once the race is lost
            let _ = tx.send(result);
        });

        let result = tokio::select! {
            err = elapsed(self.timeout) => Err(err),
            err = self.cancellation.cancelled() => Err(err),
            received = rx => received.unwrap_or_else(|_| {
                Err(Error::connection("dispatch task ended without a result"))
            }),
        };

        if let Err(err) = &result {
            warn!(error = %err, "request did not complete");
        }
        result
    }

    fn wire_request(&self) -> Result<Request<Bytes>> {
        let url = Url::parse(&self.url)?;

        // Only the first value of each header is sent
        let headers = self.headers.keys().filter_map(|name| {
            self.headers.get(name).map(|value| {
                (
                    name.to_string(),
                    String::from_utf8_lossy(value.as_bytes()).into_owned(),
                )
            })
        });

        let mut builder = Request::builder(self.method.clone(), url)
            .headers(headers)
            .maybe_body(self.body.clone());

        if let Some(credentials) = &self.basic_auth {
            let encoded = base64::engine::general_purpose::STANDARD
                .encode(format!("{}:{}", credentials.username, credentials.password));
            builder = builder.header("authorization", format!("Basic {encoded}"));
        }
        if let Some(token) = &self.bearer_token {
            builder = builder.header("authorization", format!("Bearer {token}"));
        }

        Ok(builder.build())
    }

    fn decode_into(&mut self, response: &Response<Bytes>, destinations: &mut [&mut dyn Decode]) {
        for destination in destinations.iter_mut() {
            let resolution = match self.response_format.resolve(|| response.content_type()) {
                Ok(resolution) => resolution,
                Err(err) => {
                    self.errors.push(err);
                    continue;
                }
            };
            if let Some(err) = resolution.error {
                self.errors.push(err);
            }

            debug!(strategy = ?resolution.strategy, shape = destination.shape(), "decoding response");
            if let Err(err) = decode(&mut **destination, resolution.strategy, response.body()) {
                self.errors.push(err);
            }
        }
    }
}

async fn elapsed(timeout: Option<Duration>) -> Error {
    match timeout {
        Some(timeout) => {
            tokio::time::sleep(timeout).await;
            Error::RequestTimeout(timeout)
        }
        None => std::future::pending().await,
    }
}
