/*
[INPUT]:  LighterClient session state, keep-alive interval/idle settings
[OUTPUT]: Background task issuing HEAD probes to keep pooled connections warm
[POS]:    HTTP layer - connection liveness
[UPDATE]: When changing probe cadence, probe target, or cancellation
*/

use std::sync::Arc;

use tokio::runtime::Handle;
use tokio::time::{self, Instant, MissedTickBehavior};
use tokio_util::sync::CancellationToken;
use tracing::{debug, trace};

use crate::http::client::ClientInner;
use crate::http::transaction::SEND_TX_PATH;
use crate::http::{LighterClient, LighterError, Result};

impl LighterClient {
    /// Start the keep-alive task; a no-op when one is already running.
    ///
    /// Must be called from within a tokio runtime.
    pub fn start_keep_alive(&self) -> Result<()> {
        let handle = Handle::try_current()
            .map_err(|err| LighterError::Config(format!("keep-alive needs a tokio runtime: {err}")))?;

        let token = {
            let mut state = self.inner.state.lock();
            if state.keep_alive.is_some() {
                trace!(endpoint = %self.inner.endpoint, "keep-alive already running");
                return Ok(());
            }
            let token = CancellationToken::new();
            state.keep_alive = Some(token.clone());
            token
        };

        debug!(
            endpoint = %self.inner.endpoint,
            interval = ?self.inner.config.keep_alive_interval,
            "keep-alive started"
        );
        handle.spawn(run(Arc::clone(&self.inner), token));
        Ok(())
    }

    /// Stop the keep-alive task. In-flight probes are left to finish.
    pub fn stop_keep_alive(&self) {
        let token = self.inner.state.lock().keep_alive.take();
        if let Some(token) = token {
            token.cancel();
            debug!(endpoint = %self.inner.endpoint, "keep-alive stopped");
        }
    }

    pub fn is_keep_alive_running(&self) -> bool {
        self.inner.state.lock().keep_alive.is_some()
    }
}

async fn run(inner: Arc<ClientInner>, token: CancellationToken) {
    tokio::spawn(Arc::clone(&inner).touch(Instant::now()));

    let period = inner.config.keep_alive_interval;
    let mut ticker = time::interval_at(Instant::now() + period, period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

    loop {
        tokio::select! {
            biased;
            _ = token.cancelled() => break,
            tick = ticker.tick() => {
                tokio::spawn(Arc::clone(&inner).touch(tick));
            }
        }
    }
    trace!(endpoint = %inner.endpoint, "keep-alive loop exited");
}

impl ClientInner {
    /// One keep-alive tick. Returns whether a probe went out.
    ///
    /// A probe is sent only when the session has been idle for at least
    /// `keep_alive_idle` and no earlier probe is still outstanding. Its
    /// outcome is never reported. Any HTTP response counts as success and
    /// refreshes the activity timestamp, whatever its status (the probe
    /// target answers HEAD with 405); only transport errors leave it alone.
    pub(crate) async fn touch(self: Arc<Self>, now: Instant) -> bool {
        let url = {
            let mut state = self.state.lock();
            let idle = state
                .last_connect_at
                .is_none_or(|last| now.saturating_duration_since(last) >= self.config.keep_alive_idle);
            if !idle || state.probe_in_flight {
                return false;
            }
            match self.url(SEND_TX_PATH) {
                Ok(url) => {
                    state.probe_in_flight = true;
                    url
                }
                Err(err) => {
                    debug!(error = %err, "keep-alive probe skipped");
                    return false;
                }
            }
        };

        let outcome = self.http_client.head(url).send().await;

        let mut state = self.state.lock();
        state.probe_in_flight = false;
        match outcome {
            Ok(response) => {
                trace!(status = %response.status(), "keep-alive probe done");
                if state.last_connect_at.is_none_or(|last| last < now) {
                    state.last_connect_at = Some(now);
                }
            }
            Err(err) => debug!(error = %err, "keep-alive probe failed"),
        }
        true
    }
}
