use cadence::{BufferedUdpMetricSink, NopMetricSink, QueuingMetricSink, StatsdClient};
use cadence::prelude::*;
use discover_runner::JobMetrics;
use std::net::UdpSocket;
use std::time::Duration;
use tracing::warn;

/// Wraps a `cadence::StatsdClient` and exposes the counters and timings
/// named in the configuration's `statsd` section. Implements
/// [`discover_runner::JobMetrics`] so the runner can report without
/// depending on this crate.
pub struct MetricsSink {
    client: StatsdClient,
}

impl MetricsSink {
    /// Connects to `host:port` over UDP with a buffered, non-blocking sink.
    /// Falls back to a no-op sink (and logs a warning) if the socket cannot
    /// be bound, since a metrics outage must never take the service down.
    pub fn connect(prefix: &str, host: &str, port: u16) -> Self {
        let client = Self::try_connect(prefix, host, port).unwrap_or_else(|err| {
            warn!(error = %err, "statsd sink unavailable, metrics will be dropped");
            StatsdClient::from_sink(prefix, NopMetricSink)
        });
        MetricsSink { client }
    }

    fn try_connect(prefix: &str, host: &str, port: u16) -> Result<StatsdClient, std::io::Error> {
        let socket = UdpSocket::bind("0.0.0.0:0")?;
        socket.set_nonblocking(true)?;
        let udp_sink = BufferedUdpMetricSink::from((host, port), socket)?;
        let queuing_sink = QueuingMetricSink::from(udp_sink);
        Ok(StatsdClient::from_sink(prefix, queuing_sink))
    }

    pub fn incr(&self, counter: &str) {
        if let Err(err) = self.client.incr(counter) {
            warn!(error = %err, counter, "failed to send counter");
        }
    }

    pub fn time(&self, metric: &str, elapsed: Duration) {
        if let Err(err) = self.client.time(metric, elapsed.as_millis() as u64) {
            warn!(error = %err, metric, "failed to send timing");
        }
    }

    pub fn incr_get_simhash_year_request(&self) {
        self.incr("get-simhash-year-request");
    }

    pub fn incr_calculate_simhash_year_request(&self) {
        self.incr("calculate-simhash-year-request");
    }

    pub fn incr_status_request(&self) {
        self.incr("status-request");
    }
}

impl JobMetrics for MetricsSink {
    fn incr_download_capture(&self) {
        self.incr("download-capture");
    }

    fn incr_download_error(&self) {
        self.incr("download-error");
    }

    fn incr_calculate_simhash(&self) {
        self.incr("calculate-simhash");
    }

    fn incr_multiple_consecutive_errors(&self) {
        self.incr("multiple-consecutive-errors");
    }

    fn time_task_wait(&self, elapsed: Duration) {
        self.time("task-wait", elapsed);
    }

    fn time_task_duration(&self, elapsed: Duration) {
        self.time("task-duration", elapsed);
    }
}
