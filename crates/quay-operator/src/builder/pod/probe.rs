use std::time::Duration;

use k8s_openapi::{
    api::core::v1::{ExecAction, HTTPGetAction, Probe, TCPSocketAction},
    apimachinery::pkg::util::intstr::IntOrString,
};

/// A builder to build [`Probe`] objects.
///
/// Only the settings which were explicitly configured end up in the [`Probe`], everything else is
/// left to the Kubernetes defaults. This keeps the produced objects identical to what the API
/// server returns and avoids needless updates.
#[derive(Debug)]
pub struct ProbeBuilder<Action> {
    action: Action,

    success_threshold: Option<i32>,
    failure_threshold: Option<i32>,
    timeout: Option<Duration>,
    initial_delay: Option<Duration>,
    period: Option<Duration>,
}

impl Default for ProbeBuilder<()> {
    fn default() -> Self {
        Self {
            action: (),
            success_threshold: None,
            failure_threshold: None,
            timeout: None,
            initial_delay: None,
            period: None,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum ProbeAction {
    Exec(ExecAction),
    HttpGet(HTTPGetAction),
    TcpSocket(TCPSocketAction),
}

impl ProbeBuilder<()> {
    /// This probe action executes the specified command
    pub fn with_exec_action_helper(
        self,
        command: impl IntoIterator<Item = impl Into<String>>,
    ) -> ProbeBuilder<ProbeAction> {
        self.with_action(ProbeAction::Exec(ExecAction {
            command: Some(command.into_iter().map(Into::into).collect()),
        }))
    }

    /// This probe action does an HTTP GET request against `path` on the specified port.
    pub fn with_http_get_action_helper(
        self,
        port: u16,
        path: impl Into<String>,
        scheme: Option<impl Into<String>>,
    ) -> ProbeBuilder<ProbeAction> {
        self.with_action(ProbeAction::HttpGet(HTTPGetAction {
            path: Some(path.into()),
            port: IntOrString::Int(port.into()),
            scheme: scheme.map(Into::into),
            ..HTTPGetAction::default()
        }))
    }

    /// This probe action opens a TCP connection to the specified port.
    pub fn with_tcp_socket_action_helper(self, port: u16) -> ProbeBuilder<ProbeAction> {
        self.with_action(ProbeAction::TcpSocket(TCPSocketAction {
            port: IntOrString::Int(port.into()),
            ..TCPSocketAction::default()
        }))
    }

    /// Action-specific functions (e.g. [`Self::with_exec_action_helper`]) are recommended instead.
    pub fn with_action(self, action: ProbeAction) -> ProbeBuilder<ProbeAction> {
        let Self {
            action: (),
            success_threshold,
            failure_threshold,
            timeout,
            initial_delay,
            period,
        } = self;

        ProbeBuilder {
            action,
            success_threshold,
            failure_threshold,
            timeout,
            initial_delay,
            period,
        }
    }
}

impl ProbeBuilder<ProbeAction> {
    /// How often the probe must succeed before being considered successful.
    pub fn with_success_threshold(mut self, success_threshold: i32) -> Self {
        self.success_threshold = Some(success_threshold);
        self
    }

    /// How often the probe must fail before being considered failed.
    pub fn with_failure_threshold(mut self, failure_threshold: i32) -> Self {
        self.failure_threshold = Some(failure_threshold);
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// The time the kubelet waits after container start before running the first probe.
    pub fn with_initial_delay(mut self, initial_delay: Duration) -> Self {
        self.initial_delay = Some(initial_delay);
        self
    }

    /// The period/interval in which the probe should be executed.
    pub fn with_period(mut self, period: Duration) -> Self {
        self.period = Some(period);
        self
    }

    pub fn build(self) -> Probe {
        let mut probe = Probe {
            failure_threshold: self.failure_threshold,
            success_threshold: self.success_threshold,
            initial_delay_seconds: self.initial_delay.map(as_seconds),
            period_seconds: self.period.map(as_seconds),
            timeout_seconds: self.timeout.map(as_seconds),
            ..Probe::default()
        };

        match self.action {
            ProbeAction::Exec(exec_action) => probe.exec = Some(exec_action),
            ProbeAction::HttpGet(http_get_action) => probe.http_get = Some(http_get_action),
            ProbeAction::TcpSocket(tcp_socket_action) => probe.tcp_socket = Some(tcp_socket_action),
        }

        probe
    }
}

// Probe durations are whole seconds in the Kubernetes API. Durations beyond `i32::MAX` seconds
// have no real world meaning, so we saturate instead of failing the builder.
fn as_seconds(duration: Duration) -> i32 {
    i32::try_from(duration.as_secs()).unwrap_or(i32::MAX)
}
