//! Report-Task - abwechselnd Shadow-Report und MQTT-Publish

use crate::logging::debug;
use crate::logic::Deadline;
use crate::types::{AppStatus, DeviceIdentity, Period, Report, ReportChannel, Tick};

/// Ergebnis einer Auswertung des Report-Tasks
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportAction {
    /// Deaktiviert oder noch nicht fällig
    Idle,
    /// Publish-Zweig ohne Topic: Feuern verbraucht, nichts gesendet
    Skipped,
    /// Report muss über den Dispatcher gesendet werden
    Send(Report),
}

/// Report-Task
///
/// Der Kanal wechselt bei jedem Feuern, auch wenn der Publish-Zweig mangels
/// Topic übersprungen wird. Die Abwechslung bleibt so an die verstrichenen
/// Perioden gekoppelt.
#[derive(Debug, Clone)]
pub struct ReportTask {
    period: Period,
    deadline: Deadline,
    channel: ReportChannel,
}

impl ReportTask {
    /// Neuer Task, erstes Feuern ist sofort fällig und nutzt den Shadow-Kanal
    pub fn new(period: Period) -> Self {
        Self {
            period,
            deadline: Deadline::Due,
            channel: ReportChannel::default(),
        }
    }

    pub fn period(&self) -> Period {
        self.period
    }

    pub fn deadline(&self) -> Deadline {
        self.deadline
    }

    /// Kanal des nächsten Feuerns
    pub fn channel(&self) -> ReportChannel {
        self.channel
    }

    pub fn set_period(&mut self, period: Period) {
        self.period = period;
        self.deadline = Deadline::Due;
    }

    /// Wertet den Task zum Zeitpunkt `now` aus
    ///
    /// Bei deaktivierter Periode passiert nichts, auch der Kanal bleibt stehen.
    pub fn evaluate(
        &mut self,
        now: Tick,
        ticks_per_ms: u32,
        identity: &DeviceIdentity,
        uptime_ms: u32,
        blink_period: Period,
    ) -> ReportAction {
        let Period::Millis(period_ms) = self.period else {
            return ReportAction::Idle;
        };
        if !self.deadline.is_reached(now) {
            return ReportAction::Idle;
        }

        let status = AppStatus::new(identity, uptime_ms, blink_period);
        let action = match (self.channel, identity.publish_topic) {
            (ReportChannel::Shadow, _) => ReportAction::Send(Report::Shadow { app: status }),
            (ReportChannel::Publish, Some(topic)) => ReportAction::Send(Report::Publish {
                topic,
                qos: 0,
                message: status,
            }),
            (ReportChannel::Publish, None) => ReportAction::Skipped,
        };

        debug!("Report: Fired on {} channel", self.channel);
        self.channel = self.channel.next();
        self.deadline = Deadline::after(now, period_ms.get(), ticks_per_ms);
        action
    }
}
